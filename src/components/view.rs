//! Shared view geometry and lifecycle.

use serde::Deserialize;

/// Space reserved around the plot area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

impl Margin {
	pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
		Self {
			top,
			right,
			bottom,
			left,
		}
	}

	pub const fn uniform(v: f64) -> Self {
		Self::new(v, v, v, v)
	}
}

/// Container size and margins of a view.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
	pub container_width: f64,
	pub container_height: f64,
	pub margin: Margin,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			container_width: 800.0,
			container_height: 600.0,
			margin: Margin::uniform(20.0),
		}
	}
}

impl ViewConfig {
	/// Drawable width inside the margins.
	pub fn width(&self) -> f64 {
		(self.container_width - self.margin.left - self.margin.right).max(0.0)
	}

	/// Drawable height inside the margins.
	pub fn height(&self) -> f64 {
		(self.container_height - self.margin.top - self.margin.bottom).max(0.0)
	}

	/// SVG transform moving the origin to the top-left of the plot area.
	pub fn chart_transform(&self) -> String {
		format!("translate({},{})", self.margin.left, self.margin.top)
	}
}

/// Lifecycle every chart exposes to its host.
///
/// `init_vis` runs once, `update_vis` whenever an input changes, and
/// `render_vis` rebuilds the view's scene (the plain data the component
/// draws). Hosts never call `render_vis` directly; `update_vis` does.
pub trait VisView {
	fn config(&self) -> &ViewConfig;

	/// One-time setup of scales and static scene parts.
	fn init_vis(&mut self);

	/// Recompute derived data from the current inputs, then render.
	fn update_vis(&mut self);

	/// Rebuild the scene from derived data.
	fn render_vis(&mut self);

	fn width(&self) -> f64 {
		self.config().width()
	}

	fn height(&self) -> f64 {
		self.config().height()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_inner_size() {
		let config = ViewConfig {
			container_width: 500.0,
			container_height: 440.0,
			margin: Margin::new(90.0, 20.0, 20.0, 160.0),
		};
		assert_eq!(config.width(), 320.0);
		assert_eq!(config.height(), 330.0);
		assert_eq!(config.chart_transform(), "translate(160,90)");
	}

	#[test]
	fn test_margins_larger_than_container() {
		let config = ViewConfig {
			container_width: 10.0,
			container_height: 10.0,
			margin: Margin::uniform(20.0),
		};
		assert_eq!(config.width(), 0.0);
	}
}
