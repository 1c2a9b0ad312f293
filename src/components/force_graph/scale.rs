//! Zoom-dependent sizes for graph visuals.
//!
//! The canvas is drawn in world space after the pan/zoom transform, so a
//! size that should stay fixed on screen must be divided by the zoom `k`.

/// World-space size whose on-screen size is kept within bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenClamp {
	pub min_screen: f64,
	pub max_screen: f64,
}

impl ScreenClamp {
	/// World-space size for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		base.clamp(self.min_screen / k, self.max_screen / k)
	}
}

/// Base sizes and how they scale.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node circle radius in world units.
	pub node_radius: f64,
	pub node_clamp: ScreenClamp,
	/// Pointer distance that still counts as touching a node.
	pub hit_radius: f64,
	/// Outline width in screen pixels.
	pub stroke_width: f64,
	/// Hover ring width in screen pixels.
	pub ring_width: f64,
	/// Gap between node edge and hover ring in screen pixels.
	pub ring_offset: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 4.0,
			node_clamp: ScreenClamp {
				min_screen: 2.0,
				max_screen: 24.0,
			},
			hit_radius: 8.0,
			stroke_width: 1.0,
			ring_width: 1.5,
			ring_offset: 2.0,
		}
	}
}

/// Sizes resolved for one zoom level, in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledValues {
	pub node_radius: f64,
	pub hit_radius: f64,
	pub stroke_width: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_radius = config.node_clamp.apply(config.node_radius, k);
		Self {
			node_radius,
			// never smaller than the circle itself
			hit_radius: config
				.node_clamp
				.apply(config.hit_radius, k)
				.max(node_radius),
			stroke_width: config.stroke_width / k,
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_screen_clamp() {
		let clamped = ScreenClamp {
			min_screen: 2.0,
			max_screen: 24.0,
		};
		// zoomed far out: radius grows in world space to stay 2px on screen
		assert_eq!(clamped.apply(4.0, 0.1), 20.0);
		assert_eq!(clamped.apply(4.0, 1.0), 4.0);
		assert_eq!(clamped.apply(4.0, 10.0), 2.4);
	}

	#[test]
	fn test_scaled_values_at_unit_zoom() {
		let v = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert_eq!(v.node_radius, 4.0);
		assert_eq!(v.hit_radius, 8.0);
		assert_eq!(v.stroke_width, 1.0);
	}
}
