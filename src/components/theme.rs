//! Visual theming shared by the charts.
//!
//! Provides the color type, the categorical palette, and per-view style.

/// The ten-color categorical scheme used for node and legend colors.
pub const CATEGORY10: [&str; 10] = [
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Graph canvas style.
#[derive(Clone, Debug)]
pub struct GraphStyle {
	pub background: Color,
	/// Node outline.
	pub stroke: Color,
	/// Ring drawn around the hovered node.
	pub hover_ring: Color,
}

/// Bar chart style.
#[derive(Clone, Debug)]
pub struct BarStyle {
	pub fill: Color,
	pub axis: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub graph: GraphStyle,
	pub bar: BarStyle,
	/// Marker radius in the legend.
	pub legend_radius: f64,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			graph: GraphStyle {
				background: Color::rgb(255, 255, 255),
				stroke: Color::rgb(0, 0, 0),
				hover_ring: Color::rgba(0, 0, 0, 0.6),
			},
			bar: BarStyle {
				fill: Color::rgb(0, 128, 0),
				axis: Color::rgb(0, 0, 0),
			},
			legend_radius: 8.0,
		}
	}
}
