//! Match-probability bar chart.
//!
//! One horizontal bar per value of the chosen attribute plus a "Total" bar,
//! on a fixed `[0, domain_max]` probability axis. Hovering a bar explains
//! it in the shared tooltip.

mod component;
mod state;

pub use component::BarChart;
pub use state::{
	AxisTick, BarChartConfig, BarChartState, BarDatum, BarRect, TOTAL_LABEL, derive_bar_rows,
};
