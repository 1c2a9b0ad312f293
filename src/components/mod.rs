//! Visualization components and the view plumbing they share.

pub mod bar_chart;
pub mod force_graph;
pub mod legend;
pub mod scales;
pub mod theme;
pub mod tooltip;
pub mod view;
