//! Force-directed participant graph.
//!
//! Renders participants as colored nodes on an HTML canvas with:
//! - a force simulation whose link lengths follow the chosen attraction mode
//!   (`like` scores or mutual `match`)
//! - node dragging that pins a node until released
//! - pan, zoom, and hover tooltips
//!
//! # Example
//!
//! ```ignore
//! use match_vis::components::force_graph::ForceDirectedGraph;
//!
//! let tooltip = RwSignal::new(None);
//! view! {
//!     <ForceDirectedGraph
//!         data=data
//!         attribute=Attribute::Field
//!         distance="like".to_string()
//!         tooltip=tooltip
//!     />
//! }
//! ```

mod component;
mod render;
pub mod scale;
pub mod simulation;
mod state;
mod types;

pub use component::ForceDirectedGraph;
pub use state::{Circle, DragEvent, DragPhase, ForceGraphState, ViewTransform};
pub use types::{AttractionMode, ForceConfig, LinkDistance};
