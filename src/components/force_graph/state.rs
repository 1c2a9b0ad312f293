//! Graph view state and interaction tracking.
//!
//! Wraps the force simulation with the participants it positions, the
//! categorical coloring, the attraction mode that sets link lengths, and
//! the pan/zoom, drag, and hover state driven by pointer events.

use std::collections::HashMap;

use log::debug;

use super::scale::{ScaleConfig, ScaledValues};
use super::simulation::{SimLink, SimNode, Simulation, SimulationEvent, SimulationParameters};
use super::types::{AttractionMode, ForceConfig, LinkDistance};
use crate::components::scales::OrdinalScale;
use crate::components::tooltip::{Segment, TooltipContent};
use crate::components::view::{ViewConfig, VisView};
use crate::data::{Attribute, GraphData, unique};

/// Alpha the simulation is held at while a node is dragged.
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// One drawn node.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
	pub id: u32,
	pub x: f64,
	pub y: f64,
	pub fill: String,
}

/// Pan and zoom applied to the plot area.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor, clamped to 0.1..10.0.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Phase of a drag gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
	Start,
	Drag,
	End,
}

/// A drag gesture update in graph coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEvent {
	pub phase: DragPhase,
	pub x: f64,
	pub y: f64,
	/// Other drag gestures in progress.
	pub active: usize,
}

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

/// Tracks an in-progress background pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Participant graph view state.
pub struct ForceGraphState {
	config: ViewConfig,
	forces: ForceConfig,
	pub scale: ScaleConfig,
	data: GraphData,
	attribute: Attribute,
	distance: AttractionMode,
	simulation: Simulation,
	color_scale: OrdinalScale,
	color_domain: Vec<String>,
	/// Participant id of each simulation node, in node order.
	bound_ids: Vec<u32>,
	circles: Vec<Circle>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	hovered: Option<usize>,
}

impl ForceGraphState {
	pub fn new(
		config: ViewConfig,
		forces: ForceConfig,
		data: GraphData,
		attribute: Attribute,
	) -> Self {
		let simulation = Simulation::new(SimulationParameters {
			charge_strength: -forces.repel_strength,
			..Default::default()
		});
		Self {
			config,
			forces,
			scale: ScaleConfig::default(),
			data,
			attribute,
			distance: AttractionMode::default(),
			simulation,
			color_scale: OrdinalScale::category10(),
			color_domain: Vec::new(),
			bound_ids: Vec::new(),
			circles: Vec::new(),
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
		}
	}

	pub fn set_data(&mut self, data: GraphData) {
		self.data = data;
	}

	/// Attribute used for coloring. Takes effect on the next `update_vis`.
	pub fn set_attribute(&mut self, attribute: Attribute) {
		self.attribute = attribute;
	}

	pub fn attribute(&self) -> Attribute {
		self.attribute
	}

	/// Select the attraction metric by name. Anything other than `"like"` or
	/// `"match"` is ignored.
	pub fn set_node_distance(&mut self, mode: &str) {
		match mode.parse() {
			Ok(mode) => self.distance = mode,
			Err(()) => debug!("match-vis: ignoring unknown attraction mode {mode:?}"),
		}
	}

	pub fn attraction_mode(&self) -> AttractionMode {
		self.distance
	}

	/// Link length function for the current attraction mode.
	pub fn node_distance(&self) -> LinkDistance {
		LinkDistance::new(self.distance, &self.forces)
	}

	pub fn simulation(&self) -> &Simulation {
		&self.simulation
	}

	pub fn color_domain(&self) -> &[String] {
		&self.color_domain
	}

	pub fn color_scale(&self) -> &OrdinalScale {
		&self.color_scale
	}

	pub fn circles(&self) -> &[Circle] {
		&self.circles
	}

	pub fn hovered(&self) -> Option<usize> {
		self.hovered
	}

	/// Advance the simulation by one frame and sync circles on tick.
	pub fn step(&mut self) -> Option<SimulationEvent> {
		let event = self.simulation.step();
		match event {
			Some(SimulationEvent::Tick) => self.on_tick(),
			Some(SimulationEvent::Settled) => {
				self.on_tick();
				debug!("match-vis: layout settled");
			}
			None => {}
		}
		event
	}

	/// Copy simulated positions into the drawn circles.
	fn on_tick(&mut self) {
		for (circle, node) in self.circles.iter_mut().zip(self.simulation.nodes()) {
			circle.x = node.x;
			circle.y = node.y;
		}
	}

	/// Screen position relative to the canvas, to graph coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		let m = &self.config.margin;
		(
			(sx - m.left - self.transform.x) / self.transform.k,
			(sy - m.top - self.transform.y) / self.transform.k,
		)
	}

	pub fn scaled(&self) -> ScaledValues {
		ScaledValues::new(&self.scale, self.transform.k)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.simulation.find(gx, gy, self.scaled().hit_radius)
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<usize>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		true
	}

	/// Tooltip text for node `index`.
	pub fn describe(&self, index: usize) -> Option<TooltipContent> {
		let p = self.data.participants.get(index)?;
		Some(TooltipContent {
			heading: Some(format!("Participant {}", p.id)),
			paragraphs: vec![
				vec![Segment::plain(format!("Field: {}", Attribute::Field.decode()(p)))],
				vec![Segment::plain(format!("From: {}", Attribute::From.decode()(p)))],
			],
		})
	}

	/// Apply a drag gesture to node `index`. Pins the node while dragged and
	/// keeps the simulation warm until the last gesture ends.
	pub fn handle_drag(&mut self, index: usize, event: &DragEvent) {
		if event.phase == DragPhase::Start && event.active == 0 {
			self.simulation.set_alpha_target(DRAG_ALPHA_TARGET);
			self.simulation.restart();
		}
		if event.phase == DragPhase::End && event.active == 0 {
			self.simulation.set_alpha_target(0.0);
		}
		let Some(node) = self.simulation.node_mut(index) else {
			return;
		};
		match event.phase {
			DragPhase::Start => {
				let (x, y) = (node.x, node.y);
				node.pin(x, y);
			}
			DragPhase::Drag => node.pin(event.x, event.y),
			DragPhase::End => node.unpin(),
		}
	}

	/// Pointer pressed at screen `(sx, sy)`. Starts a node drag when over a
	/// node, otherwise a pan.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		match self.node_at_position(sx, sy) {
			Some(idx) => {
				let node = self.simulation.nodes()[idx];
				self.drag = DragState {
					node_idx: Some(idx),
					start_x: sx,
					start_y: sy,
					node_start_x: node.x,
					node_start_y: node.y,
				};
				self.handle_drag(
					idx,
					&DragEvent {
						phase: DragPhase::Start,
						x: node.x,
						y: node.y,
						active: 0,
					},
				);
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	/// Pointer moved to screen `(sx, sy)`.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.drag.node_idx {
			let k = self.transform.k;
			let event = DragEvent {
				phase: DragPhase::Drag,
				x: self.drag.node_start_x + (sx - self.drag.start_x) / k,
				y: self.drag.node_start_y + (sy - self.drag.start_y) / k,
				active: 0,
			};
			self.handle_drag(idx, &event);
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Pointer released or left the canvas.
	pub fn pointer_up(&mut self) {
		if let Some((idx, node)) = self
			.drag
			.node_idx
			.take()
			.and_then(|i| self.simulation.nodes().get(i).map(|n| (i, *n)))
		{
			self.handle_drag(
				idx,
				&DragEvent {
					phase: DragPhase::End,
					x: node.x,
					y: node.y,
					active: 0,
				},
			);
		}
		self.pan.active = false;
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.node_idx.is_some()
	}

	/// Zoom by `factor` keeping screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let (px, py) = (sx - self.config.margin.left, sy - self.config.margin.top);
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = px - (px - self.transform.x) * ratio;
		self.transform.y = py - (py - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Rebuild simulation nodes from the participants. Pins survive by id.
	fn bind_nodes(&mut self) -> HashMap<u32, usize> {
		let pins: HashMap<u32, (Option<f64>, Option<f64>)> = self
			.bound_ids
			.iter()
			.zip(self.simulation.nodes())
			.filter(|(_, n)| n.is_pinned())
			.map(|(id, n)| (*id, (n.fx, n.fy)))
			.collect();

		let nodes = self
			.data
			.participants
			.iter()
			.map(|p| {
				let mut node = SimNode::unplaced();
				if let Some(&(fx, fy)) = pins.get(&p.id) {
					node.fx = fx;
					node.fy = fy;
				}
				node
			})
			.collect();
		self.simulation.set_nodes(nodes);
		self.bound_ids = self.data.participants.iter().map(|p| p.id).collect();

		self.bound_ids
			.iter()
			.enumerate()
			.map(|(i, id)| (*id, i))
			.collect()
	}

	fn bind_links(&mut self, id_to_idx: &HashMap<u32, usize>) {
		let distance = self.node_distance();
		let links: Vec<SimLink> = self
			.data
			.links
			.iter()
			.filter_map(|l| {
				let (Some(&source), Some(&target)) =
					(id_to_idx.get(&l.source), id_to_idx.get(&l.target))
				else {
					return None;
				};
				let distance = distance.distance(l);
				if !distance.is_finite() {
					return None;
				}
				Some(SimLink {
					source,
					target,
					distance,
				})
			})
			.collect();
		if links.len() < self.data.links.len() {
			debug!(
				"match-vis: skipped {} links with unknown participants or missing ratings",
				self.data.links.len() - links.len()
			);
		}
		self.simulation.set_links(links);
	}
}

impl VisView for ForceGraphState {
	fn config(&self) -> &ViewConfig {
		&self.config
	}

	fn init_vis(&mut self) {
		self.distance = AttractionMode::default();
		self.update_vis();
	}

	fn update_vis(&mut self) {
		self.color_domain = unique(&self.data.participants, self.attribute.decode());
		self.color_scale.set_domain(self.color_domain.clone());

		self.simulation
			.set_center(self.width() / 2.0, self.height() / 2.0);

		let id_to_idx = self.bind_nodes();
		self.bind_links(&id_to_idx);

		self.simulation.stop();
		self.simulation.set_alpha(1.0);
		self.simulation.restart();

		self.render_vis();
	}

	fn render_vis(&mut self) {
		let decode = self.attribute.decode();
		self.circles = self
			.data
			.participants
			.iter()
			.zip(self.simulation.nodes())
			.map(|(p, node)| Circle {
				id: p.id,
				x: node.x,
				y: node.y,
				fill: self.color_scale.apply(&decode(p)).to_string(),
			})
			.collect();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::legend::LegendState;
	use crate::components::view::Margin;
	use crate::data::{Link, Participant};

	fn participant(id: u32, field_cd: usize) -> Participant {
		Participant {
			id,
			field_cd: Some(field_cd),
			from: Some(format!("City {id}")),
			..Default::default()
		}
	}

	fn graph(links: Vec<Link>) -> ForceGraphState {
		let data = GraphData {
			participants: vec![participant(1, 1), participant(2, 2), participant(3, 1)],
			links,
		};
		let config = ViewConfig {
			container_width: 400.0,
			container_height: 300.0,
			margin: Margin::default(),
		};
		let mut state =
			ForceGraphState::new(config, ForceConfig::default(), data, Attribute::Field);
		state.init_vis();
		state
	}

	fn link(source: u32, target: u32, like: f64, matched: bool) -> Link {
		Link {
			source,
			target,
			like,
			r#match: matched,
		}
	}

	#[test]
	fn test_end_to_end_like_distance() {
		let data = GraphData {
			participants: vec![participant(1, 1), participant(2, 2)],
			links: vec![link(1, 2, 8.0, false)],
		};
		let mut state =
			ForceGraphState::new(ViewConfig::default(), ForceConfig::default(), data, Attribute::Field);
		state.init_vis();
		assert_eq!(state.attraction_mode(), AttractionMode::Like);
		assert_eq!(state.simulation().link_distances(), vec![100.0]);
	}

	#[test]
	fn test_set_node_distance() {
		let mut state = graph(vec![link(1, 2, 8.0, false)]);
		let l = link(1, 2, 8.0, false);

		state.set_node_distance("match");
		assert_eq!(state.node_distance().distance(&l), 250.0);

		state.set_node_distance("closeness");
		assert_eq!(state.attraction_mode(), AttractionMode::Match);
		assert_eq!(state.node_distance().distance(&l), 250.0);

		state.set_node_distance("like");
		assert_eq!(state.node_distance().distance(&l), 100.0);
	}

	#[test]
	fn test_mode_change_applies_on_update() {
		let mut state = graph(vec![link(1, 2, 8.0, true), link(2, 3, 2.0, false)]);
		assert_eq!(state.simulation().link_distances(), vec![100.0, 400.0]);
		state.set_node_distance("match");
		state.update_vis();
		assert_eq!(state.simulation().link_distances(), vec![0.0, 250.0]);
	}

	#[test]
	fn test_color_domain_follows_attribute() {
		let mut state = graph(Vec::new());
		assert_eq!(state.color_domain(), ["Law", "Math"]);
		assert_eq!(state.circles()[0].fill, state.circles()[2].fill);
		assert_ne!(state.circles()[0].fill, state.circles()[1].fill);

		state.set_attribute(Attribute::From);
		state.update_vis();
		assert_eq!(state.color_domain(), ["City 1", "City 2", "City 3"]);
	}

	#[test]
	fn test_legend_uses_graph_colors() {
		let mut state = graph(Vec::new());
		state.set_attribute(Attribute::From);
		state.update_vis();

		let mut legend = LegendState::new(ViewConfig::default());
		let scale = state.color_scale().clone();
		legend.set(scale.domain().to_vec(), scale);
		legend.update_vis();

		let labels: Vec<&str> = legend.items().iter().map(|i| i.label.as_str()).collect();
		assert_eq!(labels, ["City 1", "City 2", "City 3"]);
		for (item, circle) in legend.items().iter().zip(state.circles()) {
			assert_eq!(item.color, circle.fill);
		}
	}

	#[test]
	fn test_unknown_link_endpoints_skipped() {
		let state = graph(vec![link(1, 99, 5.0, false), link(1, 3, 5.0, false)]);
		assert_eq!(state.simulation().links().len(), 1);
	}

	#[test]
	fn test_missing_like_skipped_in_like_mode() {
		let mut state = graph(vec![link(1, 2, f64::NAN, true), link(2, 3, 6.0, false)]);
		assert_eq!(state.simulation().link_distances(), vec![200.0]);
		for _ in 0..10 {
			state.step();
		}
		assert!(state.circles().iter().all(|c| c.x.is_finite() && c.y.is_finite()));

		state.set_node_distance("match");
		state.update_vis();
		assert_eq!(state.simulation().link_distances(), vec![0.0, 250.0]);
	}

	#[test]
	fn test_tick_moves_circles() {
		let mut state = graph(vec![link(1, 2, 9.0, true)]);
		let before = state.circles().to_vec();
		assert_eq!(state.step(), Some(SimulationEvent::Tick));
		let nodes = state.simulation().nodes();
		for (circle, node) in state.circles().iter().zip(nodes) {
			assert_eq!((circle.x, circle.y), (node.x, node.y));
		}
		assert_ne!(before, state.circles());
	}

	#[test]
	fn test_update_restarts_from_full_alpha() {
		let mut state = graph(vec![link(1, 2, 9.0, true)]);
		for _ in 0..400 {
			state.step();
		}
		assert!(!state.simulation().is_running());
		state.update_vis();
		assert!(state.simulation().is_running());
		assert_eq!(state.simulation().alpha(), 1.0);
	}

	#[test]
	fn test_drag_pins_then_releases() {
		let mut state = graph(Vec::new());
		state.handle_drag(
			0,
			&DragEvent {
				phase: DragPhase::Start,
				x: 0.0,
				y: 0.0,
				active: 0,
			},
		);
		assert_eq!(state.simulation().alpha_target(), DRAG_ALPHA_TARGET);
		state.handle_drag(
			0,
			&DragEvent {
				phase: DragPhase::Drag,
				x: 10.0,
				y: 20.0,
				active: 0,
			},
		);
		state.step();
		assert_eq!((state.circles()[0].x, state.circles()[0].y), (10.0, 20.0));

		state.handle_drag(
			0,
			&DragEvent {
				phase: DragPhase::End,
				x: 10.0,
				y: 20.0,
				active: 0,
			},
		);
		assert_eq!(state.simulation().alpha_target(), 0.0);
		assert!(!state.simulation().nodes()[0].is_pinned());
	}

	#[test]
	fn test_pins_survive_update() {
		let mut state = graph(Vec::new());
		state.handle_drag(
			1,
			&DragEvent {
				phase: DragPhase::Drag,
				x: 42.0,
				y: 7.0,
				active: 0,
			},
		);
		state.update_vis();
		let node = state.simulation().nodes()[1];
		assert_eq!((node.x, node.y), (42.0, 7.0));
		assert!(!state.simulation().nodes()[0].is_pinned());
	}

	#[test]
	fn test_pointer_drag_and_pan() {
		let mut state = graph(Vec::new());
		let target = state.simulation().nodes()[2];
		state.pointer_down(target.x, target.y);
		assert!(state.is_dragging());
		state.pointer_move(target.x + 5.0, target.y - 5.0);
		let pinned = state.simulation().nodes()[2];
		assert!((pinned.fx.unwrap() - (target.x + 5.0)).abs() < 1e-9);
		assert!((pinned.fy.unwrap() - (target.y - 5.0)).abs() < 1e-9);
		state.pointer_up();
		assert!(!state.is_dragging());
		assert!(!state.simulation().nodes()[2].is_pinned());

		state.pointer_down(-500.0, -500.0);
		state.pointer_move(-490.0, -480.0);
		state.pointer_up();
		assert_eq!((state.transform.x, state.transform.y), (10.0, 20.0));
	}

	#[test]
	fn test_zoom_keeps_point_fixed() {
		let mut state = graph(Vec::new());
		let before = state.screen_to_graph(120.0, 80.0);
		state.zoom_at(120.0, 80.0, 1.1);
		let after = state.screen_to_graph(120.0, 80.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, 1.1);
		}
		assert_eq!(state.transform.k, 10.0);
	}

	#[test]
	fn test_tooltip_text() {
		let state = graph(Vec::new());
		let content = state.describe(1).unwrap();
		assert_eq!(content.plain_text(), "Participant 2\nField: Math\nFrom: City 2");
		assert!(state.describe(10).is_none());
	}

	#[test]
	fn test_hover_change() {
		let mut state = graph(Vec::new());
		assert!(state.set_hover(Some(1)));
		assert!(!state.set_hover(Some(1)));
		assert!(state.set_hover(None));
		assert_eq!(state.hovered(), None);
	}
}
