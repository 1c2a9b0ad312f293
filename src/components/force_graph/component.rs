//! Leptos component wrapping the participant graph canvas.
//!
//! The component creates a canvas element and wires mouse/wheel handlers for
//! node dragging, panning, zooming, and hover tooltips. An animation loop
//! runs via `requestAnimationFrame`, stepping the simulation and redrawing
//! each frame.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ForceGraphState;
use super::types::ForceConfig;
use crate::components::scales::OrdinalScale;
use crate::components::theme::Theme;
use crate::components::tooltip::TooltipState;
use crate::components::view::{ViewConfig, VisView};
use crate::data::{Attribute, GraphData};

/// Graph state plus what the renderer needs every frame.
struct GraphContext {
	state: ForceGraphState,
	ctx: CanvasRenderingContext2d,
	theme: Theme,
}

fn canvas_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.map_err(|e| anyhow!("{e:?}"))?
		.context("canvas has no 2d context")?
		.dyn_into()
		.map_err(|_| anyhow!("2d context has unexpected type"))
}

/// Pointer position relative to the canvas.
fn local_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn request_frame(cb: &Closure<dyn FnMut()>) {
	if let Some(window) = web_sys::window() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Participants as colored nodes, pulled together by the selected
/// attraction metric. Nodes can be dragged; hovering shows who they are.
#[component]
pub fn ForceDirectedGraph(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] attribute: Signal<Attribute>,
	/// `"like"` or `"match"`; anything else keeps the current mode.
	#[prop(into)]
	distance: Signal<String>,
	tooltip: RwSignal<Option<TooltipState>>,
	#[prop(default = ViewConfig::default())] config: ViewConfig,
	#[prop(default = ForceConfig::default())] forces: ForceConfig,
	/// Receives the node color scale after every update.
	#[prop(optional)]
	color_scale: Option<RwSignal<OrdinalScale>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init) = (context.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (data, attribute, distance) = (data.get(), attribute.get(), distance.get());

		let publish = |scale: &OrdinalScale| {
			if let Some(signal) = color_scale {
				signal.set(scale.clone());
			}
		};

		let updated = context_init.borrow_mut().as_mut().map(|c| {
			c.state.set_data(data.clone());
			c.state.set_attribute(attribute);
			c.state.set_node_distance(&distance);
			c.state.update_vis();
			c.state.color_scale().clone()
		});
		if let Some(scale) = updated {
			publish(&scale);
			return;
		}

		info!(
			"match-vis: graph with {} participants, {} links",
			data.participants.len(),
			data.links.len()
		);
		let mut state = ForceGraphState::new(config, forces, data, attribute);
		state.init_vis();
		state.set_node_distance(&distance);
		state.update_vis();
		publish(state.color_scale());

		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(config.container_width as u32);
		canvas.set_height(config.container_height as u32);
		let ctx = match canvas_context(&canvas) {
			Ok(ctx) => ctx,
			Err(e) => {
				warn!("match-vis: graph disabled: {e:#}");
				return;
			}
		};

		*context_init.borrow_mut() = Some(GraphContext {
			state,
			ctx,
			theme: Theme::default(),
		});

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.step();
				render::render(&c.state, &c.ctx, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				request_frame(cb);
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			request_frame(cb);
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_position(&canvas, &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_position(&canvas, &ev);
		let hover_change = {
			let mut guard = context_mm.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			c.state.pointer_move(x, y);
			if c.state.is_dragging() {
				None
			} else {
				let hovered = c.state.node_at_position(x, y);
				c.state
					.set_hover(hovered)
					.then(|| hovered.and_then(|i| c.state.describe(i)))
			}
		};
		match hover_change {
			Some(Some(content)) => tooltip.set(Some(TooltipState {
				page_x: ev.page_x() as f64,
				page_y: ev.page_y() as f64,
				content,
			})),
			Some(None) => tooltip.set(None),
			None => {}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_up();
			c.state.set_hover(None);
		}
		tooltip.set(None);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_position(&canvas, &ev);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
