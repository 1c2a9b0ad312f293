//! Canvas rendering for the participant graph.
//!
//! Background in screen space, then every node in graph space under the
//! margin offset and pan/zoom transform. Links drive the layout but are
//! not drawn.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;
use crate::components::theme::Theme;
use crate::components::view::VisView;

/// Draws the current scene of `state` onto `ctx`.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let config = state.config();
	let (w, h) = (config.container_width, config.container_height);

	ctx.set_fill_style_str(&theme.graph.background.to_css());
	ctx.fill_rect(0.0, 0.0, w, h);

	let scale = state.scaled();
	let t = &state.transform;

	ctx.save();
	let _ = ctx.translate(config.margin.left + t.x, config.margin.top + t.y);
	let _ = ctx.scale(t.k, t.k);

	ctx.set_stroke_style_str(&theme.graph.stroke.to_css());
	ctx.set_line_width(scale.stroke_width);
	for circle in state.circles() {
		ctx.begin_path();
		let _ = ctx.arc(circle.x, circle.y, scale.node_radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&circle.fill);
		ctx.fill();
		ctx.stroke();
	}

	if let Some(circle) = state.hovered().and_then(|i| state.circles().get(i)) {
		ctx.begin_path();
		let _ = ctx.arc(
			circle.x,
			circle.y,
			scale.node_radius + scale.ring_offset,
			0.0,
			2.0 * PI,
		);
		ctx.set_stroke_style_str(&theme.graph.hover_ring.to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
	}

	ctx.restore();
}
