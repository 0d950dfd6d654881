use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::state::DonutState;
use crate::components::charts::canvas;
use crate::components::charts::scale::canvas_angle;

const SLICE_OPACITY: f64 = 0.95;

pub fn render(state: &DonutState, ctx: &CanvasRenderingContext2d) {
	canvas::clear(ctx, state.width, state.height);
	let layout = &state.layout;
	let (cx, cy) = layout.center;

	for (i, slice) in layout.slices.iter().enumerate() {
		let (start, end) = state.swept(i);
		if end <= start {
			continue;
		}
		let outer = layout.outer + state.grow(i);
		ctx.begin_path();
		let _ = ctx.arc(cx, cy, outer, canvas_angle(start), canvas_angle(end));
		let _ = ctx.arc_with_anticlockwise(
			cx,
			cy,
			layout.inner,
			canvas_angle(end),
			canvas_angle(start),
			true,
		);
		ctx.close_path();
		ctx.set_global_alpha(SLICE_OPACITY);
		ctx.set_fill_style_str(slice.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);
		ctx.set_stroke_style_str("#ffffff");
		ctx.set_line_width(1.5);
		ctx.stroke();
	}

	ctx.begin_path();
	let _ = ctx.arc(cx, cy, (layout.inner - 6.0).max(0.0), 0.0, TAU);
	ctx.set_fill_style_str("#ffffff");
	ctx.fill();

	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font("11px sans-serif");
	ctx.set_fill_style_str("#ffffff");
	for i in 0..layout.slices.len() {
		if let Some(label) = layout.label(i) {
			let (x, y) = layout.centroid(i);
			let _ = ctx.fill_text(&label, x, y);
		}
	}

	ctx.set_fill_style_str("#0f172a");
	ctx.set_font("bold 14px sans-serif");
	let _ = ctx.fill_text(&format!("Top {}", layout.slices.len()), cx, cy - 7.0);
	ctx.set_fill_style_str("#64748b");
	ctx.set_font("11px sans-serif");
	let _ = ctx.fill_text("topics", cx, cy + 10.0);
}
