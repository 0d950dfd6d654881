use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{LineChartState, MARGIN, X_TICKS, Y_TICKS};
use crate::components::charts::canvas;
use crate::components::charts::palette::{COLORS, with_alpha};
use crate::components::charts::scale::format_tick;

const AXIS_COLOR: &str = "#94a3b8";
const GRID_COLOR: &str = "#e2e8f0";
const LABEL_COLOR: &str = "#475569";

pub fn render(state: &LineChartState, ctx: &CanvasRenderingContext2d) {
	canvas::clear(ctx, state.width, state.height);
	draw_axes(state, ctx);
	let Some((start, segments)) = state.curve() else {
		return;
	};
	let line = COLORS[0];
	let (x0, x1) = state.x.range();
	let (base, top) = state.y.range();

	// entrance: reveal the plot left to right
	ctx.save();
	ctx.begin_path();
	ctx.rect(x0, 0.0, (x1 - x0) * state.reveal(), state.height);
	ctx.clip();

	ctx.begin_path();
	ctx.move_to(start.0, base);
	ctx.line_to(start.0, start.1);
	trace(ctx, &segments);
	let end_x = segments.last().map_or(start.0, |s| s[2].0);
	ctx.line_to(end_x, base);
	ctx.close_path();
	let gradient = ctx.create_linear_gradient(0.0, top, 0.0, base);
	let _ = gradient.add_color_stop(0.0, &with_alpha(line, 0.35));
	let _ = gradient.add_color_stop(1.0, &with_alpha(line, 0.02));
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();

	ctx.begin_path();
	ctx.move_to(start.0, start.1);
	trace(ctx, &segments);
	ctx.set_stroke_style_str(line);
	ctx.set_line_width(2.0);
	ctx.stroke();
	ctx.restore();

	if let Some(hover) = state.hover {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(4.0),
			&JsValue::from_f64(4.0),
		));
		ctx.set_stroke_style_str(AXIS_COLOR);
		ctx.set_line_width(1.0);
		ctx.begin_path();
		ctx.move_to(hover.pixel_x, top);
		ctx.line_to(hover.pixel_x, base);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.begin_path();
		let _ = ctx.arc(hover.pixel_x, hover.pixel_y, 5.0, 0.0, TAU);
		ctx.set_fill_style_str("#ffffff");
		ctx.fill();
		ctx.set_stroke_style_str(line);
		ctx.set_line_width(2.0);
		ctx.stroke();
	}
}

fn trace(ctx: &CanvasRenderingContext2d, segments: &[[(f64, f64); 3]]) {
	for [c1, c2, end] in segments {
		ctx.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1);
	}
}

fn draw_axes(state: &LineChartState, ctx: &CanvasRenderingContext2d) {
	let (x0, x1) = state.x.range();
	let (base, top) = state.y.range();
	ctx.set_font("11px sans-serif");
	ctx.set_line_width(1.0);

	ctx.set_text_align("right");
	ctx.set_text_baseline("middle");
	for tick in state.y.ticks(Y_TICKS) {
		let y = state.y.map(tick);
		ctx.set_stroke_style_str(GRID_COLOR);
		ctx.begin_path();
		ctx.move_to(x0, y);
		ctx.line_to(x1, y);
		ctx.stroke();
		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&format_tick(tick), x0 - 8.0, y);
	}

	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	for tick in state.x.ticks(X_TICKS) {
		let x = state.x.map(tick);
		let _ = ctx.fill_text(&format_tick(tick), x, base + 8.0);
	}

	ctx.set_stroke_style_str(AXIS_COLOR);
	ctx.begin_path();
	ctx.move_to(x0, top);
	ctx.line_to(x0, base);
	ctx.line_to(x1, base);
	ctx.stroke();

	ctx.save();
	let _ = ctx.translate(14.0, MARGIN.top + (base - top) / 2.0);
	let _ = ctx.rotate(-TAU / 4.0);
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(state.metric.label(), 0.0, 0.0);
	ctx.restore();
}
