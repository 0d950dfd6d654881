use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::{LEGEND_SWATCH, RadarAxis};
use super::state::RadarState;
use crate::components::charts::canvas;
use crate::components::charts::palette::with_alpha;

const GRID_COLOR: &str = "#e6eef9";
const AXIS_COLOR: &str = "#cfe7ff";
const TEXT_COLOR: &str = "#0f172a";
const FILL_ALPHA: f64 = 0.12;
const DOT_OPACITY: f64 = 0.9;

pub fn render(state: &RadarState, ctx: &CanvasRenderingContext2d) {
	canvas::clear(ctx, state.width, state.height);
	draw_grid(state, ctx);

	let layout = &state.layout;
	ctx.set_global_alpha(state.shape_opacity());
	for shape in &layout.shapes {
		let Some(first) = shape.vertices.first() else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(first.x, first.y);
		for [c1, c2, end] in shape.outline() {
			ctx.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1);
		}
		ctx.close_path();
		ctx.set_fill_style_str(&with_alpha(shape.color, FILL_ALPHA));
		ctx.fill();
		ctx.set_stroke_style_str(shape.color);
		ctx.set_line_width(2.0);
		ctx.stroke();
	}

	ctx.set_global_alpha(DOT_OPACITY);
	for (s, shape) in layout.shapes.iter().enumerate() {
		ctx.set_fill_style_str(shape.color);
		for (v, vertex) in shape.vertices.iter().enumerate() {
			ctx.begin_path();
			let _ = ctx.arc(vertex.x, vertex.y, state.dot_radius((s, v)), 0.0, TAU);
			ctx.fill();
		}
	}
	ctx.set_global_alpha(1.0);

	draw_legend(state, ctx);
}

fn draw_grid(state: &RadarState, ctx: &CanvasRenderingContext2d) {
	let layout = &state.layout;
	let (cx, cy) = layout.center;
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(2.0),
		&JsValue::from_f64(2.0),
	));
	ctx.set_stroke_style_str(GRID_COLOR);
	ctx.set_line_width(1.0);
	for r in layout.grid_radii() {
		ctx.begin_path();
		let _ = ctx.arc(cx, cy, r, 0.0, TAU);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	ctx.set_stroke_style_str(AXIS_COLOR);
	ctx.set_fill_style_str(TEXT_COLOR);
	ctx.set_font("11px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for (i, axis) in RadarAxis::ALL.into_iter().enumerate() {
		let (x, y) = layout.axis_end(i);
		ctx.begin_path();
		ctx.move_to(cx, cy);
		ctx.line_to(x, y);
		ctx.stroke();
		let (lx, ly) = layout.label_anchor(i);
		let _ = ctx.fill_text(axis.label(), lx, ly);
	}
}

fn draw_legend(state: &RadarState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("left");
	ctx.set_text_baseline("middle");
	for (i, shape) in state.layout.shapes.iter().enumerate() {
		let (x, y) = state.layout.legend_row(i);
		ctx.set_fill_style_str(shape.color);
		ctx.fill_rect(x, y, LEGEND_SWATCH, LEGEND_SWATCH);
		ctx.set_fill_style_str(TEXT_COLOR);
		let _ = ctx.fill_text(&shape.sector, x + LEGEND_SWATCH + 6.0, y + LEGEND_SWATCH / 2.0);
	}
}
