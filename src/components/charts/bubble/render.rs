use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::{AXIS_TICKS, LEGEND_SWATCH};
use super::state::BubbleState;
use crate::components::charts::canvas;
use crate::components::charts::palette::with_alpha;
use crate::components::charts::scale::format_tick;

const AXIS_COLOR: &str = "#94a3b8";
const LABEL_COLOR: &str = "#475569";

/// One bubble as it will be painted.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleShape {
	pub index: usize,
	pub cx: f64,
	pub cy: f64,
	pub r: f64,
	pub fill: String,
	pub stroke_width: f64,
}

/// Bubbles in paint order; the hovered one goes last so it sits on top.
pub fn scene(state: &BubbleState) -> Vec<BubbleShape> {
	let styles = state.styles.values();
	let mut order: Vec<usize> = (0..state.data.len()).collect();
	if let Some(h) = state.interaction.hover {
		order.retain(|&i| i != h);
		order.push(h);
	}
	order
		.into_iter()
		.filter_map(|i| {
			let r = state.radius(i);
			if r <= 0.0 {
				return None;
			}
			let style = styles.get(i)?;
			let placed = state.layout.placed[i];
			Some(BubbleShape {
				index: i,
				cx: placed.cx,
				cy: placed.cy,
				r,
				fill: with_alpha(state.color(i), style.opacity),
				stroke_width: style.stroke_width,
			})
		})
		.collect()
}

pub fn render(state: &BubbleState, ctx: &CanvasRenderingContext2d) {
	canvas::clear(ctx, state.width, state.height);
	draw_axes(state, ctx);
	draw_crosshair(state, ctx);
	for shape in scene(state) {
		ctx.begin_path();
		let _ = ctx.arc(shape.cx, shape.cy, shape.r, 0.0, TAU);
		ctx.set_fill_style_str(&shape.fill);
		ctx.fill();
		ctx.set_stroke_style_str("#ffffff");
		ctx.set_line_width(shape.stroke_width);
		ctx.stroke();
	}
	draw_legend(state, ctx);
}

fn draw_axes(state: &BubbleState, ctx: &CanvasRenderingContext2d) {
	let (x0, x1) = state.layout.x.range();
	let (y0, y1) = state.layout.y.range();
	ctx.set_stroke_style_str(AXIS_COLOR);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(x0, y1);
	ctx.line_to(x0, y0);
	ctx.line_to(x1, y0);
	ctx.stroke();

	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font("11px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	for tick in state.layout.x.ticks(AXIS_TICKS) {
		let _ = ctx.fill_text(&format_tick(tick), state.layout.x.map(tick), y0 + 6.0);
	}
	ctx.set_text_align("right");
	ctx.set_text_baseline("middle");
	for tick in state.layout.y.ticks(AXIS_TICKS) {
		let _ = ctx.fill_text(&format_tick(tick), x0 - 6.0, state.layout.y.map(tick));
	}
}

fn draw_crosshair(state: &BubbleState, ctx: &CanvasRenderingContext2d) {
	let Some(h) = state.interaction.hover else {
		return;
	};
	let b = state.layout.placed[h];
	let (x0, x1) = state.layout.x.range();
	let (y0, y1) = state.layout.y.range();
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(3.0),
		&JsValue::from_f64(3.0),
	));
	ctx.set_stroke_style_str(AXIS_COLOR);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(b.cx, y0);
	ctx.line_to(b.cx, y1);
	ctx.move_to(x0, b.cy);
	ctx.line_to(x1, b.cy);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_legend(state: &BubbleState, ctx: &CanvasRenderingContext2d) {
	let marked = state.interaction.marked_category(&state.data);
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("left");
	ctx.set_text_baseline("middle");
	for item in &state.layout.legend {
		ctx.begin_path();
		ctx.rect(item.x, item.y, LEGEND_SWATCH, LEGEND_SWATCH);
		ctx.set_fill_style_str(state.palette.color(&item.category));
		ctx.fill();
		if marked == Some(item.category.as_str()) {
			ctx.set_stroke_style_str("#000000");
			ctx.set_line_width(1.4);
			ctx.stroke();
		}
		ctx.set_fill_style_str("#0f172a");
		let _ = ctx.fill_text(&item.category, item.x + LEGEND_SWATCH + 4.0, item.y + LEGEND_SWATCH / 2.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::charts::bubble::layout::BubbleDatum;
	use crate::components::charts::palette::CategoryPalette;

	fn state() -> BubbleState {
		let data = (0..4)
			.map(|i| BubbleDatum {
				x: i as f64,
				y: (i * i) as f64,
				r: 1.0 + i as f64,
				category: if i % 2 == 0 { "A" } else { "B" }.into(),
				title: format!("p{i}"),
				details: Vec::new(),
			})
			.collect();
		let mut s = BubbleState::new(data, CategoryPalette::default(), None, 400.0, 300.0).unwrap();
		s.tick(2000.0);
		s
	}

	#[test]
	fn hovered_bubble_is_painted_last() {
		let mut s = state();
		s.interaction.hover = Some(1);
		let shapes = scene(&s);
		assert_eq!(shapes.len(), 4);
		assert_eq!(shapes.last().map(|b| b.index), Some(1));
	}

	#[test]
	fn identical_state_paints_identical_scenes() {
		let a = state();
		let b = state();
		assert_eq!(scene(&a), scene(&a));
		assert_eq!(scene(&a), scene(&b));
	}

	#[test]
	fn nothing_is_painted_before_the_entrance() {
		let data = vec![BubbleDatum {
			x: 1.0,
			y: 1.0,
			r: 1.0,
			category: "A".into(),
			title: String::new(),
			details: Vec::new(),
		}];
		let s = BubbleState::new(data, CategoryPalette::default(), None, 400.0, 300.0).unwrap();
		assert!(scene(&s).is_empty());
	}
}
