use web_sys::CanvasRenderingContext2d;

use super::partition::{MIN_DRAWN_ANGLE, NodeId};
use super::state::SunburstState;
use crate::components::charts::canvas;
use crate::components::charts::scale::canvas_angle;

/// Angular gap between neighbouring slices, in radians.
pub const PAD_ANGLE: f64 = 0.005;

/// One slice as it will be painted.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcShape {
	pub node: NodeId,
	pub start: f64,
	pub end: f64,
	pub inner: f64,
	pub outer: f64,
	pub fill: &'static str,
	pub opacity: f64,
	pub hovered: bool,
}

/// Slices to paint for the current state, in pre-order.
pub fn scene(state: &SunburstState) -> Vec<ArcShape> {
	state
		.partition
		.nodes()
		.iter()
		.enumerate()
		.filter(|(_, node)| node.is_drawable())
		.filter_map(|(id, _)| {
			let visual = state.zoom.visual(id);
			let span = visual.span;
			if span.width() <= MIN_DRAWN_ANGLE || span.y1 <= span.y0 {
				return None;
			}
			let pad = (PAD_ANGLE / 2.0).min(span.width() / 4.0);
			Some(ArcShape {
				node: id,
				start: span.x0 + pad,
				end: span.x1 - pad,
				inner: span.y0.max(0.0),
				outer: span.y1.max(0.0),
				fill: state.color(id),
				opacity: visual.opacity,
				hovered: state.hover == Some(id),
			})
		})
		.collect()
}

pub fn render(state: &SunburstState, ctx: &CanvasRenderingContext2d) {
	canvas::clear(ctx, state.width, state.height);
	let (cx, cy) = state.center();
	for shape in scene(state) {
		draw_arc(ctx, cx, cy, &shape);
	}
	ctx.set_global_alpha(1.0);
	draw_center_label(state, ctx, cx, cy);
}

fn draw_arc(ctx: &CanvasRenderingContext2d, cx: f64, cy: f64, shape: &ArcShape) {
	let (a0, a1) = (canvas_angle(shape.start), canvas_angle(shape.end));
	ctx.begin_path();
	let _ = ctx.arc(cx, cy, shape.outer, a0, a1);
	if shape.inner > 0.0 {
		let _ = ctx.arc_with_anticlockwise(cx, cy, shape.inner, a1, a0, true);
	} else {
		ctx.line_to(cx, cy);
	}
	ctx.close_path();
	ctx.set_global_alpha(shape.opacity);
	ctx.set_fill_style_str(shape.fill);
	ctx.fill();
	ctx.set_global_alpha(1.0);
	if shape.hovered {
		ctx.set_stroke_style_str("#0f172a");
		ctx.set_line_width(1.5);
	} else {
		ctx.set_stroke_style_str("#ffffff");
		ctx.set_line_width(1.0);
	}
	ctx.stroke();
}

fn draw_center_label(state: &SunburstState, ctx: &CanvasRenderingContext2d, cx: f64, cy: f64) {
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	match state.selection() {
		None => {
			ctx.set_fill_style_str("#0f172a");
			ctx.set_font("bold 14px sans-serif");
			let _ = ctx.fill_text("Topics", cx, cy - 8.0);
			ctx.set_fill_style_str("#64748b");
			ctx.set_font("12px sans-serif");
			let _ = ctx.fill_text("click slices to zoom", cx, cy + 10.0);
		}
		Some(selection) => {
			ctx.set_fill_style_str("#ffffff");
			ctx.set_font("bold 13px sans-serif");
			let _ = ctx.fill_text(&selection.name, cx, cy);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::types::HierarchyNode as H;

	fn state() -> SunburstState {
		let data = H::branch(
			"topics",
			vec![
				H::branch("Energy", vec![H::leaf("oil", 3.0), H::leaf("gas", 1.0)]),
				H::leaf("Finance", 2.0),
				H::leaf("Void", 0.0),
			],
		);
		SunburstState::new(&data, 300.0, 300.0, &[]).unwrap()
	}

	#[test]
	fn root_and_zero_width_slices_are_not_painted() {
		let mut s = state();
		while s.zoom.tick(16.0) {}
		let shapes = scene(&s);
		let names: Vec<_> = shapes
			.iter()
			.map(|a| s.partition.node(a.node).name.as_str())
			.collect();
		assert_eq!(names, ["Energy", "oil", "gas", "Finance"]);
		assert!(shapes.iter().all(|a| a.start < a.end && a.inner < a.outer));
	}

	#[test]
	fn identical_state_paints_identical_scenes() {
		let mut a = state();
		let mut b = state();
		for s in [&mut a, &mut b] {
			let energy = s.partition.find_path(&["Energy".into()]).unwrap();
			s.zoom.focus_on(&s.partition, energy);
			s.tick(250.0);
			s.set_hover(Some(energy));
		}
		assert_eq!(scene(&a), scene(&a));
		assert_eq!(scene(&a), scene(&b));
	}

	#[test]
	fn hovered_slice_is_flagged() {
		let mut s = state();
		let gas = s.partition.find_path(&["Energy".into(), "gas".into()]).unwrap();
		s.set_hover(Some(gas));
		while s.zoom.tick(16.0) {}
		let hovered: Vec<_> = scene(&s).into_iter().filter(|a| a.hovered).collect();
		assert_eq!(hovered.len(), 1);
		assert_eq!(hovered[0].node, gas);
	}
}
