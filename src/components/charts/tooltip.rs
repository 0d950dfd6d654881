//! Fixed-position tooltip that never leaves the viewport.

use leptos::prelude::*;

/// Gap between the pointer and the tooltip box.
pub const TOOLTIP_MARGIN: f64 = 12.0;

/// Top-left corner of the tooltip in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
	pub left: f64,
	pub top: f64,
}

/// Places a `size` box next to `anchor`, flipping to the other side of the
/// anchor on the axis where the default offset would overflow `viewport`.
pub fn position_tooltip(
	(x, y): (f64, f64),
	(bw, bh): (f64, f64),
	(vw, vh): (f64, f64),
	margin: f64,
) -> Placement {
	let place = |anchor: f64, extent: f64, limit: f64| {
		let default = anchor + margin;
		if default > limit - extent - margin {
			margin.max(anchor - extent - margin)
		} else {
			default
		}
	};
	Placement {
		left: place(x, bw, vw),
		top: place(y, bh, vh),
	}
}

/// Content and pointer position of a visible tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipRequest {
	pub client_x: f64,
	pub client_y: f64,
	pub title: String,
	pub lines: Vec<String>,
}

fn viewport() -> (f64, f64) {
	let Some(window) = web_sys::window() else {
		return (0.0, 0.0);
	};
	let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	(dim(window.inner_width()), dim(window.inner_height()))
}

/// Renders `request` in a fixed box, re-placing it on every change.
#[component]
pub fn Tooltip(#[prop(into)] request: Signal<Option<TooltipRequest>>) -> impl IntoView {
	let tip_ref = NodeRef::<leptos::html::Div>::new();

	Effect::new(move |_| {
		let current = request.get();
		let Some(tip) = tip_ref.get() else {
			return;
		};
		let style = web_sys::HtmlElement::style(&tip);
		let Some(req) = current else {
			let _ = style.set_property("display", "none");
			return;
		};
		// shown first so the box can be measured
		let _ = style.set_property("display", "block");
		let rect = tip.get_bounding_client_rect();
		let at = position_tooltip(
			(req.client_x, req.client_y),
			(rect.width(), rect.height()),
			viewport(),
			TOOLTIP_MARGIN,
		);
		let _ = style.set_property("left", &format!("{}px", at.left));
		let _ = style.set_property("top", &format!("{}px", at.top));
	});

	view! {
		<div
			node_ref=tip_ref
			class="chart-tooltip"
			style="position: fixed; display: none; pointer-events: none; z-index: 9999;"
		>
			{move || {
				request
					.get()
					.map(|req| {
						view! {
							<div class="chart-tooltip-title">{req.title}</div>
							{req
								.lines
								.into_iter()
								.map(|line| view! { <div class="chart-tooltip-line">{line}</div> })
								.collect_view()}
						}
					})
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const VIEW: (f64, f64) = (800.0, 600.0);

	#[test]
	fn default_offset_when_it_fits() {
		let at = position_tooltip((100.0, 100.0), (100.0, 50.0), VIEW, TOOLTIP_MARGIN);
		assert_eq!(at, Placement { left: 112.0, top: 112.0 });
	}

	#[test]
	fn flips_left_near_right_edge() {
		let (w, _) = VIEW;
		let at = position_tooltip((w - 5.0, 10.0), (100.0, 50.0), VIEW, TOOLTIP_MARGIN);
		assert!(at.left < w - 100.0);
		assert_eq!(at.left, w - 5.0 - 100.0 - 12.0);
		assert_eq!(at.top, 22.0);
	}

	#[test]
	fn flips_above_near_bottom_edge() {
		let at = position_tooltip((10.0, 590.0), (100.0, 50.0), VIEW, TOOLTIP_MARGIN);
		assert_eq!(at.top, 590.0 - 50.0 - 12.0);
		assert_eq!(at.left, 22.0);
	}

	#[test]
	fn clamps_to_margin_when_no_side_fits() {
		let at = position_tooltip((50.0, 20.0), (780.0, 590.0), VIEW, TOOLTIP_MARGIN);
		assert_eq!(at, Placement { left: 12.0, top: 12.0 });
	}
}
