use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use web_sys::MouseEvent;

use super::render;
use super::state::{Selection, SunburstState};
use crate::components::charts::canvas;
use crate::components::charts::tooltip::{Tooltip, TooltipRequest};
use crate::data::types::HierarchyNode;

#[component]
pub fn SunburstChart(
	#[prop(into)] data: Signal<Option<HierarchyNode>>,
	#[prop(default = 420.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<SunburstState>>> = Rc::new(RefCell::new(None));
	let (tip, set_tip) = signal(None::<TooltipRequest>);
	let (selected, set_selected) = signal(None::<Selection>);
	let alive = StoredValue::new(true);
	on_cleanup(move || alive.set_value(false));

	// Full rebuild from the current data and canvas size; the focus path
	// carries over so a refresh does not lose the user's drill-down. A resize
	// of a chart already on screen does not replay the fade-in.
	let rebuild = {
		let state = state.clone();
		Rc::new(move |resized: bool| {
			let Some(canvas) = canvas_ref.get_untracked() else {
				return;
			};
			let (w, h) = canvas::fit_to_parent(&canvas, height);
			let mut slot = state.borrow_mut();
			let shown = slot.is_some();
			let focus = slot.as_ref().map(|s| s.focus_path()).unwrap_or_default();
			*slot = data
				.get_untracked()
				.and_then(|d| SunburstState::new(&d, w, h, &focus));
			if let Some(s) = slot.as_mut().filter(|_| resized && shown) {
				s.skip_entrance();
			}
			if slot.is_none() {
				warn!("sunburst: no hierarchy data");
			}
			set_selected.set(slot.as_ref().and_then(|s| s.selection()));
			set_tip.set(None);
		})
	};

	let started = Rc::new(Cell::new(false));
	let (state_init, rebuild_init) = (state.clone(), rebuild.clone());
	Effect::new(move |_| {
		data.track();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		rebuild_init(false);
		if started.replace(true) {
			return;
		}
		let Some(ctx) = canvas::context_2d(&canvas) else {
			warn!("sunburst: 2d context unavailable");
			return;
		};
		info!("sunburst mounted");
		let state_anim = state_init.clone();
		canvas::start_frame_loop(alive, move |dt| {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(dt);
				render::render(s, &ctx);
			} else {
				canvas::draw_message(
					&ctx,
					canvas.width() as f64,
					canvas.height() as f64,
					"No hierarchy data",
				);
			}
		});
	});

	let rebuild_resize = rebuild.clone();
	let resize = window_event_listener(leptos::ev::resize, move |_| rebuild_resize(true));
	on_cleanup(move || resize.remove());

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas::local_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let hovered = s.node_at_position(x, y);
			s.set_hover(hovered);
			let request = hovered.map(|id| {
				let (title, lines) = s.describe(id);
				let (client_x, client_y) = canvas::client_position(&ev);
				TooltipRequest {
					client_x,
					client_y,
					title,
					lines,
				}
			});
			set_tip.set(request);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.set_hover(None);
		}
		set_tip.set(None);
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas::local_position(&canvas, &ev);
		if let Some(ref mut s) = *state_click.borrow_mut() {
			if s.click_at(x, y) {
				set_selected.set(s.selection());
			}
		}
	};

	let state_zoom = state.clone();
	let on_zoom_out = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_zoom.borrow_mut() {
			s.zoom_out();
		}
		set_selected.set(None);
	};

	view! {
		<div class="chart sunburst-chart" style="position: relative; width: 100%;">
			<div class="chart-controls">
				<button class="zoom-out" title="Zoom out to root" on:click=on_zoom_out>
					"Zoom out"
				</button>
				<div class="selection-summary">
					{move || match selected.get() {
						Some(sel) => {
							view! {
								<div class="selection-name">{sel.name}</div>
								<div class="selection-meta">
									{format!("Value: {} • Depth: {}", sel.value, sel.depth)}
								</div>
								<div class="selection-path">{sel.path}</div>
							}
								.into_any()
						}
						None => view! { <div class="selection-empty">"No selection"</div> }.into_any(),
					}}
				</div>
			</div>
			<canvas
				node_ref=canvas_ref
				class="sunburst-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				style="display: block; cursor: pointer;"
			/>
			<Tooltip request=tip />
		</div>
	}
}
