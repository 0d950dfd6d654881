use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use web_sys::MouseEvent;

use super::render;
use super::state::RadarState;
use crate::components::charts::canvas;
use crate::components::charts::tooltip::{Tooltip, TooltipRequest};
use crate::data::types::SectorMetrics;

/// Radar of the `max_items` sectors with the most records.
#[component]
pub fn RadarChart(
	#[prop(into)] data: Signal<Vec<SectorMetrics>>,
	#[prop(default = 8)] max_items: usize,
	#[prop(default = 340.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<RadarState>>> = Rc::new(RefCell::new(None));
	let (tip, set_tip) = signal(None::<TooltipRequest>);
	let alive = StoredValue::new(true);
	on_cleanup(move || alive.set_value(false));

	let rebuild = {
		let state = state.clone();
		Rc::new(move |resized: bool| {
			let Some(canvas) = canvas_ref.get_untracked() else {
				return;
			};
			let (w, h) = canvas::fit_to_parent(&canvas, height);
			let mut next = data.with_untracked(|rows| RadarState::new(rows, max_items, w, h));
			match next.as_mut() {
				Some(s) if resized && state.borrow().is_some() => s.skip_entrance(),
				Some(_) => {}
				None => warn!("radar: no sectors"),
			}
			*state.borrow_mut() = next;
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
			warn!("radar: 2d context unavailable");
			return;
		};
		info!("radar mounted");
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
					"No data",
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
			let request = s.pointer_move(x, y).map(|vertex| {
				let (title, lines) = s.describe(vertex);
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

	view! {
		<div class="chart radar-chart" style="position: relative; width: 100%;">
			<canvas
				node_ref=canvas_ref
				class="radar-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				style="display: block;"
			/>
			<Tooltip request=tip />
		</div>
	}
}
