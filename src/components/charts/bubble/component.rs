use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use web_sys::MouseEvent;

use super::layout::BubbleDatum;
use super::render;
use super::state::BubbleState;
use crate::components::charts::canvas;
use crate::components::charts::tooltip::{Tooltip, TooltipRequest};

#[component]
pub fn BubbleChart(
	#[prop(into)] data: Signal<Vec<BubbleDatum>>,
	#[prop(default = 320.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<BubbleState>>> = Rc::new(RefCell::new(None));
	let (tip, set_tip) = signal(None::<TooltipRequest>);
	let alive = StoredValue::new(true);
	on_cleanup(move || alive.set_value(false));

	// palette and pin carry over so colors and the pinned region survive a
	// refresh; a resize does not regrow the bubbles
	let rebuild = {
		let state = state.clone();
		Rc::new(move |resized: bool| {
			let Some(canvas) = canvas_ref.get_untracked() else {
				return;
			};
			let (w, h) = canvas::fit_to_parent(&canvas, height);
			let mut slot = state.borrow_mut();
			let shown = slot.is_some();
			let (palette, pin) = slot
				.take()
				.map(|s| (s.palette, s.interaction.pin))
				.unwrap_or_default();
			*slot = BubbleState::new(data.get_untracked(), palette, pin, w, h);
			if let Some(s) = slot.as_mut().filter(|_| resized && shown) {
				s.skip_entrance();
			}
			if slot.is_none() {
				warn!("bubble chart: no valid intensity/likelihood points");
			}
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
			warn!("bubble chart: 2d context unavailable");
			return;
		};
		info!("bubble chart mounted");
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
			let request = s.pointer_move(x, y).map(|i| {
				let (title, lines) = s.describe(i);
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
			s.pointer_leave();
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
			s.click(x, y);
		}
	};

	view! {
		<div class="chart bubble-chart" style="position: relative; width: 100%;">
			<canvas
				node_ref=canvas_ref
				class="bubble-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				style="display: block; cursor: pointer;"
			/>
			<Tooltip request=tip />
		</div>
	}
}
