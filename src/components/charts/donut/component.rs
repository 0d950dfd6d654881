use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use web_sys::MouseEvent;

use super::render;
use super::state::DonutState;
use crate::components::charts::canvas;
use crate::components::charts::palette::color_at;
use crate::components::charts::tooltip::{Tooltip, TooltipRequest};

/// Donut of topic counts, drawn in the order given.
#[component]
pub fn DonutChart(
	#[prop(into)] data: Signal<Vec<(String, u64)>>,
	#[prop(default = 360.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<DonutState>>> = Rc::new(RefCell::new(None));
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
			let mut next = data.with_untracked(|topics| DonutState::new(topics, w, h));
			match next.as_mut() {
				Some(s) if resized && state.borrow().is_some() => s.skip_entrance(),
				Some(_) => {}
				None => warn!("donut: no topics with records"),
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
			warn!("donut: 2d context unavailable");
			return;
		};
		info!("donut mounted");
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
			s.set_hover(None);
		}
		set_tip.set(None);
	};

	view! {
		<div class="chart donut-chart" style="position: relative; width: 100%;">
			<canvas
				node_ref=canvas_ref
				class="donut-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				style="display: block;"
			/>
			<ul class="chart-legend">
				{move || {
					data.get()
						.into_iter()
						.filter(|(topic, count)| !topic.is_empty() && *count > 0)
						.enumerate()
						.map(|(i, (topic, _))| {
							let swatch = format!("background: {};", color_at(i));
							view! {
								<li>
									<span class="legend-swatch" style=swatch></span>
									{topic}
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
			<Tooltip request=tip />
		</div>
	}
}
