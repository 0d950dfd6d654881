//! Canvas plumbing shared by the chart components.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

/// Longest frame step fed to animations, so a backgrounded tab does not
/// skip a whole transition on its first frame back.
const MAX_FRAME_MS: f64 = 100.0;

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

/// Sizes the canvas to its parent's width and the given height.
pub fn fit_to_parent(canvas: &HtmlCanvasElement, height: f64) -> (f64, f64) {
	let width = canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(800.0);
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);
	(width, height)
}

/// Pointer position relative to the canvas' top-left corner.
pub fn local_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

pub fn client_position(ev: &MouseEvent) -> (f64, f64) {
	(ev.client_x() as f64, ev.client_y() as f64)
}

pub fn clear(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, width, height);
}

/// Centered placeholder for charts without usable data.
pub fn draw_message(ctx: &CanvasRenderingContext2d, width: f64, height: f64, text: &str) {
	clear(ctx, width, height);
	ctx.set_fill_style_str("#64748b");
	ctx.set_font("13px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(text, width / 2.0, height / 2.0);
}

/// What one animation frame should do.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Frame {
	/// The owner is gone: release the callback and stop requesting frames.
	Stop,
	/// Advance by this many milliseconds.
	Step(f64),
}

/// Turns `requestAnimationFrame` timestamps into clamped frame steps.
#[derive(Clone, Copy, Debug, Default)]
struct FrameClock {
	last: Option<f64>,
}

impl FrameClock {
	fn next(&mut self, alive: bool, now: f64) -> Frame {
		if !alive {
			self.last = None;
			return Frame::Stop;
		}
		let dt = self.last.map_or(0.0, |prev| (now - prev).clamp(0.0, MAX_FRAME_MS));
		self.last = Some(now);
		Frame::Step(dt)
	}
}

/// Calls `frame` with the elapsed milliseconds on every animation frame
/// until `alive` is cleared or disposed. The callback then drops itself, so
/// nothing it captured outlives the component.
pub fn start_frame_loop(alive: StoredValue<bool>, mut frame: impl FnMut(f64) + 'static) {
	let Some(window) = web_sys::window() else {
		warn!("no window; animation loop not started");
		return;
	};
	let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let callback_inner = callback.clone();
	let mut clock = FrameClock::default();

	*callback.borrow_mut() = Some(Closure::new(move |now: f64| {
		let dt = match clock.next(alive.try_get_value().unwrap_or(false), now) {
			Frame::Step(dt) => dt,
			Frame::Stop => {
				debug!("animation loop stopped");
				let _ = callback_inner.borrow_mut().take();
				return;
			}
		};
		frame(dt);
		if let (Some(cb), Some(win)) = (callback_inner.borrow().as_ref(), web_sys::window()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));
	if let Some(ref cb) = *callback.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_frame_has_no_elapsed_time() {
		let mut clock = FrameClock::default();
		assert_eq!(clock.next(true, 1000.0), Frame::Step(0.0));
		assert_eq!(clock.next(true, 1016.0), Frame::Step(16.0));
	}

	#[test]
	fn long_gaps_are_clamped() {
		let mut clock = FrameClock::default();
		clock.next(true, 0.0);
		assert_eq!(clock.next(true, 5000.0), Frame::Step(MAX_FRAME_MS));
		assert_eq!(clock.next(true, 4000.0), Frame::Step(0.0));
	}

	#[test]
	fn unmounted_owner_stops_the_loop() {
		let mut clock = FrameClock::default();
		clock.next(true, 0.0);
		assert_eq!(clock.next(false, 16.0), Frame::Stop);
		assert_eq!(clock.next(false, 32.0), Frame::Stop);
	}
}
