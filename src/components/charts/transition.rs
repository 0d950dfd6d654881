//! Time-based interpolation of per-shape visual attributes.
//!
//! An [`Animated`] set always has exactly one in-flight transition at most.
//! Retargeting while a transition runs starts from the values currently on
//! screen, so consecutive transitions compose without jumping.

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

pub fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(3)
}

/// Values that can be blended component-wise.
pub trait Interpolate: Clone {
	fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
	fn interpolate(&self, to: &Self, t: f64) -> Self {
		lerp(*self, *to, t)
	}
}

/// Elapsed/duration clock with cubic in-out easing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
	elapsed: f64,
	duration: f64,
}

impl Tween {
	pub fn new(duration_ms: f64) -> Self {
		Self {
			elapsed: 0.0,
			duration: duration_ms.max(0.0),
		}
	}

	pub fn advance(&mut self, dt_ms: f64) {
		self.elapsed = (self.elapsed + dt_ms.max(0.0)).min(self.duration);
	}

	pub fn is_done(&self) -> bool {
		self.elapsed >= self.duration
	}

	/// Jumps to the end of the tween.
	pub fn finish(&mut self) {
		self.elapsed = self.duration;
	}

	/// Eased progress in `[0, 1]`.
	pub fn progress(&self) -> f64 {
		if self.duration <= 0.0 {
			return 1.0;
		}
		ease_cubic_in_out(self.elapsed / self.duration)
	}
}

#[derive(Clone, Debug)]
struct Flight<T> {
	from: Vec<T>,
	tween: Tween,
}

/// A list of shape attributes moving toward a target list.
#[derive(Clone, Debug)]
pub struct Animated<T> {
	current: Vec<T>,
	target: Vec<T>,
	flight: Option<Flight<T>>,
}

impl<T: Interpolate> Animated<T> {
	pub fn new(values: Vec<T>) -> Self {
		Self {
			current: values.clone(),
			target: values,
			flight: None,
		}
	}

	/// Attributes as they should be drawn right now.
	pub fn values(&self) -> &[T] {
		&self.current
	}

	/// Attributes the running transition ends on.
	pub fn target(&self) -> &[T] {
		&self.target
	}

	pub fn is_running(&self) -> bool {
		self.flight.is_some()
	}

	/// Starts a transition from the on-screen values. A target of a different
	/// length cannot be blended and is applied immediately.
	pub fn animate_to(&mut self, target: Vec<T>, duration_ms: f64) {
		if target.len() != self.current.len() || duration_ms <= 0.0 {
			self.jump_to(target);
			return;
		}
		self.flight = Some(Flight {
			from: self.current.clone(),
			tween: Tween::new(duration_ms),
		});
		self.target = target;
	}

	pub fn jump_to(&mut self, target: Vec<T>) {
		self.current = target.clone();
		self.target = target;
		self.flight = None;
	}

	/// Advances the clock; returns whether a transition is still running.
	pub fn tick(&mut self, dt_ms: f64) -> bool {
		let Some(flight) = self.flight.as_mut() else {
			return false;
		};
		flight.tween.advance(dt_ms);
		if flight.tween.is_done() {
			self.current = self.target.clone();
			self.flight = None;
			return false;
		}
		let t = flight.tween.progress();
		self.current = flight
			.from
			.iter()
			.zip(&self.target)
			.map(|(from, to)| from.interpolate(to, t))
			.collect();
		true
	}
}
