//! Scale and polar geometry helpers shared by every chart.
//!
//! Scales are total over the real line: values outside the domain extrapolate
//! linearly and nothing is clamped here.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Half-width added on both sides of a zero-width domain.
pub const DEGENERATE_PAD: f64 = 1.0;

fn expand_degenerate((d0, d1): (f64, f64)) -> (f64, f64) {
	if d0 == d1 {
		(d0 - DEGENERATE_PAD, d1 + DEGENERATE_PAD)
	} else {
		(d0, d1)
	}
}

/// Minimum and maximum of the finite values, or `None` if there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
	values
		.into_iter()
		.filter(|v| v.is_finite())
		.fold(None, |acc, v| match acc {
			None => Some((v, v)),
			Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
		})
}

/// Linear mapping from a data domain to a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self {
			domain: expand_degenerate(domain),
			range,
		}
	}

	pub fn domain(&self) -> (f64, f64) {
		self.domain
	}

	pub fn range(&self) -> (f64, f64) {
		self.range
	}

	pub fn map(&self, v: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		r0 + (v - d0) / (d1 - d0) * (r1 - r0)
	}

	/// Pixel back to data space. A zero-width range inverts to the domain start.
	pub fn invert(&self, px: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		if r0 == r1 {
			return d0;
		}
		d0 + (px - r0) / (r1 - r0) * (d1 - d0)
	}

	/// Round tick values covering the domain.
	pub fn ticks(&self, count: usize) -> Vec<f64> {
		let (lo, hi) = ordered(self.domain);
		let step = tick_step(lo, hi, count);
		if step <= 0.0 || !step.is_finite() {
			return vec![lo];
		}
		let start = (lo / step).ceil() as i64;
		let stop = (hi / step).floor() as i64;
		(start..=stop).map(|i| i as f64 * step).collect()
	}

	/// Extends the domain outwards to round tick boundaries.
	pub fn nice(self, count: usize) -> Self {
		let (d0, d1) = self.domain;
		let (lo, hi) = ordered(self.domain);
		let step = tick_step(lo, hi, count);
		if step <= 0.0 || !step.is_finite() {
			return self;
		}
		let (lo, hi) = ((lo / step).floor() * step, (hi / step).ceil() * step);
		let domain = if d0 <= d1 { (lo, hi) } else { (hi, lo) };
		Self {
			domain,
			range: self.range,
		}
	}
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
	if a <= b { (a, b) } else { (b, a) }
}

/// Step from the 1/2/5 × 10ⁿ family giving roughly `count` ticks.
fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
	let span = hi - lo;
	if span <= 0.0 || count == 0 {
		return 0.0;
	}
	let raw = span / count as f64;
	let power = 10f64.powf(raw.log10().floor());
	let error = raw / power;
	let factor = if error >= 50f64.sqrt() {
		10.0
	} else if error >= 10f64.sqrt() {
		5.0
	} else if error >= 2f64.sqrt() {
		2.0
	} else {
		1.0
	};
	factor * power
}

/// Axis label for a tick value, without float noise.
pub fn format_tick(v: f64) -> String {
	let rounded = (v * 100.0).round() / 100.0;
	format!("{}", rounded + 0.0)
}

/// Space reserved around a plot for axes and labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

impl Margin {
	/// Plot size left inside a `width`×`height` canvas, never negative.
	pub fn inner(&self, width: f64, height: f64) -> (f64, f64) {
		(
			(width - self.left - self.right).max(0.0),
			(height - self.top - self.bottom).max(0.0),
		)
	}

	/// Canvas point to plot coordinates.
	pub fn to_plot(&self, x: f64, y: f64) -> (f64, f64) {
		(x - self.left, y - self.top)
	}
}

fn signed_sqrt(v: f64) -> f64 {
	v.signum() * v.abs().sqrt()
}

/// Square-root mapping: encoded *area* grows linearly with the value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
	inner: LinearScale,
}

impl SqrtScale {
	pub fn new((d0, d1): (f64, f64), range: (f64, f64)) -> Self {
		Self {
			inner: LinearScale::new((signed_sqrt(d0), signed_sqrt(d1)), range),
		}
	}

	pub fn map(&self, v: f64) -> f64 {
		self.inner.map(signed_sqrt(v))
	}

	pub fn invert(&self, px: f64) -> f64 {
		let t = self.inner.invert(px);
		t.signum() * t * t
	}
}

/// Point at `angle` (clockwise from 12 o'clock) and distance `r` from the center.
pub fn polar_to_cartesian(angle: f64, r: f64) -> (f64, f64) {
	let a = canvas_angle(angle);
	(r * a.cos(), r * a.sin())
}

/// Inverse of [`polar_to_cartesian`]; the angle is normalized to `[0, 2π)`.
pub fn cartesian_to_polar(x: f64, y: f64) -> (f64, f64) {
	let angle = (y.atan2(x) + FRAC_PI_2).rem_euclid(TAU);
	(angle, x.hypot(y))
}

/// Converts a 12 o'clock based angle to the canvas convention (3 o'clock based).
pub fn canvas_angle(angle: f64) -> f64 {
	angle - FRAC_PI_2
}
