use log::info;

use super::layout::DonutLayout;
use crate::components::charts::transition::{Animated, Tween};

pub const HOVER_GROW: f64 = 8.0;
pub const HOVER_TWEEN_MS: f64 = 180.0;
pub const SWEEP_MS: f64 = 900.0;

pub struct DonutState {
	pub layout: DonutLayout,
	pub hover: Option<usize>,
	pub width: f64,
	pub height: f64,
	grow: Animated<f64>,
	sweep: Tween,
}

impl DonutState {
	pub fn new(topics: &[(String, u64)], width: f64, height: f64) -> Option<Self> {
		let layout = DonutLayout::new(topics, width, height)?;
		info!("donut laid out: {} topics", layout.slices.len());
		Some(Self {
			grow: Animated::new(vec![0.0; layout.slices.len()]),
			layout,
			hover: None,
			width,
			height,
			sweep: Tween::new(SWEEP_MS),
		})
	}

	/// Current extra outer radius of slice `index`.
	pub fn grow(&self, index: usize) -> f64 {
		self.grow.values().get(index).copied().unwrap_or(0.0)
	}

	/// Angular span of slice `index` as drawn during the entrance sweep.
	pub fn swept(&self, index: usize) -> (f64, f64) {
		let s = &self.layout.slices[index];
		(s.start, s.start + (s.end - s.start) * self.sweep.progress())
	}

	pub fn set_hover(&mut self, hover: Option<usize>) {
		if self.hover == hover {
			return;
		}
		self.hover = hover;
		let target = (0..self.layout.slices.len())
			.map(|i| if hover == Some(i) { HOVER_GROW } else { 0.0 })
			.collect();
		self.grow.animate_to(target, HOVER_TWEEN_MS);
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<usize> {
		let hit = self.layout.slice_at(x, y, HOVER_GROW);
		self.set_hover(hit);
		hit
	}

	pub fn describe(&self, index: usize) -> (String, Vec<String>) {
		let s = &self.layout.slices[index];
		(
			s.topic.clone(),
			vec![format!("Records: {}", s.count), format!("Share: {}%", self.layout.percent(index))],
		)
	}

	/// Opens every slice fully without the sweep.
	pub fn skip_entrance(&mut self) {
		self.sweep.finish();
	}

	pub fn tick(&mut self, dt_ms: f64) {
		self.sweep.advance(dt_ms);
		self.grow.tick(dt_ms);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> DonutState {
		let topics = vec![("oil".to_string(), 3), ("gas".to_string(), 1)];
		DonutState::new(&topics, 400.0, 400.0).unwrap()
	}

	#[test]
	fn hover_grows_only_the_hovered_slice() {
		let mut s = state();
		s.set_hover(Some(1));
		s.tick(HOVER_TWEEN_MS / 2.0);
		assert!(s.grow(1) > 0.0 && s.grow(1) < HOVER_GROW);
		s.tick(HOVER_TWEEN_MS);
		assert_eq!(s.grow(1), HOVER_GROW);
		assert_eq!(s.grow(0), 0.0);
		s.set_hover(None);
		s.tick(HOVER_TWEEN_MS);
		assert_eq!(s.grow(1), 0.0);
	}

	#[test]
	fn sweep_opens_every_slice_from_its_start() {
		let mut s = state();
		assert_eq!(s.swept(1).0, s.swept(1).1);
		s.tick(SWEEP_MS);
		let slice = &s.layout.slices[1];
		assert_eq!(s.swept(1), (slice.start, slice.end));
	}

	#[test]
	fn skipped_sweep_draws_whole_slices() {
		let mut s = state();
		s.skip_entrance();
		let slice = &s.layout.slices[0];
		assert_eq!(s.swept(0), (slice.start, slice.end));
	}

	#[test]
	fn describe_reports_count_and_share() {
		let s = state();
		assert_eq!(s.describe(0).1, vec!["Records: 3", "Share: 75%"]);
	}
}
