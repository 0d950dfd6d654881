use std::f64::consts::TAU;

use crate::components::charts::palette::color_at;
use crate::components::charts::scale::{cartesian_to_polar, polar_to_cartesian};

pub const INNER_RATIO: f64 = 0.58;
pub const OUTER_RATIO: f64 = 0.92;
/// Smallest share, in whole percent, that still gets a label.
pub const LABEL_MIN_PERCENT: f64 = 6.0;

/// Angular extent of each value around the full circle, in input order.
pub fn pie(values: &[f64]) -> Vec<(f64, f64)> {
	let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
	if total <= 0.0 {
		return values.iter().map(|_| (0.0, 0.0)).collect();
	}
	let last = values.len() - 1;
	let mut cursor = 0.0;
	values
		.iter()
		.enumerate()
		.map(|(i, v)| {
			let start = cursor;
			cursor = if i == last {
				TAU
			} else {
				(cursor + v.max(0.0) / total * TAU).min(TAU)
			};
			(start, cursor)
		})
		.collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct DonutSlice {
	pub topic: String,
	pub count: u64,
	pub start: f64,
	pub end: f64,
	pub color: &'static str,
}

pub struct DonutLayout {
	pub slices: Vec<DonutSlice>,
	pub total: u64,
	pub center: (f64, f64),
	pub inner: f64,
	pub outer: f64,
}

impl DonutLayout {
	/// `None` when no topic has a positive count.
	pub fn new(topics: &[(String, u64)], width: f64, height: f64) -> Option<Self> {
		let kept: Vec<_> = topics
			.iter()
			.filter(|(topic, count)| !topic.is_empty() && *count > 0)
			.collect();
		if kept.is_empty() {
			return None;
		}
		let angles = pie(&kept.iter().map(|(_, c)| *c as f64).collect::<Vec<_>>());
		let slices = kept
			.iter()
			.zip(angles)
			.enumerate()
			.map(|(i, ((topic, count), (start, end)))| DonutSlice {
				topic: topic.clone(),
				count: *count,
				start,
				end,
				color: color_at(i),
			})
			.collect();
		let radius = width.min(height) / 2.0;
		Some(Self {
			slices,
			total: kept.iter().map(|(_, c)| c).sum(),
			center: (width / 2.0, height / 2.0),
			inner: radius * INNER_RATIO,
			outer: radius * OUTER_RATIO,
		})
	}

	/// Slice under a canvas point, allowing for `grow` extra outer pixels.
	pub fn slice_at(&self, x: f64, y: f64, grow: f64) -> Option<usize> {
		let (angle, r) = cartesian_to_polar(x - self.center.0, y - self.center.1);
		if r < self.inner || r > self.outer + grow {
			return None;
		}
		self.slices
			.iter()
			.position(|s| angle >= s.start && angle < s.end)
	}

	/// Share of slice `index` rounded to whole percent.
	pub fn percent(&self, index: usize) -> f64 {
		(self.slices[index].count as f64 / self.total as f64 * 100.0).round()
	}

	/// `"NN%"` for slices big enough to carry a label.
	pub fn label(&self, index: usize) -> Option<String> {
		let pct = self.percent(index);
		(pct >= LABEL_MIN_PERCENT).then(|| format!("{pct}%"))
	}

	/// Middle of the ring band at the middle of the slice.
	pub fn centroid(&self, index: usize) -> (f64, f64) {
		let s = &self.slices[index];
		let (dx, dy) = polar_to_cartesian((s.start + s.end) / 2.0, (self.inner + self.outer) / 2.0);
		(self.center.0 + dx, self.center.1 + dy)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn topics(counts: &[(&str, u64)]) -> Vec<(String, u64)> {
		counts.iter().map(|(t, c)| (t.to_string(), *c)).collect()
	}

	#[test]
	fn pie_covers_the_circle_in_input_order() {
		let angles = pie(&[1.0, 3.0]);
		assert_eq!(angles[0].0, 0.0);
		assert!((angles[0].1 - TAU / 4.0).abs() < 1e-12);
		assert_eq!(angles[1].1, TAU);
		assert_eq!(pie(&[0.0, 0.0]), vec![(0.0, 0.0), (0.0, 0.0)]);
	}

	#[test]
	fn empty_and_zero_rows_are_dropped() {
		let layout = DonutLayout::new(&topics(&[("oil", 3), ("", 4), ("gas", 0), ("coal", 1)]), 400.0, 400.0).unwrap();
		let names: Vec<_> = layout.slices.iter().map(|s| s.topic.as_str()).collect();
		assert_eq!(names, ["oil", "coal"]);
		assert_eq!(layout.total, 4);
		assert!(DonutLayout::new(&topics(&[("gas", 0)]), 400.0, 400.0).is_none());
	}

	#[test]
	fn ring_radii_follow_the_short_side() {
		let layout = DonutLayout::new(&topics(&[("oil", 1)]), 500.0, 400.0).unwrap();
		assert!((layout.inner - 116.0).abs() < 1e-9);
		assert!((layout.outer - 184.0).abs() < 1e-9);
	}

	#[test]
	fn small_slices_have_no_label() {
		let layout = DonutLayout::new(&topics(&[("oil", 95), ("gas", 5)]), 400.0, 400.0).unwrap();
		assert_eq!(layout.label(0).as_deref(), Some("95%"));
		assert_eq!(layout.label(1), None);
	}

	#[test]
	fn hit_test_respects_the_hole() {
		let layout = DonutLayout::new(&topics(&[("oil", 1), ("gas", 1)]), 400.0, 400.0).unwrap();
		// oil spans 12 to 6 o'clock on the right
		assert_eq!(layout.slice_at(200.0 + 150.0, 200.0, 0.0), Some(0));
		assert_eq!(layout.slice_at(200.0 - 150.0, 200.0, 0.0), Some(1));
		assert_eq!(layout.slice_at(200.0, 200.0, 0.0), None);
		assert_eq!(layout.slice_at(200.0 + 190.0, 200.0, 0.0), None);
		assert_eq!(layout.slice_at(200.0 + 190.0, 200.0, 8.0), Some(0));
	}
}
