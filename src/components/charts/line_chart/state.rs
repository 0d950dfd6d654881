use log::info;

use super::series::{CurveSegment, SeriesPoint, monotone_curve, nearest_index, prepare_series};
use crate::components::charts::scale::{LinearScale, Margin, extent};
use crate::components::charts::transition::Tween;
use crate::data::convert::SeriesMetric;
use crate::data::types::YearIntensity;

pub const MARGIN: Margin = Margin {
	top: 18.0,
	right: 22.0,
	bottom: 36.0,
	left: 56.0,
};

/// Headroom above the tallest point.
pub const Y_HEADROOM: f64 = 1.12;
pub const REVEAL_MS: f64 = 900.0;
pub const X_TICKS: usize = 8;
pub const Y_TICKS: usize = 5;

/// The point under the pointer, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverResult {
	pub index: usize,
	pub pixel_x: f64,
	pub pixel_y: f64,
}

pub struct LineChartState {
	pub points: Vec<SeriesPoint<YearIntensity>>,
	pub metric: SeriesMetric,
	pub x: LinearScale,
	pub y: LinearScale,
	pub width: f64,
	pub height: f64,
	pub hover: Option<HoverResult>,
	reveal: Tween,
}

impl LineChartState {
	/// Lays out `points` for a `width`×`height` canvas; `None` when no point
	/// has a usable x value.
	pub fn new(
		points: Vec<SeriesPoint<YearIntensity>>,
		metric: SeriesMetric,
		width: f64,
		height: f64,
	) -> Option<Self> {
		let points = prepare_series(points);
		let x_extent = extent(points.iter().map(|p| p.x))?;
		let (plot_w, plot_h) = MARGIN.inner(width, height);
		let x = LinearScale::new(x_extent, (MARGIN.left, MARGIN.left + plot_w)).nice(X_TICKS);
		let y_max = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
		let y_max = if y_max > 0.0 { y_max } else { 1.0 };
		let y = LinearScale::new((0.0, y_max * Y_HEADROOM), (MARGIN.top + plot_h, MARGIN.top))
			.nice(Y_TICKS);
		info!("line chart laid out: {} points ({})", points.len(), metric.label());
		Some(Self {
			points,
			metric,
			x,
			y,
			width,
			height,
			hover: None,
			reveal: Tween::new(REVEAL_MS),
		})
	}

	pub fn pixel(&self, index: usize) -> (f64, f64) {
		let p = &self.points[index];
		(self.x.map(p.x), self.y.map(p.y))
	}

	pub fn in_plot(&self, px: f64, py: f64) -> bool {
		let (plot_w, plot_h) = MARGIN.inner(self.width, self.height);
		let (lx, ly) = MARGIN.to_plot(px, py);
		(0.0..=plot_w).contains(&lx) && (0.0..=plot_h).contains(&ly)
	}

	/// Moves the hover marker to the point nearest `px` along the x axis.
	/// Outside the plot rectangle the hover is cleared.
	pub fn hover_at(&mut self, px: f64, py: f64) -> Option<HoverResult> {
		self.hover = if self.in_plot(px, py) {
			nearest_index(&self.points, self.x.invert(px)).map(|index| {
				let (pixel_x, pixel_y) = self.pixel(index);
				HoverResult {
					index,
					pixel_x,
					pixel_y,
				}
			})
		} else {
			None
		};
		self.hover
	}

	pub fn pointer_leave(&mut self) {
		self.hover = None;
	}

	/// First pixel point and the cubic segments following it.
	pub fn curve(&self) -> Option<((f64, f64), Vec<CurveSegment>)> {
		let pixels: Vec<_> = (0..self.points.len()).map(|i| self.pixel(i)).collect();
		let first = *pixels.first()?;
		Some((first, monotone_curve(&pixels)))
	}

	/// Fraction of the plot width revealed by the entrance.
	pub fn reveal(&self) -> f64 {
		self.reveal.progress()
	}

	/// Reveals the whole line at once.
	pub fn skip_entrance(&mut self) {
		self.reveal.finish();
	}

	pub fn tick(&mut self, dt_ms: f64) {
		self.reveal.advance(dt_ms);
	}

	pub fn describe(&self, index: usize) -> (String, Vec<String>) {
		let p = &self.points[index];
		let avg = p
			.meta
			.avg_intensity
			.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
		(
			format!("Year {}", p.x),
			vec![
				format!("Avg intensity: {avg}"),
				format!("Records: {}", p.meta.count),
			],
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(year: f64, avg: f64, count: u64) -> SeriesPoint<YearIntensity> {
		SeriesPoint::new(
			year,
			avg,
			YearIntensity {
				year: Some(year),
				avg_intensity: Some(avg),
				count,
			},
		)
	}

	fn state(points: Vec<SeriesPoint<YearIntensity>>) -> LineChartState {
		LineChartState::new(points, SeriesMetric::AvgIntensity, 600.0, 300.0).unwrap()
	}

	#[test]
	fn empty_series_has_no_layout() {
		assert!(LineChartState::new(Vec::new(), SeriesMetric::Count, 600.0, 300.0).is_none());
	}

	#[test]
	fn single_point_gets_a_padded_domain() {
		let s = state(vec![row(2017.0, 3.0, 1)]);
		let (d0, d1) = s.x.domain();
		assert!(d0 < 2016.5 && d1 > 2017.5);
		assert!(s.pixel(0).0.is_finite());
	}

	#[test]
	fn y_domain_starts_at_zero_with_headroom() {
		let s = state(vec![row(2016.0, 2.0, 1), row(2017.0, 10.0, 1)]);
		let (y0, y1) = s.y.domain();
		assert_eq!(y0, 0.0);
		assert!(y1 >= 11.2);
		let flat = state(vec![row(2016.0, 0.0, 1), row(2017.0, 0.0, 1)]);
		assert!(flat.y.domain().1 >= 1.12);
	}

	#[test]
	fn hover_snaps_to_nearest_point_and_clears_outside() {
		let mut s = state(vec![row(2010.0, 1.0, 1), row(2014.0, 2.0, 1), row(2020.0, 3.0, 1)]);
		let px = s.x.map(2015.5);
		let hit = s.hover_at(px, 100.0).unwrap();
		assert_eq!(hit.index, 1);
		assert_eq!((hit.pixel_x, hit.pixel_y), s.pixel(1));
		assert_eq!(s.hover_at(2.0, 100.0), None);
		assert_eq!(s.hover, None);
		s.hover_at(px, 100.0);
		s.pointer_leave();
		assert_eq!(s.hover, None);
	}

	#[test]
	fn reveal_runs_once() {
		let mut s = state(vec![row(2010.0, 1.0, 1), row(2011.0, 2.0, 1)]);
		assert_eq!(s.reveal(), 0.0);
		s.tick(REVEAL_MS);
		assert_eq!(s.reveal(), 1.0);
	}

	#[test]
	fn skipped_reveal_is_complete() {
		let mut s = state(vec![row(2010.0, 1.0, 1), row(2011.0, 2.0, 1)]);
		s.skip_entrance();
		assert_eq!(s.reveal(), 1.0);
	}

	#[test]
	fn curve_starts_at_first_point() {
		let s = state(vec![row(2010.0, 1.0, 1), row(2011.0, 2.0, 1), row(2012.0, 1.0, 1)]);
		let (start, segments) = s.curve().unwrap();
		assert_eq!(start, s.pixel(0));
		assert_eq!(segments.len(), 2);
		assert_eq!(segments[1][2], s.pixel(2));
	}
}
