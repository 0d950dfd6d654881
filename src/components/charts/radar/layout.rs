//! Geometry of the sector radar: one axis per score, grid rings, and one
//! closed shape per sector.

use crate::components::charts::line_chart::series::CurveSegment;
use crate::components::charts::palette::color_at;
use crate::components::charts::scale::{LinearScale, polar_to_cartesian};
use crate::data::types::SectorMetrics;

pub const MARGIN: f64 = 18.0;
pub const GRID_LEVELS: usize = 4;
/// Axis lines run a little past the largest value; labels sit further out.
pub const AXIS_OVERSHOOT: f64 = 1.05;
pub const LABEL_OVERSHOOT: f64 = 1.12;
pub const LEGEND_WIDTH: f64 = 110.0;
pub const LEGEND_INSET: f64 = 8.0;
pub const LEGEND_TOP: f64 = 12.0;
pub const LEGEND_ROW: f64 = 18.0;
pub const LEGEND_SWATCH: f64 = 12.0;

const UNKNOWN: &str = "Unknown";

/// One score axis, in drawing order clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadarAxis {
	Intensity,
	Likelihood,
	Relevance,
}

impl RadarAxis {
	pub const ALL: [RadarAxis; 3] = [RadarAxis::Intensity, RadarAxis::Likelihood, RadarAxis::Relevance];

	pub fn label(self) -> &'static str {
		match self {
			RadarAxis::Intensity => "intensity",
			RadarAxis::Likelihood => "likelihood",
			RadarAxis::Relevance => "relevance",
		}
	}

	/// Score of `metrics` on this axis; missing or non-finite scores are 0.
	pub fn value(self, metrics: &SectorMetrics) -> f64 {
		let v = match self {
			RadarAxis::Intensity => metrics.intensity,
			RadarAxis::Likelihood => metrics.likelihood,
			RadarAxis::Relevance => metrics.relevance,
		};
		v.filter(|v| v.is_finite()).unwrap_or(0.0)
	}

	/// Angle of the axis at `index`.
	pub fn angle(index: usize) -> f64 {
		index as f64 * std::f64::consts::TAU / Self::ALL.len() as f64
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarVertex {
	pub axis: RadarAxis,
	pub value: f64,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadarShape {
	pub sector: String,
	pub color: &'static str,
	pub vertices: Vec<RadarVertex>,
}

impl RadarShape {
	pub fn outline(&self) -> Vec<CurveSegment> {
		cardinal_closed(&self.vertices.iter().map(|v| (v.x, v.y)).collect::<Vec<_>>())
	}
}

/// The `max_items` sectors with the most records, largest first. Equal
/// counts keep their input order.
pub fn top_sectors(data: &[SectorMetrics], max_items: usize) -> Vec<&SectorMetrics> {
	let mut items: Vec<_> = data.iter().collect();
	items.sort_by(|a, b| b.count.cmp(&a.count));
	items.truncate(max_items);
	items
}

/// Closed cardinal curve (tension 0) through `points`: every segment starts
/// and ends on a point and the last one returns to the first.
pub fn cardinal_closed(points: &[(f64, f64)]) -> Vec<CurveSegment> {
	let n = points.len();
	if n < 2 {
		return Vec::new();
	}
	(0..n)
		.map(|i| {
			let p0 = points[(i + n - 1) % n];
			let p1 = points[i];
			let p2 = points[(i + 1) % n];
			let p3 = points[(i + 2) % n];
			[
				(p1.0 + (p2.0 - p0.0) / 6.0, p1.1 + (p2.1 - p0.1) / 6.0),
				(p2.0 - (p3.0 - p1.0) / 6.0, p2.1 - (p3.1 - p1.1) / 6.0),
				p2,
			]
		})
		.collect()
}

pub struct RadarLayout {
	pub shapes: Vec<RadarShape>,
	pub center: (f64, f64),
	pub radius: f64,
	/// Largest absolute score shown, never below 1.
	pub max_value: f64,
	pub r: LinearScale,
	width: f64,
}

impl RadarLayout {
	/// `None` when there is no sector to draw.
	pub fn new(data: &[SectorMetrics], max_items: usize, width: f64, height: f64) -> Option<Self> {
		let items = top_sectors(data, max_items);
		if items.is_empty() {
			return None;
		}
		let max_value = items
			.iter()
			.flat_map(|m| RadarAxis::ALL.into_iter().map(move |a| a.value(m).abs()))
			.fold(1.0, f64::max);
		let radius = (width.min(height) / 2.0 - MARGIN).max(0.0);
		let r = LinearScale::new((0.0, max_value), (0.0, radius));
		let center = (width / 2.0, height / 2.0);
		let shapes = items
			.iter()
			.enumerate()
			.map(|(i, m)| RadarShape {
				sector: m
					.sector
					.as_deref()
					.map(str::trim)
					.filter(|s| !s.is_empty())
					.unwrap_or(UNKNOWN)
					.to_string(),
				color: color_at(i),
				vertices: RadarAxis::ALL
					.into_iter()
					.enumerate()
					.map(|(k, axis)| {
						let value = axis.value(m);
						let (dx, dy) = polar_to_cartesian(RadarAxis::angle(k), r.map(value));
						RadarVertex {
							axis,
							value,
							x: center.0 + dx,
							y: center.1 + dy,
						}
					})
					.collect(),
			})
			.collect();
		Some(Self {
			shapes,
			center,
			radius,
			max_value,
			r,
			width,
		})
	}

	pub fn grid_radii(&self) -> Vec<f64> {
		(1..=GRID_LEVELS)
			.map(|level| self.radius * level as f64 / GRID_LEVELS as f64)
			.collect()
	}

	fn on_axis(&self, index: usize, value: f64) -> (f64, f64) {
		let (dx, dy) = polar_to_cartesian(RadarAxis::angle(index), self.r.map(value));
		(self.center.0 + dx, self.center.1 + dy)
	}

	pub fn axis_end(&self, index: usize) -> (f64, f64) {
		self.on_axis(index, self.max_value * AXIS_OVERSHOOT)
	}

	pub fn label_anchor(&self, index: usize) -> (f64, f64) {
		self.on_axis(index, self.max_value * LABEL_OVERSHOOT)
	}

	/// Top-left corner of legend row `index`.
	pub fn legend_row(&self, index: usize) -> (f64, f64) {
		(
			self.width - LEGEND_INSET - LEGEND_WIDTH,
			LEGEND_TOP + index as f64 * LEGEND_ROW,
		)
	}

	/// `(shape, vertex)` closest to the pointer within `reach` pixels. Later
	/// shapes are drawn on top and win exact ties.
	pub fn vertex_at(&self, x: f64, y: f64, reach: f64) -> Option<(usize, usize)> {
		let mut best = None;
		let mut best_distance = reach;
		for (s, shape) in self.shapes.iter().enumerate() {
			for (v, vertex) in shape.vertices.iter().enumerate() {
				let d = (vertex.x - x).hypot(vertex.y - y);
				if d <= best_distance {
					best_distance = d;
					best = Some((s, v));
				}
			}
		}
		best
	}
}
