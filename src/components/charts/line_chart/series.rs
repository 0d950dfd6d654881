//! Sorted point series with nearest-point lookup and curve fitting.

/// One sample on the x axis, carrying whatever the tooltip needs in `meta`.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoint<M> {
	pub x: f64,
	pub y: f64,
	pub meta: M,
}

impl<M> SeriesPoint<M> {
	pub fn new(x: f64, y: f64, meta: M) -> Self {
		Self { x, y, meta }
	}
}

/// Drops points without a finite `x`, reads a non-finite `y` as zero and
/// stable-sorts by `x`.
pub fn prepare_series<M>(points: impl IntoIterator<Item = SeriesPoint<M>>) -> Vec<SeriesPoint<M>> {
	let mut series: Vec<_> = points
		.into_iter()
		.filter(|p| p.x.is_finite())
		.map(|mut p| {
			if !p.y.is_finite() {
				p.y = 0.0;
			}
			p
		})
		.collect();
	series.sort_by(|a, b| a.x.total_cmp(&b.x));
	series
}

/// First index whose `x` is not below `x`.
pub fn bisect_left<M>(series: &[SeriesPoint<M>], x: f64) -> usize {
	series.partition_point(|p| p.x < x)
}

/// Index of the point closest to `x` along the axis.
///
/// When `x` sits exactly halfway between two points the later one wins.
pub fn nearest_index<M>(series: &[SeriesPoint<M>], x: f64) -> Option<usize> {
	if series.is_empty() || x.is_nan() {
		return None;
	}
	let i = bisect_left(series, x);
	if i == 0 {
		return Some(0);
	}
	if i >= series.len() {
		return Some(series.len() - 1);
	}
	let to_left = x - series[i - 1].x;
	let to_right = series[i].x - x;
	Some(if to_left >= to_right { i } else { i - 1 })
}

/// One cubic segment: two control points and the end point.
pub type CurveSegment = [(f64, f64); 3];

/// Cubic segments of a curve through `points` (sorted by x) that never
/// overshoots the data between neighbouring samples.
pub fn monotone_curve(points: &[(f64, f64)]) -> Vec<CurveSegment> {
	let n = points.len();
	if n < 2 {
		return Vec::new();
	}
	let mut tangents = vec![0.0; n];
	if n == 2 {
		let s = secant(points[0], points[1]);
		tangents = vec![s, s];
	} else {
		for i in 1..n - 1 {
			tangents[i] = inner_tangent(points[i - 1], points[i], points[i + 1]);
		}
		tangents[0] = end_tangent(points[0], points[1], tangents[1]);
		tangents[n - 1] = end_tangent(points[n - 2], points[n - 1], tangents[n - 2]);
	}
	points
		.windows(2)
		.zip(tangents.windows(2))
		.map(|(p, m)| {
			let (x0, y0) = p[0];
			let (x1, y1) = p[1];
			let dx = (x1 - x0) / 3.0;
			[(x0 + dx, y0 + dx * m[0]), (x1 - dx, y1 - dx * m[1]), (x1, y1)]
		})
		.collect()
}

fn secant((x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> f64 {
	let h = x1 - x0;
	if h == 0.0 { 0.0 } else { (y1 - y0) / h }
}

fn sign(v: f64) -> f64 {
	if v < 0.0 { -1.0 } else { 1.0 }
}

// Fritsch-Carlson style limit: zero at local extrema, otherwise bounded by
// the smaller neighbouring secant.
fn inner_tangent(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
	let h0 = p1.0 - p0.0;
	let h1 = p2.0 - p1.0;
	if h0 + h1 == 0.0 {
		return 0.0;
	}
	let s0 = secant(p0, p1);
	let s1 = secant(p1, p2);
	let p = (s0 * h1 + s1 * h0) / (h0 + h1);
	let m = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
	if m.is_finite() { m } else { 0.0 }
}

fn end_tangent(p0: (f64, f64), p1: (f64, f64), neighbour: f64) -> f64 {
	let h = p1.0 - p0.0;
	if h == 0.0 {
		return neighbour;
	}
	(3.0 * (p1.1 - p0.1) / h - neighbour) / 2.0
}

#[cfg(test)]
mod tests {
	use super::*;

	fn series(points: &[(f64, f64)]) -> Vec<SeriesPoint<()>> {
		prepare_series(points.iter().map(|&(x, y)| SeriesPoint::new(x, y, ())))
	}

	#[test]
	fn nearest_point_picks_closest_sample() {
		let s = series(&[(1.0, 5.0), (3.0, 1.0), (5.0, 9.0)]);
		// 0.9 from x=3 against 1.1 from x=5
		let i = nearest_index(&s, 3.9).unwrap();
		assert_eq!((s[i].x, s[i].y), (3.0, 1.0));
		let i = nearest_index(&s, 4.1).unwrap();
		assert_eq!((s[i].x, s[i].y), (5.0, 9.0));
	}

	#[test]
	fn halfway_tie_goes_to_later_point() {
		let s = series(&[(1.0, 5.0), (3.0, 1.0), (5.0, 9.0)]);
		let i = nearest_index(&s, 2.0).unwrap();
		assert_eq!((s[i].x, s[i].y), (3.0, 1.0));
	}

	#[test]
	fn out_of_range_clamps_to_ends() {
		let s = series(&[(1.0, 5.0), (3.0, 1.0)]);
		assert_eq!(nearest_index(&s, -100.0), Some(0));
		assert_eq!(nearest_index(&s, 100.0), Some(1));
		assert_eq!(nearest_index(&series(&[]), 1.0), None);
	}

	#[test]
	fn duplicates_resolve_to_first() {
		let s = series(&[(1.0, 0.0), (3.0, 1.0), (3.0, 2.0), (5.0, 0.0)]);
		assert_eq!(bisect_left(&s, 3.0), 1);
		assert_eq!(nearest_index(&s, 3.0), Some(1));
	}

	#[test]
	fn preparation_sorts_and_cleans() {
		let s = series(&[(5.0, 1.0), (f64::NAN, 2.0), (1.0, f64::INFINITY), (3.0, 3.0)]);
		let xs: Vec<_> = s.iter().map(|p| p.x).collect();
		assert_eq!(xs, [1.0, 3.0, 5.0]);
		assert_eq!(s[0].y, 0.0);
	}

	#[test]
	fn sort_is_stable_for_equal_x() {
		let s = prepare_series([
			SeriesPoint::new(2.0, 0.0, "b"),
			SeriesPoint::new(1.0, 0.0, "a"),
			SeriesPoint::new(2.0, 0.0, "c"),
		]);
		let metas: Vec<_> = s.iter().map(|p| p.meta).collect();
		assert_eq!(metas, ["a", "b", "c"]);
	}

	#[test]
	fn monotone_curve_stays_within_each_segment() {
		let pts = [(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 5.0), (4.0, 2.0)];
		let segments = monotone_curve(&pts);
		assert_eq!(segments.len(), 4);
		for (seg, w) in segments.iter().zip(pts.windows(2)) {
			let (lo, hi) = (w[0].1.min(w[1].1), w[0].1.max(w[1].1));
			for (_, y) in &seg[..2] {
				assert!(*y >= lo - 1e-9 && *y <= hi + 1e-9, "{y} outside {lo}..{hi}");
			}
			assert_eq!(seg[2], w[1]);
		}
	}

	#[test]
	fn short_inputs() {
		assert!(monotone_curve(&[(0.0, 1.0)]).is_empty());
		let line = monotone_curve(&[(0.0, 0.0), (3.0, 3.0)]);
		assert_eq!(line, vec![[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]]);
	}
}
