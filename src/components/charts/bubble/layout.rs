use crate::components::charts::palette::CategoryPalette;
use crate::components::charts::scale::{LinearScale, Margin, SqrtScale, extent};

pub const MARGIN: Margin = Margin {
	top: 12.0,
	right: 12.0,
	bottom: 36.0,
	left: 48.0,
};

pub const RADIUS_RANGE: (f64, f64) = (3.0, 18.0);
pub const AXIS_TICKS: usize = 6;

pub const LEGEND_WIDTH: f64 = 140.0;
pub const LEGEND_TOP: f64 = 10.0;
pub const LEGEND_ROW: f64 = 18.0;
pub const LEGEND_SWATCH: f64 = 12.0;
pub const LEGEND_MAX_ITEMS: usize = 8;

/// Extra pixels around a bubble that still count as a hit.
const HIT_SLOP: f64 = 2.0;

/// One bubble before layout.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleDatum {
	pub x: f64,
	pub y: f64,
	pub r: f64,
	pub category: String,
	pub title: String,
	pub details: Vec<String>,
}

/// Resting position and size of a bubble, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedBubble {
	pub cx: f64,
	pub cy: f64,
	pub r: f64,
}

/// A legend row: swatch at (`x`, `y`), label to its right.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
	pub category: String,
	pub x: f64,
	pub y: f64,
}

impl LegendItem {
	fn contains(&self, px: f64, py: f64) -> bool {
		(self.x..=self.x + LEGEND_WIDTH).contains(&px) && (self.y..self.y + LEGEND_ROW).contains(&py)
	}
}

pub struct BubbleLayout {
	pub x: LinearScale,
	pub y: LinearScale,
	pub r: SqrtScale,
	pub placed: Vec<PlacedBubble>,
	pub legend: Vec<LegendItem>,
}

impl BubbleLayout {
	/// Places `data` on a `width`×`height` canvas; `None` when there is
	/// nothing to plot. `palette` is updated with the categories present.
	pub fn new(
		data: &[BubbleDatum],
		palette: &mut CategoryPalette,
		width: f64,
		height: f64,
	) -> Option<Self> {
		let x_extent = extent(data.iter().map(|d| d.x))?;
		let y_extent = extent(data.iter().map(|d| d.y))?;
		let r_extent = extent(data.iter().map(|d| d.r)).unwrap_or((1.0, 1.0));
		let (plot_w, plot_h) = MARGIN.inner(width, height);
		let x = LinearScale::new(x_extent, (MARGIN.left, MARGIN.left + plot_w)).nice(AXIS_TICKS);
		let y = LinearScale::new(y_extent, (MARGIN.top + plot_h, MARGIN.top)).nice(AXIS_TICKS);
		let r = SqrtScale::new(r_extent, RADIUS_RANGE);

		let placed = data
			.iter()
			.map(|d| PlacedBubble {
				cx: x.map(d.x),
				cy: y.map(d.y),
				r: r.map(d.r).max(0.0),
			})
			.collect();

		palette.assign(data.iter().map(|d| d.category.as_str()));
		let legend_x = width - LEGEND_WIDTH;
		let legend = palette
			.categories()
			.iter()
			.take(LEGEND_MAX_ITEMS)
			.enumerate()
			.map(|(i, category)| LegendItem {
				category: category.clone(),
				x: legend_x,
				y: LEGEND_TOP + i as f64 * LEGEND_ROW,
			})
			.collect();

		Some(Self {
			x,
			y,
			r,
			placed,
			legend,
		})
	}

	/// Topmost bubble under the pointer given each bubble's current radius.
	pub fn point_at(&self, px: f64, py: f64, radii: impl Fn(usize) -> f64) -> Option<usize> {
		self.placed
			.iter()
			.enumerate()
			.rev()
			.find(|(i, b)| (px - b.cx).hypot(py - b.cy) <= radii(*i) + HIT_SLOP)
			.map(|(i, _)| i)
	}

	pub fn legend_at(&self, px: f64, py: f64) -> Option<&str> {
		self.legend
			.iter()
			.find(|item| item.contains(px, py))
			.map(|item| item.category.as_str())
	}
}
