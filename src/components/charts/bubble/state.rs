use log::{debug, info};

use super::layout::{BubbleDatum, BubbleLayout};
use crate::components::charts::palette::CategoryPalette;
use crate::components::charts::transition::{Animated, Interpolate, ease_out_cubic, lerp};

pub const DEFAULT_OPACITY: f64 = 0.85;
pub const PINNED_OPACITY: f64 = 0.95;
pub const DIMMED_OPACITY: f64 = 0.12;
pub const FADED_OPACITY: f64 = 0.18;
pub const HOVERED_OPACITY: f64 = 0.95;
pub const PREVIEW_OPACITY: f64 = 0.95;
pub const PREVIEW_OTHER_OPACITY: f64 = 0.15;

pub const HOVER_RADIUS_SCALE: f64 = 1.28;
pub const BASE_STROKE: f64 = 1.0;
pub const HOVER_STROKE: f64 = 2.4;

pub const STYLE_TWEEN_MS: f64 = 120.0;
pub const ENTRANCE_MS: f64 = 800.0;
pub const ENTRANCE_STAGGER_MS: f64 = 5.0;

/// How one bubble is painted on top of its resting layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointStyle {
	pub opacity: f64,
	pub radius_scale: f64,
	pub stroke_width: f64,
}

impl PointStyle {
	const REST: PointStyle = PointStyle {
		opacity: DEFAULT_OPACITY,
		radius_scale: 1.0,
		stroke_width: BASE_STROKE,
	};

	fn with_opacity(opacity: f64) -> Self {
		Self {
			opacity,
			..Self::REST
		}
	}

	fn hovered() -> Self {
		Self {
			opacity: HOVERED_OPACITY,
			radius_scale: HOVER_RADIUS_SCALE,
			stroke_width: HOVER_STROKE,
		}
	}
}

impl Interpolate for PointStyle {
	fn interpolate(&self, to: &Self, t: f64) -> Self {
		Self {
			opacity: lerp(self.opacity, to.opacity, t),
			radius_scale: lerp(self.radius_scale, to.radius_scale, t),
			stroke_width: lerp(self.stroke_width, to.stroke_width, t),
		}
	}
}

/// Styles for every point given the hovered point and the pinned category.
pub fn render_state(
	points: &[BubbleDatum],
	hover: Option<usize>,
	pin: Option<&str>,
) -> Vec<PointStyle> {
	points
		.iter()
		.enumerate()
		.map(|(i, p)| {
			if hover == Some(i) {
				return PointStyle::hovered();
			}
			match (pin, hover) {
				(Some(pinned), _) if p.category == pinned => PointStyle::with_opacity(PINNED_OPACITY),
				(Some(_), _) => PointStyle::with_opacity(DIMMED_OPACITY),
				(None, Some(_)) => PointStyle::with_opacity(FADED_OPACITY),
				(None, None) => PointStyle::REST,
			}
		})
		.collect()
}

/// Styles while a legend row is hovered: its category stands out.
pub fn legend_preview(points: &[BubbleDatum], category: &str) -> Vec<PointStyle> {
	points
		.iter()
		.map(|p| {
			PointStyle::with_opacity(if p.category == category {
				PREVIEW_OPACITY
			} else {
				PREVIEW_OTHER_OPACITY
			})
		})
		.collect()
}

/// Pointer state of the bubble chart.
///
/// While a category is pinned, hovering anything of another category is
/// ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BubbleInteraction {
	pub pin: Option<String>,
	pub hover: Option<usize>,
	pub legend_hover: Option<String>,
}

impl BubbleInteraction {
	fn allows(&self, category: &str) -> bool {
		self.pin.as_deref().is_none_or(|pinned| pinned == category)
	}

	/// Pointer over point `hit` (or over nothing). A suppressed point counts
	/// as nothing. Returns whether anything changed.
	pub fn pointer_move(&mut self, points: &[BubbleDatum], hit: Option<usize>) -> bool {
		let next = hit.filter(|&i| self.allows(&points[i].category));
		let changed = self.hover != next || self.legend_hover.is_some();
		self.hover = next;
		self.legend_hover = None;
		changed
	}

	pub fn legend_move(&mut self, category: Option<&str>) -> bool {
		if let Some(c) = category {
			if !self.allows(c) {
				return false;
			}
		}
		let next = category.map(str::to_owned);
		let changed = self.legend_hover != next || self.hover.is_some();
		self.legend_hover = next;
		self.hover = None;
		changed
	}

	pub fn pointer_leave(&mut self) -> bool {
		let changed = self.hover.is_some() || self.legend_hover.is_some();
		self.hover = None;
		self.legend_hover = None;
		changed
	}

	pub fn click_point(&mut self, points: &[BubbleDatum], index: usize) {
		self.toggle_pin(&points[index].category);
	}

	pub fn click_legend(&mut self, category: &str) {
		self.toggle_pin(category);
	}

	pub fn click_background(&mut self) -> bool {
		if self.pin.is_none() {
			return false;
		}
		debug!("bubble pin cleared");
		self.pin = None;
		true
	}

	fn toggle_pin(&mut self, category: &str) {
		if self.pin.as_deref() == Some(category) {
			debug!("bubble unpinned {category}");
			self.pin = None;
		} else {
			debug!("bubble pinned {category}");
			self.pin = Some(category.to_owned());
		}
	}

	pub fn styles(&self, points: &[BubbleDatum]) -> Vec<PointStyle> {
		match &self.legend_hover {
			Some(category) => legend_preview(points, category),
			None => render_state(points, self.hover, self.pin.as_deref()),
		}
	}

	/// Category whose legend swatch is outlined.
	pub fn marked_category<'a>(&'a self, points: &'a [BubbleDatum]) -> Option<&'a str> {
		self.legend_hover
			.as_deref()
			.or_else(|| self.hover.map(|i| points[i].category.as_str()))
			.or(self.pin.as_deref())
	}
}

pub struct BubbleState {
	pub data: Vec<BubbleDatum>,
	pub layout: BubbleLayout,
	pub interaction: BubbleInteraction,
	pub styles: Animated<PointStyle>,
	pub palette: CategoryPalette,
	pub width: f64,
	pub height: f64,
	entrance_ms: f64,
}

impl BubbleState {
	/// Lays out `data`, reusing `palette` so colors stay put across rebuilds
	/// and keeping `pin` while its category is still present.
	pub fn new(
		data: Vec<BubbleDatum>,
		mut palette: CategoryPalette,
		pin: Option<String>,
		width: f64,
		height: f64,
	) -> Option<Self> {
		let layout = BubbleLayout::new(&data, &mut palette, width, height)?;
		let interaction = BubbleInteraction {
			pin: pin.filter(|c| data.iter().any(|d| &d.category == c)),
			..BubbleInteraction::default()
		};
		let styles = Animated::new(interaction.styles(&data));
		info!(
			"bubble chart laid out: {} points, {} categories",
			data.len(),
			palette.categories().len()
		);
		Some(Self {
			data,
			layout,
			interaction,
			styles,
			palette,
			width,
			height,
			entrance_ms: 0.0,
		})
	}

	/// Entrance growth of point `index` in `[0, 1]`.
	pub fn entrance(&self, index: usize) -> f64 {
		let local = self.entrance_ms - index as f64 * ENTRANCE_STAGGER_MS;
		ease_out_cubic(local / ENTRANCE_MS)
	}

	pub fn radius(&self, index: usize) -> f64 {
		let scale = self.styles.values().get(index).map_or(1.0, |s| s.radius_scale);
		self.layout.placed[index].r * scale * self.entrance(index)
	}

	pub fn color(&self, index: usize) -> &'static str {
		self.palette.color(&self.data[index].category)
	}

	fn restyle(&mut self) {
		let target = self.interaction.styles(&self.data);
		self.styles.animate_to(target, STYLE_TWEEN_MS);
	}

	/// Routes a pointer move to the legend or the points. Returns the hovered
	/// point, if any.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<usize> {
		let changed = match self.layout.legend_at(x, y).map(str::to_owned) {
			Some(category) => self.interaction.legend_move(Some(&category)),
			None => {
				let hit = self.layout.point_at(x, y, |i| self.radius(i));
				self.interaction.pointer_move(&self.data, hit)
			}
		};
		if changed {
			self.restyle();
		}
		self.interaction.hover
	}

	pub fn pointer_leave(&mut self) {
		if self.interaction.pointer_leave() {
			self.restyle();
		}
	}

	pub fn click(&mut self, x: f64, y: f64) {
		if let Some(category) = self.layout.legend_at(x, y).map(str::to_owned) {
			self.interaction.click_legend(&category);
		} else if let Some(i) = self.layout.point_at(x, y, |i| self.radius(i)) {
			self.interaction.click_point(&self.data, i);
		} else if !self.interaction.click_background() {
			return;
		}
		self.restyle();
	}

	pub fn describe(&self, index: usize) -> (String, Vec<String>) {
		let d = &self.data[index];
		(d.title.clone(), d.details.clone())
	}

	/// Shows every point at full size without the entrance growth.
	pub fn skip_entrance(&mut self) {
		self.entrance_ms = ENTRANCE_MS + self.data.len() as f64 * ENTRANCE_STAGGER_MS;
	}

	pub fn tick(&mut self, dt_ms: f64) {
		self.entrance_ms += dt_ms.max(0.0);
		self.styles.tick(dt_ms);
	}
}
