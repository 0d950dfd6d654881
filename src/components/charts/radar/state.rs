use log::info;

use super::layout::{RadarAxis, RadarLayout};
use crate::components::charts::scale::format_tick;
use crate::components::charts::transition::{Animated, Tween};
use crate::data::types::SectorMetrics;

pub const ENTRANCE_MS: f64 = 700.0;
pub const DOT_RADIUS: f64 = 3.0;
pub const DOT_HOVER_RADIUS: f64 = 5.0;
pub const DOT_TWEEN_MS: f64 = 250.0;
/// Extra pointer reach around a dot.
pub const HIT_SLOP: f64 = 3.0;

/// A vertex as `(shape, axis)` indices.
pub type VertexId = (usize, usize);

pub struct RadarState {
	pub layout: RadarLayout,
	pub hover: Option<VertexId>,
	pub width: f64,
	pub height: f64,
	dots: Animated<f64>,
	entrance: Tween,
}

impl RadarState {
	pub fn new(data: &[SectorMetrics], max_items: usize, width: f64, height: f64) -> Option<Self> {
		let layout = RadarLayout::new(data, max_items, width, height)?;
		info!(
			"radar laid out: {} sectors, scale 0..{}",
			layout.shapes.len(),
			layout.max_value
		);
		Some(Self {
			dots: Animated::new(vec![DOT_RADIUS; layout.shapes.len() * RadarAxis::ALL.len()]),
			layout,
			hover: None,
			width,
			height,
			entrance: Tween::new(ENTRANCE_MS),
		})
	}

	fn slot((shape, axis): VertexId) -> usize {
		shape * RadarAxis::ALL.len() + axis
	}

	pub fn dot_radius(&self, vertex: VertexId) -> f64 {
		self.dots.values().get(Self::slot(vertex)).copied().unwrap_or(DOT_RADIUS)
	}

	/// Opacity of the sector shapes during the fade-in.
	pub fn shape_opacity(&self) -> f64 {
		self.entrance.progress()
	}

	pub fn set_hover(&mut self, hover: Option<VertexId>) {
		if self.hover == hover {
			return;
		}
		self.hover = hover;
		let hovered = hover.map(Self::slot);
		let target = (0..self.dots.values().len())
			.map(|i| if hovered == Some(i) { DOT_HOVER_RADIUS } else { DOT_RADIUS })
			.collect();
		self.dots.animate_to(target, DOT_TWEEN_MS);
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<VertexId> {
		let hit = self.layout.vertex_at(x, y, DOT_HOVER_RADIUS + HIT_SLOP);
		self.set_hover(hit);
		hit
	}

	pub fn describe(&self, (shape, axis): VertexId) -> (String, Vec<String>) {
		let shape = &self.layout.shapes[shape];
		let vertex = &shape.vertices[axis];
		(
			shape.sector.clone(),
			vec![format!("{}: {}", vertex.axis.label(), format_tick(vertex.value))],
		)
	}

	/// Shows the shapes without the fade-in.
	pub fn skip_entrance(&mut self) {
		self.entrance.finish();
	}

	pub fn tick(&mut self, dt_ms: f64) {
		self.entrance.advance(dt_ms);
		self.dots.tick(dt_ms);
	}
}
