//! Focus (drill-down) state of a sunburst and its animated transitions.
//!
//! The focus is always one node of an immutable [`Partition`]. Changing it
//! re-projects every slice so the focused subtree fills the circle; slices
//! outside that subtree stay in place but are dimmed and ignored by hit tests.

use log::debug;

use super::partition::{MIN_DRAWN_ANGLE, NodeId, NodePath, Partition, Span};
use crate::components::charts::transition::{Animated, Interpolate, Tween, lerp};

pub const ZOOM_DURATION_MS: f64 = 700.0;
pub const FADE_IN_MS: f64 = 700.0;
/// Opacity of the subtree slices once the chart has faded in.
pub const ENTRANCE_OPACITY: f64 = 0.9;
/// Opacity of the focused subtree after a zoom.
pub const FOCUSED_OPACITY: f64 = 0.95;
pub const DIMMED_OPACITY: f64 = 0.3;

/// On-screen geometry and opacity of one slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceVisual {
	pub span: Span,
	pub opacity: f64,
}

impl Interpolate for SliceVisual {
	fn interpolate(&self, to: &Self, t: f64) -> Self {
		Self {
			span: Span {
				x0: lerp(self.span.x0, to.span.x0, t),
				x1: lerp(self.span.x1, to.span.x1, t),
				y0: lerp(self.span.y0, to.span.y0, t),
				y1: lerp(self.span.y1, to.span.y1, t),
			},
			opacity: lerp(self.opacity, to.opacity, t),
		}
	}
}

fn targets(partition: &Partition, focus: NodeId, active: f64) -> Vec<SliceVisual> {
	let focus_span = partition.node(focus).span;
	(0..partition.len())
		.map(|id| SliceVisual {
			span: partition.node(id).span.project_onto(&focus_span),
			opacity: if partition.is_ancestor_of(focus, id) {
				active
			} else {
				DIMMED_OPACITY
			},
		})
		.collect()
}

#[derive(Clone, Debug)]
pub struct ZoomState {
	focus: NodeId,
	slices: Animated<SliceVisual>,
	fade: Tween,
}

impl ZoomState {
	/// Unzoomed state, fading in.
	pub fn new(partition: &Partition) -> Self {
		Self::restore(partition, &[])
	}

	/// State for a rebuilt tree, focused on the deepest surviving node of
	/// `path`. The projection is applied at once, without a zoom transition.
	pub fn restore(partition: &Partition, path: &[String]) -> Self {
		let mut focus = partition.deepest_match(path);
		if partition.node(focus).span.width() <= MIN_DRAWN_ANGLE {
			focus = partition.root();
		}
		Self {
			focus,
			slices: Animated::new(targets(partition, focus, ENTRANCE_OPACITY)),
			fade: Tween::new(FADE_IN_MS),
		}
	}

	pub fn focus(&self) -> NodeId {
		self.focus
	}

	pub fn focus_path(&self, partition: &Partition) -> NodePath {
		partition.path_of(self.focus)
	}

	/// Starts zooming to `target`. Returns `false` (and changes nothing) when
	/// `target` is already focused or has no angular width.
	pub fn focus_on(&mut self, partition: &Partition, target: NodeId) -> bool {
		if target == self.focus || target >= partition.len() {
			return false;
		}
		if partition.node(target).span.width() <= MIN_DRAWN_ANGLE {
			debug!("ignoring zoom to zero-width node {}", partition.node(target).name);
			return false;
		}
		debug!("zoom focus -> {:?}", partition.path_of(target));
		self.focus = target;
		self.slices
			.animate_to(targets(partition, target, FOCUSED_OPACITY), ZOOM_DURATION_MS);
		true
	}

	pub fn reset_focus(&mut self, partition: &Partition) -> bool {
		self.focus_on(partition, partition.root())
	}

	/// Shows the slices at full opacity without the fade-in.
	pub fn skip_entrance(&mut self) {
		self.fade.finish();
	}

	/// Advances running animations; returns whether any is still running.
	pub fn tick(&mut self, dt_ms: f64) -> bool {
		self.fade.advance(dt_ms);
		let zooming = self.slices.tick(dt_ms);
		zooming || !self.fade.is_done()
	}

	#[cfg(test)]
	pub fn is_animating(&self) -> bool {
		self.slices.is_running() || !self.fade.is_done()
	}

	/// Slice as currently drawn, entrance fade included.
	pub fn visual(&self, id: NodeId) -> SliceVisual {
		let slice = self.slices.values()[id];
		SliceVisual {
			opacity: slice.opacity * self.fade.progress(),
			..slice
		}
	}

	/// Slice at the end of the running transition.
	#[cfg(test)]
	pub fn target(&self, id: NodeId) -> SliceVisual {
		self.slices.target()[id]
	}

	pub fn is_interactive(&self, partition: &Partition, id: NodeId) -> bool {
		partition.is_ancestor_of(self.focus, id)
	}

	/// Interactive slice under the polar point, using on-screen geometry.
	pub fn hit_test(&self, partition: &Partition, angle: f64, r: f64) -> Option<NodeId> {
		partition
			.nodes()
			.iter()
			.enumerate()
			.find(|&(id, node)| {
				let span = self.slices.values()[id].span;
				node.depth > 0
					&& span.width() > MIN_DRAWN_ANGLE
					&& self.is_interactive(partition, id)
					&& span.contains(angle, r)
			})
			.map(|(id, _)| id)
	}

	/// Click routing: a slice zooms in, anything else zooms back out.
	pub fn click(&mut self, partition: &Partition, hit: Option<NodeId>) -> bool {
		match hit {
			Some(id) => self.focus_on(partition, id),
			None => self.reset_focus(partition),
		}
	}
}
