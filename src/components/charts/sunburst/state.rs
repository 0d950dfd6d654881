use log::{debug, info};

use super::partition::{NodeId, NodePath, Partition};
use super::zoom::ZoomState;
use crate::components::charts::palette::CategoryPalette;
use crate::components::charts::scale::cartesian_to_polar;
use crate::data::types::HierarchyNode;

/// Summary of the node the user drilled into.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
	pub name: String,
	pub value: f64,
	pub depth: usize,
	pub path: String,
}

pub struct SunburstState {
	pub partition: Partition,
	pub zoom: ZoomState,
	pub hover: Option<NodeId>,
	pub width: f64,
	pub height: f64,
	palette: CategoryPalette,
}

impl SunburstState {
	/// Lays out `data` for a `width`×`height` canvas, focused on the deepest
	/// node of `focus` that still exists. `None` when there is nothing to draw.
	pub fn new(data: &HierarchyNode, width: f64, height: f64, focus: &[String]) -> Option<Self> {
		let radius = width.min(height) / 2.0;
		let partition = Partition::new(data, radius)?;
		let palette = CategoryPalette::new(
			partition
				.nodes()
				.iter()
				.filter(|n| n.depth == 1)
				.map(|n| n.name.as_str()),
		);
		let zoom = ZoomState::restore(&partition, focus);
		info!(
			"sunburst laid out: {} nodes, {} rings",
			partition.len(),
			partition.levels()
		);
		Some(Self {
			partition,
			zoom,
			hover: None,
			width,
			height,
			palette,
		})
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	pub fn focus_path(&self) -> NodePath {
		self.zoom.focus_path(&self.partition)
	}

	/// Slices take the color of their depth-1 ancestor.
	pub fn color(&self, id: NodeId) -> &'static str {
		let branch = self.partition.node(id).branch;
		self.palette.color(&self.partition.node(branch).name)
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<NodeId> {
		let (cx, cy) = self.center();
		let (angle, r) = cartesian_to_polar(x - cx, y - cy);
		self.zoom.hit_test(&self.partition, angle, r)
	}

	pub fn set_hover(&mut self, node: Option<NodeId>) {
		self.hover = node;
	}

	/// Zooms into the slice under the pointer, or out when none is there.
	pub fn click_at(&mut self, x: f64, y: f64) -> bool {
		let hit = self.node_at_position(x, y);
		self.zoom.click(&self.partition, hit)
	}

	pub fn zoom_out(&mut self) -> bool {
		debug!("sunburst zoom out");
		self.zoom.reset_focus(&self.partition)
	}

	pub fn selection(&self) -> Option<Selection> {
		let focus = self.zoom.focus();
		if focus == self.partition.root() {
			return None;
		}
		let node = self.partition.node(focus);
		Some(Selection {
			name: node.name.clone(),
			value: node.value,
			depth: node.depth,
			path: self.partition.ancestor_path(focus),
		})
	}

	/// Tooltip title and lines for a slice.
	pub fn describe(&self, id: NodeId) -> (String, Vec<String>) {
		let node = self.partition.node(id);
		(
			node.name.clone(),
			vec![
				format!("Value: {}", node.value),
				format!("Depth: {}", node.depth),
				self.partition.ancestor_path(id),
			],
		)
	}

	/// Drops the fade-in, for rebuilds that only change the canvas size.
	pub fn skip_entrance(&mut self) {
		self.zoom.skip_entrance();
	}

	pub fn tick(&mut self, dt_ms: f64) {
		self.zoom.tick(dt_ms);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::types::HierarchyNode as H;

	fn data() -> H {
		H::branch(
			"topics",
			vec![
				H::branch("Energy", vec![H::leaf("oil", 1.0), H::leaf("gas", 1.0)]),
				H::leaf("Finance", 2.0),
			],
		)
	}

	fn settled(focus: &[String]) -> SunburstState {
		let mut s = SunburstState::new(&data(), 400.0, 300.0, focus).unwrap();
		while s.zoom.tick(16.0) {}
		s
	}

	#[test]
	fn radius_fits_the_smaller_side() {
		let s = settled(&[]);
		assert_eq!(s.partition.radius(), 150.0);
		assert_eq!(s.center(), (200.0, 150.0));
	}

	#[test]
	fn click_drills_in_and_background_zooms_out() {
		let mut s = settled(&[]);
		// ring 1 is 50..100px; Energy covers the right half (clockwise from 12)
		assert!(s.click_at(200.0 + 75.0, 150.0));
		let sel = s.selection().unwrap();
		assert_eq!(sel.name, "Energy");
		assert_eq!(sel.path, "Energy");
		assert_eq!(sel.value, 2.0);
		while s.zoom.tick(16.0) {}
		// the corner is background
		assert!(s.click_at(1.0, 1.0));
		assert_eq!(s.selection(), None);
	}

	#[test]
	fn colors_follow_top_level_branch() {
		let s = settled(&[]);
		let energy = s.partition.find_path(&["Energy".into()]).unwrap();
		let gas = s.partition.find_path(&["Energy".into(), "gas".into()]).unwrap();
		let finance = s.partition.find_path(&["Finance".into()]).unwrap();
		assert_eq!(s.color(energy), s.color(gas));
		assert_ne!(s.color(energy), s.color(finance));
	}

	#[test]
	fn focus_survives_rebuild() {
		let mut s = settled(&[]);
		let energy = s.partition.find_path(&["Energy".into()]).unwrap();
		s.zoom.focus_on(&s.partition, energy);
		let rebuilt = SunburstState::new(&data(), 800.0, 600.0, &s.focus_path()).unwrap();
		assert_eq!(rebuilt.selection().map(|s| s.name), Some("Energy".into()));
	}

	#[test]
	fn resized_rebuild_keeps_slices_visible() {
		let s = settled(&[]);
		let mut resized = SunburstState::new(&data(), 600.0, 450.0, &s.focus_path()).unwrap();
		assert_eq!(resized.zoom.visual(1).opacity, 0.0);
		resized.skip_entrance();
		assert_eq!(resized.zoom.visual(1).opacity, s.zoom.visual(1).opacity);
	}

	#[test]
	fn empty_hierarchy_has_no_state() {
		assert!(SunburstState::new(&H::branch("root", vec![]), 400.0, 300.0, &[]).is_none());
	}

	#[test]
	fn describe_lists_value_depth_and_path() {
		let s = settled(&[]);
		let gas = s.partition.find_path(&["Energy".into(), "gas".into()]).unwrap();
		let (title, lines) = s.describe(gas);
		assert_eq!(title, "gas");
		assert_eq!(lines, vec!["Value: 1", "Depth: 2", "Energy → gas"]);
	}
}
