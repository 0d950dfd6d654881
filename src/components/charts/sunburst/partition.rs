//! Radial partition of a value hierarchy into angular/radial intervals.

use std::f64::consts::TAU;

use crate::data::types::HierarchyNode;

/// Pre-order index of a node in a [`Partition`]. The root is `0`.
pub type NodeId = usize;

/// Names from the root (exclusive) down to a node.
pub type NodePath = Vec<String>;

/// Slices narrower than this are not drawn or hit.
pub const MIN_DRAWN_ANGLE: f64 = 1e-9;

/// Angular `[x0, x1)` and radial `[y0, y1)` interval of one node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Span {
	pub x0: f64,
	pub x1: f64,
	pub y0: f64,
	pub y1: f64,
}

impl Span {
	pub fn width(&self) -> f64 {
		self.x1 - self.x0
	}

	pub fn contains(&self, angle: f64, r: f64) -> bool {
		angle >= self.x0 && angle < self.x1 && r >= self.y0 && r < self.y1
	}

	/// Re-expresses `self` relative to `focus`, so that `focus` fills the full
	/// circle and its inner radius moves to the center.
	pub fn project_onto(&self, focus: &Span) -> Span {
		let k = TAU / focus.width();
		let angle = |x: f64| ((x - focus.x0) * k).clamp(0.0, TAU);
		Span {
			x0: angle(self.x0),
			x1: angle(self.x1),
			y0: (self.y0 - focus.y0).max(0.0),
			y1: (self.y1 - focus.y0).max(0.0),
		}
	}
}

#[derive(Clone, Debug)]
pub struct PartitionNode {
	pub name: String,
	/// Aggregate value: leaf value, or the sum over children.
	pub value: f64,
	pub depth: usize,
	pub parent: Option<NodeId>,
	/// Sorted by descending value.
	pub children: Vec<NodeId>,
	/// Last pre-order index inside this node's subtree.
	pub last_descendant: NodeId,
	/// Depth-1 ancestor (itself at depth 1); the root points at itself.
	pub branch: NodeId,
	pub span: Span,
}

impl PartitionNode {
	pub fn is_drawable(&self) -> bool {
		self.depth > 0 && self.span.width() > MIN_DRAWN_ANGLE
	}
}

/// Laid-out hierarchy. Immutable once built.
#[derive(Clone, Debug)]
pub struct Partition {
	nodes: Vec<PartitionNode>,
	radius: f64,
	levels: usize,
}

fn aggregate(node: &HierarchyNode) -> f64 {
	if node.children.is_empty() {
		node.value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0)
	} else {
		node.children.iter().map(aggregate).sum()
	}
}

fn height(node: &HierarchyNode) -> usize {
	node.children.iter().map(|c| height(c) + 1).max().unwrap_or(0)
}

impl Partition {
	/// Lays out `root` on a disc of `radius`. Returns `None` for a hierarchy
	/// without children, which has nothing to draw.
	pub fn new(root: &HierarchyNode, radius: f64) -> Option<Self> {
		if root.children.is_empty() {
			return None;
		}
		let levels = height(root) + 1;
		let mut partition = Self {
			nodes: Vec::new(),
			radius,
			levels,
		};
		let ring = radius / levels as f64;
		partition.place(root, None, 0, (0.0, TAU), ring);
		Some(partition)
	}

	fn place(
		&mut self,
		source: &HierarchyNode,
		parent: Option<NodeId>,
		depth: usize,
		(x0, x1): (f64, f64),
		ring: f64,
	) -> NodeId {
		let id = self.nodes.len();
		let branch = match parent {
			Some(p) if depth > 1 => self.nodes[p].branch,
			_ => id,
		};
		self.nodes.push(PartitionNode {
			name: source.name.clone(),
			value: aggregate(source),
			depth,
			parent,
			children: Vec::new(),
			last_descendant: id,
			branch,
			span: Span {
				x0,
				x1,
				y0: depth as f64 * ring,
				y1: (depth + 1) as f64 * ring,
			},
		});

		let mut order: Vec<(usize, f64)> = source
			.children
			.iter()
			.map(aggregate)
			.enumerate()
			.collect();
		// stable: equal values keep input order
		order.sort_by(|a, b| b.1.total_cmp(&a.1));

		let total: f64 = order.iter().map(|(_, v)| v).sum();
		let scale = if total > 0.0 { (x1 - x0) / total } else { 0.0 };
		let mut cursor = x0;
		let count = order.len();
		for (n, (child, value)) in order.into_iter().enumerate() {
			// the last child absorbs rounding so siblings cover the parent exactly
			let end = if n + 1 == count && total > 0.0 {
				x1
			} else {
				(cursor + value * scale).min(x1)
			};
			let child_id =
				self.place(&source.children[child], Some(id), depth + 1, (cursor, end), ring);
			self.nodes[id].children.push(child_id);
			cursor = end;
		}
		self.nodes[id].last_descendant = self.nodes.len() - 1;
		id
	}

	pub fn root(&self) -> NodeId {
		0
	}

	pub fn radius(&self) -> f64 {
		self.radius
	}

	/// Number of rings including the root disc.
	pub fn levels(&self) -> usize {
		self.levels
	}

	pub fn nodes(&self) -> &[PartitionNode] {
		&self.nodes
	}

	pub fn node(&self, id: NodeId) -> &PartitionNode {
		&self.nodes[id]
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Whether `node` lies in the subtree rooted at `ancestor` (inclusive).
	pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
		ancestor <= node && node <= self.nodes[ancestor].last_descendant
	}

	/// Node ids from the root down to `id`.
	pub fn lineage(&self, id: NodeId) -> Vec<NodeId> {
		let mut chain = vec![id];
		let mut cur = id;
		while let Some(parent) = self.nodes[cur].parent {
			chain.push(parent);
			cur = parent;
		}
		chain.reverse();
		chain
	}

	pub fn path_of(&self, id: NodeId) -> NodePath {
		self.lineage(id)
			.into_iter()
			.skip(1)
			.map(|n| self.nodes[n].name.clone())
			.collect()
	}

	/// Breadcrumb like `Energy → Oil`, without the root.
	pub fn ancestor_path(&self, id: NodeId) -> String {
		self.path_of(id).join(" → ")
	}

	#[cfg(test)]
	pub fn find_path(&self, path: &[String]) -> Option<NodeId> {
		let (id, matched) = self.walk(path);
		(matched == path.len()).then_some(id)
	}

	/// Deepest node along `path` that still exists.
	pub fn deepest_match(&self, path: &[String]) -> NodeId {
		self.walk(path).0
	}

	fn walk(&self, path: &[String]) -> (NodeId, usize) {
		let mut cur = self.root();
		for (matched, name) in path.iter().enumerate() {
			let next = self.nodes[cur]
				.children
				.iter()
				.copied()
				.find(|&c| self.nodes[c].name == *name);
			match next {
				Some(c) => cur = c,
				None => return (cur, matched),
			}
		}
		(cur, path.len())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::types::HierarchyNode as H;

	const EPS: f64 = 1e-9;

	fn sample() -> H {
		H::branch(
			"topics",
			vec![
				H::branch("Energy", vec![H::leaf("oil", 3.0), H::leaf("gas", 5.0)]),
				H::branch("Finance", vec![H::leaf("market", 2.0)]),
				H::leaf("Retail", 2.0),
				H::branch("Empty", vec![H::leaf("none", 0.0), H::branch("deep", vec![])]),
			],
		)
	}

	#[test]
	fn values_aggregate_bottom_up() {
		let p = Partition::new(&sample(), 100.0).unwrap();
		assert_eq!(p.node(p.root()).value, 12.0);
		let energy = p.find_path(&["Energy".into()]).unwrap();
		assert_eq!(p.node(energy).value, 8.0);
		let empty = p.find_path(&["Empty".into()]).unwrap();
		assert_eq!(p.node(empty).value, 0.0);
	}

	#[test]
	fn invalid_leaf_values_count_as_zero() {
		let root = H::branch(
			"topics",
			vec![
				H::branch(
					"Mixed",
					vec![
						H::leaf("neg", -3.0),
						H::leaf("oil", 4.0),
						H::leaf("nan", f64::NAN),
						H::leaf("inf", f64::INFINITY),
					],
				),
				H::leaf("Other", 4.0),
			],
		);
		let p = Partition::new(&root, 100.0).unwrap();
		assert_eq!(p.node(p.root()).value, 8.0);
		let mixed = p.find_path(&["Mixed".into()]).unwrap();
		assert_eq!(p.node(mixed).value, 4.0);
		assert!((p.node(mixed).span.width() - TAU / 2.0).abs() < EPS);
		let oil = p.find_path(&["Mixed".into(), "oil".into()]).unwrap();
		assert!((p.node(oil).span.width() - TAU / 2.0).abs() < EPS);
		for name in ["neg", "nan", "inf"] {
			let id = p.find_path(&["Mixed".into(), name.into()]).unwrap();
			let node = p.node(id);
			assert_eq!(node.value, 0.0, "{name}");
			assert!(node.span.width() <= MIN_DRAWN_ANGLE, "{name}");
			assert!(!node.is_drawable(), "{name}");
		}
	}

	#[test]
	fn children_sorted_descending_with_stable_ties() {
		let p = Partition::new(&sample(), 100.0).unwrap();
		let names: Vec<_> = p
			.node(p.root())
			.children
			.iter()
			.map(|&c| p.node(c).name.as_str())
			.collect();
		assert_eq!(names, ["Energy", "Finance", "Retail", "Empty"]);
	}

	#[test]
	fn intervals_are_ordered_and_contained() {
		let p = Partition::new(&sample(), 100.0).unwrap();
		for (id, n) in p.nodes().iter().enumerate() {
			assert!(n.span.x0 <= n.span.x1, "node {id}");
			assert!(n.span.y0 <= n.span.y1, "node {id}");
			for &c in &n.children {
				let child = p.node(c).span;
				assert!(n.span.x0 <= child.x0 + EPS && child.x1 <= n.span.x1 + EPS);
				assert!(child.y0 >= n.span.y1 - EPS);
			}
		}
	}

	#[test]
	fn siblings_tile_their_parent() {
		let p = Partition::new(&sample(), 100.0).unwrap();
		for n in p.nodes().iter().filter(|n| !n.children.is_empty() && n.value > 0.0) {
			let mut cursor = n.span.x0;
			for &c in &n.children {
				let s = p.node(c).span;
				assert!((s.x0 - cursor).abs() < EPS, "gap or overlap at {}", p.node(c).name);
				cursor = s.x1;
			}
			assert!((cursor - n.span.x1).abs() < EPS);
			let widths: f64 = n.children.iter().map(|&c| p.node(c).span.width()).sum();
			assert!((widths - n.span.width()).abs() < EPS);
		}
	}

	#[test]
	fn rings_have_equal_thickness() {
		let p = Partition::new(&sample(), 90.0).unwrap();
		assert_eq!(p.levels(), 3);
		let oil = p.find_path(&["Energy".into(), "oil".into()]).unwrap();
		assert_eq!(p.node(oil).span.y0, 60.0);
		assert_eq!(p.node(oil).span.y1, 90.0);
		assert_eq!(p.node(p.root()).span, Span { x0: 0.0, x1: TAU, y0: 0.0, y1: 30.0 });
	}

	#[test]
	fn zero_value_nodes_are_kept_but_not_drawn() {
		let p = Partition::new(&sample(), 100.0).unwrap();
		let none = p.find_path(&["Empty".into(), "none".into()]).unwrap();
		assert_eq!(p.node(none).span.width(), 0.0);
		assert!(!p.node(none).is_drawable());
		let energy = p.find_path(&["Energy".into()]).unwrap();
		assert!(p.node(energy).is_drawable());
	}

	#[test]
	fn ancestry_is_a_preorder_range_test() {
		let p = Partition::new(&sample(), 100.0).unwrap();
		let energy = p.find_path(&["Energy".into()]).unwrap();
		let gas = p.find_path(&["Energy".into(), "gas".into()]).unwrap();
		let market = p.find_path(&["Finance".into(), "market".into()]).unwrap();
		assert!(p.is_ancestor_of(p.root(), market));
		assert!(p.is_ancestor_of(energy, gas));
		assert!(p.is_ancestor_of(gas, gas));
		assert!(!p.is_ancestor_of(energy, market));
		assert!(!p.is_ancestor_of(gas, energy));
		assert_eq!(p.node(gas).branch, energy);
	}

	#[test]
	fn paths_and_breadcrumbs() {
		let p = Partition::new(&sample(), 100.0).unwrap();
		let gas = p.find_path(&["Energy".into(), "gas".into()]).unwrap();
		assert_eq!(p.ancestor_path(gas), "Energy → gas");
		assert_eq!(p.path_of(gas), vec!["Energy".to_string(), "gas".to_string()]);
		assert_eq!(p.find_path(&["Energy".into(), "coal".into()]), None);
		let energy = p.find_path(&["Energy".into()]).unwrap();
		assert_eq!(p.deepest_match(&["Energy".into(), "coal".into()]), energy);
	}

	#[test]
	fn childless_root_has_no_layout() {
		assert!(Partition::new(&H::leaf("root", 4.0), 100.0).is_none());
	}

	#[test]
	fn projection_onto_root_is_identity() {
		let p = Partition::new(&sample(), 100.0).unwrap();
		let root = p.node(p.root()).span;
		for n in p.nodes() {
			assert_eq!(n.span.project_onto(&root), n.span);
		}
	}
}
