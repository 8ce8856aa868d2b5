//! Deterministic circular layout for ring and global views.
//!
//! No physics: node positions are a pure function of member order, so the
//! same ring always produces the same diagram. Member order comes straight
//! from the backend and is load-bearing — it fixes each node's angle and the
//! hub of a synthesized star.

use std::collections::HashMap;
use std::f64::consts::PI;

use super::types::{PatternType, Ring};

/// Center of the single-ring view box.
pub const RING_CENTER: (f64, f64) = (155.0, 160.0);
/// Center of the global view box.
pub const GLOBAL_CENTER: (f64, f64) = (440.0, 300.0);
/// Ellipse radii on which ring cluster centers are placed in the global view.
pub const CLUSTER_RADII: (f64, f64) = (280.0, 225.0);
/// Radius of each member circle around its cluster center.
pub const CLUSTER_MEMBER_RADIUS: f64 = 55.0;

/// A positioned node, derived per layout pass and never mutated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	pub id: String,
	/// Owning ring, used for highlight context in the global view.
	pub ring_id: Option<String>,
	pub x: f64,
	pub y: f64,
	pub score: i32,
}

/// A directed visual edge between two laid-out nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutEdge {
	pub source: String,
	pub target: String,
	pub ring_id: Option<String>,
}

/// A complete laid-out graph: what the renderer consumes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphLayout {
	pub nodes: Vec<LayoutNode>,
	pub edges: Vec<LayoutEdge>,
}

/// Ring layout radius: small rings stay compact, large rings are capped so
/// the diagram never outgrows the view box.
pub fn ring_radius(n: usize) -> f64 {
	if n <= 2 {
		60.0
	} else {
		(40.0 + 14.0 * n as f64).min(110.0)
	}
}

/// Angle of member `i` of `n` in the ring view: first member at the top,
/// proceeding clockwise.
fn ring_angle(i: usize, n: usize) -> f64 {
	(i as f64 / n as f64) * 2.0 * PI - PI / 2.0
}

/// Finalize a ring's edge list: real transaction edges verbatim when any were
/// observed, otherwise a topology synthesized from the ring's pattern so the
/// ring is always drawable.
///
/// Cycle rings close into one loop over the member order (n edges); every
/// other pattern becomes a star with member 0 as the hub and all other
/// members directed into it (n − 1 edges).
pub fn finalize_edges(ring: &Ring) -> Vec<(String, String)> {
	if !ring.edges.is_empty() {
		return ring.edges.clone();
	}
	let members = &ring.member_ids;
	let n = members.len();
	match ring.pattern {
		PatternType::Cycle => (0..n)
			.map(|i| (members[i].clone(), members[(i + 1) % n].clone()))
			.collect(),
		_ => (1..n)
			.map(|i| (members[i].clone(), members[0].clone()))
			.collect(),
	}
}

/// Lay out one ring around [`RING_CENTER`].
///
/// Scores are looked up per member and default to 0 for ids the detection
/// result never scored. Deterministic: identical input yields identical
/// output, bit for bit.
pub fn layout_ring(ring: &Ring, scores: &HashMap<String, i32>) -> GraphLayout {
	layout_ring_at(ring, scores, RING_CENTER, true)
}

fn layout_ring_at(
	ring: &Ring,
	scores: &HashMap<String, i32>,
	center: (f64, f64),
	top_offset: bool,
) -> GraphLayout {
	let n = ring.member_ids.len();
	let radius = if top_offset {
		ring_radius(n)
	} else {
		CLUSTER_MEMBER_RADIUS
	};
	let nodes = ring
		.member_ids
		.iter()
		.enumerate()
		.map(|(i, id)| {
			let angle = if top_offset {
				ring_angle(i, n)
			} else {
				(i as f64 / n as f64) * 2.0 * PI
			};
			LayoutNode {
				id: id.clone(),
				ring_id: Some(ring.id.clone()),
				x: center.0 + radius * angle.cos(),
				y: center.1 + radius * angle.sin(),
				score: scores.get(id).copied().unwrap_or(0),
			}
		})
		.collect();
	let edges = finalize_edges(ring)
		.into_iter()
		.map(|(source, target)| LayoutEdge {
			source,
			target,
			ring_id: Some(ring.id.clone()),
		})
		.collect();
	GraphLayout { nodes, edges }
}

/// Lay out every ring as a cluster around a large ellipse, members on a small
/// circle around their cluster center. Reuses each ring's member order and
/// finalized edges rather than re-deriving them.
pub fn layout_global(rings: &[Ring], scores: &HashMap<String, i32>) -> GraphLayout {
	let m = rings.len();
	let mut out = GraphLayout::default();
	for (k, ring) in rings.iter().enumerate() {
		let angle = (k as f64 / m as f64) * 2.0 * PI;
		let center = (
			GLOBAL_CENTER.0 + CLUSTER_RADII.0 * angle.cos(),
			GLOBAL_CENTER.1 + CLUSTER_RADII.1 * angle.sin(),
		);
		let cluster = layout_ring_at(ring, scores, center, false);
		out.nodes.extend(cluster.nodes);
		out.edges.extend(cluster.edges);
	}
	out
}

/// Offset both endpoints of a segment inward by `inset` along its direction,
/// so arrowheads meet node boundaries instead of centers. Coincident
/// endpoints fall back to a unit length to avoid dividing by zero.
pub fn inset_segment(
	(x1, y1): (f64, f64),
	(x2, y2): (f64, f64),
	inset: f64,
) -> ((f64, f64), (f64, f64)) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let mut len = (dx * dx + dy * dy).sqrt();
	if len == 0.0 {
		len = 1.0;
	}
	let (ux, uy) = (dx / len, dy / len);
	(
		(x1 + ux * inset, y1 + uy * inset),
		(x2 - ux * inset, y2 - uy * inset),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ring(id: &str, pattern: PatternType, members: &[&str]) -> Ring {
		Ring {
			id: id.into(),
			pattern,
			risk_score: 80,
			member_ids: members.iter().map(|m| m.to_string()).collect(),
			edges: Vec::new(),
		}
	}

	fn close(a: f64, b: f64) {
		assert!((a - b).abs() < 1e-9, "{a} != {b}");
	}

	#[test]
	fn radius_policy() {
		assert_eq!(ring_radius(1), 60.0);
		assert_eq!(ring_radius(2), 60.0);
		assert_eq!(ring_radius(3), 82.0);
		assert_eq!(ring_radius(5), 110.0);
		assert_eq!(ring_radius(20), 110.0);
	}

	#[test]
	fn three_member_cycle_example() {
		let r = ring("R1", PatternType::Cycle, &["A", "B", "C"]);
		let layout = layout_ring(&r, &HashMap::new());

		// Angles -90°, 30°, 150° on a radius-82 circle around (155, 160).
		close(layout.nodes[0].x, 155.0);
		close(layout.nodes[0].y, 160.0 - 82.0);
		close(layout.nodes[1].x, 155.0 + 82.0 * (PI / 6.0).cos());
		close(layout.nodes[1].y, 160.0 + 82.0 * (PI / 6.0).sin());
		close(layout.nodes[2].x, 155.0 - 82.0 * (PI / 6.0).cos());
		close(layout.nodes[2].y, 160.0 + 82.0 * (PI / 6.0).sin());

		let pairs: Vec<(&str, &str)> = layout
			.edges
			.iter()
			.map(|e| (e.source.as_str(), e.target.as_str()))
			.collect();
		assert_eq!(pairs, vec![("A", "B"), ("B", "C"), ("C", "A")]);
	}

	#[test]
	fn star_synthesis_points_into_hub() {
		let r = ring("R2", PatternType::Smurfing, &["H", "a", "b", "c"]);
		let edges = finalize_edges(&r);
		assert_eq!(edges.len(), 3);
		assert!(edges.iter().all(|(_, t)| t == "H"));

		// Layered shell has no dedicated rule and falls into the star default.
		let r = ring("R3", PatternType::LayeredShell, &["H", "a", "b"]);
		assert_eq!(finalize_edges(&r).len(), 2);
	}

	#[test]
	fn real_edges_suppress_synthesis() {
		let mut r = ring("R1", PatternType::Cycle, &["A", "B", "C"]);
		r.edges = vec![("A".into(), "C".into())];
		assert_eq!(finalize_edges(&r), vec![("A".to_string(), "C".to_string())]);
	}

	#[test]
	fn layout_is_deterministic() {
		let r = ring("R1", PatternType::Cycle, &["A", "B", "C", "D"]);
		let scores: HashMap<String, i32> = [("A".to_string(), 94)].into();
		assert_eq!(layout_ring(&r, &scores), layout_ring(&r, &scores));
	}

	#[test]
	fn member_order_changes_the_diagram() {
		let scores = HashMap::new();
		let a = layout_ring(&ring("R", PatternType::Cycle, &["A", "B", "C"]), &scores);
		let b = layout_ring(&ring("R", PatternType::Cycle, &["B", "A", "C"]), &scores);
		assert_ne!(a.nodes, b.nodes);
	}

	#[test]
	fn global_layout_two_rings() {
		let rings = vec![
			ring("R1", PatternType::Cycle, &["A", "B", "C"]),
			ring("R2", PatternType::Cycle, &["D", "E", "F"]),
		];
		let layout = layout_global(&rings, &HashMap::new());
		assert_eq!(layout.nodes.len(), 6);
		assert_eq!(layout.edges.len(), 6);

		// Cluster centers sit 180° apart on the ellipse.
		close(layout.nodes[0].x - CLUSTER_MEMBER_RADIUS, GLOBAL_CENTER.0 + CLUSTER_RADII.0);
		close(layout.nodes[3].x - CLUSTER_MEMBER_RADIUS, GLOBAL_CENTER.0 - CLUSTER_RADII.0);

		// Each ring keeps its internal 3-cycle.
		let r1: Vec<(&str, &str)> = layout
			.edges
			.iter()
			.filter(|e| e.ring_id.as_deref() == Some("R1"))
			.map(|e| (e.source.as_str(), e.target.as_str()))
			.collect();
		assert_eq!(r1, vec![("A", "B"), ("B", "C"), ("C", "A")]);
	}

	#[test]
	fn inset_guards_zero_length() {
		let ((sx, sy), (ex, ey)) = inset_segment((10.0, 10.0), (10.0, 10.0), 23.0);
		assert!(sx.is_finite() && sy.is_finite() && ex.is_finite() && ey.is_finite());

		let ((sx, _), (ex, _)) = inset_segment((0.0, 0.0), (100.0, 0.0), 23.0);
		close(sx, 23.0);
		close(ex, 77.0);
	}
}
