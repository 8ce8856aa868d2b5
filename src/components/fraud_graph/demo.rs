//! Built-in sample dataset.
//!
//! Used when the page carries no detection payload so the visualization
//! always has something to draw. Mirrors a small real analysis run: one
//! cycle ring with observed transaction edges, one smurfing ring and one
//! layered-shell ring that rely on edge synthesis.

use super::normalize::Normalized;
use super::types::{Account, PatternType, Ring, Summary};

fn account(id: &str, score: i32, patterns: &[PatternType], ring: &str) -> Account {
	Account {
		id: id.into(),
		score,
		patterns: patterns.to_vec(),
		ring_id: Some(ring.into()),
	}
}

/// A representative detection result for demo purposes.
pub fn demo_data() -> Normalized {
	let rings = vec![
		Ring {
			id: "RING_001".into(),
			pattern: PatternType::Cycle,
			risk_score: 94,
			member_ids: vec![
				"ACC_0041".into(),
				"ACC_0088".into(),
				"ACC_0113".into(),
				"ACC_0244".into(),
			],
			edges: vec![
				("ACC_0041".into(), "ACC_0088".into()),
				("ACC_0088".into(), "ACC_0113".into()),
				("ACC_0113".into(), "ACC_0244".into()),
				("ACC_0244".into(), "ACC_0041".into()),
			],
		},
		Ring {
			id: "RING_002".into(),
			pattern: PatternType::Smurfing,
			risk_score: 88,
			member_ids: vec![
				"ACC_0500".into(),
				"ACC_0320".into(),
				"ACC_0321".into(),
				"ACC_0322".into(),
				"ACC_0323".into(),
				"ACC_0324".into(),
			],
			edges: Vec::new(),
		},
		Ring {
			id: "RING_003".into(),
			pattern: PatternType::LayeredShell,
			risk_score: 79,
			member_ids: vec![
				"ACC_0700".into(),
				"ACC_0701".into(),
				"ACC_0702".into(),
				"ACC_0703".into(),
			],
			edges: Vec::new(),
		},
	];

	let accounts = vec![
		account(
			"ACC_0041",
			94,
			&[
				PatternType::Cycle,
				PatternType::Unknown("high_velocity".into()),
			],
			"RING_001",
		),
		account("ACC_0113", 91, &[PatternType::Cycle], "RING_001"),
		account("ACC_0500", 88, &[PatternType::Smurfing], "RING_002"),
		account("ACC_0088", 87, &[PatternType::Cycle], "RING_001"),
		account("ACC_0700", 79, &[PatternType::LayeredShell], "RING_003"),
		account("ACC_0244", 78, &[PatternType::Cycle], "RING_001"),
		account("ACC_0322", 73, &[PatternType::Smurfing], "RING_002"),
		account("ACC_0320", 71, &[PatternType::Smurfing], "RING_002"),
		account("ACC_0321", 69, &[PatternType::Smurfing], "RING_002"),
		account("ACC_0701", 65, &[PatternType::LayeredShell], "RING_003"),
		account("ACC_0323", 68, &[PatternType::Smurfing], "RING_002"),
		account("ACC_0324", 72, &[PatternType::Smurfing], "RING_002"),
		account("ACC_0702", 63, &[PatternType::LayeredShell], "RING_003"),
		account("ACC_0703", 57, &[PatternType::LayeredShell], "RING_003"),
	];

	Normalized {
		rings,
		accounts,
		summary: Summary {
			total_accounts: 8472,
			suspicious_accounts: 214,
			fraud_ring_count: 3,
			processing_time_seconds: 2.34,
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::fraud_graph::layout::{finalize_edges, layout_global};
	use crate::components::fraud_graph::normalize::score_index;

	#[test]
	fn demo_rings_all_lay_out() {
		let data = demo_data();
		let layout = layout_global(&data.rings, &score_index(&data.accounts));
		assert_eq!(layout.nodes.len(), 14);
		// Real edges for the cycle ring, synthesized star for the others.
		assert_eq!(finalize_edges(&data.rings[0]).len(), 4);
		assert_eq!(finalize_edges(&data.rings[1]).len(), 5);
		assert_eq!(finalize_edges(&data.rings[2]).len(), 3);
	}
}
