//! Normalization of backend detection payloads into the canonical model.
//!
//! A pure transformation stage: JSON in, `Ring`/`Account`/`Summary` out. The
//! only fatal condition is a payload missing one of its required collections;
//! every other malformed-but-structurally-valid input degrades to defaults.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::types::{
	Account, AnalysisDocument, DetectionResult, GraphEdges, PatternType, Ring, Summary,
	UploadSummary,
};

/// Structural failure of the detection payload contract.
#[derive(Debug, Error)]
pub enum PayloadError {
	#[error("invalid detection payload: {0}")]
	Invalid(#[from] serde_json::Error),
}

/// Result of one normalization pass. Replaced wholesale whenever a new
/// analysis result arrives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Normalized {
	pub rings: Vec<Ring>,
	pub accounts: Vec<Account>,
	pub summary: Summary,
}

/// Parse the full analysis document. Missing `suspicious_accounts` or
/// `fraud_rings` is the input-contract violation reported to the caller.
pub fn parse_analysis(json: &str) -> Result<AnalysisDocument, PayloadError> {
	Ok(serde_json::from_str(json)?)
}

/// Canonicalize a raw pattern tag list: each tag mapped through
/// [`PatternType::from_tag`], deduplicated preserving first-seen order.
pub fn canonical_patterns(tags: &[String]) -> Vec<PatternType> {
	let mut out: Vec<PatternType> = Vec::with_capacity(tags.len());
	for tag in tags {
		let p = PatternType::from_tag(tag);
		if !out.contains(&p) {
			out.push(p);
		}
	}
	out
}

/// Transform a detection result plus optional raw transaction edges and the
/// upload summary into the canonical model. Pure; no side effects.
pub fn normalize(
	detection: &DetectionResult,
	graph: &GraphEdges,
	summary: &UploadSummary,
) -> Normalized {
	let rings = detection
		.fraud_rings
		.iter()
		.map(|ring| {
			let members: HashSet<&str> =
				ring.member_accounts.iter().map(String::as_str).collect();
			// Keep only raw edges fully inside this ring's member set.
			let edges = graph
				.edges
				.iter()
				.filter(|e| members.contains(e.source.as_str()) && members.contains(e.target.as_str()))
				.map(|e| (e.source.clone(), e.target.clone()))
				.collect();
			Ring {
				id: ring.ring_id.clone(),
				pattern: PatternType::from_tag(&ring.pattern_type),
				risk_score: ring.risk_score.round() as i32,
				member_ids: ring.member_accounts.clone(),
				edges,
			}
		})
		.collect();

	let accounts = detection
		.suspicious_accounts
		.iter()
		.map(|a| Account {
			id: a.account_id.clone(),
			score: a.suspicion_score.round() as i32,
			patterns: canonical_patterns(&a.detected_patterns),
			// The backend uses the sentinel "NONE" for unassigned accounts.
			ring_id: a
				.ring_id
				.clone()
				.filter(|r| !r.is_empty() && r != "NONE"),
		})
		.collect();

	Normalized {
		rings,
		accounts,
		summary: Summary {
			total_accounts: summary.total_accounts_analyzed,
			suspicious_accounts: summary.suspicious_accounts_flagged,
			fraud_ring_count: summary.fraud_rings_detected,
			processing_time_seconds: summary.processing_time_seconds,
		},
	}
}

/// Index account ids to rounded suspicion scores for layout-time lookup.
pub fn score_index(accounts: &[Account]) -> HashMap<String, i32> {
	accounts.iter().map(|a| (a.id.clone(), a.score)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::fraud_graph::types::{AccountRecord, FraudRingRecord, RawEdge};

	fn detection() -> DetectionResult {
		DetectionResult {
			suspicious_accounts: vec![
				AccountRecord {
					account_id: "A".into(),
					suspicion_score: 91.4,
					detected_patterns: vec!["cycle_length_4".into(), "cycle".into()],
					ring_id: Some("R1".into()),
				},
				AccountRecord {
					account_id: "B".into(),
					suspicion_score: 60.6,
					detected_patterns: vec!["fan_in".into(), "fan_out".into(), "high_velocity".into()],
					ring_id: Some("NONE".into()),
				},
			],
			fraud_rings: vec![FraudRingRecord {
				ring_id: "R1".into(),
				pattern_type: "cycle".into(),
				risk_score: 93.5,
				member_accounts: vec!["A".into(), "B".into(), "C".into()],
			}],
		}
	}

	#[test]
	fn patterns_dedup_in_first_seen_order() {
		let tags: Vec<String> = vec!["cycle_length_4".into(), "cycle".into()];
		assert_eq!(canonical_patterns(&tags), vec![PatternType::Cycle]);

		let tags: Vec<String> = vec!["fan_in".into(), "layered_shell".into(), "fan_out".into()];
		assert_eq!(
			canonical_patterns(&tags),
			vec![PatternType::Smurfing, PatternType::LayeredShell]
		);
	}

	#[test]
	fn canonicalization_is_idempotent() {
		let once = canonical_patterns(&["cycle_length_4".into(), "cycle".into()]);
		let tags: Vec<String> = once.iter().map(|p| p.as_tag().to_string()).collect();
		assert_eq!(canonical_patterns(&tags), once);
	}

	#[test]
	fn scores_round_and_none_ring_clears() {
		let out = normalize(&detection(), &GraphEdges::default(), &UploadSummary::default());
		assert_eq!(out.accounts[0].score, 91);
		assert_eq!(out.accounts[1].score, 61);
		assert_eq!(out.accounts[0].ring_id.as_deref(), Some("R1"));
		assert_eq!(out.accounts[1].ring_id, None);
		assert_eq!(out.rings[0].risk_score, 94);
	}

	#[test]
	fn only_intra_ring_edges_are_kept() {
		let graph = GraphEdges {
			edges: vec![
				RawEdge { source: "A".into(), target: "B".into() },
				RawEdge { source: "B".into(), target: "X".into() },
				RawEdge { source: "X".into(), target: "Y".into() },
			],
		};
		let out = normalize(&detection(), &graph, &UploadSummary::default());
		assert_eq!(out.rings[0].edges, vec![("A".to_string(), "B".to_string())]);
	}

	#[test]
	fn summary_passes_time_through_unrounded() {
		let summary = UploadSummary {
			total_accounts_analyzed: 8472,
			suspicious_accounts_flagged: 214,
			fraud_rings_detected: 7,
			processing_time_seconds: 2.34,
		};
		let out = normalize(&detection(), &GraphEdges::default(), &summary);
		assert_eq!(out.summary.total_accounts, 8472);
		assert_eq!(out.summary.processing_time_seconds, 2.34);
	}

	#[test]
	fn malformed_top_level_is_fatal() {
		assert!(parse_analysis(r#"{ "fraud_rings": [] }"#).is_err());
		assert!(parse_analysis(r#"{ "suspicious_accounts": [], "fraud_rings": [] }"#).is_ok());
	}
}
