//! Wire-format payload types and the canonical entity model.
//!
//! The backend detection service speaks snake_case JSON; everything here is
//! deserialized once and converted by [`normalize`](super::normalize) into the
//! immutable `Ring`/`Account` records the layout and rendering code consume.

use serde::Deserialize;

/// A fraud pattern classification.
///
/// The known taxonomy is closed; anything the backend sends outside of it is
/// carried verbatim in `Unknown` and displayed as-is rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternType {
	Cycle,
	Smurfing,
	LayeredShell,
	Unknown(String),
}

impl PatternType {
	/// Canonicalize a raw backend tag.
	///
	/// Variant tags collapse onto their canonical pattern: any tag beginning
	/// with `cycle` (e.g. `cycle_length_4`) is a cycle, and `fan_in`/`fan_out`
	/// are both smurfing. The backend emits `layered_shells` for rings but
	/// `layered_shell` for per-account tags; both map to the same variant.
	pub fn from_tag(tag: &str) -> Self {
		match tag {
			t if t.starts_with("cycle") => Self::Cycle,
			"fan_in" | "fan_out" | "smurfing" => Self::Smurfing,
			"layered_shell" | "layered_shells" => Self::LayeredShell,
			other => Self::Unknown(other.to_string()),
		}
	}

	/// Canonical tag string, the inverse of [`from_tag`](Self::from_tag) for
	/// already-canonical input.
	pub fn as_tag(&self) -> &str {
		match self {
			Self::Cycle => "cycle",
			Self::Smurfing => "smurfing",
			Self::LayeredShell => "layered_shell",
			Self::Unknown(tag) => tag,
		}
	}

	/// Human-readable label for tooltips and legends.
	pub fn label(&self) -> &str {
		match self {
			Self::Cycle => "Cycle",
			Self::Smurfing => "Fan-In / Fan-Out",
			Self::LayeredShell => "Layered Network",
			Self::Unknown(tag) => tag,
		}
	}
}

/// A flagged account after normalization. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
	pub id: String,
	/// Suspicion score, 0–100, rounded for display.
	pub score: i32,
	/// Deduplicated canonical patterns in first-seen order.
	pub patterns: Vec<PatternType>,
	pub ring_id: Option<String>,
}

/// A detected fraud ring after normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
	pub id: String,
	pub pattern: PatternType,
	/// Ring-level risk score, 0–100, rounded.
	pub risk_score: i32,
	/// Member account ids in backend order. Order is meaningful: it fixes the
	/// layout angle of each member and the hub of a synthesized star.
	pub member_ids: Vec<String>,
	/// Real transaction edges observed between members. May be empty, in
	/// which case the layout engine synthesizes a topology from `pattern`.
	pub edges: Vec<(String, String)>,
}

/// Aggregate counters shown above the graphs. Pure passthrough.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
	pub total_accounts: u64,
	pub suspicious_accounts: u64,
	pub fraud_ring_count: u64,
	/// Seconds, not rounded.
	pub processing_time_seconds: f64,
}

/// One `suspicious_accounts` entry as delivered by the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct AccountRecord {
	pub account_id: String,
	#[serde(default)]
	pub suspicion_score: f64,
	#[serde(default)]
	pub detected_patterns: Vec<String>,
	#[serde(default)]
	pub ring_id: Option<String>,
}

/// One `fraud_rings` entry as delivered by the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct FraudRingRecord {
	pub ring_id: String,
	#[serde(default)]
	pub pattern_type: String,
	#[serde(default)]
	pub risk_score: f64,
	#[serde(default)]
	pub member_accounts: Vec<String>,
}

/// The detection result proper. Both collections are required; a payload
/// missing either is a contract violation and fails deserialization.
#[derive(Clone, Debug, Deserialize)]
pub struct DetectionResult {
	pub suspicious_accounts: Vec<AccountRecord>,
	pub fraud_rings: Vec<FraudRingRecord>,
}

/// A raw directed transaction edge.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEdge {
	pub source: String,
	pub target: String,
}

/// Optional raw transaction edges accompanying a detection result.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphEdges {
	#[serde(default)]
	pub edges: Vec<RawEdge>,
}

/// Upload statistics. Every field defaults to zero when absent.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct UploadSummary {
	#[serde(default)]
	pub total_accounts_analyzed: u64,
	#[serde(default)]
	pub suspicious_accounts_flagged: u64,
	#[serde(default)]
	pub fraud_rings_detected: u64,
	#[serde(default)]
	pub processing_time_seconds: f64,
}

/// The complete JSON document the analysis endpoint returns: the detection
/// collections at the top level, summary nested, edges optional.
#[derive(Clone, Debug, Deserialize)]
pub struct AnalysisDocument {
	#[serde(flatten)]
	pub detection: DetectionResult,
	#[serde(default)]
	pub graph_data: GraphEdges,
	#[serde(default)]
	pub summary: UploadSummary,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cycle_variants_canonicalize() {
		assert_eq!(PatternType::from_tag("cycle"), PatternType::Cycle);
		assert_eq!(PatternType::from_tag("cycle_length_4"), PatternType::Cycle);
	}

	#[test]
	fn fan_tags_become_smurfing() {
		assert_eq!(PatternType::from_tag("fan_in"), PatternType::Smurfing);
		assert_eq!(PatternType::from_tag("fan_out"), PatternType::Smurfing);
	}

	#[test]
	fn unknown_tags_pass_through() {
		let p = PatternType::from_tag("high_velocity");
		assert_eq!(p, PatternType::Unknown("high_velocity".into()));
		assert_eq!(p.label(), "high_velocity");
	}

	#[test]
	fn canonical_tags_round_trip() {
		for tag in ["cycle", "smurfing", "layered_shell", "high_velocity"] {
			let p = PatternType::from_tag(tag);
			assert_eq!(PatternType::from_tag(p.as_tag()), p);
		}
	}

	#[test]
	fn analysis_document_parses_nested_summary() {
		let json = r#"{
			"suspicious_accounts": [
				{ "account_id": "ACC_1", "suspicion_score": 91.4,
				  "detected_patterns": ["cycle_length_3"], "ring_id": "RING_001" }
			],
			"fraud_rings": [
				{ "ring_id": "RING_001", "pattern_type": "cycle",
				  "risk_score": 94.0, "member_accounts": ["ACC_1"] }
			],
			"summary": { "total_accounts_analyzed": 8472,
			             "processing_time_seconds": 2.34 }
		}"#;
		let doc: AnalysisDocument = serde_json::from_str(json).unwrap();
		assert_eq!(doc.detection.suspicious_accounts.len(), 1);
		assert_eq!(doc.summary.total_accounts_analyzed, 8472);
		assert!(doc.graph_data.edges.is_empty());
	}

	#[test]
	fn missing_fraud_rings_is_rejected() {
		let json = r#"{ "suspicious_accounts": [] }"#;
		assert!(serde_json::from_str::<AnalysisDocument>(json).is_err());
	}
}
