//! Mapping of renderer pointer events to domain actions.
//!
//! No business logic beyond id lookup: the presentation layer (modal,
//! filters) decides what the actions mean.

use std::collections::HashMap;

use super::types::Ring;

/// Domain action emitted to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphAction {
	/// Open the account inspector for this account.
	Inspect(String),
	/// Highlight the ring this account belongs to.
	HighlightRing(String),
}

/// Resolves node-level pointer events against ring membership.
#[derive(Clone, Debug, Default)]
pub struct InteractionDispatcher {
	ring_of: HashMap<String, String>,
	hovered: Option<String>,
}

impl InteractionDispatcher {
	/// Build the membership index from the normalized rings.
	pub fn new(rings: &[Ring]) -> Self {
		let mut ring_of = HashMap::new();
		for ring in rings {
			for member in &ring.member_ids {
				ring_of.insert(member.clone(), ring.id.clone());
			}
		}
		Self { ring_of, hovered: None }
	}

	/// Update the transient hover id. Returns true when it changed.
	pub fn set_hover(&mut self, node: Option<&str>) -> bool {
		let node = node.map(str::to_string);
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		true
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// A click on a node always inspects the account and, when the account's
	/// ring is known, also highlights it.
	pub fn click(&self, node_id: &str) -> Vec<GraphAction> {
		let mut actions = vec![GraphAction::Inspect(node_id.to_string())];
		if let Some(ring_id) = self.ring_of.get(node_id) {
			actions.push(GraphAction::HighlightRing(ring_id.clone()));
		}
		actions
	}
}
