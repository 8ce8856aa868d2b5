//! mulenet-graph: interactive fraud-ring network visualization.
//!
//! This crate renders MuleNet detection results as interactive graphs:
//! accounts as nodes, transactions as directed edges, grouped into rings and
//! one aggregate global network, with pan/zoom and click-to-inspect.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::fraud_graph::{
	Account, FraudGraphCanvas, GraphAction, GraphLayout, Normalized, PatternType, Ring, Summary,
	ViewStyle, demo_data, layout_global, layout_ring, normalize, parse_analysis, score_index,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("mulenet-graph: logging initialized");
}

/// Load and normalize a detection result from a script element with
/// id="analysis-data". Expected format: the analysis endpoint's JSON document
/// (suspicious_accounts, fraud_rings, optional graph_data and summary).
fn load_analysis() -> Option<Normalized> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("analysis-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_analysis(&json_text) {
		Ok(doc) => {
			info!(
				"mulenet-graph: loaded {} accounts, {} rings",
				doc.detection.suspicious_accounts.len(),
				doc.detection.fraud_rings.len()
			);
			Some(normalize(&doc.detection, &doc.graph_data, &doc.summary))
		}
		Err(e) => {
			warn!("mulenet-graph: rejected detection payload: {e}");
			None
		}
	}
}

/// Ring-card heading: the ring id together with its pattern's display label.
fn ring_heading(ring: &Ring) -> String {
	format!("{} · {}", ring.id, ring.pattern.label())
}

/// Main application component.
///
/// Loads the detection result from the DOM (falling back to the built-in
/// sample data) and renders the global network plus, once a ring is
/// highlighted, that ring's own diagram.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let data = load_analysis().unwrap_or_else(demo_data);
	let scores = score_index(&data.accounts);
	let summary = data.summary;
	let rings = data.rings.clone();

	let global_layout = layout_global(&rings, &scores);
	let rings_signal = Signal::derive({
		let rings = rings.clone();
		move || rings.clone()
	});

	let (selected_ring, set_selected_ring) = signal(None::<String>);
	let on_action = Callback::new(move |action: GraphAction| match action {
		GraphAction::Inspect(account_id) => info!("inspect account {account_id}"),
		GraphAction::HighlightRing(ring_id) => set_selected_ring.set(Some(ring_id)),
	});

	let ring_layout = Signal::derive({
		let rings = rings.clone();
		let scores = scores.clone();
		move || {
			selected_ring
				.get()
				.and_then(|id| rings.iter().find(|r| r.id == id).cloned())
				.map(|r| layout_ring(&r, &scores))
				.unwrap_or_default()
		}
	});
	let global_signal = Signal::derive(move || global_layout.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="MuleNet Network Visualization" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="graph-page">
			<div class="graph-overlay">
				<h1>"Global transaction network"</h1>
				<p class="subtitle">
					{format!(
						"{} accounts analyzed · {} flagged · {} rings · {}s",
						summary.total_accounts,
						summary.suspicious_accounts,
						summary.fraud_ring_count,
						summary.processing_time_seconds,
					)}
				</p>
				<p class="hint">"Scroll to zoom · Drag to pan · Click any node to inspect"</p>
			</div>
			<FraudGraphCanvas
				layout=global_signal
				rings=rings_signal
				on_action=on_action
			/>
			{
				let card_rings = rings.clone();
				move || {
					let ring = selected_ring
						.get()
						.and_then(|id| card_rings.iter().find(|r| r.id == id).cloned())?;
					let heading = ring_heading(&ring);
					Some(view! {
					<div class="ring-card">
						<h2>{heading}</h2>
						<FraudGraphCanvas
							layout=ring_layout
							rings=rings_signal
							style=ViewStyle::ring()
							width=430.0
							height=360.0
							on_action=on_action
						/>
					</div>
					})
				}
			}
		</div>
	}
}
