//! Fraud-ring graph visualization component.
//!
//! Renders detected fraud rings on an HTML canvas:
//! - Deterministic circular layout per ring, cluster layout for the global
//!   network, with synthesized edges when transaction data is missing
//! - Pan, zoom-to-cursor, and hover interactions
//! - Risk-banded node coloring with a pulse on critical accounts
//! - Click-to-inspect actions dispatched to the surrounding page
//!
//! # Example
//!
//! ```ignore
//! use mulenet_graph::{FraudGraphCanvas, ViewStyle, layout_global, normalize};
//!
//! let data = normalize(&doc.detection, &doc.graph_data, &doc.summary);
//! let layout = layout_global(&data.rings, &score_index(&data.accounts));
//!
//! view! { <FraudGraphCanvas layout=layout rings=data.rings /> }
//! ```

mod component;
mod demo;
mod interact;
pub mod layout;
mod normalize;
mod render;
pub mod style;
mod types;
pub mod viewport;

pub use component::FraudGraphCanvas;
pub use demo::demo_data;
pub use interact::{GraphAction, InteractionDispatcher};
pub use layout::{GraphLayout, layout_global, layout_ring};
pub use normalize::{Normalized, PayloadError, normalize, parse_analysis, score_index};
pub use style::{RiskBand, ViewStyle};
pub use types::{
	Account, AnalysisDocument, DetectionResult, GraphEdges, PatternType, Ring, Summary,
	UploadSummary,
};
