//! UI components.

pub mod fraud_graph;
