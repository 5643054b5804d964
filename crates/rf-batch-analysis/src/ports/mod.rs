//! Ports: boundary traits toward external collaborators.

pub mod outbound;

pub use outbound::{AnalysisService, OrderingSource};
