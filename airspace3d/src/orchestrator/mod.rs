//! Layer orchestration
//!
//! Runs one [`LayerLoader`](crate::layer::LayerLoader) per descriptor and
//! folds the outcomes into a single aggregate result.
//!
//! All loads are polled together on the caller's task and the aggregate
//! waits for every one of them to settle. A failure never cancels the
//! others, and layers that did load are left on the surface.

mod initialize;
mod types;

pub use initialize::LayerOrchestrator;
pub use types::{AggregateReport, OrchestratorError};
