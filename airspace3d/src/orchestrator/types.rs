//! Orchestrator types and errors

use std::fmt;

use serde::Serialize;

use crate::layer::{ErrorInfo, LoadOutcome};

/// Aggregate result of one [`initialize_all`](super::LayerOrchestrator::initialize_all) call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    /// One outcome per descriptor, in descriptor order.
    pub outcomes: Vec<LoadOutcome>,
}

impl AggregateReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of layers that loaded.
    pub fn loaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }

    /// Number of layers that failed.
    pub fn failed(&self) -> usize {
        self.total() - self.loaded()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(LoadOutcome::is_loaded)
    }

    /// First failure in descriptor order.
    pub fn first_failure(&self) -> Option<&ErrorInfo> {
        self.outcomes.iter().find_map(|o| o.error.as_ref())
    }
}

/// Errors returned by the layer orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// At least one layer failed. Layers that loaded stay registered.
    LayersFailed {
        /// First failure in descriptor order.
        first: ErrorInfo,
        /// Number of failed layers.
        failed: usize,
        /// Every outcome, in descriptor order.
        report: AggregateReport,
    },
}

impl OrchestratorError {
    /// All outcomes, including the layers that loaded.
    pub fn report(&self) -> &AggregateReport {
        match self {
            OrchestratorError::LayersFailed { report, .. } => report,
        }
    }
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrchestratorError::LayersFailed {
                first,
                failed,
                report,
            } => write!(
                f,
                "{} of {} layers failed to load, first: {}",
                failed,
                report.total(),
                first
            ),
        }
    }
}

impl std::error::Error for OrchestratorError {}
