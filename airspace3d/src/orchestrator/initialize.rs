//! All-settled layer initialization.

use futures::future::join_all;
use tracing::{info, warn};

use super::types::{AggregateReport, OrchestratorError};
use crate::altitude::ExpressionCatalog;
use crate::layer::{DisplaySurface, LayerDescriptor, LayerLoader, ResourceProvider};

/// Loads a fixed set of layers concurrently.
///
/// # Example
///
/// ```ignore
/// let orchestrator = LayerOrchestrator::new(ExpressionCatalog::global(), &provider, &surface);
/// match orchestrator.initialize_all(&default_airspace_layers()).await {
///     Ok(report) => println!("{} layers ready", report.loaded()),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
pub struct LayerOrchestrator<'a, P, S> {
    loader: LayerLoader<'a, P, S>,
}

impl<'a, P, S> LayerOrchestrator<'a, P, S>
where
    P: ResourceProvider,
    S: DisplaySurface,
{
    pub fn new(catalog: &'a ExpressionCatalog, provider: &'a P, surface: &'a S) -> Self {
        Self {
            loader: LayerLoader::new(catalog, provider, surface),
        }
    }

    /// Loads every descriptor and waits for all of them to settle.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::LayersFailed`] when any layer failed. Layers
    /// that loaded are not unregistered.
    pub async fn initialize_all(
        &self,
        descriptors: &[LayerDescriptor],
    ) -> Result<AggregateReport, OrchestratorError> {
        info!(layers = descriptors.len(), "Initializing layers");

        let outcomes = join_all(descriptors.iter().map(|d| self.loader.load(d))).await;
        let report = AggregateReport { outcomes };

        match report.first_failure().cloned() {
            None => {
                info!(loaded = report.loaded(), "All layers loaded");
                Ok(report)
            }
            Some(first) => {
                let failed = report.failed();
                warn!(
                    failed,
                    loaded = report.loaded(),
                    first = %first,
                    "Layer initialization failed"
                );
                Err(OrchestratorError::LayersFailed {
                    first,
                    failed,
                    report,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::layer::{
        ErrorKind, LayerSource, MapSurface, MockBehavior, MockResourceProvider, ResourceError,
        ResourceHandle,
    };
    use crate::symbology::{Color, Renderer, Symbol, SymbolPolicy};

    fn simple_source() -> LayerSource {
        LayerSource {
            title: None,
            fields: vec![],
            renderer: Renderer::Simple {
                symbol: Symbol::SimpleFill {
                    color: Color::rgb(255, 255, 0),
                    outline: None,
                },
                visual_variables: vec![],
            },
        }
    }

    fn descriptor(id: &str) -> LayerDescriptor {
        LayerDescriptor::new(id, id, SymbolPolicy::SingleExtrude, "LowerValueAsMeters")
            .with_size_rule("UpperValueAsMeters")
    }

    #[tokio::test]
    async fn test_all_loaded_is_success() {
        let provider = MockResourceProvider::default()
            .with("a", MockBehavior::Ready(simple_source()))
            .with("b", MockBehavior::Ready(simple_source()));
        let surface = MapSurface::new();
        let orchestrator = LayerOrchestrator::new(ExpressionCatalog::global(), &provider, &surface);

        let report = orchestrator
            .initialize_all(&[descriptor("a"), descriptor("b")])
            .await
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.loaded(), 2);
        assert_eq!(surface.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_set_is_success() {
        let provider = MockResourceProvider::default();
        let surface = MapSurface::new();
        let orchestrator = LayerOrchestrator::new(ExpressionCatalog::global(), &provider, &surface);

        let report = orchestrator.initialize_all(&[]).await.unwrap();
        assert_eq!(report.total(), 0);
    }

    #[tokio::test]
    async fn test_first_failure_is_in_descriptor_order() {
        let provider = MockResourceProvider::default()
            .with("a", MockBehavior::Ready(simple_source()))
            .with("b", MockBehavior::FailReady("timeout".to_string()))
            .with("c", MockBehavior::FailAcquire("forbidden".to_string()))
            .with("d", MockBehavior::Ready(simple_source()));
        let surface = MapSurface::new();
        let orchestrator = LayerOrchestrator::new(ExpressionCatalog::global(), &provider, &surface);
        let descriptors: Vec<_> = ["a", "b", "c", "d"].into_iter().map(descriptor).collect();

        let err = orchestrator.initialize_all(&descriptors).await.unwrap_err();

        let OrchestratorError::LayersFailed {
            first,
            failed,
            report,
        } = err;
        assert_eq!(first.resource_id, "b");
        assert_eq!(first.kind, ErrorKind::Ready);
        assert_eq!(failed, 2);
        assert_eq!(report.total(), 4);
        assert_eq!(surface.resource_ids(), vec!["a", "d"]);
    }

    /// Provider that records how many acquisitions overlap.
    #[derive(Default)]
    struct OverlapProvider {
        in_flight: Cell<usize>,
        peak: Cell<usize>,
    }

    struct OverlapHandle(String);

    impl ResourceProvider for OverlapProvider {
        type Handle = OverlapHandle;

        async fn acquire(&self, resource_id: &str) -> Result<OverlapHandle, ResourceError> {
            self.in_flight.set(self.in_flight.get() + 1);
            self.peak.set(self.peak.get().max(self.in_flight.get()));
            tokio::task::yield_now().await;
            self.in_flight.set(self.in_flight.get() - 1);
            Ok(OverlapHandle(resource_id.to_string()))
        }
    }

    impl ResourceHandle for OverlapHandle {
        fn resource_id(&self) -> &str {
            &self.0
        }

        async fn ready(self) -> Result<LayerSource, ResourceError> {
            Ok(simple_source())
        }
    }

    #[tokio::test]
    async fn test_loads_run_concurrently() {
        let provider = OverlapProvider::default();
        let surface = MapSurface::new();
        let orchestrator = LayerOrchestrator::new(ExpressionCatalog::global(), &provider, &surface);
        let descriptors: Vec<_> = ["a", "b", "c"].into_iter().map(descriptor).collect();

        orchestrator.initialize_all(&descriptors).await.unwrap();

        assert_eq!(provider.peak.get(), 3);
    }
}
