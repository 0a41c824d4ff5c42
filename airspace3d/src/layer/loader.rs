//! Single-layer load pipeline.

use tracing::{debug, info, warn};

use super::descriptor::LayerDescriptor;
use super::error::{ErrorInfo, LoadError};
use super::provider::{DisplaySurface, ResourceHandle, ResourceProvider};
use super::types::{DecoratedLayer, ElevationInfo, ElevationMode, LoadOutcome};
use crate::altitude::ExpressionCatalog;
use crate::symbology::{SymbolTransformer, ValueExpression};

/// Loads one layer end to end: acquire, ready, decorate, register.
///
/// Every failure is folded into a [`LoadOutcome`], so a loader call never
/// fails. Nothing reaches the surface unless every step succeeded.
pub struct LayerLoader<'a, P, S> {
    catalog: &'a ExpressionCatalog,
    provider: &'a P,
    surface: &'a S,
}

impl<'a, P, S> LayerLoader<'a, P, S>
where
    P: ResourceProvider,
    S: DisplaySurface,
{
    pub fn new(catalog: &'a ExpressionCatalog, provider: &'a P, surface: &'a S) -> Self {
        Self {
            catalog,
            provider,
            surface,
        }
    }

    /// Loads `descriptor` and reports what happened.
    pub async fn load(&self, descriptor: &LayerDescriptor) -> LoadOutcome {
        match self.try_load(descriptor).await {
            Ok(()) => {
                info!(
                    layer = %descriptor.name,
                    resource_id = %descriptor.resource_id,
                    "Layer loaded"
                );
                LoadOutcome::loaded(&descriptor.resource_id)
            }
            Err(e) => {
                let info = ErrorInfo::from_load_error(&descriptor.resource_id, &e);
                warn!(
                    layer = %descriptor.name,
                    resource_id = %descriptor.resource_id,
                    stage = %info.kind,
                    error = %e,
                    "Layer failed to load"
                );
                LoadOutcome::failed(info)
            }
        }
    }

    async fn try_load(&self, descriptor: &LayerDescriptor) -> Result<(), LoadError> {
        let rules = descriptor.resolve(self.catalog)?;

        debug!(resource_id = %descriptor.resource_id, "Acquiring resource");
        let handle = self.provider.acquire(&descriptor.resource_id).await?;

        debug!(resource_id = %handle.resource_id(), "Waiting for resource");
        let source = handle.ready().await?;

        let renderer = SymbolTransformer::new(descriptor.style).extrude(
            &source.renderer,
            descriptor.symbol_policy,
            rules.size,
        )?;

        let layer = DecoratedLayer {
            resource_id: descriptor.resource_id.clone(),
            title: descriptor.display_title.clone(),
            visible: descriptor.initially_visible,
            opacity: descriptor.opacity,
            labels_visible: descriptor.labels_visible,
            elevation_info: ElevationInfo {
                mode: ElevationMode::AbsoluteHeight,
                expression: ValueExpression::rule(rules.elevation),
            },
            renderer,
        };

        self.surface.register(layer)?;
        Ok(())
    }
}
