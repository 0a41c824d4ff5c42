//! View-ready sequence.

use tracing::info;

use super::config::AppConfig;
use super::error::AppError;
use crate::altitude::ExpressionCatalog;
use crate::auth::{AuthState, IdentityProvider, SignInController, SignInView};
use crate::layer::{DisplaySurface, ResourceProvider};
use crate::orchestrator::{AggregateReport, LayerOrchestrator};

/// State reported once the application is ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyReport {
    pub auth: AuthState,
    pub layers: AggregateReport,
}

/// Airspace3D application.
///
/// Owns the sign-in controller, the resource provider and the display
/// surface. [`view_ready`](Self::view_ready) runs once the map view exists:
///
/// 1. Sign-in status is checked and the sign-in UI synced
/// 2. The expression catalog is initialized
/// 3. All layers load concurrently; readiness waits for every one
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::load()?;
/// let app = AirspaceApp::new(
///     config.clone(),
///     config.offline_identity(),
///     LogView,
///     FileResourceProvider::new("fixtures"),
///     MapSurface::new(),
/// );
/// let report = app.view_ready().await?;
/// ```
pub struct AirspaceApp<I, V, P, S> {
    config: AppConfig,
    sign_in: SignInController<I, V>,
    provider: P,
    surface: S,
}

impl<I, V, P, S> AirspaceApp<I, V, P, S>
where
    I: IdentityProvider,
    V: SignInView,
    P: ResourceProvider,
    S: DisplaySurface,
{
    pub fn new(config: AppConfig, identity: I, view: V, provider: P, surface: S) -> Self {
        Self {
            config,
            sign_in: SignInController::new(identity, view),
            provider,
            surface,
        }
    }

    /// Brings the application to ready.
    ///
    /// # Errors
    ///
    /// [`AppError::Layers`] when any layer failed. The sign-in state and
    /// the layers that did load stay in place.
    pub async fn view_ready(&self) -> Result<ReadyReport, AppError> {
        let auth = self.sign_in.start().await;

        let catalog = ExpressionCatalog::global();
        let orchestrator = LayerOrchestrator::new(catalog, &self.provider, &self.surface);
        let layers = orchestrator.initialize_all(&self.config.layers).await?;

        info!(
            layers = layers.loaded(),
            signed_in = auth.is_signed_in(),
            "Application ready"
        );
        Ok(ReadyReport { auth, layers })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sign_in(&self) -> &SignInController<I, V> {
        &self.sign_in
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MockIdentityProvider, RecordingView, SessionStatus, UserProfile};
    use crate::layer::{LayerSource, MapSurface, MockBehavior, MockResourceProvider};
    use crate::symbology::{Color, Renderer, Symbol};

    fn ready_source() -> LayerSource {
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

    type TestApp =
        AirspaceApp<MockIdentityProvider, RecordingView, MockResourceProvider, MapSurface>;

    fn app(provider: MockResourceProvider) -> TestApp {
        let boundary = AppConfig::default().layers.remove(0);
        let config = AppConfig::default().with_layers(vec![boundary]);
        AirspaceApp::new(
            config,
            MockIdentityProvider::new(),
            RecordingView::default(),
            provider,
            MapSurface::new(),
        )
    }

    #[tokio::test]
    async fn test_view_ready_signs_in_then_loads() {
        let id = AppConfig::default().layers[0].resource_id.clone();
        let app = app(MockResourceProvider::default().with(&id, MockBehavior::Ready(ready_source())));
        let profile = UserProfile {
            full_name: "Pat Example".to_string(),
            username: "pat".to_string(),
            thumbnail_url: None,
        };
        app.sign_in()
            .identity()
            .set_session(Ok(SessionStatus::signed_in(profile)));

        let report = app.view_ready().await.unwrap();

        assert!(report.auth.is_signed_in());
        assert!(report.layers.is_success());
        assert!(app.surface().contains(&id));
    }

    #[tokio::test]
    async fn test_view_ready_reports_layer_failure() {
        let app = app(MockResourceProvider::default());

        let err = app.view_ready().await.unwrap_err();

        assert!(matches!(err, AppError::Layers(_)));
        // Sign-in still settled.
        assert!(!app.sign_in().state().is_signed_in());
    }
}
