//! Application bootstrap.
//!
//! [`AirspaceApp`] ties the sign-in controller and the layer orchestrator
//! together and runs them in view-ready order.
//!
//! ```text
//! view ready
//!   │
//!   ├─ SignInController::start      (session check, UI sync)
//!   │
//!   ├─ ExpressionCatalog::global    (altitude rules)
//!   │
//!   └─ LayerOrchestrator            (all layers, all-settled)
//!        └─ ready / failed
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::{AirspaceApp, ReadyReport};
pub use config::AppConfig;
pub use error::AppError;
