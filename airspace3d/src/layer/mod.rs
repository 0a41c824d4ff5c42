//! Layer loading.
//!
//! A [`LayerDescriptor`] names a remote resource and how it should look.
//! [`LayerLoader`] acquires the resource through a [`ResourceProvider`],
//! waits for it to become ready, rewrites its symbology in 3-D and registers
//! the decorated layer with a [`DisplaySurface`].
//!
//! # Example
//!
//! ```ignore
//! let provider = FileResourceProvider::new("fixtures");
//! let surface = MapSurface::new();
//! let loader = LayerLoader::new(ExpressionCatalog::global(), &provider, &surface);
//!
//! let outcome = loader.load(&default_airspace_layers()[1]).await;
//! ```

mod descriptor;
mod error;
mod file_source;
mod loader;
mod provider;
mod types;

pub use descriptor::{
    default_airspace_layers, LayerDescriptor, LayerOverride, ResolvedRules,
    AIRSPACE_BOUNDARY_ITEM, ATS_ROUTE_ITEM, CLASS_AIRSPACE_ITEM, SPECIAL_USE_AIRSPACE_ITEM,
};
pub use error::{ErrorInfo, ErrorKind, LoadError, ResourceError};
pub use file_source::{FileHandle, FileResourceProvider};
pub use loader::LayerLoader;
pub use provider::{DisplaySurface, MapSurface, ResourceHandle, ResourceProvider};
pub use types::{DecoratedLayer, ElevationInfo, ElevationMode, LayerSource, LoadOutcome, LoadStatus};

#[cfg(test)]
pub use provider::tests::{MockBehavior, MockResourceProvider};
