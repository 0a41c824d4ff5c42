//! Airspace3D - 3-D aviation airspace for ArcGIS scenes
//!
//! This library normalizes FAA airspace and route altitudes into meters,
//! rewrites flat layer symbology into extruded volumes and swept paths,
//! loads the airspace layers concurrently and tracks portal sign-in.
//!
//! # Modules
//!
//! - [`altitude`] - unit conversion and the named altitude rules
//! - [`symbology`] - renderers, symbols and the 3-D transformer
//! - [`layer`] - descriptors and the single-layer load pipeline
//! - [`orchestrator`] - all-settled loading of the layer set
//! - [`auth`] - sign-in state machine
//! - [`app`] - view-ready bootstrap
//! - [`config`] / [`logging`] - INI settings and tracing setup

pub mod altitude;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod layer;
pub mod logging;
pub mod orchestrator;
pub mod symbology;

pub use error::ConfigurationError;
