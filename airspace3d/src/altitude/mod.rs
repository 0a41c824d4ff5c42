//! Altitude normalization engine.
//!
//! Converts the altitude encodings found in FAA airspace and route data
//! (flight levels, feet, sentinel values, surface datums) into meters.
//!
//! # Layers
//!
//! ```text
//! units     AltitudeUnit / DatumCode / AltitudeValue, ft <-> m
//!   │
//! feature   FeatureAttributes -> AltitudeValue (prefixed FAA fields)
//!   │
//! rules     RuleId -> NormalizationRule (pure, total functions)
//!   │
//! catalog   ExpressionCatalog (OnceLock, lookup by name)
//! ```
//!
//! # Example
//!
//! ```
//! use airspace3d::altitude::{ExpressionCatalog, FeatureAttributes};
//!
//! let attrs = FeatureAttributes::new()
//!     .with("LOWER_VAL", 0.0)
//!     .with("LOWER_UOM", "FT")
//!     .with("LOWER_CODE", "SFC");
//!
//! let base = ExpressionCatalog::global()
//!     .evaluate("LowerValueAsMeters", &attrs)
//!     .unwrap();
//! assert_eq!(base, 0.0);
//! ```

mod catalog;
mod feature;
mod rules;
mod units;

pub use catalog::ExpressionCatalog;
pub use feature::{AttributeValue, FeatureAttributes};
pub use rules::{
    altitude_value_as_meters, lower_value_as_meters, upper_value_as_meters, NormalizationRule,
    RuleId, ROUTE_ALTITUDE_CANDIDATES,
};
pub use units::{
    feet_to_meters, flight_level_to_feet, AltitudeUnit, AltitudeValue, DatumCode,
    LimitQualifier, CEILING_FEET, FEET_PER_FLIGHT_LEVEL, FEET_TO_METERS, UNASSIGNED_SENTINEL,
    UNKNOWN_HIGH_SENTINEL,
};
