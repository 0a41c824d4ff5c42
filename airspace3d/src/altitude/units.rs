//! Altitude units, datum codes and unit conversion.
//!
//! FAA airspace records encode vertical limits as a raw value plus a unit of
//! measure (`FL` or `FT`), a datum code (`MSL`, `SFC`, ...) and a limit
//! qualifier (`AA`, `TNI`, ...). This module parses those tokens into closed
//! enums and converts resolved values to feet and meters.
//!
//! Unrecognized tokens parse to an `Unknown` variant rather than failing; a
//! value with an unknown unit is unresolved and never converted.

use std::fmt;

/// Feet to meters conversion factor.
pub const FEET_TO_METERS: f64 = 0.3048;

/// Feet per flight level (FL350 = 35,000 ft).
pub const FEET_PER_FLIGHT_LEVEL: f64 = 100.0;

/// Raw upper value meaning "unknown high limit".
pub const UNKNOWN_HIGH_SENTINEL: f64 = -9998.0;

/// Raw route altitude meaning "not assigned".
pub const UNASSIGNED_SENTINEL: f64 = 999_999.0;

/// Ceiling substituted for unknown or unassigned altitudes, in feet.
pub const CEILING_FEET: f64 = 100_000.0;

/// Converts feet to meters.
pub fn feet_to_meters(feet: f64) -> f64 {
    feet * FEET_TO_METERS
}

/// Converts a flight level to feet.
pub fn flight_level_to_feet(flight_level: f64) -> f64 {
    flight_level * FEET_PER_FLIGHT_LEVEL
}

/// Unit of measure for an altitude value (`*_UOM`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AltitudeUnit {
    /// `FL` - hundreds of feet.
    FlightLevel,
    /// `FT` - feet.
    Feet,
    /// Any other token, kept verbatim for diagnostics.
    Unknown(String),
}

impl AltitudeUnit {
    /// Parses a wire token. Matching is case-insensitive and ignores padding.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "FL" => Self::FlightLevel,
            "FT" => Self::Feet,
            _ => Self::Unknown(token.trim().to_string()),
        }
    }

    /// Converts a raw value in this unit to feet.
    ///
    /// Returns `None` for an unknown unit.
    pub fn to_feet(&self, value: f64) -> Option<f64> {
        match self {
            Self::FlightLevel => Some(flight_level_to_feet(value)),
            Self::Feet => Some(value),
            Self::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for AltitudeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlightLevel => write!(f, "FL"),
            Self::Feet => write!(f, "FT"),
            Self::Unknown(token) => write!(f, "{}", token),
        }
    }
}

/// Vertical datum for a limit (`*_CODE`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatumCode {
    /// `BYNOTAM` - given by NOTAM.
    ByNotam,
    /// `MSL` - mean sea level.
    MeanSeaLevel,
    /// `SFC` - surface.
    Surface,
    /// `STD` - standard atmosphere.
    StandardAtmosphere,
    /// `UNLTD` - unlimited.
    Unlimited,
    Unknown(String),
}

impl DatumCode {
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "BYNOTAM" => Self::ByNotam,
            "MSL" => Self::MeanSeaLevel,
            "SFC" => Self::Surface,
            "STD" => Self::StandardAtmosphere,
            "UNLTD" => Self::Unlimited,
            _ => Self::Unknown(token.trim().to_string()),
        }
    }
}

/// Limit qualifier (`*_DESC`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitQualifier {
    /// `NULL` - not applicable.
    NotApplicable,
    /// `AA` - and above.
    AndAbove,
    /// `ANI` - above but not including.
    AboveNotIncluded,
    /// `TI` - to and including.
    ToIncluded,
    /// `TNI` - to but not including.
    ToNotIncluded,
    Unknown(String),
}

impl LimitQualifier {
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "NULL" | "" => Self::NotApplicable,
            "AA" => Self::AndAbove,
            "ANI" => Self::AboveNotIncluded,
            "TI" => Self::ToIncluded,
            "TNI" => Self::ToNotIncluded,
            _ => Self::Unknown(token.trim().to_string()),
        }
    }
}

/// One altitude limit as read from a feature.
///
/// Every part is optional because the attribute may be missing or malformed;
/// a missing part makes the value unresolved rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct AltitudeValue {
    /// Raw numeric value, `None` when missing or non-numeric.
    pub value: Option<f64>,
    pub unit: Option<AltitudeUnit>,
    pub code: Option<DatumCode>,
    pub qualifier: Option<LimitQualifier>,
}

impl AltitudeValue {
    /// Creates a resolved value with the given unit and no datum.
    pub fn new(value: f64, unit: AltitudeUnit) -> Self {
        Self {
            value: Some(value),
            unit: Some(unit),
            code: None,
            qualifier: None,
        }
    }

    /// A value with no usable parts.
    pub fn unresolved() -> Self {
        Self {
            value: None,
            unit: None,
            code: None,
            qualifier: None,
        }
    }

    pub fn with_code(mut self, code: DatumCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_qualifier(mut self, qualifier: LimitQualifier) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    /// Raw value, only if it is a finite number.
    pub fn raw(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }

    /// Whether the raw value equals `sentinel`.
    pub fn is_sentinel(&self, sentinel: f64) -> bool {
        self.raw() == Some(sentinel)
    }

    /// Whether the datum is the surface.
    pub fn is_surface(&self) -> bool {
        matches!(self.code, Some(DatumCode::Surface))
    }

    /// The value in feet, applying the flight-level scale when needed.
    ///
    /// Returns `None` when the value or unit is missing, or the unit is
    /// unknown.
    pub fn feet(&self) -> Option<f64> {
        let raw = self.raw()?;
        self.unit.as_ref()?.to_feet(raw)
    }

    /// The value in meters.
    pub fn meters(&self) -> Option<f64> {
        self.feet().map(feet_to_meters)
    }
}
