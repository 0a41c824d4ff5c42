//! Named altitude normalization rules.
//!
//! Each rule is a total function from a feature's attributes to meters. A
//! missing or non-numeric field never fails a rule; it is treated as
//! unresolved and the rule's fallback applies instead.
//!
//! | Rule                    | Used for                    | Fallback                       |
//! |-------------------------|-----------------------------|--------------------------------|
//! | `UpperValueAsMeters`    | extrusion height            | ceiling for `-9998`/unresolved |
//! | `LowerValueAsMeters`    | base elevation              | `0.0` for `SFC`/unresolved     |
//! | `AltitudeValueAsMeters` | route altitude (airways)    | cascade, then ceiling          |
//!
//! Every rule also carries an equivalent Arcade expression so that an
//! external renderer can evaluate it per feature on its own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::feature::FeatureAttributes;
use super::units::{
    feet_to_meters, CEILING_FEET, UNASSIGNED_SENTINEL, UNKNOWN_HIGH_SENTINEL,
};
use crate::error::ConfigurationError;

/// Field prefixes consulted by `AltitudeValueAsMeters`, in cascade order:
/// maximum authorized altitude, then minimum enroute altitudes (east, west),
/// then the GNSS minimum enroute altitude.
pub const ROUTE_ALTITUDE_CANDIDATES: [&str; 4] = ["MAA", "MEA_E", "MEA_W", "GMEA_E"];

/// Identifier of a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    UpperValueAsMeters,
    LowerValueAsMeters,
    AltitudeValueAsMeters,
}

impl RuleId {
    pub const ALL: [RuleId; 3] = [
        RuleId::UpperValueAsMeters,
        RuleId::LowerValueAsMeters,
        RuleId::AltitudeValueAsMeters,
    ];

    /// The configuration name of the rule.
    pub fn name(&self) -> &'static str {
        match self {
            RuleId::UpperValueAsMeters => "UpperValueAsMeters",
            RuleId::LowerValueAsMeters => "LowerValueAsMeters",
            RuleId::AltitudeValueAsMeters => "AltitudeValueAsMeters",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            RuleId::UpperValueAsMeters => 0,
            RuleId::LowerValueAsMeters => 1,
            RuleId::AltitudeValueAsMeters => 2,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleId {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleId::ALL
            .into_iter()
            .find(|id| id.name() == s.trim())
            .ok_or_else(|| ConfigurationError::UnknownRule(s.to_string()))
    }
}

/// A registered normalization rule.
#[derive(Debug)]
pub struct NormalizationRule {
    id: RuleId,
    description: &'static str,
    fields: &'static [&'static str],
    expression: &'static str,
    evaluate: fn(&FeatureAttributes) -> f64,
}

impl NormalizationRule {
    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Attribute fields the rule reads.
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Arcade expression text equivalent to [`evaluate`](Self::evaluate).
    pub fn expression(&self) -> &'static str {
        self.expression
    }

    /// Evaluates the rule against a feature. Never fails.
    pub fn evaluate(&self, attributes: &FeatureAttributes) -> f64 {
        (self.evaluate)(attributes)
    }
}

/// Extrusion height of an airspace volume in meters.
///
/// `(upper_ft - lower_ft) * 0.3048`. An upper value of `-9998` or an
/// unresolved upper value becomes the ceiling, which is already in feet and
/// is not scaled by the upper unit. The lower value is scaled by its own unit
/// and does not apply the surface rule; unresolved contributes zero.
pub fn upper_value_as_meters(attributes: &FeatureAttributes) -> f64 {
    let upper = attributes.altitude("UPPER");
    let lower = attributes.altitude("LOWER");

    let upper_ft = if upper.is_sentinel(UNKNOWN_HIGH_SENTINEL) {
        CEILING_FEET
    } else {
        upper.feet().unwrap_or(CEILING_FEET)
    };
    let lower_ft = lower.feet().unwrap_or(0.0);

    feet_to_meters(upper_ft - lower_ft)
}

/// Base elevation of an airspace volume in meters.
///
/// Exactly `0.0` when the lower datum is the surface; unresolved lower
/// values also sit on the surface.
pub fn lower_value_as_meters(attributes: &FeatureAttributes) -> f64 {
    let lower = attributes.altitude("LOWER");
    if lower.is_surface() {
        return 0.0;
    }
    lower.meters().unwrap_or(0.0)
}

/// Altitude of a route segment in meters.
///
/// Takes the first candidate in [`ROUTE_ALTITUDE_CANDIDATES`] whose raw value
/// is resolved and not `999999`, scaled by that candidate's own unit. Falls
/// back to the ceiling when every candidate is unassigned.
pub fn altitude_value_as_meters(attributes: &FeatureAttributes) -> f64 {
    let feet = ROUTE_ALTITUDE_CANDIDATES
        .iter()
        .map(|prefix| attributes.altitude(prefix))
        .filter(|candidate| !candidate.is_sentinel(UNASSIGNED_SENTINEL))
        .find_map(|candidate| candidate.feet())
        .unwrap_or(CEILING_FEET);

    feet_to_meters(feet)
}

// Shared Arcade helpers. `rawValue` reads a finite number, accepting numeric
// text; `toFeet` converts it only for the `FL` and `FT` units and yields
// null for anything else, so each rule applies its own fallback.
macro_rules! arcade_prelude {
    () => {
        r#"
function rawValue(val) {
  if (IsEmpty(val) || TypeOf(val) == "Boolean") { return null; }
  var n = Number(val);
  return IIF(IsNan(n), null, n);
}
function toFeet(n, uom) {
  if (IsEmpty(n) || TypeOf(uom) != "String") { return null; }
  return Decode(Upper(Trim(uom)), "FL", n * 100, "FT", n, null);
}
"#
    };
}

const UPPER_VALUE_EXPRESSION: &str = concat!(
    arcade_prelude!(),
    r#"var upper = rawValue($feature.UPPER_VAL);
var upperFt = IIF(upper == -9998, 100000, toFeet(upper, $feature.UPPER_UOM));
if (IsEmpty(upperFt)) { upperFt = 100000; }
var lowerFt = toFeet(rawValue($feature.LOWER_VAL), $feature.LOWER_UOM);
if (IsEmpty(lowerFt)) { lowerFt = 0; }
return (upperFt - lowerFt) * 0.3048;
"#
);

const LOWER_VALUE_EXPRESSION: &str = concat!(
    arcade_prelude!(),
    r#"var code = $feature.LOWER_CODE;
if (TypeOf(code) == "String" && Upper(Trim(code)) == "SFC") { return 0; }
var lowerFt = toFeet(rawValue($feature.LOWER_VAL), $feature.LOWER_UOM);
return IIF(IsEmpty(lowerFt), 0, lowerFt * 0.3048);
"#
);

const ALTITUDE_VALUE_EXPRESSION: &str = concat!(
    arcade_prelude!(),
    r#"var candidates = [
  [rawValue($feature.MAA_VAL), $feature.MAA_UOM],
  [rawValue($feature.MEA_E_VAL), $feature.MEA_E_UOM],
  [rawValue($feature.MEA_W_VAL), $feature.MEA_W_UOM],
  [rawValue($feature.GMEA_E_VAL), $feature.GMEA_E_UOM]
];
for (var i in candidates) {
  var val = candidates[i][0];
  if (IsEmpty(val) || val == 999999) { continue; }
  var ft = toFeet(val, candidates[i][1]);
  if (!IsEmpty(ft)) { return ft * 0.3048; }
}
return 100000 * 0.3048;
"#
);

/// The built-in rules, indexed by [`RuleId::index`].
pub(crate) fn builtin_rules() -> [NormalizationRule; 3] {
    [
        NormalizationRule {
            id: RuleId::UpperValueAsMeters,
            description: "Extrusion height between the lower and upper limits",
            fields: &["UPPER_VAL", "UPPER_UOM", "LOWER_VAL", "LOWER_UOM"],
            expression: UPPER_VALUE_EXPRESSION,
            evaluate: upper_value_as_meters,
        },
        NormalizationRule {
            id: RuleId::LowerValueAsMeters,
            description: "Base elevation of the lower limit",
            fields: &["LOWER_VAL", "LOWER_UOM", "LOWER_CODE"],
            expression: LOWER_VALUE_EXPRESSION,
            evaluate: lower_value_as_meters,
        },
        NormalizationRule {
            id: RuleId::AltitudeValueAsMeters,
            description: "Route altitude from MAA, MEA and GNSS MEA",
            fields: &[
                "MAA_VAL",
                "MAA_UOM",
                "MEA_E_VAL",
                "MEA_E_UOM",
                "MEA_W_VAL",
                "MEA_W_UOM",
                "GMEA_E_VAL",
                "GMEA_E_UOM",
            ],
            expression: ALTITUDE_VALUE_EXPRESSION,
            evaluate: altitude_value_as_meters,
        },
    ]
}
