//! Feature attribute sets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::units::{AltitudeUnit, AltitudeValue, DatumCode, LimitQualifier};

/// A single attribute value as delivered by a feature service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The attribute set of one feature, keyed by field name.
///
/// Reads never fail: a missing field, a null, or a value of the wrong type
/// reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureAttributes {
    fields: BTreeMap<String, AttributeValue>,
}

impl FeatureAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<AttributeValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&AttributeValue> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Numeric value of a field.
    ///
    /// Numeric text (`"3000"`) is accepted; anything else reads as `None`.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.fields.get(field)? {
            AttributeValue::Number(n) if n.is_finite() => Some(*n),
            AttributeValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Text value of a field.
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field)? {
            AttributeValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Reads the altitude limit stored under `prefix`.
    ///
    /// Uses the FAA field convention `{prefix}_VAL`, `{prefix}_UOM`,
    /// `{prefix}_CODE` and `{prefix}_DESC`.
    pub fn altitude(&self, prefix: &str) -> AltitudeValue {
        AltitudeValue {
            value: self.number(&format!("{prefix}_VAL")),
            unit: self
                .text(&format!("{prefix}_UOM"))
                .map(AltitudeUnit::from_token),
            code: self
                .text(&format!("{prefix}_CODE"))
                .map(DatumCode::from_token),
            qualifier: self
                .text(&format!("{prefix}_DESC"))
                .map(LimitQualifier::from_token),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FeatureAttributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_reads() {
        let attrs = FeatureAttributes::new()
            .with("A", 12.5)
            .with("B", "3000")
            .with("C", "n/a")
            .with("D", AttributeValue::Null);

        assert_eq!(attrs.number("A"), Some(12.5));
        assert_eq!(attrs.number("B"), Some(3000.0));
        assert_eq!(attrs.number("C"), None);
        assert_eq!(attrs.number("D"), None);
        assert_eq!(attrs.number("missing"), None);
    }

    #[test]
    fn test_altitude_reads_prefixed_fields() {
        let attrs = FeatureAttributes::new()
            .with("UPPER_VAL", 180_i64)
            .with("UPPER_UOM", "FL")
            .with("UPPER_CODE", "STD")
            .with("UPPER_DESC", "TNI");

        let upper = attrs.altitude("UPPER");
        assert_eq!(upper.value, Some(180.0));
        assert_eq!(upper.unit, Some(AltitudeUnit::FlightLevel));
        assert_eq!(upper.code, Some(DatumCode::StandardAtmosphere));
        assert_eq!(upper.qualifier, Some(LimitQualifier::ToNotIncluded));
    }

    #[test]
    fn test_missing_altitude_is_unresolved() {
        let attrs = FeatureAttributes::new();
        assert_eq!(attrs.altitude("LOWER"), AltitudeValue::unresolved());
    }

    #[test]
    fn test_deserialize_from_json() {
        let attrs: FeatureAttributes = serde_json::from_str(
            r#"{"LOWER_VAL": 0, "LOWER_UOM": "FT", "LOWER_CODE": "SFC", "NAME": null}"#,
        )
        .unwrap();

        assert_eq!(attrs.number("LOWER_VAL"), Some(0.0));
        assert_eq!(attrs.text("LOWER_CODE"), Some("SFC"));
        assert_eq!(attrs.get("NAME"), Some(&AttributeValue::Null));
    }
}
