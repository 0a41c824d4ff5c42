//! Rule evaluation command.

use airspace3d::altitude::{AttributeValue, ExpressionCatalog, FeatureAttributes};

use crate::error::CliError;

/// Evaluate `rule` against `FIELD=VALUE` pairs and print meters.
pub fn run(rule: &str, attributes: &[String]) -> Result<(), CliError> {
    let attrs = parse_attributes(attributes)?;
    let meters = ExpressionCatalog::global().evaluate(rule, &attrs)?;
    println!("{:.2}", meters);
    Ok(())
}

/// Parses `FIELD=VALUE` pairs. Numeric values become numbers, an empty value
/// becomes null.
fn parse_attributes(pairs: &[String]) -> Result<FeatureAttributes, CliError> {
    pairs
        .iter()
        .map(|pair| {
            let (field, value) = pair.split_once('=').ok_or_else(|| {
                CliError::Usage(format!("expected FIELD=VALUE, got '{}'", pair))
            })?;
            let field = field.trim();
            if field.is_empty() {
                return Err(CliError::Usage(format!("missing field name in '{}'", pair)));
            }
            Ok((field.to_string(), parse_value(value.trim())))
        })
        .collect()
}

fn parse_value(value: &str) -> AttributeValue {
    if value.is_empty() {
        AttributeValue::Null
    } else if let Ok(n) = value.parse::<f64>() {
        AttributeValue::Number(n)
    } else {
        AttributeValue::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[&str]) -> Vec<String> {
        pairs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_attributes() {
        let attrs = parse_attributes(&args(&["UPPER_VAL=180", "UPPER_UOM=FL", "NOTE="])).unwrap();
        assert_eq!(attrs.number("UPPER_VAL"), Some(180.0));
        assert_eq!(attrs.text("UPPER_UOM"), Some("FL"));
        assert_eq!(attrs.get("NOTE"), Some(&AttributeValue::Null));
    }

    #[test]
    fn test_rejects_malformed_pairs() {
        assert!(matches!(
            parse_attributes(&args(&["UPPER_VAL"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_attributes(&args(&["=5"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_flight_level_upper() {
        let attrs = parse_attributes(&args(&[
            "UPPER_VAL=180",
            "UPPER_UOM=FL",
            "LOWER_VAL=0",
            "LOWER_UOM=FT",
        ]))
        .unwrap();
        let meters = ExpressionCatalog::global()
            .evaluate("UpperValueAsMeters", &attrs)
            .unwrap();
        assert!((meters - 18_000.0 * 0.3048).abs() < 1e-9);
    }
}
