// src/formatting/properties/render.rs
//! Text rendering for projected property values.

use super::types::DisplayValue;
use std::fmt;

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Empty => f.write_str("(empty)"),
            DisplayValue::Text(s) => f.write_str(s),
            DisplayValue::Number(n) => write!(f, "{}", n),
            DisplayValue::Boolean(b) => f.write_str(if *b { "✓" } else { "✗" }),
            DisplayValue::List(items) => f.write_str(&items.join(", ")),
            DisplayValue::DateRange { start, end: None } => f.write_str(start),
            DisplayValue::DateRange {
                start,
                end: Some(end),
            } => write!(f, "{} → {}", start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_variant() {
        assert_eq!(DisplayValue::Empty.to_string(), "(empty)");
        assert_eq!(DisplayValue::Boolean(true).to_string(), "✓");
        assert_eq!(DisplayValue::Boolean(false).to_string(), "✗");
        assert_eq!(DisplayValue::Number(5.into()).to_string(), "5");
        assert_eq!(
            DisplayValue::List(vec!["A".into(), "B".into()]).to_string(),
            "A, B"
        );
        assert_eq!(
            DisplayValue::DateRange {
                start: "2024-01-01".into(),
                end: Some("2024-01-05".into())
            }
            .to_string(),
            "2024-01-01 → 2024-01-05"
        );
    }
}
