//! Typed cell values
//!
//! Every data cell is classified into exactly one variant. Classification is
//! total: content that matches no numeric shape falls back to `Text`.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A parsed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    /// Plain integer, thousands separators already stripped ("1,024" -> 1024)
    Integer(i64),
    /// Percentage stored as the numeric percent ("40%" -> 40.0)
    Percentage(f64),
    /// Numerator/denominator pair as authored ("44/109")
    Fraction { numerator: i64, denominator: i64 },
    /// Numeric range, covering IQR notation ("5 (3-10)") and bare ranges
    Range {
        low: f64,
        high: f64,
        unit: Option<String>,
    },
    /// Missing-data marker (em dash, "N/A", blank)
    Missing,
    /// Unclassified content, verbatim (trimmed)
    Text(String),
}

impl ParsedValue {
    /// Percentage derivable from a fraction, when no explicit percent
    /// column exists to override it. `None` for every other variant and
    /// for a zero denominator.
    pub fn derived_percent(&self) -> Option<f64> {
        match self {
            ParsedValue::Fraction {
                numerator,
                denominator,
            } if *denominator != 0 => Some(100.0 * *numerator as f64 / *denominator as f64),
            _ => None,
        }
    }

    /// Whether this value is the missing marker
    pub fn is_missing(&self) -> bool {
        matches!(self, ParsedValue::Missing)
    }
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedValue::Integer(n) => write!(f, "{}", n),
            ParsedValue::Percentage(p) => write!(f, "{}%", p),
            ParsedValue::Fraction {
                numerator,
                denominator,
            } => write!(f, "{}/{}", numerator, denominator),
            ParsedValue::Range { low, high, unit } => {
                write!(f, "{}\u{2013}{}", low, high)?;
                if let Some(u) = unit {
                    write!(f, " {}", u)?;
                }
                Ok(())
            }
            ParsedValue::Missing => write!(f, "\u{2014}"),
            ParsedValue::Text(s) => write!(f, "{}", s),
        }
    }
}

// JSON-natural rendering: Missing -> null, Fraction/Range -> objects,
// everything else a native number/string.
impl Serialize for ParsedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ParsedValue::Integer(n) => serializer.serialize_i64(*n),
            ParsedValue::Percentage(p) => serializer.serialize_f64(*p),
            ParsedValue::Fraction {
                numerator,
                denominator,
            } => {
                let mut s = serializer.serialize_struct("Fraction", 2)?;
                s.serialize_field("numerator", numerator)?;
                s.serialize_field("denominator", denominator)?;
                s.end()
            }
            ParsedValue::Range { low, high, unit } => {
                let mut s = serializer.serialize_struct("Range", 3)?;
                s.serialize_field("low", low)?;
                s.serialize_field("high", high)?;
                s.serialize_field("unit", unit)?;
                s.end()
            }
            ParsedValue::Missing => serializer.serialize_none(),
            ParsedValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_percent() {
        let v = ParsedValue::Fraction {
            numerator: 44,
            denominator: 109,
        };
        let pct = v.derived_percent().unwrap();
        assert!((pct - 40.4).abs() < 0.1);
    }

    #[test]
    fn test_derived_percent_zero_denominator() {
        let v = ParsedValue::Fraction {
            numerator: 1,
            denominator: 0,
        };
        assert!(v.derived_percent().is_none());
        assert!(ParsedValue::Integer(5).derived_percent().is_none());
    }

    #[test]
    fn test_json_rendering() {
        let json = serde_json::to_string(&ParsedValue::Missing).unwrap();
        assert_eq!(json, "null");

        let json = serde_json::to_string(&ParsedValue::Fraction {
            numerator: 44,
            denominator: 109,
        })
        .unwrap();
        assert_eq!(json, r#"{"numerator":44,"denominator":109}"#);

        let json = serde_json::to_string(&ParsedValue::Range {
            low: 3.0,
            high: 10.0,
            unit: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"low":3.0,"high":10.0,"unit":null}"#);

        let json = serde_json::to_string(&ParsedValue::Integer(109)).unwrap();
        assert_eq!(json, "109");
    }

    #[test]
    fn test_display() {
        assert_eq!(ParsedValue::Percentage(40.0).to_string(), "40%");
        assert_eq!(
            ParsedValue::Fraction {
                numerator: 44,
                denominator: 109
            }
            .to_string(),
            "44/109"
        );
        assert_eq!(ParsedValue::Missing.to_string(), "\u{2014}");
    }
}
