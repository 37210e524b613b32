//! Cell value classification
//!
//! Classifies one cell's decoded text into exactly one [`ParsedValue`]
//! variant. Classification is ordered, first match wins:
//! missing marker, fraction, percentage, range, integer, then verbatim text.
//! Parsing is total; nothing here ever fails a table.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::value::ParsedValue;
use crate::utils::error::{TableError, TableResult};
use crate::utils::text::normalize_whitespace;

/// Numeric/locale configuration for the value parser
///
/// Defaults cover the English/US convention. Non-default separators and
/// marker sets are the extension point for other locales.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFormat {
    /// Decimal separator, default '.'
    pub decimal_separator: char,
    /// Thousands separator, stripped before numeric parsing, default ','
    pub thousands_separator: char,
    /// Exact strings (after whitespace normalization) treated as missing data
    pub missing_markers: Vec<String>,
    /// Characters accepted as range separators ("3-10", "3\u{2013}10")
    pub range_separators: Vec<char>,
}

impl Default for ValueFormat {
    fn default() -> Self {
        ValueFormat {
            decimal_separator: '.',
            thousands_separator: ',',
            missing_markers: vec![
                "\u{2014}".to_string(), // em dash
                "\u{2013}".to_string(), // en dash alone
                "N/A".to_string(),
                "NA".to_string(),
            ],
            range_separators: vec!['-', '\u{2013}', '\u{2014}'],
        }
    }
}

/// Compiled cell value parser
///
/// Compiles its classification patterns once from a [`ValueFormat`]; the
/// default-format parser is shared process-wide via [`default_parser`].
#[derive(Debug)]
pub struct ValueParser {
    format: ValueFormat,
    fraction_re: Regex,
    percent_re: Regex,
    paren_range_re: Regex,
    bare_range_re: Regex,
    integer_re: Regex,
}

lazy_static! {
    /// Shared parser for the default (English/US) value format
    static ref DEFAULT_PARSER: ValueParser =
        ValueParser::new(ValueFormat::default()).expect("default value format compiles");
}

/// The shared default-format parser
pub fn default_parser() -> &'static ValueParser {
    &DEFAULT_PARSER
}

impl ValueParser {
    /// Compile a parser for the given format
    pub fn new(format: ValueFormat) -> TableResult<ValueParser> {
        let ts = regex::escape(&format.thousands_separator.to_string());
        let ds = regex::escape(&format.decimal_separator.to_string());
        let dash: String = format
            .range_separators
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect();

        // Integer with optional thousands separators, e.g. "1,024"
        let int = format!(r"\d[\d{}]*", ts);
        // Decimal number, e.g. "40.4"
        let num = format!(r"{}(?:{}\d+)?", int, ds);
        // Trailing unit token, e.g. "yrs", "°C"
        let unit = r"[A-Za-z\u{b0}\u{b5}][A-Za-z\u{b0}\u{b5}/%.]*";

        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| TableError::internal(e.to_string()))
        };

        Ok(ValueParser {
            // "44/109", optionally with a parenthesized percent the fraction
            // rule itself ignores ("44/109 (40.4%)")
            fraction_re: compile(format!(
                r"^({int})\s*/\s*({int})(?:\s*\(\s*{num}\s*%?\s*\))?$",
                int = int,
                num = num
            ))?,
            percent_re: compile(format!(r"^({num})\s*%$", num = num))?,
            // IQR form: optional central display value, bounds in parentheses
            paren_range_re: compile(format!(
                r"^(?:{num}\s*)?\(\s*({num})\s*[{dash}]\s*({num})\s*\)(?:\s*({unit}))?$",
                num = num,
                dash = dash,
                unit = unit
            ))?,
            bare_range_re: compile(format!(
                r"^({num})\s*[{dash}]\s*({num})(?:\s+({unit}))?$",
                num = num,
                dash = dash,
                unit = unit
            ))?,
            integer_re: compile(format!(r"^{int}$", int = int))?,
            format,
        })
    }

    /// The format this parser was compiled from
    pub fn format(&self) -> &ValueFormat {
        &self.format
    }

    /// Classify one cell's raw text into a typed value
    pub fn parse(&self, raw: &str) -> ParsedValue {
        let text = normalize_whitespace(raw);

        // Rule 1: missing markers
        if text.is_empty() || self.format.missing_markers.iter().any(|m| *m == text) {
            return ParsedValue::Missing;
        }

        // Rule 2: numerator/denominator fraction
        if let Some(caps) = self.fraction_re.captures(&text) {
            if let (Some(numerator), Some(denominator)) =
                (self.parse_i64(&caps[1]), self.parse_i64(&caps[2]))
            {
                return ParsedValue::Fraction {
                    numerator,
                    denominator,
                };
            }
        }

        // Rule 3: percentage
        if let Some(caps) = self.percent_re.captures(&text) {
            if let Some(value) = self.parse_f64(&caps[1]) {
                return ParsedValue::Percentage(value);
            }
        }

        // Rule 4: range / IQR; any central display value is discarded
        for re in [&self.paren_range_re, &self.bare_range_re] {
            if let Some(caps) = re.captures(&text) {
                if let (Some(low), Some(high)) =
                    (self.parse_f64(&caps[1]), self.parse_f64(&caps[2]))
                {
                    return ParsedValue::Range {
                        low,
                        high,
                        unit: caps.get(3).map(|m| m.as_str().to_string()),
                    };
                }
            }
        }

        // Rule 5: plain integer
        if self.integer_re.is_match(&text) {
            if let Some(value) = self.parse_i64(&text) {
                return ParsedValue::Integer(value);
            }
        }

        // Rule 6: verbatim fallback
        ParsedValue::Text(text)
    }

    fn parse_i64(&self, text: &str) -> Option<i64> {
        let cleaned: String = text
            .chars()
            .filter(|c| *c != self.format.thousands_separator)
            .collect();
        cleaned.parse().ok()
    }

    fn parse_f64(&self, text: &str) -> Option<f64> {
        let cleaned: String = text
            .chars()
            .filter(|c| *c != self.format.thousands_separator)
            .map(|c| {
                if c == self.format.decimal_separator {
                    '.'
                } else {
                    c
                }
            })
            .collect();
        cleaned.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> ParsedValue {
        default_parser().parse(text)
    }

    #[test]
    fn test_missing_markers() {
        assert_eq!(parse("\u{2014}"), ParsedValue::Missing);
        assert_eq!(parse("\u{2013}"), ParsedValue::Missing);
        assert_eq!(parse("N/A"), ParsedValue::Missing);
        assert_eq!(parse("NA"), ParsedValue::Missing);
        assert_eq!(parse("   "), ParsedValue::Missing);
        assert_eq!(parse(""), ParsedValue::Missing);
    }

    #[test]
    fn test_fraction() {
        assert_eq!(
            parse("44/109"),
            ParsedValue::Fraction {
                numerator: 44,
                denominator: 109
            }
        );
        assert_eq!(
            parse("44 / 109"),
            ParsedValue::Fraction {
                numerator: 44,
                denominator: 109
            }
        );
    }

    #[test]
    fn test_fraction_with_inline_percent() {
        // The parenthesized percent is authored display noise; the fraction
        // rule does not consume it into the value
        assert_eq!(
            parse("44/109 (40.4%)"),
            ParsedValue::Fraction {
                numerator: 44,
                denominator: 109
            }
        );
    }

    #[test]
    fn test_fraction_thousands_separators() {
        assert_eq!(
            parse("1,204/12,050"),
            ParsedValue::Fraction {
                numerator: 1204,
                denominator: 12050
            }
        );
    }

    #[test]
    fn test_percentage() {
        assert_eq!(parse("40%"), ParsedValue::Percentage(40.0));
        assert_eq!(parse("40.4%"), ParsedValue::Percentage(40.4));
        assert_eq!(parse("40.4 %"), ParsedValue::Percentage(40.4));
    }

    #[test]
    fn test_iqr_range() {
        assert_eq!(
            parse("5 (3\u{2013}10)"),
            ParsedValue::Range {
                low: 3.0,
                high: 10.0,
                unit: None
            }
        );
        // Hyphen and em dash also accepted as range separators
        assert_eq!(
            parse("5 (3-10)"),
            ParsedValue::Range {
                low: 3.0,
                high: 10.0,
                unit: None
            }
        );
    }

    #[test]
    fn test_bare_range() {
        assert_eq!(
            parse("3\u{2013}10"),
            ParsedValue::Range {
                low: 3.0,
                high: 10.0,
                unit: None
            }
        );
    }

    #[test]
    fn test_range_with_unit() {
        assert_eq!(
            parse("3\u{2013}10 yrs"),
            ParsedValue::Range {
                low: 3.0,
                high: 10.0,
                unit: Some("yrs".to_string())
            }
        );
    }

    #[test]
    fn test_bounds_only_parenthesized_range() {
        assert_eq!(
            parse("(38.2\u{2013}40.1)"),
            ParsedValue::Range {
                low: 38.2,
                high: 40.1,
                unit: None
            }
        );
    }

    #[test]
    fn test_integer() {
        assert_eq!(parse("109"), ParsedValue::Integer(109));
        assert_eq!(parse("1,024"), ParsedValue::Integer(1024));
    }

    #[test]
    fn test_text_fallback() {
        assert_eq!(
            parse("Median age, yrs (IQR)"),
            ParsedValue::Text("Median age, yrs (IQR)".to_string())
        );
        assert_eq!(parse("<5"), ParsedValue::Text("<5".to_string()));
    }

    #[test]
    fn test_text_fallback_normalizes_whitespace() {
        assert_eq!(
            parse("  Age\u{a0}group:  0\u{2013}4 years old "),
            ParsedValue::Text("Age group: 0\u{2013}4 years old".to_string())
        );
    }

    #[test]
    fn test_custom_locale_format() {
        let format = ValueFormat {
            decimal_separator: ',',
            thousands_separator: '.',
            ..ValueFormat::default()
        };
        let parser = ValueParser::new(format).unwrap();

        assert_eq!(parser.parse("40,4%"), ParsedValue::Percentage(40.4));
        assert_eq!(parser.parse("1.024"), ParsedValue::Integer(1024));
    }

    #[test]
    fn test_custom_missing_markers() {
        let format = ValueFormat {
            missing_markers: vec!["n.d.".to_string()],
            ..ValueFormat::default()
        };
        let parser = ValueParser::new(format).unwrap();

        assert_eq!(parser.parse("n.d."), ParsedValue::Missing);
        // Em dash is no longer a marker under this format
        assert_eq!(
            parser.parse("\u{2014}"),
            ParsedValue::Text("\u{2014}".to_string())
        );
    }
}
