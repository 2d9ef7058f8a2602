//! Missing-Value Cells
//!
//! CSV exports mark absent observations with a handful of conventional
//! tokens. Any of them reads as "no value" rather than as data.

use serde::{de, Deserialize, Deserializer};

/// Cell texts that stand for a missing value
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a cell holds one of the missing-value tokens
pub fn is_missing(text: &str) -> bool {
    NA_TOKENS.contains(&text.trim())
}

/// Deserialize a numeric cell, reading missing-value tokens as `None`
///
/// Non-finite numbers (`inf`, `-inf`) are also treated as missing.
pub fn na_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    if is_missing(&text) {
        return Ok(None);
    }

    let value: f64 = text
        .trim()
        .parse()
        .map_err(|e| de::Error::custom(format!("invalid number {:?}: {}", text, e)))?;
    Ok(value.is_finite().then_some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tokens() {
        for token in ["", " ", "NaN", "nan", "NA", "N/A", "null", "NULL", "None", "<NA>"] {
            assert!(is_missing(token), "{:?} should be missing", token);
        }
        assert!(!is_missing("0"));
        assert!(!is_missing("2024-01-01"));
        assert!(!is_missing("nothing"));
    }
}
