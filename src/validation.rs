// ✅ Query validation - runs before anything reaches the matcher
//
// Single lookups need one digit string of at least `min_bin_length`.
// Bulk lookups need 1..=`max_bulk` entries; oversized requests are
// rejected outright, never truncated. Unusable bulk entries are skipped.

use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_BIN_LENGTH: usize = 6;
pub const DEFAULT_MAX_BULK: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub min_bin_length: usize,
    pub max_bulk: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            min_bin_length: DEFAULT_MIN_BIN_LENGTH,
            max_bulk: DEFAULT_MAX_BULK,
        }
    }
}

impl Limits {
    /// Check a single query
    pub fn check_bin<'a>(&self, bin: &'a str) -> Result<&'a str> {
        if bin.is_empty() {
            return Err(LookupError::InvalidInput(
                "BIN parameter is required".to_string(),
            ));
        }

        if !bin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LookupError::InvalidInput(format!(
                "BIN must contain only digits: '{}'",
                bin
            )));
        }

        if bin.len() < self.min_bin_length {
            return Err(LookupError::InvalidInput(format!(
                "BIN must be at least {} digits",
                self.min_bin_length
            )));
        }

        Ok(bin)
    }

    /// Check a bulk request's size (entries are filtered, not rejected)
    pub fn check_bulk<S: AsRef<str>>(&self, bins: &[S]) -> Result<()> {
        if bins.is_empty() {
            return Err(LookupError::InvalidInput(
                "Valid BINs array is required".to_string(),
            ));
        }

        if bins.len() > self.max_bulk {
            return Err(LookupError::InvalidInput(format!(
                "Maximum {} BINs allowed at once",
                self.max_bulk
            )));
        }

        Ok(())
    }

    /// Entries that pass `check_bin`, in input order
    ///
    /// A bulk request surfaces hits only, so unusable entries are skipped
    /// the same way misses are.
    pub fn usable_bins<S: AsRef<str>>(&self, bins: &[S]) -> Vec<String> {
        bins.iter()
            .map(|bin| bin.as_ref())
            .filter(|bin| self.check_bin(bin).is_ok())
            .map(str::to_string)
            .collect()
    }
}

/// Split free text (commas, spaces, newlines) into candidate BINs
///
/// Tokens shorter than `min_len` are dropped, the way the lookup form
/// treats pasted input.
pub fn parse_bin_list(text: &str, min_len: usize) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.len() >= min_len)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bin_accepts_six_or_more_digits() {
        let limits = Limits::default();

        assert_eq!(limits.check_bin("411111").unwrap(), "411111");
        assert_eq!(limits.check_bin("41111111").unwrap(), "41111111");
    }

    #[test]
    fn test_check_bin_rejects_bad_input() {
        let limits = Limits::default();

        assert!(matches!(limits.check_bin(""), Err(LookupError::InvalidInput(_))));
        assert!(matches!(limits.check_bin("41111"), Err(LookupError::InvalidInput(_))));
        assert!(matches!(limits.check_bin("4111-11"), Err(LookupError::InvalidInput(_))));
        assert!(matches!(limits.check_bin("abcdef"), Err(LookupError::InvalidInput(_))));
    }

    #[test]
    fn test_check_bulk_limits() {
        let limits = Limits::default();

        let fifty: Vec<String> = (0..50).map(|i| format!("4111{:02}", i)).collect();
        assert!(limits.check_bulk(&fifty).is_ok());

        let fifty_one: Vec<String> = (0..51).map(|i| format!("4111{:02}", i)).collect();
        let err = limits.check_bulk(&fifty_one).unwrap_err();
        assert_eq!(err.to_string(), "Maximum 50 BINs allowed at once");

        let empty: Vec<String> = Vec::new();
        assert!(matches!(limits.check_bulk(&empty), Err(LookupError::InvalidInput(_))));
    }

    #[test]
    fn test_check_bulk_accepts_short_entries() {
        let limits = Limits::default();

        assert!(limits.check_bulk(&["411111", "12", "41x111"]).is_ok());
    }

    #[test]
    fn test_usable_bins_skips_bad_entries_in_order() {
        let limits = Limits::default();
        let bins = limits.usable_bins(&["511111", "4111", "", "41x111", "411111", "511111"]);

        assert_eq!(bins, vec!["511111", "411111", "511111"]);
    }

    #[test]
    fn test_custom_limits() {
        let limits = Limits {
            min_bin_length: 4,
            max_bulk: 2,
        };

        assert!(limits.check_bin("4111").is_ok());
        assert!(limits.check_bulk(&["4111", "5111", "6011"]).is_err());
    }

    #[test]
    fn test_parse_bin_list() {
        let bins = parse_bin_list("411111, 511111\n601100  123\n,,378282", 6);

        assert_eq!(bins, vec!["411111", "511111", "601100", "378282"]);
    }

    #[test]
    fn test_parse_bin_list_empty() {
        assert!(parse_bin_list("  \n , ", 6).is_empty());
    }
}
