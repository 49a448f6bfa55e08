//! Country extraction from Scopus affiliation strings.
//!
//! The `Authors with affiliations` column holds one block per author,
//! separated by `;`, each of the form `Name, Institution, ..., Country`.
//! We take the country to be the trailing alphabetic run after the last
//! comma of each block.  That is a heuristic, so it lives behind the
//! [AffiliationParser] trait and the aggregators never see the regex.

use anyhow::{anyhow, Result};
use regex::Regex;

/// Default pattern for the country at the end of an affiliation segment.
pub const DEFAULT_COUNTRY_PATTERN: &str = r", ([A-Za-z ]+)$";

/// Strategy for pulling country names out of an affiliation field.
pub trait AffiliationParser {
  /// Get the countries in an affiliation field, one per segment that has one.
  fn countries(&self, affiliations: &str) -> Vec<String>;

  /// Get the countries in a possibly-missing affiliation field.
  fn countries_opt(&self, affiliations: Option<&str>) -> Vec<String> {
    match affiliations {
      Some(s) => self.countries(s),
      None => Vec::new()
    }
  }
}

/// Take the trailing `, <letters>` of each `;`-separated segment.
#[derive(Debug, Clone)]
pub struct TrailingCountry {
  pattern: Regex
}

impl TrailingCountry {
  /// Create a parser with the default country pattern.
  pub fn new() -> TrailingCountry {
    TrailingCountry::with_pattern(DEFAULT_COUNTRY_PATTERN).unwrap()
  }

  /// Create a parser with a custom pattern.
  ///
  /// The pattern is applied to each trimmed segment and must have a capture
  /// group; the first group is the country.
  pub fn with_pattern(pattern: &str) -> Result<TrailingCountry> {
    let pattern = Regex::new(pattern)?;
    if pattern.captures_len() < 2 {
      return Err(anyhow!("country pattern {} has no capture group", pattern));
    }
    Ok(TrailingCountry { pattern })
  }
}

impl Default for TrailingCountry {
  fn default() -> TrailingCountry {
    TrailingCountry::new()
  }
}

impl AffiliationParser for TrailingCountry {
  fn countries(&self, affiliations: &str) -> Vec<String> {
    let mut found = Vec::new();
    for seg in affiliations.split(';') {
      let seg = seg.trim();
      if let Some(caps) = self.pattern.captures(seg) {
        if let Some(m) = caps.get(1) {
          found.push(m.as_str().to_owned());
        }
      }
    }
    found
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_two_segments() {
    let p = TrailingCountry::new();
    let cs = p.countries("Smith J., MIT, USA; Doe A., Oxford, UK");
    assert_eq!(cs, vec!["USA", "UK"]);
  }

  #[test]
  fn test_empty_and_missing() {
    let p = TrailingCountry::new();
    assert!(p.countries("").is_empty());
    assert!(p.countries_opt(None).is_empty());
  }

  #[test]
  fn test_order_and_repeats() {
    let p = TrailingCountry::new();
    let text = "A., U1, Germany; B., U2, France; C., U3, Germany; D., U4, United Kingdom";
    assert_eq!(p.countries(text), vec!["Germany", "France", "Germany", "United Kingdom"]);
  }

  #[test]
  fn test_segment_without_country() {
    let p = TrailingCountry::new();
    // digits in the tail break the pattern; the segment is skipped
    let cs = p.countries("A., Lab 42; B., Inst, Japan; C. no commas");
    assert_eq!(cs, vec!["Japan"]);
  }

  #[test]
  fn test_no_case_change() {
    let p = TrailingCountry::new();
    assert_eq!(p.countries("A., Uni, south korea"), vec!["south korea"]);
  }

  #[test]
  fn test_custom_pattern() {
    let p = TrailingCountry::with_pattern(r"\(([A-Z]{2})\)$").unwrap();
    assert_eq!(p.countries("A., Uni (DE); B., Uni (FR)"), vec!["DE", "FR"]);
  }

  #[test]
  fn test_pattern_needs_group() {
    assert!(TrailingCountry::with_pattern(r", [A-Za-z]+$").is_err());
    assert!(TrailingCountry::with_pattern(r"([").is_err());
  }
}
