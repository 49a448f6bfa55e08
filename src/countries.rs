//! Country frequency tables.

use std::collections::HashMap;

use serde::ser::{Serialize, Serializer, SerializeMap};

use crate::affil::AffiliationParser;
use crate::records::Publication;

/// Number of countries kept by default.
pub const DEFAULT_LIMIT: usize = 10;

/// Count countries, remembering the order in which they were first seen.
#[derive(Debug, Default, Clone)]
pub struct CountryCounter {
  index: HashMap<String, usize>,
  counts: Vec<(String, usize)>
}

impl CountryCounter {
  /// Create an empty counter.
  pub fn new() -> CountryCounter {
    CountryCounter::default()
  }

  /// Record one occurrence of a country.
  pub fn add(&mut self, country: &str) {
    match self.index.get(country) {
      Some(&i) => self.counts[i].1 += 1,
      None => {
        self.index.insert(country.to_owned(), self.counts.len());
        self.counts.push((country.to_owned(), 1));
      }
    }
  }

  /// Record all countries of a publication.
  pub fn add_publication<AP: AffiliationParser + ?Sized>(&mut self, rec: &Publication, parser: &AP) {
    for c in parser.countries_opt(rec.authors_with_affiliations.as_deref()) {
      self.add(&c);
    }
  }

  /// Number of distinct countries.
  pub fn len(&self) -> usize {
    self.counts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.counts.is_empty()
  }

  /// Get the count for a country.
  pub fn get(&self, country: &str) -> usize {
    self.index.get(country).map_or(0, |&i| self.counts[i].1)
  }

  /// Get the `n` most common countries, most common first.
  ///
  /// Countries with equal counts stay in first-seen order.
  pub fn most_common(&self, n: usize) -> TopCountries {
    let mut entries = self.counts.clone();
    // sort_by is stable, so ties keep insertion order
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    TopCountries { entries }
  }
}

/// Ranked country counts; serializes as a JSON object in rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct TopCountries {
  pub entries: Vec<(String, usize)>
}

impl Serialize for TopCountries {
  fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
    let mut map = ser.serialize_map(Some(self.entries.len()))?;
    for (country, count) in &self.entries {
      map.serialize_entry(country, count)?;
    }
    map.end()
  }
}

/// Compute the `limit` most frequent countries over all publications.
pub fn top_countries<AP: AffiliationParser + ?Sized>(pubs: &[Publication], parser: &AP, limit: usize) -> TopCountries {
  let mut counter = CountryCounter::new();
  for rec in pubs {
    counter.add_publication(rec, parser);
  }
  counter.most_common(limit)
}
