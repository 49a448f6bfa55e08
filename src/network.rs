//! Co-authorship network construction.
//!
//! Nodes are (author, country) pairs and links are unordered author pairs.
//! Both are deduplicated through sets keyed on their canonical form, and
//! emitted in the order they were first seen.

use std::collections::HashSet;

use anyhow::{anyhow, Result};
use log::debug;
use serde::{Serialize, Deserialize};

use crate::affil::AffiliationParser;
use crate::records::Publication;

/// An author with a country they were affiliated with.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Node {
  pub id: String,
  pub country: String
}

/// A co-authorship between two authors.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Link {
  pub source: String,
  pub target: String
}

/// The network as written to disk.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AuthorNetwork {
  pub nodes: Vec<Node>,
  pub links: Vec<Link>
}

/// Options controlling network construction.
#[derive(Debug, Clone)]
pub struct NetworkOptions {
  /// Separator between names in the `Authors` column.
  pub author_separator: String,
  /// Drop links to authors that have no node.
  pub prune_orphans: bool
}

impl Default for NetworkOptions {
  fn default() -> NetworkOptions {
    NetworkOptions {
      author_separator: ",".to_owned(),
      prune_orphans: false
    }
  }
}

impl NetworkOptions {
  /// Create options, rejecting an empty author separator.
  pub fn new(author_separator: &str, prune_orphans: bool) -> Result<NetworkOptions> {
    if author_separator.is_empty() {
      return Err(anyhow!("author separator cannot be empty"));
    }
    Ok(NetworkOptions {
      author_separator: author_separator.to_owned(),
      prune_orphans
    })
  }
}

/// Counts from a network build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkStats {
  pub records: usize,
  pub skipped: usize,
  pub nodes: usize,
  pub links: usize,
  pub pruned: usize
}

/// Accumulate publications into a co-authorship network.
pub struct NetworkBuilder<'a, AP: AffiliationParser + ?Sized> {
  parser: &'a AP,
  options: NetworkOptions,
  nodes: Vec<Node>,
  node_keys: HashSet<(String, String)>,
  links: Vec<Link>,
  link_keys: HashSet<(String, String)>,
  stats: NetworkStats
}

/// Canonical key for an unordered author pair.
fn pair_key(a: &str, b: &str) -> (String, String) {
  if a <= b {
    (a.to_owned(), b.to_owned())
  } else {
    (b.to_owned(), a.to_owned())
  }
}

/// All unordered pairs of names, in listing order.
pub fn author_pairs<'s>(names: &[&'s str]) -> Vec<(&'s str, &'s str)> {
  let mut pairs = Vec::with_capacity(names.len() * names.len().saturating_sub(1) / 2);
  for i in 0..names.len() {
    for j in (i + 1)..names.len() {
      pairs.push((names[i], names[j]));
    }
  }
  pairs
}

impl<'a, AP: AffiliationParser + ?Sized> NetworkBuilder<'a, AP> {
  /// Create an empty builder using `parser` to find each record's countries.
  pub fn new(parser: &'a AP, options: NetworkOptions) -> NetworkBuilder<'a, AP> {
    NetworkBuilder {
      parser,
      options,
      nodes: Vec::new(),
      node_keys: HashSet::new(),
      links: Vec::new(),
      link_keys: HashSet::new(),
      stats: NetworkStats::default()
    }
  }

  /// Add one publication's nodes and links.
  pub fn add(&mut self, rec: &Publication) {
    self.stats.records += 1;
    let names = rec.author_names(&self.options.author_separator);
    if names.is_empty() {
      self.stats.skipped += 1;
      debug!("skipping record {} with no authors", self.stats.records);
      return;
    }

    // every author is paired with every country of the record
    let countries = self.parser.countries_opt(rec.authors_with_affiliations.as_deref());
    for name in &names {
      for country in &countries {
        let key = (name.to_string(), country.clone());
        if !self.node_keys.contains(&key) {
          self.nodes.push(Node { id: key.0.clone(), country: key.1.clone() });
          self.node_keys.insert(key);
        }
      }
    }

    for (a, b) in author_pairs(&names) {
      if self.link_keys.insert(pair_key(a, b)) {
        self.links.push(Link { source: a.to_owned(), target: b.to_owned() });
      }
    }
  }

  /// Finish the network.
  pub fn build(self) -> (AuthorNetwork, NetworkStats) {
    let mut stats = self.stats;
    let mut links = self.links;
    if self.options.prune_orphans {
      let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
      let before = links.len();
      links.retain(|l| ids.contains(l.source.as_str()) && ids.contains(l.target.as_str()));
      stats.pruned = before - links.len();
    }
    stats.nodes = self.nodes.len();
    stats.links = links.len();
    (AuthorNetwork { nodes: self.nodes, links }, stats)
  }
}

/// Build the co-authorship network for a set of publications.
pub fn build_network<AP: AffiliationParser + ?Sized>(pubs: &[Publication], parser: &AP, options: NetworkOptions) -> (AuthorNetwork, NetworkStats) {
  let mut builder = NetworkBuilder::new(parser, options);
  for rec in pubs {
    builder.add(rec);
  }
  builder.build()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::affil::TrailingCountry;

  fn publication(authors: &str, affil: &str) -> Publication {
    Publication {
      authors: Some(authors.to_owned()),
      authors_with_affiliations: if affil.is_empty() { None } else { Some(affil.to_owned()) }
    }
  }

  fn node(id: &str, country: &str) -> Node {
    Node { id: id.to_owned(), country: country.to_owned() }
  }

  #[test]
  fn test_cross_product() {
    let pubs = vec![publication("Smith J., Doe A.", "Smith J., MIT, USA; Doe A., Oxford, UK")];
    let (net, stats) = build_network(&pubs, &TrailingCountry::new(), NetworkOptions::default());
    assert_eq!(net.nodes, vec![
      node("Smith J.", "USA"),
      node("Smith J.", "UK"),
      node("Doe A.", "USA"),
      node("Doe A.", "UK"),
    ]);
    assert_eq!(net.links, vec![Link { source: "Smith J.".to_owned(), target: "Doe A.".to_owned() }]);
    assert_eq!(stats.nodes, 4);
    assert_eq!(stats.links, 1);
  }

  #[test]
  fn test_pair_count() {
    let names = vec!["A", "B", "C", "D", "E"];
    let pairs = author_pairs(&names);
    assert_eq!(pairs.len(), 10);
    assert!(pairs.iter().all(|(a, b)| a != b));
    assert!(author_pairs(&["A"]).is_empty());
    assert!(author_pairs(&[]).is_empty());
  }

  #[test]
  fn test_reversed_link_dedup() {
    let pubs = vec![
      publication("A, B", ""),
      publication("B, A", ""),
    ];
    let (net, _) = build_network(&pubs, &TrailingCountry::new(), NetworkOptions::default());
    assert_eq!(net.links.len(), 1);
    assert_eq!(net.links[0].source, "A");
    assert!(net.nodes.is_empty());
  }

  #[test]
  fn test_node_dedup() {
    let pubs = vec![
      publication("A, B", "A, X, Chile; B, Y, Chile"),
      publication("A", "A, Z, Chile"),
    ];
    let (net, _) = build_network(&pubs, &TrailingCountry::new(), NetworkOptions::default());
    assert_eq!(net.nodes, vec![node("A", "Chile"), node("B", "Chile")]);
    let keys: HashSet<_> = net.nodes.iter().collect();
    assert_eq!(keys.len(), net.nodes.len());
  }

  #[test]
  fn test_no_self_links() {
    let pubs = vec![publication("A, A, B", "")];
    let (net, _) = build_network(&pubs, &TrailingCountry::new(), NetworkOptions::default());
    assert_eq!(net.links, vec![Link { source: "A".to_owned(), target: "B".to_owned() }]);
  }

  #[test]
  fn test_skip_missing_authors() {
    let pubs = vec![
      Publication { authors: None, authors_with_affiliations: Some("A, X, Peru".to_owned()) },
      publication("A, B", "A, X, Peru"),
    ];
    let (net, stats) = build_network(&pubs, &TrailingCountry::new(), NetworkOptions::default());
    assert_eq!(stats.records, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(net.nodes.len(), 2);
  }

  #[test]
  fn test_prune_orphans() {
    let pubs = vec![
      publication("A, B", "A, X, Peru"),
      publication("A, C", ""),
    ];
    let opts = NetworkOptions { prune_orphans: true, ..NetworkOptions::default() };
    let (net, stats) = build_network(&pubs, &TrailingCountry::new(), opts);
    assert_eq!(net.links.len(), 1);
    assert_eq!(stats.pruned, 1);
    assert_eq!(net.links[0].target, "B");
  }

  #[test]
  fn test_author_separator() {
    let pubs = vec![publication("Smith, J.; Doe, A.", "")];
    let opts = NetworkOptions { author_separator: ";".to_owned(), ..NetworkOptions::default() };
    let (net, _) = build_network(&pubs, &TrailingCountry::new(), opts);
    assert_eq!(net.links, vec![Link { source: "Smith, J.".to_owned(), target: "Doe, A.".to_owned() }]);
  }

  #[test]
  fn test_options_reject_empty_separator() {
    let err = NetworkOptions::new("", false).unwrap_err();
    assert!(err.to_string().contains("separator"));
    let opts = NetworkOptions::new(";", true).unwrap();
    assert_eq!(opts.author_separator, ";");
    assert!(opts.prune_orphans);
  }

  #[test]
  fn test_json_shape() {
    let net = AuthorNetwork {
      nodes: vec![node("A", "Peru")],
      links: vec![Link { source: "A".to_owned(), target: "B".to_owned() }]
    };
    let json = serde_json::to_string(&net).unwrap();
    assert_eq!(json, r#"{"nodes":[{"id":"A","country":"Peru"}],"links":[{"source":"A","target":"B"}]}"#);
  }
}
