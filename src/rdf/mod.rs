//! RDF triples, relation sets and their Turtle text form.
//!
//! A [`RelationSet`] is what the fetcher produces and the store gateway
//! consumes; [`to_turtle`] is the exchange format for both the store insert
//! and the exported graph description.

mod turtle;

pub use turtle::{parse_turtle, to_turtle};

use std::collections::BTreeSet;

/// A single (subject, predicate, object) statement. All three are IRIs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// Set of unique triples; inserting a duplicate is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSet {
    triples: BTreeSet<Triple>,
}

impl RelationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }
}

impl Extend<Triple> for RelationSet {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl FromIterator<Triple> for RelationSet {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RelationSet {
    type Item = Triple;
    type IntoIter = std::collections::btree_set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

/// Final `/`-separated segment of an IRI (`http://conceptnet.io/c/en/dog` -> `dog`).
pub fn local_name(iri: &str) -> &str {
    iri.rsplit('/').next().unwrap_or(iri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut set = RelationSet::new();
        let t = Triple::new("http://x/a", "http://x/r", "http://x/b");
        assert!(set.insert(t.clone()));
        assert!(!set.insert(t.clone()));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&t));
    }

    #[test]
    fn test_extend_merges_sets() {
        let mut set: RelationSet = vec![Triple::new("a", "r", "b")].into_iter().collect();
        set.extend(vec![Triple::new("a", "r", "b"), Triple::new("b", "r", "c")]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("http://conceptnet.io/c/en/dog"), "dog");
        assert_eq!(local_name("http://conceptnet.io/r/RelatedTo"), "RelatedTo");
        assert_eq!(local_name("plain"), "plain");
        assert_eq!(local_name("http://example.org/trailing/"), "");
    }
}
