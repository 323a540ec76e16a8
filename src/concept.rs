//! Detected concepts: normalization, deduplication and query-safety checks.

use regex::Regex;
use std::collections::BTreeSet;

/// Normalize a detector label into a concept term.
///
/// Lower-cases, trims and joins words with `_` (`"Cell Phone"` -> `cell_phone`),
/// matching the term form used by the relation API. Blank labels yield `None`.
pub fn normalize_concept(label: &str) -> Option<String> {
    let words: Vec<&str> = label.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }
    Some(words.join("_").to_lowercase())
}

/// SPARQL `PN_CHARS_BASE` as a regex class body.
const PN_CHARS_BASE: &str = r"A-Za-z\x{C0}-\x{D6}\x{D8}-\x{F6}\x{F8}-\x{2FF}\x{370}-\x{37D}\x{37F}-\x{1FFF}\x{200C}-\x{200D}\x{2070}-\x{218F}\x{2C00}-\x{2FEF}\x{3001}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFFD}\x{10000}-\x{EFFFF}";

/// True when a concept can be written as a SPARQL prefixed-name local part
/// without escaping.
///
/// First character from `PN_CHARS_U` or a digit, the rest from `PN_CHARS`.
/// `.` and `:` are refused even though the grammar allows them inside.
pub fn is_safe_token(concept: &str) -> bool {
    let pattern = format!(
        r"^[{base}_0-9][{base}_0-9\-\x{{B7}}\x{{300}}-\x{{36F}}\x{{203F}}-\x{{2040}}]*$",
        base = PN_CHARS_BASE
    );
    let token_regex = Regex::new(&pattern).expect("Invalid regex pattern");
    token_regex.is_match(concept)
}

/// Deduplicated set of seed concepts. Iteration order is sorted, not detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptSet {
    concepts: BTreeSet<String>,
}

impl ConceptSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw labels, normalizing each and dropping blanks.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for label in labels {
            set.insert(label.as_ref());
        }
        set
    }

    /// Insert a raw label. Returns false if it was blank or already present.
    pub fn insert(&mut self, label: &str) -> bool {
        match normalize_concept(label) {
            Some(concept) => self.concepts.insert(concept),
            None => false,
        }
    }

    pub fn contains(&self, concept: &str) -> bool {
        self.concepts.contains(concept)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.concepts.iter().map(String::as_str)
    }

    /// Newline-joined concept list (the downloadable text form).
    pub fn to_text(&self) -> String {
        self.iter().collect::<Vec<_>>().join("\n")
    }
}
