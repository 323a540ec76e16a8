//! Turtle text for relation sets, via `oxrdf` terms and the `oxttl` parser.
//!
//! Statements are written one per line with full IRIs, so the output is also
//! valid N-Triples.

use oxrdf::{NamedNode, Subject, Term};
use oxttl::TurtleParser;

use super::{RelationSet, Triple};
use crate::error::{ConceptKgError, Result};

/// Serialize a relation set as Turtle. An empty set serializes to an empty string.
///
/// Triples with a term that is not a valid absolute IRI are logged and left out.
pub fn to_turtle(relations: &RelationSet) -> String {
    let mut out = String::new();
    for triple in relations.iter() {
        match to_rdf(triple) {
            Ok(statement) => {
                out.push_str(&statement.to_string());
                out.push_str(" .\n");
            }
            Err(e) => log::warn!("Leaving out {:?}: {}", triple, e),
        }
    }
    out
}

/// Parse Turtle text into a relation set.
///
/// Statements whose subject or object is not an IRI are rejected.
pub fn parse_turtle(text: &str) -> Result<RelationSet> {
    let mut relations = RelationSet::new();

    for parsed in TurtleParser::new().for_reader(text.as_bytes()) {
        let triple = parsed.map_err(|e| ConceptKgError::Parse(e.to_string()))?;

        let subject = match triple.subject {
            Subject::NamedNode(node) => node.into_string(),
            other => {
                return Err(ConceptKgError::Parse(format!("subject {} is not an IRI", other)))
            }
        };
        let object = match triple.object {
            Term::NamedNode(node) => node.into_string(),
            other => {
                return Err(ConceptKgError::Parse(format!("object {} is not an IRI", other)))
            }
        };

        relations.insert(Triple::new(subject, triple.predicate.into_string(), object));
    }

    Ok(relations)
}

fn to_rdf(triple: &Triple) -> std::result::Result<oxrdf::Triple, oxrdf::IriParseError> {
    Ok(oxrdf::Triple::new(
        NamedNode::new(triple.subject.as_str())?,
        NamedNode::new(triple.predicate.as_str())?,
        NamedNode::new(triple.object.as_str())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cn(id: &str) -> String {
        format!("http://conceptnet.io{}", id)
    }

    #[test]
    fn test_empty_set_serializes_to_empty_text() {
        assert_eq!(to_turtle(&RelationSet::new()), "");
        assert!(parse_turtle("").unwrap().is_empty());
    }

    #[test]
    fn test_serialize_statement_per_line() {
        let mut set = RelationSet::new();
        set.insert(Triple::new(cn("/c/en/dog"), cn("/r/RelatedTo"), cn("/c/en/frisbee")));
        let text = to_turtle(&set);
        assert_eq!(
            text,
            "<http://conceptnet.io/c/en/dog> <http://conceptnet.io/r/RelatedTo> <http://conceptnet.io/c/en/frisbee> .\n"
        );
    }

    #[test]
    fn test_invalid_iris_are_left_out() {
        let mut set = RelationSet::new();
        set.insert(Triple::new(cn("/c/en/a b"), cn("/r/IsA"), cn("/c/en/thing")));
        set.insert(Triple::new(cn("/c/en/x>y"), cn("/r/IsA"), cn("/c/en/thing")));
        set.insert(Triple::new(cn("/c/en/dog"), cn("/r/IsA"), cn("/c/en/animal")));

        let text = to_turtle(&set);
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("/c/en/dog"));

        let parsed = parse_turtle(&text).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_parse_reads_back_serialized_text() {
        let set: RelationSet = vec![
            Triple::new(cn("/c/en/dog"), cn("/r/RelatedTo"), cn("/c/en/frisbee")),
            Triple::new(cn("/c/en/frisbee"), cn("/r/IsA"), cn("/c/en/toy")),
            Triple::new(cn("/c/fr/chien"), cn("/r/Synonym"), cn("/c/en/dog")),
            Triple::new(cn("/c/de/straße"), cn("/r/RelatedTo"), cn("/c/en/street")),
        ]
        .into_iter()
        .collect();

        let parsed = parse_turtle(&to_turtle(&set)).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn test_parse_accepts_prefixes_and_comments() {
        let text = "# description\n@prefix cn: <http://conceptnet.io/c/en/> .\n\ncn:dog <http://conceptnet.io/r/IsA> cn:animal .\n";
        let parsed = parse_turtle(text).unwrap();
        assert!(parsed.contains(&Triple::new(cn("/c/en/dog"), cn("/r/IsA"), cn("/c/en/animal"))));
    }

    #[test]
    fn test_parse_rejects_missing_terminator() {
        let err = parse_turtle("<http://a/s> <http://a/p> <http://a/o>").unwrap_err();
        assert!(matches!(err, ConceptKgError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_literal_objects() {
        let err = parse_turtle("<http://a/s> <http://a/p> \"text\" .").unwrap_err();
        assert!(matches!(err, ConceptKgError::Parse(_)));
    }
}
