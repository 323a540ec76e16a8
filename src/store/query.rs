use crate::concept::{is_safe_token, ConceptSet};
use crate::error::{ConceptKgError, Result};

/// Build the 2-hop expansion query around a set of seed concepts.
///
/// Returns every triple touching a seed, plus every triple whose subject or
/// object is a direct neighbour of a seed. Seeds are written as `cn:<term>`
/// prefixed names, so only concepts passing [`is_safe_token`] are used; the
/// rest are logged and left out.
pub fn expansion_query(concepts: &ConceptSet, prefix_iri: &str, limit: usize) -> Result<String> {
    if prefix_iri.chars().any(|c| {
        c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
    }) {
        return Err(ConceptKgError::InvalidInput(format!(
            "Prefix IRI contains characters not allowed in an IRI: {}",
            prefix_iri
        )));
    }

    let mut seeds = Vec::with_capacity(concepts.len());
    for concept in concepts.iter() {
        if is_safe_token(concept) {
            seeds.push(format!("cn:{}", concept));
        } else {
            log::warn!("Concept {:?} is not a safe query token; leaving it out of the query", concept);
        }
    }

    if seeds.is_empty() {
        return Err(ConceptKgError::InvalidInput(
            "No concept can be used in the graph query".to_string(),
        ));
    }

    let seed_list = seeds.join(", ");

    Ok(format!(
        r#"PREFIX cn: <{prefix}>
SELECT DISTINCT ?subject ?predicate ?object
WHERE {{
    {{
        ?subject ?predicate ?object .
        FILTER (?subject IN ({seeds}) || ?object IN ({seeds}))
    }}
    UNION
    {{
        ?subject ?predicate ?object .
        {{ ?seed ?hopPredicate ?hop . }} UNION {{ ?hop ?hopPredicate ?seed . }}
        FILTER (?seed IN ({seeds}) && (?hop = ?subject || ?hop = ?object))
    }}
}}
LIMIT {limit}
"#,
        prefix = prefix_iri,
        seeds = seed_list,
        limit = limit
    ))
}
