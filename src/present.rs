//! Terminal presentation of detected concepts.

use std::path::Path;

use crate::concept::ConceptSet;
use crate::error::Result;

/// Default name of the downloadable concept list
pub const CONCEPTS_FILE_NAME: &str = "detected_concepts.txt";

/// One-column boxed table headed `Concept`.
pub fn concept_table(concepts: &ConceptSet) -> String {
    let header = "Concept";
    let width = concepts
        .iter()
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len());

    let rule = format!("+{}+\n", "-".repeat(width + 2));
    let mut out = String::new();
    out.push_str(&rule);
    out.push_str(&format!("| {:<width$} |\n", header, width = width));
    out.push_str(&rule);
    for concept in concepts.iter() {
        out.push_str(&format!("| {:<width$} |\n", concept, width = width));
    }
    if !concepts.is_empty() {
        out.push_str(&rule);
    }
    out
}

/// Write the newline-joined concept list to `path`.
pub fn write_concepts_file(concepts: &ConceptSet, path: &Path) -> Result<()> {
    std::fs::write(path, concepts.to_text())?;
    log::info!("Wrote {} concepts to {}", concepts.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_concept_table_layout() {
        let concepts = ConceptSet::from_labels(["dog", "cell phone"]);
        let table = concept_table(&concepts);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "+------------+");
        assert_eq!(lines[1], "| Concept    |");
        assert_eq!(lines[3], "| cell_phone |");
        assert_eq!(lines[4], "| dog        |");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_empty_table_has_only_header() {
        let table = concept_table(&ConceptSet::new());
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn test_write_concepts_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONCEPTS_FILE_NAME);
        let concepts = ConceptSet::from_labels(["frisbee", "dog"]);

        write_concepts_file(&concepts, &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "dog\nfrisbee");
    }
}
