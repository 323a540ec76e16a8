use thiserror::Error;

/// Main error type for ConceptKG
#[derive(Error, Debug)]
pub enum ConceptKgError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP failures (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Object detector failed or could not be run
    #[error("Detection error: {0}")]
    Detection(String),

    /// Relation API failure for a single concept
    #[error("Fetch error for concept '{concept}': {message}")]
    Fetch { concept: String, message: String },

    /// Triple store answered with a non-success status
    #[error("Triple store error {status}: {body}")]
    Store { status: u16, body: String },

    /// Parse errors (JSON bodies, Turtle text)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A single API or query record lacked a required field
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

/// Convenient Result type using ConceptKgError
pub type Result<T> = std::result::Result<T, ConceptKgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConceptKgError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_store_error_carries_status_and_body() {
        let err = ConceptKgError::Store {
            status: 404,
            body: "No such dataset".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("No such dataset"));
    }

    #[test]
    fn test_fetch_error_names_concept() {
        let err = ConceptKgError::Fetch {
            concept: "dog".to_string(),
            message: "HTTP 502".to_string(),
        };
        assert!(err.to_string().contains("'dog'"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ConceptKgError = io_err.into();
        assert!(matches!(err, ConceptKgError::Io(_)));
    }
}
