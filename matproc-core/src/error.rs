use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatprocError {
    #[error("Entry '{0}' not found in upload")]
    EntryNotFound(String),

    #[error("Cannot resolve reference '{0}'")]
    UnresolvableReference(String),

    #[error("Entry '{path}' holds a {found} section, expected {expected}")]
    UnexpectedEntryKind {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Unsupported entry file extension for '{0}'")]
    UnsupportedFileType(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
