use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonlSourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: {message}")]
    Record { line: usize, message: String },
}
