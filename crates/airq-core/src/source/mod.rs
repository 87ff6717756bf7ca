mod jsonl;

pub use jsonl::JsonLinesSource;

use thiserror::Error;
use time::OffsetDateTime;

/// One captured uplink, as delivered by a source.
#[derive(Debug, Clone, PartialEq)]
pub struct Uplink {
    /// 1-based line (or record) number within the source.
    pub line: usize,
    pub port: u32,
    pub payload: Vec<u8>,
    pub device: Option<String>,
    pub time: Option<OffsetDateTime>,
}

pub trait UplinkSource {
    fn next_uplink(&mut self) -> Result<Option<Uplink>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid uplink record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}

impl From<jsonl::error::JsonlSourceError> for SourceError {
    fn from(value: jsonl::error::JsonlSourceError) -> Self {
        match value {
            jsonl::error::JsonlSourceError::Io(err) => SourceError::Io(err),
            jsonl::error::JsonlSourceError::Json { line, source } => SourceError::InvalidRecord {
                line,
                message: source.to_string(),
            },
            jsonl::error::JsonlSourceError::Record { line, message } => {
                SourceError::InvalidRecord { line, message }
            }
        }
    }
}

impl<S: UplinkSource + ?Sized> UplinkSource for Box<S> {
    fn next_uplink(&mut self) -> Result<Option<Uplink>, SourceError> {
        (**self).next_uplink()
    }
}

/// In-memory source, mostly useful for callers that already hold uplinks.
impl UplinkSource for std::vec::IntoIter<Uplink> {
    fn next_uplink(&mut self) -> Result<Option<Uplink>, SourceError> {
        Ok(self.next())
    }
}
