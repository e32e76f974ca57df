use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading, parsing or writing topic-model data files.
#[derive(Debug, Error)]
pub enum Error {
    /// A file or stream could not be opened, read or written.
    #[error("I/O error on {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },
    /// A data line could not be parsed. `line` is the 1-based physical line number.
    #[error("{source_name}:{line}: {reason} (line: {content:?})")]
    Parse {
        source_name: String,
        line: usize,
        content: String,
        reason: String,
    },
}

impl Error {
    pub fn io(target: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io { target: target.into(), source }
    }

    pub fn parse(source_name: &str, line: usize, content: &str, reason: impl Into<String>) -> Self {
        Error::Parse {
            source_name: source_name.to_string(),
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }

    /// True for malformed-input failures, as opposed to I/O errors.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}
