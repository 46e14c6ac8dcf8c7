use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("point data array '{name}' is missing or is not a 3-component vector field")]
    MissingField { name: String },

    #[error("field '{name}' has {found} values but the mesh has {expected} points")]
    FieldLength {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("failed to write table: {0}")]
    Table(String),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        match e.into_kind() {
            csv::ErrorKind::Io(source) => Error::Io { source },
            other => Error::Table(format!("{other:?}")),
        }
    }
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField { name: name.into() }
    }

    /// Returns `true` when the underlying failure is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io { source } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
