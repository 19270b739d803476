use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{method} {url}: {status} {message}")]
    Api {
        method: String,
        url: String,
        status: u16,
        message: String,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("invalid ID {id:?}: {reason}")]
    InvalidId { id: String, reason: String },

    #[error("Invalid expires_at date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("{id} failed to delete repository file: ({status}) {source}")]
    DeleteFile {
        id: String,
        status: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// HTTP status of a failed remote call, if the failure came from the API.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            Error::DeleteFile { source, .. } => source.status(),
            _ => None,
        }
    }

    /// True for the 404 the repository files API answers when the path is
    /// absent on the requested ref. A missing project is not included.
    #[must_use]
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, message, .. } if message.contains("File Not Found"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
