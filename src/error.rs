use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of an [`Error`], used by callers that only care
/// about what went wrong and not about the details.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    DuplicateKey,
    NotFound,
    Storage,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("mark {mark} for {subject} must be between 0 and 100")]
    InvalidMark { subject: String, mark: f64 },
    #[error("student name cannot be empty")]
    EmptyName,
    #[error("student id cannot be empty")]
    EmptyId,
    #[error("a student with id {0} already exists")]
    DuplicateId(String),
    #[error("no student with id {0}")]
    NotFound(String),
    #[error("roster entry {key} holds the record of student {id}")]
    MismatchedKey { key: String, id: String },
    #[error("roster file {} holds an invalid record for {key}", .path.display())]
    InvalidRecord {
        path: PathBuf,
        key: String,
        #[source]
        source: Box<Error>,
    },
    #[error("cannot access roster file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse roster file {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidMark { .. } | Error::EmptyName | Error::EmptyId => ErrorKind::Validation,
            Error::DuplicateId(_) => ErrorKind::DuplicateKey,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::MismatchedKey { .. }
            | Error::InvalidRecord { .. }
            | Error::Io { .. }
            | Error::Json { .. } => ErrorKind::Storage,
        }
    }

    /// Errors the interactive menu reports and then carries on from.
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Storage
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let mark = Error::InvalidMark {
            subject: "Science".into(),
            mark: 101.0,
        };
        assert_eq!(mark.kind(), ErrorKind::Validation);
        assert_eq!(Error::EmptyName.kind(), ErrorKind::Validation);
        assert_eq!(Error::DuplicateId("x".into()).kind(), ErrorKind::DuplicateKey);
        assert_eq!(Error::NotFound("x".into()).kind(), ErrorKind::NotFound);
        let io = Error::Io {
            path: "roster.json".into(),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(io.kind(), ErrorKind::Storage);
        assert!(!io.is_recoverable());
        assert!(mark.is_recoverable());
        let record = Error::InvalidRecord {
            path: "roster.json".into(),
            key: "7".into(),
            source: Box::new(mark),
        };
        assert_eq!(record.kind(), ErrorKind::Storage);
        assert!(!record.is_recoverable());
        assert_eq!(
            record.to_string(),
            "roster file roster.json holds an invalid record for 7"
        );
        assert!(std::error::Error::source(&record).is_some());
    }

    #[test]
    fn test_display() {
        let error = Error::InvalidMark {
            subject: "History".into(),
            mark: -3.5,
        };
        assert_eq!(
            error.to_string(),
            "mark -3.5 for History must be between 0 and 100"
        );
        assert_eq!(
            Error::NotFound("0000000000000042".into()).to_string(),
            "no student with id 0000000000000042"
        );
    }
}
