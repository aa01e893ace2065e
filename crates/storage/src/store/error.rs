#![forbid(unsafe_code)]

use rusqlite::ErrorCode;
use sp_core::IdentifierError;
use sp_core::envelope::{ErrorBody, ErrorClass, ErrorEnvelope};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),
    #[error("malformed input: {0}")]
    InvalidIdentifier(#[from] IdentifierError),
    #[error("type mismatch for column {column} (expected={expected}, found={found})")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("missing column {0}")]
    MissingColumn(String),
    #[error("sqlite: {0}")]
    Sql(rusqlite::Error),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO",
            Self::Unavailable(_) => "STORE_UNAVAILABLE",
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::MalformedInput(_) | Self::InvalidIdentifier(_) => "MALFORMED_INPUT",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::MissingColumn(_) => "MISSING_COLUMN",
            Self::Sql(_) => "SQL",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ConstraintViolation(_)
            | Self::MalformedInput(_)
            | Self::InvalidIdentifier(_) => ErrorClass::Client,
            Self::Io(_)
            | Self::Unavailable(_)
            | Self::TypeMismatch { .. }
            | Self::MissingColumn(_)
            | Self::Sql(_) => ErrorClass::Server,
        }
    }

    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
                class: self.class(),
            },
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        let rusqlite::Error::SqliteFailure(failure, message) = &value else {
            return Self::Sql(value);
        };
        let detail = message.clone().unwrap_or_else(|| failure.to_string());
        match failure.code {
            ErrorCode::ConstraintViolation => Self::ConstraintViolation(detail),
            ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::CannotOpen
            | ErrorCode::SystemIoFailure
            | ErrorCode::NotADatabase
            | ErrorCode::DatabaseCorrupt
            | ErrorCode::PermissionDenied
            | ErrorCode::ReadOnly
            | ErrorCode::DiskFull => Self::Unavailable(detail),
            _ => Self::Sql(value),
        }
    }
}
