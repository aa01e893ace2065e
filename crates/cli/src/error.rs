#![forbid(unsafe_code)]

use sp_core::ActorIdError;
use sp_core::envelope::{ErrorBody, ErrorClass, ErrorEnvelope};
use sp_storage::{ConfigError, StoreError};
use thiserror::Error;

pub const EXIT_SERVER_ERROR: i32 = 1;
pub const EXIT_CLIENT_ERROR: i32 = 2;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid actor id: {0}")]
    Actor(#[from] ActorIdError),
    #[error("an actor is required for writes (pass --actor or set SP_ACTOR)")]
    MissingActor,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "INVALID_CONFIG",
            Self::Actor(_) | Self::MissingActor => "INVALID_ACTOR",
            Self::Store(err) => err.code(),
            Self::Output(_) => "OUTPUT",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Config(_) | Self::Actor(_) | Self::MissingActor => ErrorClass::Client,
            Self::Store(err) => err.class(),
            Self::Output(_) => ErrorClass::Server,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.class() {
            ErrorClass::Client => EXIT_CLIENT_ERROR,
            ErrorClass::Server => EXIT_SERVER_ERROR,
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
