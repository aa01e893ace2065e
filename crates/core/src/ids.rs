#![forbid(unsafe_code)]

use thiserror::Error;

const MAX_IDENTIFIER_LEN: usize = 128;

/// Principal a write is attributed to. Supplied by the caller's auth layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActorId(String);

impl ActorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn try_new(value: impl Into<String>) -> Result<Self, ActorIdError> {
        let value = value.into();
        validate_actor_id(&value)?;
        Ok(Self(value))
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActorIdError {
    #[error("actor id must not be empty")]
    Empty,
    #[error("actor id is too long")]
    TooLong,
    #[error("actor id must start with an ascii alphanumeric character")]
    InvalidFirstChar,
    #[error("actor id contains invalid character {ch:?} at index {index}")]
    InvalidChar { ch: char, index: usize },
}

fn validate_actor_id(value: &str) -> Result<(), ActorIdError> {
    if value.is_empty() {
        return Err(ActorIdError::Empty);
    }
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(ActorIdError::TooLong);
    }
    let Some(first) = value.chars().next() else {
        return Err(ActorIdError::Empty);
    };
    if !first.is_ascii_alphanumeric() {
        return Err(ActorIdError::InvalidFirstChar);
    }
    for (index, ch) in value.chars().enumerate().skip(1) {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-' | '@') {
            continue;
        }
        return Err(ActorIdError::InvalidChar { ch, index });
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("{field} is required")]
    Empty { field: &'static str },
    #[error("{field} is too long")]
    TooLong { field: &'static str },
    #[error("{field} contains control characters")]
    ContainsControl { field: &'static str },
}

impl IdentifierError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field } | Self::ContainsControl { field } => {
                field
            }
        }
    }
}

/// Trims an opaque entity identifier and rejects values no store row could carry.
pub fn canonical_identifier(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, IdentifierError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::Empty { field });
    }
    if trimmed.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong { field });
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(IdentifierError::ContainsControl { field });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}
