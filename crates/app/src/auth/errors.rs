//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::{password::PasswordError, token::AccessTokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("username already taken")]
    UsernameTaken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("token not found")]
    NotFound,

    #[error("password does not meet requirements")]
    WeakPassword,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[from] AccessTokenError),

    #[error("password processing error")]
    Password(#[from] PasswordError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::UsernameTaken,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
