//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{auth::token::AccessTokenVersion, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Coarse authorization role recorded for each user.
///
/// Stored and reported, but purchase/restock intentionally accept any
/// authenticated identity; see the authorization note in DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Customer,
    Admin,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole),
        }
    }
}

/// Error for a role string outside the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown user role")]
pub struct UnknownRole;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Registration payload. The password is plaintext here and hashed before
/// it reaches storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// The identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub username: String,
    pub role: UserRole,
}

/// Login result with the one-time raw bearer token.
#[derive(Debug, Clone)]
pub struct IssuedLogin {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserRecord,
}

/// A user row together with its stored password hash.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: UserRecord,
    pub(crate) password_hash: String,
}

/// Access token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveAccessToken {
    /// Token format/hash version.
    pub(crate) version: AccessTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub(crate) token_hash: String,

    /// The user this token authenticates.
    pub(crate) user: AuthenticatedUser,
}
