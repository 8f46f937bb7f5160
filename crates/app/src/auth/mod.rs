//! Users, credentials, and bearer-token authentication.

mod errors;
mod models;
mod password;
mod repository;
mod service;
mod token;

pub use errors::AuthServiceError;
pub use models::*;
pub use password::PasswordError;
pub use service::*;
pub use token::{AccessTokenError, AccessTokenVersion};
