//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use sweetshop_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::UsernameTaken => {
            StatusError::conflict().brief("Username already taken")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid username or password")
        }
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid access token"),
        AuthServiceError::WeakPassword => {
            StatusError::bad_request().brief("Password must be at least 8 characters")
        }
        AuthServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid registration payload")
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process access token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
    }
}
