//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Map errors to HTTP status errors at the handler boundary.
pub(crate) trait ResultExt<T> {
    /// Map any error to a logged internal server error.
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    /// Map any error to a bad-request response carrying `context`.
    fn or_400(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|_error| StatusError::bad_request().brief(context.to_string()))
    }
}
