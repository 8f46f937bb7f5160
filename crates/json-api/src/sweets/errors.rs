//! Sweet Errors

use salvo::http::StatusError;
use tracing::error;

use sweetshop_app::domain::sweets::SweetsServiceError;

pub(crate) fn into_status_error(error: SweetsServiceError) -> StatusError {
    match error {
        SweetsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Sweet already exists")
        }
        SweetsServiceError::NotFound => StatusError::not_found().brief("Sweet not found"),
        SweetsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be positive.")
        }
        SweetsServiceError::InsufficientStock => {
            StatusError::bad_request().brief("Insufficient stock.")
        }
        SweetsServiceError::MissingRequiredData | SweetsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid sweet payload")
        }
        SweetsServiceError::QuantityOutOfRange(_) => {
            StatusError::bad_request().brief("Quantity out of range")
        }
        SweetsServiceError::Sql(source) => {
            error!("sweets storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
