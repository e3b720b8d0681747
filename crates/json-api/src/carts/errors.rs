//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::{CartStoreError, CartsServiceError};

/// Map a cart service error to its HTTP status.
pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::InvalidQuantity => {
            StatusError::unprocessable_entity().brief("Quantity must be at least 1")
        }
        CartsServiceError::InvalidSelection => {
            StatusError::unprocessable_entity().brief("Selected options do not match the product")
        }
        CartsServiceError::EmptyCart => {
            StatusError::unprocessable_entity().brief("There is nothing to check out")
        }
        CartsServiceError::Store(CartStoreError::InvalidReference) => {
            StatusError::conflict().brief("Product is no longer available")
        }
        CartsServiceError::Store(CartStoreError::InvalidData) => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Store(source) => {
            error!("cart storage failed: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Products(source) => {
            error!("product lookup failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
