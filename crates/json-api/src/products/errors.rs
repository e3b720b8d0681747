//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

/// Map a product service error to its HTTP status.
pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidReference | ProductsServiceError::InvalidData => {
            error!("product data is inconsistent: {error}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::Sql(source) => {
            error!("failed to fetch product: {source}");

            StatusError::internal_server_error()
        }
    }
}
