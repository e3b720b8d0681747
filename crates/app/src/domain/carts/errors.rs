//! Carts errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::ProductsServiceError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("selected options do not belong to the product")]
    InvalidSelection,

    #[error("nothing to check out")]
    EmptyCart,

    #[error("product lookup failed")]
    Products(#[source] ProductsServiceError),

    #[error("cart storage failed")]
    Store(#[from] CartStoreError),
}

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::ProductNotFound,
            other => Self::Products(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("stored cart is malformed: {reason}")]
    Malformed { reason: String },

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("failed to encode cart")]
    Encode(#[source] serde_json::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartStoreError {
    fn from(error: Error) -> Self {
        if let Error::ColumnDecode { index, source } = &error {
            return Self::Malformed {
                reason: format!("{index}: {source}"),
            };
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
