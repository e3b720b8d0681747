//! Products

pub mod data;
pub mod errors;
pub mod media;
pub mod records;
mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use errors::ProductsServiceError;
pub use media::{Conversion, MediaUrls};
pub use service::*;
