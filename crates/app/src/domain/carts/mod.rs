//! Carts

pub mod data;
pub mod errors;
pub mod keys;
pub mod records;
mod repository;
pub mod service;
pub mod session;
pub mod stores;
pub mod summary;

pub use errors::{CartStoreError, CartsServiceError};
pub use service::CartService;
pub use session::CartSession;
