//! Bearer token authentication
//!
//! API tokens resolve to the signed-in user whose cart lives in the database.

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
