//! Products

pub(crate) mod errors;
mod handlers;
pub(crate) mod resources;

pub(crate) use handlers::*;
