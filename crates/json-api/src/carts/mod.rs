//! Cart pages and mutations

pub(crate) mod errors;
mod handlers;
pub(crate) mod resources;
pub(crate) mod session;

pub(crate) use handlers::*;
