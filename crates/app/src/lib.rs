//! Storefront domain, persistence and cart reconciliation.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod uuids;

#[cfg(test)]
mod test;
