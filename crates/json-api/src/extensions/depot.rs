//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront_app::domain::{carts::CartSession, users::records::UserRecord};

use crate::auth::Identity;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The signed-in user, `None` for guests.
    fn current_user(&self) -> Option<&UserRecord>;

    fn cart_session_or_500(&self) -> Result<&CartSession, StatusError>;

    fn cart_session_mut_or_500(&mut self) -> Result<&mut CartSession, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn current_user(&self) -> Option<&UserRecord> {
        self.obtain::<Identity>().ok().and_then(Identity::user)
    }

    fn cart_session_or_500(&self) -> Result<&CartSession, StatusError> {
        self.obtain_or_500::<CartSession>()
    }

    fn cart_session_mut_or_500(&mut self) -> Result<&mut CartSession, StatusError> {
        self.obtain_mut::<CartSession>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}
