//! Authentication

use storefront_app::domain::users::records::UserRecord;

pub(crate) mod middleware;

/// Who is making the request.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Identity {
    /// No `Authorization` header; the cart lives in a cookie.
    Guest,

    /// Authenticated with a bearer API token; the cart lives in the database.
    User(UserRecord),
}

impl Identity {
    /// The signed-in user, if any.
    #[must_use]
    pub(crate) fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Guest => None,
            Self::User(user) => Some(user),
        }
    }
}
