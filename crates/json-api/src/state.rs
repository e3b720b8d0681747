//! State

use std::sync::Arc;

use storefront_app::context::AppContext;

/// Per-server settings the HTTP layer applies on top of the app context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SiteSettings {
    /// Mark cart and CSRF cookies `Secure`.
    pub(crate) cookie_secure: bool,

    /// Products per home page.
    pub(crate) per_page: u32,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            cookie_secure: false,
            per_page: storefront_app::domain::products::data::DEFAULT_PER_PAGE,
        }
    }
}

/// Shared application state injected into every request.
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) site: SiteSettings,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, site: SiteSettings) -> Self {
        Self { app, site }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, site: SiteSettings) -> Arc<Self> {
        Arc::new(Self::new(app, site))
    }
}
