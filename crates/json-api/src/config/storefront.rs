//! Storefront Config

use clap::Args;

/// Shop front settings.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Base URL that media ids and file names are appended to.
    #[arg(long, env = "MEDIA_BASE_URL", default_value = "/storage")]
    pub media_base_url: String,

    /// Mark cart and CSRF cookies `Secure` (serve over HTTPS only).
    #[arg(long, env = "COOKIE_SECURE", default_value_t = false, action = clap::ArgAction::Set)]
    pub cookie_secure: bool,

    /// Products shown per page on the home page.
    #[arg(long, env = "PRODUCTS_PER_PAGE", default_value_t = 12_u32)]
    pub products_per_page: u32,
}
