//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{
            CartService,
            stores::{PgUserCartStores, UserCartStores},
        },
        products::{MediaUrls, PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub auth: Arc<dyn AuthService>,
    pub carts: Arc<CartService>,
    pub cart_stores: Arc<dyn UserCartStores>,
    pub media: MediaUrls,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("media", &self.media)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(
        url: &str,
        media: MediaUrls,
        run_migrations: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        let db = Db::new(pool.clone());

        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db));

        Ok(Self {
            carts: Arc::new(CartService::new(products.clone(), media.clone())),
            products,
            auth: Arc::new(PgAuthService::new(pool.clone())),
            cart_stores: Arc::new(PgUserCartStores::new(pool)),
            media,
        })
    }
}
