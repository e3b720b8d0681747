//! Users service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::users::{
    data::{NewUser, VendorProfile},
    errors::UsersServiceError,
    records::{UserId, UserRecord, VendorRecord},
    repository::PgUsersRepository,
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        Ok(self.repository.create_user(&user).await?)
    }

    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError> {
        Ok(self.repository.get_user(user).await?)
    }

    async fn save_vendor_profile(
        &self,
        vendor: VendorProfile,
    ) -> Result<VendorRecord, UsersServiceError> {
        Ok(self.repository.upsert_vendor(&vendor).await?)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Registers a new shopper account.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserId) -> Result<UserRecord, UsersServiceError>;

    /// Creates or replaces the vendor profile attached to a user.
    async fn save_vendor_profile(
        &self,
        vendor: VendorProfile,
    ) -> Result<VendorRecord, UsersServiceError>;
}
