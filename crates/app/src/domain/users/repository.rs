//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::users::{
    data::{NewUser, VendorProfile},
    records::{UserId, UserRecord, VendorRecord, VendorStatus},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const UPSERT_VENDOR_SQL: &str = include_str!("sql/upsert_vendor.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_user(&self, user: &NewUser) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(&user.name)
            .bind(&user.email)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_user(&self, user: UserId) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_i64())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn upsert_vendor(
        &self,
        vendor: &VendorProfile,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(UPSERT_VENDOR_SQL)
            .bind(vendor.user_id.into_i64())
            .bind(vendor.status.as_str())
            .bind(&vendor.store_name)
            .bind(vendor.store_address.as_deref())
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: UserId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VendorRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<VendorStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            user_id: UserId::from_i64(row.try_get("user_id")?),
            status,
            store_name: row.try_get("store_name")?,
            store_address: row.try_get("store_address")?,
        })
    }
}
