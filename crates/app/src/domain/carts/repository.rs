//! Cart Items Repository

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::{
        data::NewCartItem,
        keys::{CartKey, OptionSelection},
        records::{CartItemUuid, StoredCartItem},
    },
    products::records::ProductId,
    users::records::UserId,
};

const LIST_CART_ITEMS_SQL: &str = include_str!("sql/list_cart_items.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("sql/upsert_cart_item.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgCartItemsRepository {
    pool: PgPool,
}

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list_cart_items(
        &self,
        user: UserId,
    ) -> Result<Vec<StoredCartItem>, sqlx::Error> {
        query_as::<Postgres, StoredCartItem>(LIST_CART_ITEMS_SQL)
            .bind(user.into_i64())
            .fetch_all(&self.pool)
            .await
    }

    /// Insert the line, or add to its quantity and refresh its price.
    pub(crate) async fn upsert_cart_item(
        &self,
        user: UserId,
        item: &NewCartItem,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(user.into_i64())
            .bind(item.key.product.into_i64())
            .bind(item.key.selection.to_string())
            .bind(to_db_quantity(item.quantity)?)
            .bind(item.price)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_cart_item_quantity(
        &self,
        user: UserId,
        key: &CartKey,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(user.into_i64())
            .bind(key.product.into_i64())
            .bind(key.selection.to_string())
            .bind(to_db_quantity(quantity)?)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_item(
        &self,
        user: UserId,
        key: &CartKey,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(user.into_i64())
            .bind(key.product.into_i64())
            .bind(key.selection.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn to_db_quantity(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for StoredCartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let selection: String = row.try_get("variation_type_option_ids")?;

        let selection =
            OptionSelection::from_json(&selection).map_err(|e| sqlx::Error::ColumnDecode {
                index: "variation_type_option_ids".to_string(),
                source: Box::new(e),
            })?;

        let quantity: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            key: CartKey::new(ProductId::from_i64(row.try_get("product_id")?), selection),
            quantity,
            price: row.try_get("price")?,
        })
    }
}
