//! Guest cookie cart store
//!
//! The whole cart is one JSON object mapping the cart key string to its line,
//! base64url encoded (no padding) so it is safe as a cookie value. Every
//! mutation rewrites the whole object.

use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    carts::{
        data::NewCartItem,
        errors::CartStoreError,
        keys::{CartKey, OptionSelection},
        records::{CartItemUuid, StoredCartItem},
        stores::CartStore,
    },
    products::records::ProductId,
};

/// Name of the cookie holding a guest cart.
pub const CART_COOKIE_NAME: &str = "cartItems";

/// One line of the guest cart cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCartEntry {
    pub id: Uuid,
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub option_ids: OptionSelection,
}

type GuestCart = BTreeMap<String, GuestCartEntry>;

#[derive(Debug, Default)]
struct CookieState {
    /// Cookie value as received, until first use.
    raw: Option<String>,
    entries: Option<GuestCart>,
    dirty: bool,
}

impl CookieState {
    fn parsed(&mut self) -> Result<&mut GuestCart, CartStoreError> {
        if self.entries.is_none() {
            let entries = match self.raw.as_deref() {
                Some(raw) => decode(raw)?,
                None => GuestCart::new(),
            };

            self.raw = None;
            self.entries = Some(entries);
        }

        Ok(self.entries.get_or_insert_with(GuestCart::new))
    }

    /// Entries for a mutation; an undecodable cookie is replaced by an empty cart.
    fn writable(&mut self) -> &mut GuestCart {
        if let Some(error) = self.parsed().err() {
            warn!(%error, "discarding malformed guest cart cookie");

            self.raw = None;
            self.entries = Some(GuestCart::new());
        }

        self.dirty = true;

        self.entries.get_or_insert_with(GuestCart::new)
    }
}

/// A guest's cart held in the request cookie.
///
/// Reads decode the incoming cookie lazily. After a mutation,
/// [`CookieCartStore::pending_cookie_value`] yields the value to send back.
#[derive(Debug, Default)]
pub struct CookieCartStore {
    state: Mutex<CookieState>,
}

impl CookieCartStore {
    /// Store over the cookie value received with the request, if any.
    #[must_use]
    pub fn new(raw: Option<String>) -> Self {
        Self {
            state: Mutex::new(CookieState {
                raw: raw.filter(|raw| !raw.is_empty()),
                entries: None,
                dirty: false,
            }),
        }
    }

    /// The encoded cookie to write back, if the cart was changed.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be serialised.
    pub async fn pending_cookie_value(&self) -> Result<Option<String>, CartStoreError> {
        let state = self.state.lock().await;

        if !state.dirty {
            return Ok(None);
        }

        let empty = GuestCart::new();
        let entries = state.entries.as_ref().unwrap_or(&empty);

        encode(entries).map(Some)
    }
}

/// Encode guest cart entries into a cookie value.
///
/// # Errors
///
/// Returns an error when the entries cannot be serialised.
pub fn encode_entries<'a>(
    entries: impl IntoIterator<Item = &'a GuestCartEntry>,
) -> Result<String, CartStoreError> {
    let cart: GuestCart = entries
        .into_iter()
        .map(|entry| (entry_key(entry).to_string(), entry.clone()))
        .collect();

    encode(&cart)
}

fn entry_key(entry: &GuestCartEntry) -> CartKey {
    CartKey::new(entry.product_id, entry.option_ids.clone())
}

fn encode(cart: &GuestCart) -> Result<String, CartStoreError> {
    let json = serde_json::to_vec(cart).map_err(CartStoreError::Encode)?;

    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode(raw: &str) -> Result<GuestCart, CartStoreError> {
    let json = URL_SAFE_NO_PAD
        .decode(raw.trim())
        .map_err(|error| CartStoreError::Malformed {
            reason: format!("cookie is not base64url: {error}"),
        })?;

    serde_json::from_slice(&json).map_err(|error| CartStoreError::Malformed {
        reason: format!("cookie is not a cart: {error}"),
    })
}

#[async_trait]
impl CartStore for CookieCartStore {
    async fn load(&self) -> Result<Vec<StoredCartItem>, CartStoreError> {
        let mut state = self.state.lock().await;

        let entries = state.parsed()?;

        Ok(entries
            .values()
            .map(|entry| StoredCartItem {
                uuid: CartItemUuid::from_uuid(entry.id),
                key: entry_key(entry),
                quantity: entry.quantity,
                price: entry.price,
            })
            .collect())
    }

    async fn add(&self, item: NewCartItem) -> Result<(), CartStoreError> {
        let mut state = self.state.lock().await;

        let entries = state.writable();

        entries
            .entry(item.key.to_string())
            .and_modify(|entry| {
                entry.quantity = entry.quantity.saturating_add(item.quantity);
                entry.price = item.price;
            })
            .or_insert_with(|| GuestCartEntry {
                id: item.uuid.into_uuid(),
                product_id: item.key.product,
                quantity: item.quantity,
                price: item.price,
                option_ids: item.key.selection.clone(),
            });

        Ok(())
    }

    async fn update_quantity(
        &self,
        key: &CartKey,
        quantity: u32,
    ) -> Result<bool, CartStoreError> {
        let mut state = self.state.lock().await;

        let updated = match state.writable().get_mut(&key.to_string()) {
            Some(entry) => {
                entry.quantity = quantity;
                true
            }
            None => false,
        };

        Ok(updated)
    }

    async fn remove(&self, key: &CartKey) -> Result<bool, CartStoreError> {
        let mut state = self.state.lock().await;

        Ok(state.writable().remove(&key.to_string()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::products::records::{OptionId, VariationTypeId};

    use super::*;

    fn key(product: i64, pairs: &[(i64, i64)]) -> CartKey {
        CartKey::new(
            ProductId::from_i64(product),
            pairs
                .iter()
                .map(|(variation_type, option)| {
                    (
                        VariationTypeId::from_i64(*variation_type),
                        OptionId::from_i64(*option),
                    )
                })
                .collect(),
        )
    }

    fn new_item(key: CartKey, quantity: u32, price: Decimal) -> NewCartItem {
        NewCartItem {
            uuid: CartItemUuid::new(),
            key,
            quantity,
            price,
        }
    }

    #[tokio::test]
    async fn fresh_store_is_empty_and_clean() -> TestResult {
        let store = CookieCartStore::new(None);

        assert!(store.load().await?.is_empty());
        assert_eq!(store.pending_cookie_value().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_adds_merge_and_refresh_price() -> TestResult {
        let store = CookieCartStore::new(None);

        store
            .add(new_item(key(1, &[(2, 9), (1, 5)]), 2, Decimal::new(1999, 2)))
            .await?;
        store
            .add(new_item(key(1, &[(1, 5), (2, 9)]), 1, Decimal::new(1899, 2)))
            .await?;

        let lines = store.load().await?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].price, Decimal::new(1899, 2));

        Ok(())
    }

    #[tokio::test]
    async fn cookie_value_round_trips_into_a_new_request() -> TestResult {
        let store = CookieCartStore::new(None);
        let first = new_item(key(4, &[(1, 5)]), 2, Decimal::new(1999, 2));
        let uuid = first.uuid;

        store.add(first).await?;

        let cookie = store.pending_cookie_value().await?.expect("cookie should be written");
        let next_request = CookieCartStore::new(Some(cookie));

        let lines = next_request.load().await?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].uuid, uuid);
        assert_eq!(lines[0].key, key(4, &[(1, 5)]));
        assert_eq!(next_request.pending_cookie_value().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn cookie_json_uses_cart_key_strings() -> TestResult {
        let store = CookieCartStore::new(None);

        store
            .add(new_item(key(4, &[(2, 9), (1, 5)]), 1, Decimal::new(500, 2)))
            .await?;

        let cookie = store.pending_cookie_value().await?.expect("cookie should be written");
        let json: serde_json::Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(cookie)?)?;

        let entry = &json[r#"4_{"1":5,"2":9}"#];

        assert_eq!(entry["product_id"], 4);
        assert_eq!(entry["quantity"], 1);
        assert_eq!(entry["price"], 5.0);
        assert_eq!(entry["option_ids"]["1"], 5);

        Ok(())
    }

    #[tokio::test]
    async fn absent_keys_are_left_alone() -> TestResult {
        let store = CookieCartStore::new(None);

        store
            .add(new_item(key(1, &[]), 1, Decimal::new(100, 2)))
            .await?;

        assert!(!store.update_quantity(&key(2, &[]), 5).await?);
        assert!(!store.remove(&key(2, &[])).await?);
        assert_eq!(store.load().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_then_remove() -> TestResult {
        let store = CookieCartStore::new(None);
        let line = key(1, &[(1, 5)]);

        store
            .add(new_item(line.clone(), 1, Decimal::new(100, 2)))
            .await?;

        assert!(store.update_quantity(&line, 7).await?);
        assert_eq!(store.load().await?[0].quantity, 7);

        assert!(store.remove(&line).await?);
        assert!(store.load().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn malformed_cookie_is_reported_on_read() {
        let store = CookieCartStore::new(Some("not a cart!".to_string()));

        let result = store.load().await;

        assert!(
            matches!(result, Err(CartStoreError::Malformed { .. })),
            "expected Malformed, got {result:?}"
        );
    }

    #[tokio::test]
    async fn malformed_cookie_is_replaced_on_write() -> TestResult {
        let store = CookieCartStore::new(Some(URL_SAFE_NO_PAD.encode("[1,2,3]")));

        store
            .add(new_item(key(3, &[]), 2, Decimal::new(250, 2)))
            .await?;

        let lines = store.load().await?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
        assert!(store.pending_cookie_value().await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn encode_entries_matches_store_output() -> TestResult {
        let entry = GuestCartEntry {
            id: Uuid::now_v7(),
            product_id: ProductId::from_i64(8),
            quantity: 2,
            price: Decimal::new(1000, 2),
            option_ids: OptionSelection::new(),
        };

        let cookie = encode_entries([&entry])?;
        let lines = CookieCartStore::new(Some(cookie)).load().await?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].key, CartKey::new(ProductId::from_i64(8), OptionSelection::new()));

        Ok(())
    }
}
