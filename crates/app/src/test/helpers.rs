//! Test Helpers
//!
//! Seed rows straight into the schema for service tests.

use rust_decimal::Decimal;
use sqlx::{Postgres, query, query_scalar};

use crate::{
    domain::{
        products::records::{OptionId, ProductId, ProductStatus},
        users::records::{UserId, VendorStatus},
    },
    test::TestContext,
};

pub(crate) async fn seed_shopper(ctx: &TestContext, email: &str) -> Result<UserId, sqlx::Error> {
    let id: i64 = query_scalar::<Postgres, i64>(
        "INSERT INTO users (name, email) VALUES ('Shopper', $1) RETURNING id",
    )
    .bind(email)
    .fetch_one(ctx.db.pool())
    .await?;

    Ok(UserId::from_i64(id))
}

pub(crate) async fn seed_vendor(
    ctx: &TestContext,
    store_name: &str,
    status: VendorStatus,
) -> Result<UserId, sqlx::Error> {
    let email = format!("{}@vendors.test", store_name.to_lowercase().replace(' ', "-"));
    let user = seed_shopper(ctx, &email).await?;

    query("INSERT INTO vendors (user_id, status, store_name) VALUES ($1, $2, $3)")
        .bind(user.into_i64())
        .bind(status.as_str())
        .bind(store_name)
        .execute(ctx.db.pool())
        .await?;

    Ok(user)
}

#[derive(Debug, Clone)]
pub(crate) struct ProductSeed {
    vendor: UserId,
    slug: String,
    status: ProductStatus,
    colours: Vec<String>,
}

impl ProductSeed {
    pub fn published(vendor: UserId, slug: &str) -> Self {
        Self {
            vendor,
            slug: slug.to_string(),
            status: ProductStatus::Published,
            colours: Vec::new(),
        }
    }

    pub fn draft(vendor: UserId, slug: &str) -> Self {
        Self {
            status: ProductStatus::Draft,
            ..Self::published(vendor, slug)
        }
    }

    /// Give the product one `Colour` variation type with these options.
    pub fn with_colours(mut self, colours: &[&str]) -> Self {
        self.colours = colours.iter().map(ToString::to_string).collect();
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SeededProduct {
    pub product: ProductId,
    pub options: Vec<OptionId>,
}

/// Insert a product priced 19.99 with 10 in stock.
pub(crate) async fn seed_product(
    ctx: &TestContext,
    seed: ProductSeed,
) -> Result<SeededProduct, sqlx::Error> {
    let pool = ctx.db.pool();

    let department: i64 = query_scalar::<Postgres, i64>(
        "INSERT INTO departments (name, slug) VALUES ('Kitchen', $1) RETURNING id",
    )
    .bind(format!("kitchen-{}", seed.slug))
    .fetch_one(pool)
    .await?;

    let product: i64 = query_scalar::<Postgres, i64>(
        "INSERT INTO products (title, slug, department_id, price, quantity, status, created_by) \
         VALUES ($1, $2, $3, $4, 10, $5, $6) RETURNING id",
    )
    .bind(format!("Product {}", seed.slug))
    .bind(&seed.slug)
    .bind(department)
    .bind(Decimal::new(1999, 2))
    .bind(seed.status.as_str())
    .bind(seed.vendor.into_i64())
    .fetch_one(pool)
    .await?;

    let mut options = Vec::with_capacity(seed.colours.len());

    if !seed.colours.is_empty() {
        let variation_type: i64 = query_scalar::<Postgres, i64>(
            "INSERT INTO variation_types (product_id, name, type) \
             VALUES ($1, 'Colour', 'Radio') RETURNING id",
        )
        .bind(product)
        .fetch_one(pool)
        .await?;

        for (position, colour) in (0_i32..).zip(&seed.colours) {
            let option: i64 = query_scalar::<Postgres, i64>(
                "INSERT INTO variation_type_options (variation_type_id, name, position) \
                 VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(variation_type)
            .bind(colour)
            .bind(position)
            .fetch_one(pool)
            .await?;

            options.push(OptionId::from_i64(option));
        }
    }

    Ok(SeededProduct {
        product: ProductId::from_i64(product),
        options,
    })
}
