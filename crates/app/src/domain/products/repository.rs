//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    domain::{
        products::{
            data::Pagination,
            records::{
                DepartmentId, DepartmentRef, MediaId, MediaRecord, OptionId, OptionWithTypeRecord,
                ProductId, ProductOwner, ProductRecord, ProductStatus, ProductSummaryRecord,
                VariationId, VariationOptionRecord, VariationRecord, VariationTypeId,
                VariationTypeKind, VariationTypeRecord,
            },
        },
        users::records::UserId,
    },
    ids::raw_ids,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_BY_ID_SQL: &str = include_str!("sql/get_product_by_id.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/get_product_by_slug.sql");
const GET_CART_PRODUCTS_SQL: &str = include_str!("sql/get_cart_products.sql");
const GET_OPTIONS_SQL: &str = include_str!("sql/get_options.sql");
const LIST_MEDIA_SQL: &str = include_str!("sql/list_media.sql");
const LIST_VARIATION_TYPES_SQL: &str = include_str!("sql/list_variation_types.sql");
const LIST_VARIATION_OPTIONS_SQL: &str = include_str!("sql/list_variation_options.sql");
const LIST_VARIATIONS_SQL: &str = include_str!("sql/list_variations.sql");

const PRODUCT_MEDIA: &str = "product";
const OPTION_MEDIA: &str = "variation_type_option";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pagination: Pagination,
    ) -> Result<Vec<ProductSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, ProductSummaryRecord>(LIST_PRODUCTS_SQL)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let total: i64 = query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        let row = query_as::<Postgres, ProductRow>(GET_PRODUCT_BY_ID_SQL)
            .bind(product.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        self.hydrate(tx, row).await
    }

    pub(crate) async fn get_product_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<ProductRecord, sqlx::Error> {
        let row = query_as::<Postgres, ProductRow>(GET_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await?;

        self.hydrate(tx, row).await
    }

    pub(crate) async fn get_cart_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductId],
    ) -> Result<Vec<ProductSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, ProductSummaryRecord>(GET_CART_PRODUCTS_SQL)
            .bind(raw_ids(products))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_options(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        options: &[OptionId],
    ) -> Result<Vec<OptionWithTypeRecord>, sqlx::Error> {
        query_as::<Postgres, OptionWithTypeRecord>(GET_OPTIONS_SQL)
            .bind(raw_ids(options))
            .fetch_all(&mut **tx)
            .await
    }

    /// Attach images, variation types and priced variations to a product row.
    async fn hydrate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        row: ProductRow,
    ) -> Result<ProductRecord, sqlx::Error> {
        let product_id = row.id.into_i64();

        let images = self
            .list_media(tx, PRODUCT_MEDIA, &[product_id])
            .await?
            .into_iter()
            .map(|media| media.media)
            .collect();

        let type_rows = query_as::<Postgres, VariationTypeRow>(LIST_VARIATION_TYPES_SQL)
            .bind(product_id)
            .fetch_all(&mut **tx)
            .await?;

        let option_rows = query_as::<Postgres, VariationOptionRow>(LIST_VARIATION_OPTIONS_SQL)
            .bind(product_id)
            .fetch_all(&mut **tx)
            .await?;

        let option_ids: Vec<i64> = option_rows.iter().map(|option| option.id).collect();

        let mut option_images: FxHashMap<i64, Vec<MediaRecord>> = FxHashMap::default();

        for media in self.list_media(tx, OPTION_MEDIA, &option_ids).await? {
            option_images
                .entry(media.owner_id)
                .or_default()
                .push(media.media);
        }

        let mut options_by_type: FxHashMap<i64, Vec<VariationOptionRecord>> =
            FxHashMap::default();

        for option in option_rows {
            options_by_type
                .entry(option.variation_type_id)
                .or_default()
                .push(VariationOptionRecord {
                    id: OptionId::from_i64(option.id),
                    name: option.name,
                    images: option_images.remove(&option.id).unwrap_or_default(),
                });
        }

        let variation_types = type_rows
            .into_iter()
            .map(|variation_type| VariationTypeRecord {
                id: VariationTypeId::from_i64(variation_type.id),
                name: variation_type.name,
                kind: variation_type.kind,
                options: options_by_type
                    .remove(&variation_type.id)
                    .unwrap_or_default(),
            })
            .collect();

        let variations = query_as::<Postgres, VariationRecord>(LIST_VARIATIONS_SQL)
            .bind(product_id)
            .fetch_all(&mut **tx)
            .await?;

        Ok(ProductRecord {
            id: row.id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            price: row.price,
            quantity: row.quantity,
            status: row.status,
            owner: row.owner,
            department: row.department,
            images,
            variation_types,
            variations,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    async fn list_media(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner_kind: &str,
        owners: &[i64],
    ) -> Result<Vec<MediaRow>, sqlx::Error> {
        if owners.is_empty() {
            return Ok(Vec::new());
        }

        query_as::<Postgres, MediaRow>(LIST_MEDIA_SQL)
            .bind(owner_kind)
            .bind(owners)
            .fetch_all(&mut **tx)
            .await
    }
}

/// Product columns before the related collections are loaded.
struct ProductRow {
    id: ProductId,
    title: String,
    slug: String,
    description: String,
    price: Decimal,
    quantity: u32,
    status: ProductStatus,
    owner: ProductOwner,
    department: DepartmentRef,
    created_at: jiff::Timestamp,
    updated_at: jiff::Timestamp,
}

struct VariationTypeRow {
    id: i64,
    name: String,
    kind: VariationTypeKind,
}

struct VariationOptionRow {
    id: i64,
    variation_type_id: i64,
    name: String,
}

struct MediaRow {
    owner_id: i64,
    media: MediaRecord,
}

fn decode_quantity(index: &str, value: i32) -> Result<u32, sqlx::Error> {
    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

fn owner_from_row(row: &PgRow) -> sqlx::Result<ProductOwner> {
    Ok(ProductOwner {
        user_id: UserId::from_i64(row.try_get("owner_id")?),
        user_name: row.try_get("owner_name")?,
        vendor_name: row.try_get("vendor_name")?,
    })
}

fn department_from_row(row: &PgRow) -> sqlx::Result<DepartmentRef> {
    Ok(DepartmentRef {
        id: DepartmentId::from_i64(row.try_get("department_id")?),
        name: row.try_get("department_name")?,
    })
}

fn image_from_row(row: &PgRow) -> sqlx::Result<Option<MediaRecord>> {
    let id: Option<i64> = row.try_get("image_id")?;
    let file_name: Option<String> = row.try_get("image_file_name")?;

    Ok(id.zip(file_name).map(|(id, file_name)| MediaRecord {
        id: MediaId::from_i64(id),
        file_name,
    }))
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<ProductStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            quantity: decode_quantity("quantity", row.try_get("quantity")?)?,
            status,
            owner: owner_from_row(row)?,
            department: department_from_row(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSummaryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            price: row.try_get("price")?,
            quantity: decode_quantity("quantity", row.try_get("quantity")?)?,
            owner: owner_from_row(row)?,
            department: department_from_row(row)?,
            image: image_from_row(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OptionWithTypeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OptionId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            variation_type_id: VariationTypeId::from_i64(row.try_get("variation_type_id")?),
            variation_type_name: row.try_get("variation_type_name")?,
            image: image_from_row(row)?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let mut option_ids: Vec<OptionId> = row
            .try_get::<Vec<i64>, _>("variation_type_option_ids")?
            .into_iter()
            .map(OptionId::from_i64)
            .collect();

        option_ids.sort_unstable();

        Ok(Self {
            id: VariationId::from_i64(row.try_get("id")?),
            option_ids,
            quantity: row
                .try_get::<Option<i32>, _>("quantity")?
                .map(|quantity| decode_quantity("quantity", quantity))
                .transpose()?,
            price: row.try_get("price")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariationTypeRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("type")?;

        let kind = kind
            .parse::<VariationTypeKind>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "type".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            kind,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariationOptionRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            variation_type_id: row.try_get("variation_type_id")?,
            name: row.try_get("name")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for MediaRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            owner_id: row.try_get("owner_id")?,
            media: MediaRecord {
                id: MediaId::from_i64(row.try_get("id")?),
                file_name: row.try_get("file_name")?,
            },
        })
    }
}
