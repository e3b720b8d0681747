//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{Pagination, ProductPage},
        errors::ProductsServiceError,
        records::{OptionId, OptionWithTypeRecord, ProductId, ProductRecord, ProductSummaryRecord},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        pagination: Pagination,
    ) -> Result<ProductPage, ProductsServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let products = self.repository.list_products(&mut tx, pagination).await?;
        let total = self.repository.count_products(&mut tx).await?;

        tx.commit().await?;

        Ok(ProductPage {
            products,
            total,
            pagination,
        })
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_read_transaction().await?;

        let product = self.repository.get_product_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_cart_products(
        &self,
        products: &[ProductId],
    ) -> Result<Vec<ProductSummaryRecord>, ProductsServiceError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin_read_transaction().await?;

        let products = self.repository.get_cart_products(&mut tx, products).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_options(
        &self,
        options: &[OptionId],
    ) -> Result<Vec<OptionWithTypeRecord>, ProductsServiceError> {
        if options.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.db.begin_read_transaction().await?;

        let options = self.repository.get_options(&mut tx, options).await?;

        tx.commit().await?;

        Ok(options)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves one page of listed products, newest first.
    async fn list_products(&self, pagination: Pagination)
    -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve a single listed product with its full variation graph.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single listed product by its URL slug.
    async fn get_product_by_slug(&self, slug: &str) -> Result<ProductRecord, ProductsServiceError>;

    /// Batch lookup of listed products referenced by cart entries.
    ///
    /// Ids that are missing, unpublished or owned by an unapproved vendor are
    /// absent from the result.
    async fn get_cart_products(
        &self,
        products: &[ProductId],
    ) -> Result<Vec<ProductSummaryRecord>, ProductsServiceError>;

    /// Batch lookup of variation options with their parent type.
    async fn get_options(
        &self,
        options: &[OptionId],
    ) -> Result<Vec<OptionWithTypeRecord>, ProductsServiceError>;
}
