//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{NewProduct, NewVariant, Product, ProductUuid, ProductVariant, VariantUuid},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_variant(
        &self,
        variant: NewVariant,
    ) -> Result<ProductVariant, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_variant(&mut tx, variant).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_variant(
        &self,
        variant: VariantUuid,
    ) -> Result<ProductVariant, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let variant = self.repository.get_variant(&mut tx, variant).await?;

        tx.commit().await?;

        Ok(variant)
    }

    async fn adjust_stock(
        &self,
        variant: VariantUuid,
        delta: i64,
    ) -> Result<u64, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        // Distinguish "guard rejected" from "no such variant" before giving up.
        let adjusted = self.repository.adjust_stock(&mut tx, variant, delta).await?;

        let stock = match adjusted {
            Some(stock) => stock,
            None => {
                self.repository.get_variant(&mut tx, variant).await?;

                return Err(CatalogServiceError::InsufficientStock);
            }
        };

        tx.commit().await?;

        Ok(stock)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Creates a new product.
    async fn create_product(&self, product: NewProduct)
    -> Result<Product, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError>;

    /// Creates a new variant of an existing product.
    async fn create_variant(
        &self,
        variant: NewVariant,
    ) -> Result<ProductVariant, CatalogServiceError>;

    /// Retrieve a single variant.
    async fn get_variant(
        &self,
        variant: VariantUuid,
    ) -> Result<ProductVariant, CatalogServiceError>;

    /// Apply a signed stock adjustment (admin restock/correction path) and
    /// return the new stock level. Negative adjustments are guarded so stock
    /// never goes below zero.
    async fn adjust_stock(
        &self,
        variant: VariantUuid,
        delta: i64,
    ) -> Result<u64, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_product_returns_correct_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let product = ctx
            .catalog
            .create_product(NewProduct {
                uuid,
                name: "Wool Scarf".to_string(),
                price_cents: 24_50,
            })
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Wool Scarf");
        assert_eq!(product.price_cents, 24_50);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.catalog
            .create_product(NewProduct {
                uuid,
                name: "First".to_string(),
                price_cents: 100,
            })
            .await?;

        let result = ctx
            .catalog
            .create_product(NewProduct {
                uuid,
                name: "Second".to_string(),
                price_cents: 200,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_variant_with_unknown_product_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .create_variant(NewVariant {
                uuid: VariantUuid::new(),
                product_uuid: ProductUuid::new(),
                size: Some("M".to_string()),
                color: None,
                price_cents: None,
                stock: 5,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_variant_returns_created_variant() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .catalog
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: "Canvas Tote".to_string(),
                price_cents: 18_00,
            })
            .await?;

        let uuid = VariantUuid::new();

        ctx.catalog
            .create_variant(NewVariant {
                uuid,
                product_uuid: product.uuid,
                size: None,
                color: Some("Natural".to_string()),
                price_cents: Some(19_00),
                stock: 12,
            })
            .await?;

        let variant = ctx.catalog.get_variant(uuid).await?;

        assert_eq!(variant.uuid, uuid);
        assert_eq!(variant.product_uuid, product.uuid);
        assert_eq!(variant.color.as_deref(), Some("Natural"));
        assert_eq!(variant.price_cents, Some(19_00));
        assert_eq!(variant.stock, 12);

        Ok(())
    }

    #[tokio::test]
    async fn get_variant_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_variant(VariantUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn adjust_stock_applies_signed_delta() -> TestResult {
        let ctx = TestContext::new().await;
        let variant = ctx.create_variant("Linen Shirt", 35_00, 10).await?;

        let stock = ctx.catalog.adjust_stock(variant, 5).await?;
        assert_eq!(stock, 15);

        let stock = ctx.catalog.adjust_stock(variant, -7).await?;
        assert_eq!(stock, 8);

        Ok(())
    }

    #[tokio::test]
    async fn adjust_stock_below_zero_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let variant = ctx.create_variant("Linen Shirt", 35_00, 3).await?;

        let result = ctx.catalog.adjust_stock(variant, -4).await;

        assert!(
            matches!(result, Err(CatalogServiceError::InsufficientStock)),
            "expected InsufficientStock, got {result:?}"
        );

        assert_eq!(ctx.catalog.get_variant(variant).await?.stock, 3);

        Ok(())
    }

    #[tokio::test]
    async fn adjust_stock_unknown_variant_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.adjust_stock(VariantUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
