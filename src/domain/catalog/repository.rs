//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::catalog::models::{
    NewProduct, NewVariant, Product, ProductUuid, ProductVariant, VariantForSale, VariantUuid,
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");
const GET_VARIANT_SQL: &str = include_str!("sql/get_variant.sql");
const GET_VARIANT_FOR_SALE_SQL: &str = include_str!("sql/get_variant_for_sale.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const INCREMENT_STOCK_SQL: &str = include_str!("sql/increment_stock.sql");
const GET_STOCK_SQL: &str = include_str!("sql/get_stock.sql");
const ADJUST_STOCK_SQL: &str = include_str!("sql/adjust_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        let price_i64 = try_bind_amount(product.price_cents, "price_cents")?;

        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(price_i64)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: NewVariant,
    ) -> Result<ProductVariant, sqlx::Error> {
        let price_i64 = variant
            .price_cents
            .map(|price| try_bind_amount(price, "price_cents"))
            .transpose()?;
        let stock_i64 = try_bind_amount(variant.stock, "stock")?;

        query_as::<Postgres, ProductVariant>(CREATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(variant.product_uuid.into_uuid())
            .bind(variant.size)
            .bind(variant.color)
            .bind(price_i64)
            .bind(stock_i64)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
    ) -> Result<ProductVariant, sqlx::Error> {
        query_as::<Postgres, ProductVariant>(GET_VARIANT_SQL)
            .bind(variant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_variant_for_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
    ) -> Result<VariantForSale, sqlx::Error> {
        query_as::<Postgres, VariantForSale>(GET_VARIANT_FOR_SALE_SQL)
            .bind(variant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Conditional decrement; zero rows affected means the remaining stock
    /// does not cover `quantity`.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(variant.into_uuid())
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn increment_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_STOCK_SQL)
            .bind(variant.into_uuid())
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
    ) -> Result<u64, sqlx::Error> {
        let stock_i64: i64 = query_scalar(GET_STOCK_SQL)
            .bind(variant.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(stock_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })
    }

    /// Signed adjustment with a non-negativity guard; `None` means the
    /// guard rejected the adjustment (or the variant does not exist).
    pub(crate) async fn adjust_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
        delta: i64,
    ) -> Result<Option<u64>, sqlx::Error> {
        let stock_i64: Option<i64> = query_scalar(ADJUST_STOCK_SQL)
            .bind(variant.into_uuid())
            .bind(delta)
            .fetch_optional(&mut **tx)
            .await?;

        stock_i64
            .map(|stock| {
                u64::try_from(stock).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "stock".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price_cents: try_get_amount(row, "price_cents")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductVariant {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_cents = row
            .try_get::<Option<i64>, _>("price_cents")?
            .map(|price| {
                u64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "price_cents".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            size: row.try_get("size")?,
            color: row.try_get("color")?,
            price_cents,
            stock: try_get_amount(row, "stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariantForSale {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            variant: ProductVariant::from_row(row)?,
            product_name: row.try_get("product_name")?,
            product_price_cents: try_get_amount(row, "product_price_cents")?,
        })
    }
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_bind_amount(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
