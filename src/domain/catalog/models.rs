//! Catalog Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub price_cents: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price_cents: u64,
}

/// Variant UUID
pub type VariantUuid = TypedUuid<ProductVariant>;

/// Product Variant Model
///
/// Carries the per-variant stock counter the order lifecycle decrements and
/// restores. `price_cents` overrides the product price when set.
#[derive(Debug, Clone)]
pub struct ProductVariant {
    pub uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price_cents: Option<u64>,
    pub stock: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Variant Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price_cents: Option<u64>,
    pub stock: u64,
}

/// A variant joined with the product fields checkout needs.
#[derive(Debug, Clone)]
pub struct VariantForSale {
    pub variant: ProductVariant,
    pub product_name: String,
    pub product_price_cents: u64,
}

impl VariantForSale {
    /// Effective unit price: the variant override when present, the product
    /// price otherwise.
    #[must_use]
    pub fn unit_price_cents(&self) -> u64 {
        self.variant.price_cents.unwrap_or(self.product_price_cents)
    }
}
