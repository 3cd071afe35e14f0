//! Test Helpers

use crate::{
    domain::{
        actor::UserUuid,
        catalog::{
            CatalogService, CatalogServiceError,
            models::{NewProduct, NewVariant, ProductUuid, ProductVariant, VariantUuid},
        },
        orders::{
            OrdersService, OrdersServiceError,
            models::{
                NewOrder, NewOrderLine, Order, OrderUuid, PaymentFlow, ShippingContact,
            },
        },
    },
    test::TestContext,
};

/// A product with one variant, as most order tests need it.
pub(crate) struct Listing {
    pub product: ProductUuid,
    pub variant: VariantUuid,
}

pub(crate) async fn create_listing(
    ctx: &TestContext,
    name: &str,
    price_cents: u64,
    stock: u64,
) -> Result<Listing, CatalogServiceError> {
    create_listing_with_variant(ctx, name, price_cents, None, None, None, stock).await
}

pub(crate) async fn create_listing_with_variant(
    ctx: &TestContext,
    name: &str,
    price_cents: u64,
    size: Option<&str>,
    color: Option<&str>,
    variant_price_cents: Option<u64>,
    stock: u64,
) -> Result<Listing, CatalogServiceError> {
    let product = ctx
        .catalog
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            price_cents,
        })
        .await?;

    let variant = ctx
        .catalog
        .create_variant(NewVariant {
            uuid: VariantUuid::new(),
            product_uuid: product.uuid,
            size: size.map(str::to_string),
            color: color.map(str::to_string),
            price_cents: variant_price_cents,
            stock,
        })
        .await?;

    Ok(Listing {
        product: product.uuid,
        variant: variant.uuid,
    })
}

pub(crate) fn order_for(
    user: Option<UserUuid>,
    payment: PaymentFlow,
    lines: Vec<NewOrderLine>,
) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        user_uuid: user,
        currency: "EUR".to_string(),
        shipping_cents: 4_95,
        contact: ShippingContact {
            recipient_name: "Kim Doe".to_string(),
            shipping_address: "1 Main St, 10115 Berlin".to_string(),
        },
        payment,
        lines,
    }
}

pub(crate) fn line(listing: &Listing, quantity: u32) -> NewOrderLine {
    NewOrderLine {
        product_uuid: listing.product,
        variant_uuid: listing.variant,
        quantity,
    }
}

/// Place a paid order for one listing; the common starting point for the
/// return workflow tests.
pub(crate) async fn place_paid_order(
    ctx: &TestContext,
    user: UserUuid,
    listing: &Listing,
    quantity: u32,
) -> Result<Order, OrdersServiceError> {
    ctx.orders
        .place_order(order_for(
            Some(user),
            PaymentFlow::Upfront,
            vec![line(listing, quantity)],
        ))
        .await
}

pub(crate) async fn variant_stock(
    ctx: &TestContext,
    variant: VariantUuid,
) -> Result<u64, CatalogServiceError> {
    ctx.catalog
        .get_variant(variant)
        .await
        .map(|variant: ProductVariant| variant.stock)
}
