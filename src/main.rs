//! Stockroom Operations CLI

use std::{process, sync::Arc};

use clap::{Args, Parser, Subcommand};
use stockroom::{
    database::{self, Db},
    domain::{
        actor::Actor,
        catalog::{
            CatalogService, PgCatalogService,
            models::{NewProduct, NewVariant, ProductUuid, VariantUuid},
        },
        notifications::TracingNotifier,
        orders::{
            OrdersService, PgOrdersService,
            models::OrderUuid,
            service::OrdersConfig,
        },
        payments::DisabledPaymentProvider,
    },
};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "stockroom", about = "Stockroom CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Product(ProductCommand),
    Variant(VariantCommand),
    Order(OrderCommand),
}

#[derive(Debug, Args)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(CreateProductArgs),
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Price in minor currency units
    #[arg(long)]
    price_cents: u64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

#[derive(Debug, Args)]
struct VariantCommand {
    #[command(subcommand)]
    command: VariantSubcommand,
}

#[derive(Debug, Subcommand)]
enum VariantSubcommand {
    Create(CreateVariantArgs),
}

#[derive(Debug, Args)]
struct CreateVariantArgs {
    /// Product this variant belongs to
    #[arg(long)]
    product_uuid: Uuid,

    /// Size label
    #[arg(long)]
    size: Option<String>,

    /// Colour label
    #[arg(long)]
    color: Option<String>,

    /// Price override in minor currency units
    #[arg(long)]
    price_cents: Option<u64>,

    /// Opening stock level
    #[arg(long, default_value_t = 0)]
    stock: u64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    Show(ShowOrderArgs),
}

#[derive(Debug, Args)]
struct ShowOrderArgs {
    /// Order UUID
    #[arg(long)]
    order_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Product(ProductCommand {
            command: ProductSubcommand::Create(args),
        }) => create_product(args).await,
        Commands::Variant(VariantCommand {
            command: VariantSubcommand::Create(args),
        }) => create_variant(args).await,
        Commands::Order(OrderCommand {
            command: OrderSubcommand::Show(args),
        }) => show_order(args).await,
    }
}

async fn catalog_service(database_url: &str) -> Result<PgCatalogService, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(PgCatalogService::new(Db::new(pool)))
}

async fn create_product(args: CreateProductArgs) -> Result<(), String> {
    let service = catalog_service(&args.database_url).await?;

    let product = service
        .create_product(NewProduct {
            uuid: args
                .product_uuid
                .map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: args.name,
            price_cents: args.price_cents,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price_cents: {}", product.price_cents);

    Ok(())
}

async fn create_variant(args: CreateVariantArgs) -> Result<(), String> {
    let service = catalog_service(&args.database_url).await?;

    let variant = service
        .create_variant(NewVariant {
            uuid: VariantUuid::new(),
            product_uuid: ProductUuid::from_uuid(args.product_uuid),
            size: args.size,
            color: args.color,
            price_cents: args.price_cents,
            stock: args.stock,
        })
        .await
        .map_err(|error| format!("failed to create variant: {error}"))?;

    println!("variant_uuid: {}", variant.uuid);
    println!("stock: {}", variant.stock);

    Ok(())
}

async fn show_order(args: ShowOrderArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgOrdersService::new(
        Db::new(pool),
        OrdersConfig::default(),
        Arc::new(DisabledPaymentProvider),
        Arc::new(TracingNotifier),
    );

    let actor = Actor::Admin { name: None };
    let order_uuid = OrderUuid::from_uuid(args.order_uuid);

    let order = service
        .get_order(actor.clone(), order_uuid)
        .await
        .map_err(|error| format!("failed to load order: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!("status: {}", order.status);
    println!("currency: {}", order.currency);
    println!("items_total_cents: {}", order.items_total_cents);
    println!("shipping_cents: {}", order.shipping_cents);
    println!("tax_cents: {}", order.tax_cents);
    println!("total_cents: {}", order.total_cents);
    println!("refunded_total_cents: {}", order.refunded_total_cents());

    for item in &order.items {
        let variant = item.variant_label().unwrap_or_else(|| "-".to_string());

        println!(
            "item: {} ({variant}) qty {} returned {} requested {}",
            item.name_snapshot,
            item.quantity,
            item.quantity_returned,
            item.quantity_return_requested
        );
    }

    let history = service
        .order_history(actor, order_uuid)
        .await
        .map_err(|error| format!("failed to load history: {error}"))?;

    for entry in &history {
        println!(
            "history: {} {} {} {}",
            entry.created_at,
            entry.status,
            entry.actor.as_str(),
            entry.reason.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
