//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        notifications::Notifier,
        orders::{OrdersService, PgOrdersService, service::OrdersConfig},
        payments::PaymentProvider,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        config: OrdersConfig,
        payments: Arc<dyn PaymentProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db, config, payments, notifier)),
        })
    }
}
