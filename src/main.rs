//! OpenSASE Admin - headless run of the order panel against the configured backend

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opensase_admin::backend::{Backend, HttpBackend, InMemoryBackend};
use opensase_admin::config::{BackendKind, PanelConfig};
use opensase_admin::workflow::{OrderListController, OrderWizard};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PanelConfig::from_env()?;
    let backend: Box<dyn Backend> = match config.backend {
        BackendKind::Http => Box::new(HttpBackend::new(config.api_url.clone())?),
        BackendKind::Memory => Box::new(InMemoryBackend::new()),
    };
    tracing::info!(api = %config.api_url, backend = ?config.backend, "OpenSASE admin panel starting");

    let mut orders = OrderListController::new();
    orders.refresh(backend.as_ref()).await;
    for row in orders.rows() {
        tracing::info!(
            order_id = %row.id,
            status = %String::from(row.status),
            created_on = %row.created_on,
            items = row.item_count,
            "order"
        );
    }

    let mut wizard = OrderWizard::new();
    wizard.open(backend.as_ref()).await;
    for event in wizard.take_events() {
        tracing::info!(?event, "wizard");
    }
    wizard.close();

    Ok(())
}
