use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use tracing_subscriber::EnvFilter;

use orderdesk::config::StoreBackend;
use orderdesk::services::{MemoryOrderStore, MySqlOrderStore, OrderStore};
use orderdesk::{config, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = config::load();

    let store: Arc<dyn OrderStore> = match settings.store_backend {
        // Pool is created once; connections are opened on demand per request.
        StoreBackend::MySql => Arc::new(
            MySqlOrderStore::connect_lazy(&settings).context("invalid DATABASE_URL")?,
        ),
        StoreBackend::Memory => {
            tracing::warn!("using in-memory order store; orders are lost on restart");
            Arc::new(MemoryOrderStore::new())
        }
    };

    let state = AppState::new(store, settings.clone());
    let app = routes::app(state);

    let tls = RustlsConfig::from_pem_file(&settings.tls_cert_path, &settings.tls_key_path)
        .await
        .with_context(|| {
            format!(
                "loading TLS cert {} / key {}",
                settings.tls_cert_path, settings.tls_key_path
            )
        })?;

    let ip = settings
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("invalid HOST {}", settings.host))?;
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on https://{}", addr);

    axum_server::bind_rustls(addr, tls)
        .serve(app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
