//! # statehubd: the statehub daemon
//!
//! Composition root that wires the hub together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`statehub.toml` plus env overrides)
//! - Initialise tracing
//! - Create the hub context (local event bus and state store)
//! - Build the axum router over that context
//! - Bind to a TCP port, announce `hub_start` and serve
//! - Publish this instance's presence to an upstream hub when configured
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use statehub_adapter_http_axum::router;
use statehub_adapter_http_axum::state::AppState;
use statehub_adapter_remote::{Bridge, bridge};
use statehub_app::context::HubContext;
use statehub_app::ports::{EventBus, StateStore};
use statehub_domain::event::{EVENT_HUB_START, EventData};
use statehub_domain::state::{AttributeValue, Attributes};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, RemoteConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let ctx = HubContext::new();
    let app = router::build(AppState::from_context(&ctx, &*config.auth.api_password));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "statehubd listening");

    ctx.bus.fire(EVENT_HUB_START, EventData::new()).await?;

    let upstream = match &config.remote {
        Some(remote) => announce(remote, "online").await,
        None => None,
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let (Some(remote), Some(upstream)) = (&config.remote, upstream) {
        publish_presence(&upstream, remote, "offline").await;
    }

    tracing::info!("statehubd stopped");
    Ok(())
}

/// Connect to the upstream hub and publish this instance's presence.
///
/// An unreachable upstream is logged, never fatal.
async fn announce(remote: &RemoteConfig, presence: &str) -> Option<Bridge> {
    match bridge(&remote.host, remote.api_password.as_str()) {
        Ok(upstream) => {
            publish_presence(&upstream, remote, presence).await;
            Some(upstream)
        }
        Err(err) => {
            tracing::warn!(host = %remote.host, error = %err, "invalid upstream hub address");
            None
        }
    }
}

async fn publish_presence(upstream: &Bridge, remote: &RemoteConfig, presence: &str) {
    let category = format!("statehub.{}", remote.instance);
    let attributes = Attributes::from([(
        "version".to_string(),
        AttributeValue::from(env!("CARGO_PKG_VERSION")),
    )]);
    match upstream.set_state(&category, presence, attributes).await {
        Ok(_) => tracing::info!(host = %remote.host, category = %category, presence, "presence published"),
        Err(err) => {
            tracing::warn!(host = %remote.host, category = %category, error = %err, "upstream hub unreachable");
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
