//! Meraki voice skill: HTTP server answering skill requests.
//!
//! Wires the Dashboard REST client and the SNMP poller into the intent
//! router and serves it over Axum.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ms_dashboard::DashboardClient;
use ms_skill::config::SkillConfig;
use ms_skill::router::IntentRouter;
use ms_skill::routes::build_router;
use ms_skill::state::AppState;
use ms_snmp::UdpSnmpClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ms-skill starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/etc/meraki-skill/skill.toml".to_string());

    let config = SkillConfig::from_file(&config_path)?;
    tracing::info!(
        org_id = %config.dashboard.org_id,
        network_id = %config.dashboard.network_id,
        snmp_host = %config.snmp.host,
        "config loaded"
    );
    if config.dashboard.api_key.is_empty() {
        tracing::warn!("dashboard API key not set, Dashboard calls will be rejected");
    }
    if config.dashboard.template_payload().is_none() {
        tracing::warn!("dashboard.template_payload not set, CloseShop will bind without a body");
    }

    // ── Collaborators ───────────────────────────────────────────
    let dashboard = DashboardClient::new(config.dashboard.clone())?;
    let snmp = UdpSnmpClient::new(Duration::from_secs(config.snmp.timeout_secs));

    let router = IntentRouter::new(Arc::new(dashboard), Arc::new(snmp), config.snmp.target())
        .with_application_id(config.application_id.clone());
    if config.application_id.is_none() {
        tracing::warn!("application_id not set, accepting requests for any skill");
    }

    // ── Serve ───────────────────────────────────────────────────
    let app = build_router(AppState::new(router));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
