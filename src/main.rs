//! route-compare
//!
//! Serves the same two endpoints from two routers at once:
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!   :8091  ──────▶│ axum Router                  │
//!                 │   layer: access_log          │
//!                 │   GET /path/                 │
//!                 │   GET /task/{id}/            │
//!                 └──────────────────────────────┘
//!                 ┌──────────────────────────────┐
//!   localhost ───▶│ ServeMux (hyper + matchit)   │
//!   :8090         │   "GET /path/"      logged() │
//!                 │   "GET /task/{id}/" logged() │
//!                 └──────────────────────────────┘
//! ```
//!
//! Both servers run until the process is killed; there is no graceful shutdown.

use route_compare::config::DemoConfig;
use route_compare::lifecycle;
use route_compare::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DemoConfig::default();

    logging::init(&config.observability)?;

    tracing::info!(
        chi = %config.chi.bind_address,
        stdlib = %config.stdlib.bind_address,
        "route-compare v0.1.0 starting"
    );

    let (chi, stdlib) = lifecycle::run(config).await?;

    tracing::warn!(?chi, ?stdlib, "Both servers have exited");
    Ok(())
}
