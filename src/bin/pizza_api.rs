//! Contoso Pizza API: serves the pizza calculator over HTTP
//!
//! Usage:
//!   pizza-api
//!
//! ENVIRONMENT:
//!   PIZZA_API_ADDR    Bind address (default 127.0.0.1:8000)
//!   RUST_LOG          Log filter (default pizza_agent=info)

use anyhow::Context;
use pizza_agent::server;
use pizza_agent::telemetry::{init_tracing, DEFAULT_FILTER};
use pizza_agent::{PizzaEstimator, ServerConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(&format!("{DEFAULT_FILTER},tower_http=info"));

    let config = ServerConfig::from_env().context("loading server configuration")?;
    server::serve(config, Arc::new(PizzaEstimator::default())).await?;
    Ok(())
}
