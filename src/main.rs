use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, RestConfig, router};

/// Main entry point for the ImplantX server
///
/// Resolves configuration once, then serves the REST API until the process is stopped.
///
/// # Environment Variables
/// - `IMPLANTX_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `IMPLANTX_API_KEY`: API key required on `/assessments` (unset or empty: open)
/// - `RUST_LOG`: tracing filter (default directive: `implantx=info`)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("implantx=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = RestConfig::from_env_values(
        std::env::var("IMPLANTX_REST_ADDR").ok(),
        std::env::var("IMPLANTX_API_KEY").ok(),
    )?;
    let addr = cfg.addr();

    tracing::info!("++ Starting ImplantX REST on {}", addr);
    if cfg.api_key().is_none() {
        tracing::warn!("IMPLANTX_API_KEY is not set; /assessments is open");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(AppState::new(cfg))).await?;

    Ok(())
}
