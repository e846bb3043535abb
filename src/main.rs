use anyhow::Context;
use textfetch::{
    config::Config,
    fetcher::Fetcher,
    server::{self, AppState},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let fetcher = Fetcher::new(&config).context("failed to build HTTP client")?;

    // `textfetch verify` loads config and builds the outbound client,
    // then exits. Used as a startup check by process managers.
    if std::env::args().nth(1).as_deref() == Some("verify") {
        println!("configuration OK, listening would bind {}", config.bind_addr());
        return Ok(());
    }

    let app = server::router(AppState { fetcher });
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    info!(addr = config.bind_addr(), "textfetch listening");
    axum::serve(listener, app).await?;

    Ok(())
}
