use tracing_subscriber::EnvFilter;

use navalha::api::{self, types::generate_token, ApiContext};
use navalha::config::{self, BusinessHours};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let data_dir = config::app_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let admin_token = match std::env::var(config::ADMIN_TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => token,
        _ => {
            let token = generate_token();
            tracing::warn!(
                "{} not set; generated admin token for this run: {token}",
                config::ADMIN_TOKEN_ENV
            );
            token
        }
    };

    let db_path = config::database_path();
    tracing::info!(path = %db_path.display(), "opening database");
    let ctx = ApiContext::open(&db_path, BusinessHours::default(), &admin_token)?;

    let mut server = api::start_server(ctx, config::bind_addr()).await?;
    tracing::info!(addr = %server.addr, "listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown();

    Ok(())
}
