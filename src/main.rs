use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use conference_site::config::Config;
use conference_site::i18n::{TranslationValidator, Translations};
use conference_site::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("conference_site=info".parse()?),
        )
        .init();

    info!("Starting conference site server");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Load translation tables once; lookups degrade to fallback if a
    // table is missing
    info!("Loading translations from {}", config.locales_dir);
    let translations = Translations::load(&config.locales_dir);

    let report = TranslationValidator::validate(&translations);
    for error in &report.errors {
        warn!("Translation tables: {}", error);
    }
    for warning in &report.warnings {
        warn!("Translation tables: {}", warning);
    }
    if report.is_clean() {
        info!("Translation tables are consistent");
    }

    let port = config.port;
    let state = AppState {
        config: Arc::new(config),
        translations: Arc::new(translations),
    };
    let app = server::build_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
