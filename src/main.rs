use std::sync::Arc;

use dioxus_logger::tracing::{self, Level};
use meridian::server::{config::Config, model::app::AppState, router, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: Config) -> Result<(), meridian::server::error::Error> {
    let fetcher = startup::build_section_fetcher(&config)?;
    let session_store = startup::connect_to_session_store(&config).await?;
    let state = AppState::new(fetcher, Arc::new(session_store.clone()));

    let app = router::routes()
        .with_state(state)
        .layer(startup::build_session_layer(session_store));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("Starting server on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
