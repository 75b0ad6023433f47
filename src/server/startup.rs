use tower_sessions::{SessionManagerLayer, SessionStore};
use tower_sessions_redis_store::RedisStore;

use crate::server::{
    config::Config,
    error::Error,
    service::{dashboard::fetcher::SectionFetcher, retry::RetryPolicy},
};

/// Build the section fetcher with the configured retry policy
pub fn build_section_fetcher(config: &Config) -> Result<SectionFetcher, Error> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Error::HttpClientError)?;

    let retry = RetryPolicy::new(
        config.fetch_max_attempts,
        config.fetch_timeout,
        config.fetch_initial_backoff,
    );

    Ok(SectionFetcher::new(client, &config.section_api_url, retry))
}

/// Connect to Valkey/Redis for session storage
pub async fn connect_to_session_store(
    config: &Config,
) -> Result<RedisStore<tower_sessions_redis_store::fred::prelude::Pool>, Error> {
    use tower_sessions_redis_store::fred::prelude::*;

    let config = Config::from_url(&config.valkey_url)?;
    let pool = Pool::new(config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(RedisStore::new(pool))
}

/// Configure session management over the given store
pub fn build_session_layer<S: SessionStore>(session_store: S) -> SessionManagerLayer<S> {
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};

    // Set secure based on build mode: in development (debug) use false, otherwise true.
    let secure_cookies = !cfg!(debug_assertions);

    SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)))
}
