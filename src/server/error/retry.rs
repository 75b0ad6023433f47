use super::{fetch::FetchError, Error};

/// Strategy for handling errors in a retry context
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (rate limiting, server errors, timeouts)
    Retry,
    /// Failed permanently (bad request, inline upstream error, empty content)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::FetchError(err) => err.to_retry_strategy(),

            // Session errors - transient, could be Redis connection issues
            Self::SessionError(_) => ErrorRetryStrategy::Retry,
            Self::SessionStoreError(_) => ErrorRetryStrategy::Retry,
            Self::SessionRedisError(_) => ErrorRetryStrategy::Retry,

            // Configuration, request validation and setup errors won't resolve with retry
            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::AuthError(_) => ErrorRetryStrategy::Fail,
            Self::DashboardError(_) => ErrorRetryStrategy::Fail,
            Self::HttpClientError(_) => ErrorRetryStrategy::Fail,
            Self::IoError(_) => ErrorRetryStrategy::Fail,
            Self::CacheEncodeError(_) => ErrorRetryStrategy::Fail,
        }
    }
}

impl FetchError {
    /// Classify a section fetch failure as transient or permanent
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::Status(status) => match status {
                // 429 - Too Many Requests
                //
                // Upstream AI pipelines are rate limited, backoff and retry
                s if s.as_u16() == 429 => ErrorRetryStrategy::Retry,

                // 500 - Server Error
                //
                // Upstream is temporarily unavailable or busy generating
                s if s.is_server_error() => ErrorRetryStrategy::Retry,

                // Any other 4xx or unexpected status is a flaw in the request
                _ => ErrorRetryStrategy::Fail,
            },

            Self::Timeout(_) => ErrorRetryStrategy::Retry,

            // Network error or connection issue - should retry
            Self::Transport(_) => ErrorRetryStrategy::Retry,

            // Upstream explicitly said it could not produce the section
            Self::Upstream { .. } => ErrorRetryStrategy::Fail,
            Self::EmptyPayload(_) => ErrorRetryStrategy::Fail,
            Self::Decode { .. } => ErrorRetryStrategy::Fail,
        }
    }
}
