use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Present only when a provider credential is configured. `None` (or
    /// `config.use_mock_ai`) routes every request to the deterministic
    /// fallback generator.
    pub provider: Option<GeminiClient>,
    pub config: Config,
}
