use std::env;

use crate::errors::ApiError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the booking backend, without a trailing slash.
    pub api_url: String,
    /// Operator bearer token attached to every request.
    pub admin_token: String,
}

impl AppConfig {
    /// Both values are required; a missing one is a fatal configuration
    /// error, not something to retry around.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_url = env::var("CAMPSITE_API_URL")
            .map_err(|_| ApiError::Config("CAMPSITE_API_URL must be set".to_string()))?;
        let admin_token = env::var("CAMPSITE_ADMIN_TOKEN")
            .map_err(|_| ApiError::Config("CAMPSITE_ADMIN_TOKEN must be set".to_string()))?;

        if admin_token.trim().is_empty() {
            return Err(ApiError::Config(
                "CAMPSITE_ADMIN_TOKEN must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            admin_token,
        })
    }
}
