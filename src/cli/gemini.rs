use std::time::Duration;

use clap::Parser;

use crate::{api::gemini, prelude::*};

#[derive(Parser)]
pub struct GeminiArgs {
    #[clap(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[clap(long = "gemini-model", env = "GEMINI_MODEL", default_value = gemini::DEFAULT_MODEL)]
    model: String,

    #[clap(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = gemini::DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds. Requests wait for the reply when unset.
    #[clap(long = "gemini-timeout-secs", env = "GEMINI_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

impl GeminiArgs {
    pub fn new_client(&self) -> Result<gemini::Api> {
        let api_key = self.api_key.as_deref().context("Gemini API key is not set")?;
        gemini::Api::builder()
            .api_key(api_key)
            .model(&self.model)
            .base_url(&self.base_url)
            .maybe_timeout(self.timeout_secs.map(Duration::from_secs))
            .build()
    }
}
