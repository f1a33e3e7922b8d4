//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::config::AppConfig;
use crate::rates::ExchangeRateService;
use crate::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub upstream: UpstreamClient,
    pub rates: ExchangeRateService,
}

impl AppState {
    /// Build the upstream and rate-provider clients from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream base URL does not parse or an HTTP
    /// client cannot be built.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(&config.upstream.base_url)
            .with_context(|| format!("invalid ADMIN_API_BASE_URL '{}'", config.upstream.base_url))?;
        let rates = ExchangeRateService::new(
            config.rates.provider_url.clone(),
            config.rates.api_key.clone(),
            Duration::from_secs(config.rates.cache_ttl_secs),
        )
        .context("failed to build exchange rate client")?;

        Ok(Self {
            config: Arc::new(config),
            upstream,
            rates,
        })
    }
}
