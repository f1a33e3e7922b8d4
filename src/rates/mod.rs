//! Exchange-rate provider client with a per-base cache.
//!
//! Rates are display-only. A table is reused for the configured lifetime
//! (one hour by default) before the provider is asked again.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use tokio::sync::RwLock;
use url::Url;

use crate::models::ExchangeRateTable;

#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("rate provider answered {0}")]
    Provider(StatusCode),

    #[error("rate provider unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("rate provider payload was not understood: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid rate provider url: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone)]
struct CachedTable {
    fetched_at: Instant,
    table: ExchangeRateTable,
}

#[derive(Debug, Clone)]
pub struct ExchangeRateService {
    http: reqwest::Client,
    provider_url: String,
    api_key: String,
    ttl: Duration,
    cache: Arc<RwLock<HashMap<String, CachedTable>>>,
}

impl ExchangeRateService {
    pub fn new(provider_url: impl Into<String>, api_key: impl Into<String>, ttl: Duration) -> Result<Self, RateError> {
        let http = reqwest::Client::builder().build().map_err(RateError::Transport)?;
        Ok(Self {
            http,
            provider_url: provider_url.into(),
            api_key: api_key.into(),
            ttl,
            cache: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Rates for `base`, from cache when fresh.
    pub async fn latest(&self, base: &str) -> Result<ExchangeRateTable, RateError> {
        if let Some(cached) = self.cache.read().await.get(base) {
            if cached.fetched_at.elapsed() < self.ttl {
                tracing::debug!(base, "exchange rates served from cache");
                return Ok(cached.table.clone());
            }
        }

        let table = self.fetch(base).await?;
        self.cache.write().await.insert(
            base.to_string(),
            CachedTable {
                fetched_at: Instant::now(),
                table: table.clone(),
            },
        );
        Ok(table)
    }

    async fn fetch(&self, base: &str) -> Result<ExchangeRateTable, RateError> {
        let mut url = Url::parse(&self.provider_url)?;
        url.path_segments_mut()
            .map_err(|_| RateError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(base);
        url.query_pairs_mut().append_pair("apikey", &self.api_key);

        tracing::info!(base, "refreshing exchange rates");
        let res = self.http.get(url).send().await.map_err(RateError::Transport)?;

        if !res.status().is_success() {
            return Err(RateError::Provider(res.status()));
        }

        res.json::<ExchangeRateTable>().await.map_err(RateError::Decode)
    }
}
