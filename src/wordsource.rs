//  _  __           ____            __ _
// | |/ /___ _   _ / ___|_ __ __ _ / _| |_
// | ' // _ \ | | | |   | '__/ _` | |_| __|
// | . \  __/ |_| | |___| | | (_| |  _| |_
// |_|\_\___|\__, |\____|_|  \__,_|_|  \__|
//           |___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2026-10-19
// Version : 0.1.0
// License : Mulan PSL v2
//
// Synonym lookup for passphrase words

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::configtool::Config;
use crate::passgen::UniformRandom;

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Word service returned status {0}")]
    Status(u16),

    #[error("Malformed word service response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("No API key configured for the word service")]
    MissingApiKey,

    #[error("Invalid word service endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

/// Something that can suggest synonyms for a seed word.
pub trait WordSource {
    /// Fetches the synonym list for `seed`. An empty list is a valid answer.
    fn synonyms(
        &self,
        seed: &str,
    ) -> impl Future<Output = Result<Vec<String>, WordSourceError>> + Send;
}

/// Resolves one passphrase word: a random non-blank synonym of `seed`, or
/// `seed` itself when the list is empty or the source fails. Errors stop
/// here.
pub async fn lookup<W, R>(source: &W, seed: &str, rng: &mut R) -> String
where
    W: WordSource,
    R: UniformRandom + ?Sized,
{
    match source.synonyms(seed).await {
        Ok(synonyms) => {
            let candidates: Vec<&String> = synonyms
                .iter()
                .filter(|s| !s.trim().is_empty())
                .collect();
            if candidates.is_empty() {
                log::debug!("No synonyms for '{}', using seed word", seed);
                return seed.to_string();
            }
            candidates[rng.next_below(candidates.len())].to_string()
        }
        Err(e) => {
            log::warn!("Word lookup for '{}' failed, using seed word: {}", seed, e);
            seed.to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
struct SynonymsResponse {
    #[serde(default)]
    synonyms: Vec<String>,
}

/// Client for the WordsAPI synonym endpoint.
#[derive(Debug, Clone)]
pub struct WordsApi {
    client: reqwest::Client,
    endpoint: Url,
    headers: HeaderMap,
}

impl WordsApi {
    /// `timeout` of `None` leaves the HTTP stack default in place.
    pub fn new(
        endpoint: &str,
        api_host: &str,
        api_key: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, WordSourceError> {
        if api_key.trim().is_empty() {
            return Err(WordSourceError::MissingApiKey);
        }
        let endpoint = Url::parse(endpoint)
            .map_err(|e| WordSourceError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(WordSourceError::InvalidEndpoint(endpoint.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-rapidapi-key",
            HeaderValue::from_str(api_key).map_err(|e| WordSourceError::InvalidHeader(e.to_string()))?,
        );
        headers.insert(
            "x-rapidapi-host",
            HeaderValue::from_str(api_host).map_err(|e| WordSourceError::InvalidHeader(e.to_string()))?,
        );

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, endpoint, headers })
    }

    pub fn from_config(config: &Config) -> Result<Self, WordSourceError> {
        let api_key = config.api_key.as_deref().ok_or(WordSourceError::MissingApiKey)?;
        let timeout = match config.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Self::new(&config.words_endpoint, &config.api_host, api_key, timeout)
    }

    fn synonyms_url(&self, seed: &str) -> Result<Url, WordSourceError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| WordSourceError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(["words", seed, "synonyms"]);
        Ok(url)
    }
}

impl WordSource for WordsApi {
    async fn synonyms(&self, seed: &str) -> Result<Vec<String>, WordSourceError> {
        let url = self.synonyms_url(seed)?;
        let resp = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WordSourceError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        let parsed: SynonymsResponse = serde_json::from_str(&body)?;
        Ok(parsed.synonyms)
    }
}

/// Never reaches out; every word falls back to its seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineWords;

impl WordSource for OfflineWords {
    async fn synonyms(&self, _seed: &str) -> Result<Vec<String>, WordSourceError> {
        Ok(Vec::new())
    }
}

/// The word source picked at startup.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Remote(WordsApi),
    Offline(OfflineWords),
}

impl ConfiguredSource {
    /// Uses the remote service when a key is configured, otherwise warns and
    /// goes offline.
    pub fn from_config(config: &Config, offline: bool) -> Self {
        if offline {
            return ConfiguredSource::Offline(OfflineWords);
        }
        match WordsApi::from_config(config) {
            Ok(api) => ConfiguredSource::Remote(api),
            Err(e) => {
                log::warn!("Word service unavailable ({}); passphrases will use seed words only", e);
                ConfiguredSource::Offline(OfflineWords)
            }
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, ConfiguredSource::Offline(_))
    }
}

impl WordSource for ConfiguredSource {
    async fn synonyms(&self, seed: &str) -> Result<Vec<String>, WordSourceError> {
        match self {
            ConfiguredSource::Remote(api) => api.synonyms(seed).await,
            ConfiguredSource::Offline(offline) => offline.synonyms(seed).await,
        }
    }
}
