// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Signed, retrying HTTP transport for the Marvel API
//!
//! Every attempt is signed afresh, transient failures (connection errors,
//! per-attempt timeouts, 5xx answers) are retried with exponential backoff,
//! and the whole exchange, retries included, is bounded by the configured
//! deadline.

use std::{
    convert,
    time::{Duration, Instant},
};

use reqwest::{Client, StatusCode, header::ACCEPT};
use tokio::time::timeout;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::{config::ProviderConfig, envelope::RawEnvelope, error::MarvelError, signer::Signer};

/// Upper bound for a single backoff delay
const MAX_BACKOFF_SECONDS: u64 = 30;

const USER_AGENT: &str = concat!("character-catalog/", env!("CARGO_PKG_VERSION"));

/// Delays between attempts: `initial, 2 * initial, 4 * initial, ...`, capped
///
/// Yields exactly `max_retries` delays, so a call makes at most
/// `max_retries + 1` attempts. Delays are rounded down to whole even
/// milliseconds.
pub fn backoff_schedule(initial: Duration, max_retries: u32) -> impl Iterator<Item = Duration> {
    let initial_millis = u64::try_from(initial.as_millis())
        .unwrap_or(u64::MAX)
        .max(2);

    ExponentialBackoff::from_millis(2)
        .factor(initial_millis / 2)
        .max_delay(Duration::from_secs(MAX_BACKOFF_SECONDS))
        .take(usize::try_from(max_retries).unwrap_or(usize::MAX))
}

/// HTTP transport that signs, retries and times out provider requests
#[derive(Debug, Clone)]
pub struct ResilientTransport {
    client: Client,
    base_url: Url,
    signer: Signer,
    timeout: Duration,
    max_retries: u32,
    initial_backoff: Duration,
}

impl ResilientTransport {
    /// Create a new transport
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute, the deadline is zero,
    /// or the HTTP client cannot be created
    pub fn new(config: &ProviderConfig, signer: Signer) -> Result<Self, MarvelError> {
        if config.base_url.trim().is_empty() {
            return Err(MarvelError::Config("Base URL cannot be empty".to_string()));
        }

        if config.timeout_millis == 0 {
            return Err(MarvelError::Config(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        let mut base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            MarvelError::Config(format!("Invalid base URL `{}`: {e}", config.base_url))
        })?;

        // Url::join replaces the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(MarvelError::Http)?;

        Ok(Self {
            client,
            base_url,
            signer,
            timeout: config.timeout(),
            max_retries: config.max_retries,
            initial_backoff: config.initial_backoff(),
        })
    }

    /// Base URL all paths are resolved against, always ending with `/`
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch `path` with retries, bounded by the configured deadline
    ///
    /// # Errors
    ///
    /// Returns [`MarvelError::NotFound`] on a 404, [`MarvelError::Timeout`] when
    /// the deadline elapses, and the last attempt's error once retries are
    /// exhausted or a non-retryable failure occurs
    #[instrument(skip(self, params), fields(base_url = %self.base_url))]
    pub async fn fetch(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<RawEnvelope, MarvelError> {
        let url = self.resolve(path)?;
        let started = Instant::now();

        let this = self;
        let url_ref = &url;
        let mut attempt = 0_u32;
        // Only retryable failures surface as `Err` to the retry loop; everything
        // else settles the call on the first attempt that produces it
        let retry = async move {
            Retry::spawn(
                backoff_schedule(self.initial_backoff, self.max_retries),
                move || {
                    attempt += 1;
                    let pending = this.attempt(url_ref, params, attempt);
                    async move {
                        match pending.await {
                            Err(e) if e.is_retryable() => Err(e),
                            settled => Ok(settled),
                        }
                    }
                },
            )
            .await
            .and_then(convert::identity)
        };

        match timeout(self.timeout, retry).await {
            Ok(Ok(envelope)) => {
                debug!(
                    elapsed_ms = started.elapsed().as_millis(),
                    "provider request succeeded"
                );
                Ok(envelope)
            }
            Ok(Err(e)) => {
                if !matches!(e, MarvelError::NotFound) {
                    error!(error = %e, "provider request failed");
                }
                Err(e)
            }
            Err(_) => {
                let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                error!(timeout_ms = millis, "provider request deadline elapsed");
                Err(MarvelError::Timeout { millis })
            }
        }
    }

    /// Fetch `path` exactly once, bounded by the configured deadline
    ///
    /// Used for health checks, which must not sit through a backoff schedule.
    ///
    /// # Errors
    ///
    /// Same as [`ResilientTransport::fetch`], without retries
    pub async fn fetch_once(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<RawEnvelope, MarvelError> {
        let url = self.resolve(path)?;
        timeout(self.timeout, self.attempt(&url, params, 1))
            .await
            .map_err(|_| MarvelError::Timeout {
                millis: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })?
    }

    fn resolve(&self, path: &str) -> Result<Url, MarvelError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| MarvelError::Config(format!("Invalid request path `{path}`: {e}")))
    }

    async fn attempt(
        &self,
        url: &Url,
        params: &[(&str, String)],
        attempt: u32,
    ) -> Result<RawEnvelope, MarvelError> {
        let signed = self.signer.sign();

        debug!(attempt, url = %url, "sending provider request");

        let response = self
            .client
            .get(url.clone())
            .query(&[
                ("ts", signed.timestamp.as_str()),
                ("apikey", self.signer.public_key()),
                ("hash", signed.auth_token.as_str()),
            ])
            .query(params)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .inspect_err(|e| warn!(attempt, error = %e, "provider request attempt failed"))?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| {
                    error!(attempt, error = %e, "provider returned undecodable body");
                    MarvelError::Json(e)
                })
            }
            StatusCode::NOT_FOUND => {
                debug!(attempt, url = %url, "provider returned 404");
                Err(MarvelError::NotFound)
            }
            status => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());

                if status.is_server_error() {
                    warn!(
                        attempt,
                        status = status.as_u16(),
                        "provider returned server error, will retry if attempts remain"
                    );
                } else {
                    info!(
                        attempt,
                        status = status.as_u16(),
                        "provider rejected request"
                    );
                }

                Err(MarvelError::ProviderHttp {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
