//! Blocking HTTP seam shared by the static-map and geocoder clients.

use crate::core::config::MapConfig;
use crate::core::constants::USER_AGENT;
use crate::{MapError, Result};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;

/// Shared blocking HTTP client with a custom User-Agent so that public map
/// services don't reject the request. Building the client once avoids the
/// cost of TLS and connection pool setup for every reload.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default reqwest client: {}", e);
            Client::new()
        })
});

/// Failure below the HTTP status line: DNS, connect, TLS, body read.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can perform a blocking GET.
///
/// Non-success statuses are returned as responses, not errors; callers
/// decide what a 4xx/5xx means for them.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> std::result::Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    user_agent: String,
}

impl HttpTransport {
    /// Uses the process-wide client with the transport's default timeout.
    pub fn new() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Builds a dedicated client sending `user_agent`, giving up after
    /// `timeout` when one is set.
    pub fn with_options(
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> std::result::Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            user_agent: user_agent.to_string(),
        })
    }

    /// Transport for the user agent and timeout in `config`. Falls back to the
    /// shared client when both are left at their defaults.
    pub fn from_config(config: &MapConfig) -> Result<Self> {
        if config.timeout_secs.is_none() && config.user_agent == USER_AGENT {
            return Ok(Self::new());
        }
        Self::with_options(
            &config.user_agent,
            config.timeout_secs.map(Duration::from_secs),
        )
        .map_err(|e| MapError::Config(format!("http client: {}", e)))
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> std::result::Result<HttpResponse, TransportError> {
        log::debug!("GET {}", url);
        let resp = self.client.get(url.clone()).send()?;
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
