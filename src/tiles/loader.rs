use super::image::MapImage;
use super::source::{MapSource, StaticMapRequest, StaticMapSource};
use crate::transport::{HttpTransport, Transport};
use crate::{MapError, Result};
use std::sync::Arc;

/// Fetches and decodes one static map image per request.
///
/// Any non-success status, transport failure or undecodable body is reported
/// as [`MapError::InvalidRemoteResponse`] carrying the request URL.
pub struct StaticMapClient {
    source: Box<dyn MapSource>,
    transport: Arc<dyn Transport>,
}

impl StaticMapClient {
    pub fn new(source: impl MapSource + 'static, transport: Arc<dyn Transport>) -> Self {
        Self {
            source: Box::new(source),
            transport,
        }
    }

    /// Client for `endpoint` over the shared HTTP client.
    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        Ok(Self::new(
            StaticMapSource::new(endpoint)?,
            Arc::new(HttpTransport::new()),
        ))
    }

    pub fn fetch(&self, request: &StaticMapRequest) -> Result<MapImage> {
        let url = self.source.url(request)?;
        let invalid = || MapError::InvalidRemoteResponse {
            url: url.to_string(),
        };

        let resp = self.transport.get(&url).map_err(|e| {
            log::warn!("static map request {} failed: {}", url, e);
            invalid()
        })?;

        if !resp.is_success() {
            log::warn!("static map request {} returned HTTP {}", url, resp.status);
            return Err(invalid());
        }

        let image = MapImage::decode(&resp.body).map_err(|e| {
            log::warn!("static map body from {} is not an image: {}", url, e);
            invalid()
        })?;

        log::info!(
            "loaded map image {}x{} ({} bytes)",
            image.width(),
            image.height(),
            resp.body.len()
        );
        Ok(image)
    }
}
