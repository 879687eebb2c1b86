use crate::core::constants::{DEFAULT_IMAGE_SIZE, MARKER_SEPARATOR};
use crate::core::geo::{validate_latitude, validate_longitude, validate_scale, Layer};
use crate::layers::marker::Marker;
use crate::{MapError, Result};
use reqwest::Url;

/// Everything the tile service needs to render one image.
///
/// Scalars are kept raw so the request can be assembled from any source;
/// [`StaticMapRequest::query`] re-checks them before anything goes on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMapRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub scale: i64,
    pub size: (u32, u32),
    pub layer: Layer,
    pub markers: Vec<Marker>,
}

impl StaticMapRequest {
    pub fn new(longitude: f64, latitude: f64, scale: i64, layer: Layer) -> Self {
        Self {
            longitude,
            latitude,
            scale,
            size: DEFAULT_IMAGE_SIZE,
            layer,
            markers: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_markers(mut self, markers: impl IntoIterator<Item = Marker>) -> Self {
        self.markers = markers.into_iter().collect();
        self
    }

    /// Validated query pairs in wire order. `pt` is left out when there are no markers.
    pub fn query(&self) -> Result<Vec<(&'static str, String)>> {
        let lon = validate_longitude(self.longitude)?;
        let lat = validate_latitude(self.latitude)?;
        let z = validate_scale(self.scale)?;

        let mut params = vec![
            ("ll", format!("{},{}", lon, lat)),
            ("z", z.to_string()),
            ("size", format!("{},{}", self.size.0, self.size.1)),
            ("l", self.layer.as_wire().to_string()),
        ];

        if !self.markers.is_empty() {
            let pt = self
                .markers
                .iter()
                .map(Marker::to_wire_string)
                .collect::<Vec<_>>()
                .join(&MARKER_SEPARATOR.to_string());
            params.push(("pt", pt));
        }

        Ok(params)
    }
}

/// Trait representing anything that can turn a render request into a URL.
pub trait MapSource: Send + Sync {
    fn url(&self, request: &StaticMapRequest) -> Result<Url>;
}

/// Fixed-endpoint static map service.
#[derive(Debug, Clone)]
pub struct StaticMapSource {
    endpoint: Url,
}

impl StaticMapSource {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| MapError::Config(format!("tile endpoint {:?}: {}", endpoint, e)))?;
        Ok(Self { endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl MapSource for StaticMapSource {
    fn url(&self, request: &StaticMapRequest) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(request.query()?);
        Ok(url)
    }
}
