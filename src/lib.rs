//! # mapview
//!
//! Core of a pan-zoom-search map viewer backed by a static map service and a
//! geocoder.
//!
//! A host owns the event loop and forwards discrete [`Intent`]s to an
//! [`IntentHandler`]; the core keeps the validated [`Viewport`] state, asks
//! the tile service for a fresh image on every change, and hands back either
//! the image or a status line to display.

pub mod core;
pub mod geocoding;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod tiles;
pub mod transport;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{MapConfig, PanConfig, StatusMessages},
    geo::{GeoExtent, GeoPoint, Layer, Scale},
    viewport::{Frame, StateChange, Viewport, ViewportState},
};

pub use geocoding::{GeocodeResult, GeocoderClient};

pub use input::{
    events::{Intent, PanDirection},
    handler::{HostUpdate, IntentHandler},
    search::{SearchDispatcher, SearchOutcome, SearchQuery},
};

pub use layers::marker::{Marker, MarkerStyle};

pub use tiles::{MapImage, StaticMapClient, StaticMapRequest};

pub use transport::{HttpResponse, HttpTransport, Transport, TransportError};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("scale {0} is outside [0, 21]")]
    ScaleOutOfRange(i64),

    #[error("unknown layer {0:?}")]
    InvalidLayer(String),

    #[error("at most one marker is allowed, got {0}")]
    TooManyMarkers(usize),

    #[error("tile service returned an unusable response for {url}")]
    InvalidRemoteResponse { url: String },

    #[error("geocoder request {url} failed: {reason}")]
    GeocodeRequestFailed { url: String, reason: String },

    #[error("nothing found for {query:?}")]
    NoGeocodeResult { query: String },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),
}

impl MapError {
    /// Input rejected by a bounds check; always attributable to one value.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MapError::LongitudeOutOfRange(_)
                | MapError::LatitudeOutOfRange(_)
                | MapError::ScaleOutOfRange(_)
                | MapError::InvalidLayer(_)
        )
    }

    /// The expected empty geocoder answer, not a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapError::NoGeocodeResult { .. })
    }
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` once; later calls are no-ops.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
