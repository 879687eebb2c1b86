//! Prelude module for common mapview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapview::prelude::*;`

pub use crate::core::{
    config::{MapConfig, PanConfig, StatusMessages},
    geo::{
        validate_latitude, validate_layer, validate_longitude, validate_scale, GeoExtent,
        GeoPoint, Layer, Scale,
    },
    viewport::{Frame, StateChange, Viewport, ViewportState},
};

pub use crate::layers::marker::{Marker, MarkerStyle};

pub use crate::tiles::{MapImage, MapSource, StaticMapClient, StaticMapRequest, StaticMapSource};

pub use crate::geocoding::{GeocodeResult, GeocoderClient};

pub use crate::input::{
    events::{Intent, PanDirection},
    handler::{HostUpdate, IntentHandler},
    search::{SearchDispatcher, SearchOutcome, SearchQuery},
};

pub use crate::transport::{HttpResponse, HttpTransport, Transport, TransportError};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;
