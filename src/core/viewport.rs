use crate::core::config::{MapConfig, PanConfig};
use crate::core::geo::{GeoExtent, GeoPoint, Layer, Scale};
use crate::layers::marker::Marker;
use crate::tiles::{MapImage, StaticMapClient, StaticMapRequest, StaticMapSource};
use crate::transport::{HttpTransport, Transport};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What is currently displayed: center, zoom, imagery layer and markers.
///
/// At most one marker is held at a time; snapshots carrying more are
/// rejected on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawViewportState")]
pub struct ViewportState {
    center: GeoPoint,
    scale: Scale,
    layer: Layer,
    markers: Vec<Marker>,
}

#[derive(Deserialize)]
struct RawViewportState {
    center: GeoPoint,
    scale: Scale,
    layer: Layer,
    #[serde(default)]
    markers: Vec<Marker>,
}

impl TryFrom<RawViewportState> for ViewportState {
    type Error = MapError;

    fn try_from(raw: RawViewportState) -> Result<Self> {
        if raw.markers.len() > 1 {
            return Err(MapError::TooManyMarkers(raw.markers.len()));
        }
        Ok(Self {
            center: raw.center,
            scale: raw.scale,
            layer: raw.layer,
            markers: raw.markers,
        })
    }
}

/// A single requested edit of [`ViewportState`].
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Center { longitude: f64, latitude: f64 },
    /// Move the center by degree offsets.
    Offset { d_lon: f64, d_lat: f64 },
    Scale(i64),
    /// Center and scale together, as entered in a coordinate search.
    View {
        longitude: f64,
        latitude: f64,
        scale: i64,
    },
    ZoomIn,
    ZoomOut,
    Layer(Layer),
    /// Replace all markers with one at the given point.
    Marker { longitude: f64, latitude: f64 },
    ClearMarkers,
}

impl ViewportState {
    pub fn new(center: GeoPoint, scale: Scale, layer: Layer) -> Self {
        Self {
            center,
            scale,
            layer,
            markers: Vec::new(),
        }
    }

    pub fn from_config(config: &MapConfig) -> Result<Self> {
        let (lon, lat) = config.initial_center;
        Ok(Self::new(
            GeoPoint::new(lon, lat)?,
            Scale::new(config.initial_scale as i64)?,
            config.initial_layer,
        ))
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Returns the state with `change` applied, or the first validation error.
    ///
    /// Every value is checked before the new state is assembled, so a
    /// rejected change never leaves a half-updated state behind.
    pub fn apply(&self, change: StateChange) -> Result<Self> {
        let mut next = self.clone();
        match change {
            StateChange::Center {
                longitude,
                latitude,
            } => next.center = GeoPoint::new(longitude, latitude)?,
            StateChange::Offset { d_lon, d_lat } => next.center = self.center.offset(d_lon, d_lat)?,
            StateChange::Scale(scale) => next.scale = Scale::new(scale)?,
            StateChange::View {
                longitude,
                latitude,
                scale,
            } => {
                let center = GeoPoint::new(longitude, latitude)?;
                let scale = Scale::new(scale)?;
                next.center = center;
                next.scale = scale;
            }
            StateChange::ZoomIn => next.scale = self.scale.zoomed_in()?,
            StateChange::ZoomOut => next.scale = self.scale.zoomed_out()?,
            StateChange::Layer(layer) => next.layer = layer,
            StateChange::Marker {
                longitude,
                latitude,
            } => next.markers = vec![Marker::new(longitude, latitude)?],
            StateChange::ClearMarkers => next.markers.clear(),
        }
        Ok(next)
    }

    /// Tile request for this state at the given pixel size.
    pub fn to_request(&self, size: (u32, u32)) -> StaticMapRequest {
        StaticMapRequest::new(
            self.center.longitude(),
            self.center.latitude(),
            self.scale.value() as i64,
            self.layer,
        )
        .with_size(size.0, size.1)
        .with_markers(self.markers.iter().copied())
    }

    pub fn extent(&self) -> GeoExtent {
        GeoExtent::around(&self.center, self.scale)
    }
}

/// Result of the latest reload, ready for the host to display.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Image(MapImage),
    /// Text shown in place of the image when it could not be loaded.
    Placeholder(String),
}

impl Frame {
    pub fn image(&self) -> Option<&MapImage> {
        match self {
            Frame::Image(image) => Some(image),
            Frame::Placeholder(_) => None,
        }
    }
}

/// Owns the viewport state and re-renders it through the tile service.
///
/// Operations that reload return the new [`Frame`]; `set_center`,
/// `set_scale`, `set_view` and `clear_markers` only edit state.
pub struct Viewport {
    state: ViewportState,
    client: StaticMapClient,
    image_size: (u32, u32),
    pan: PanConfig,
    placeholder: String,
    frame: Option<Frame>,
}

impl Viewport {
    pub fn new(config: &MapConfig, client: StaticMapClient) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: ViewportState::from_config(config)?,
            client,
            image_size: config.image_size,
            pan: config.pan,
            placeholder: config.messages.image_unavailable.clone(),
            frame: None,
        })
    }

    /// Viewport talking to `config.tile_url` over `transport`.
    pub fn with_transport(config: &MapConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let client = StaticMapClient::new(StaticMapSource::new(&config.tile_url)?, transport);
        Self::new(config, client)
    }

    /// Viewport over real HTTP, honouring `config.timeout_secs` and
    /// `config.user_agent`.
    pub fn from_config(config: &MapConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(HttpTransport::from_config(config)?))
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Last rendered frame, if any reload has happened yet.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn image_size(&self) -> (u32, u32) {
        self.image_size
    }

    pub fn extent(&self) -> GeoExtent {
        self.state.extent()
    }

    fn update(&mut self, change: StateChange) -> Result<()> {
        self.state = self.state.apply(change)?;
        Ok(())
    }

    pub fn set_center(&mut self, longitude: f64, latitude: f64) -> Result<()> {
        self.update(StateChange::Center {
            longitude,
            latitude,
        })
    }

    pub fn set_scale(&mut self, scale: i64) -> Result<()> {
        self.update(StateChange::Scale(scale))
    }

    /// Replaces center and scale at once; neither changes if either is invalid.
    pub fn set_view(&mut self, longitude: f64, latitude: f64, scale: i64) -> Result<()> {
        self.update(StateChange::View {
            longitude,
            latitude,
            scale,
        })
    }

    /// Shifts the center by fractions of the visible span, then reloads.
    ///
    /// Positive fractions move east and north. The shift is
    /// `fraction * degrees_per_axis * correction_ratio`; a shift that would
    /// leave the valid coordinate range is rejected and nothing moves.
    pub fn pan(&mut self, d_lon_fraction: f64, d_lat_fraction: f64) -> Result<&Frame> {
        let scale = self.state.scale;
        let ratio = self.pan.correction_ratio;
        self.update(StateChange::Offset {
            d_lon: d_lon_fraction * scale.degrees_per_width() * ratio,
            d_lat: d_lat_fraction * scale.degrees_per_height() * ratio,
        })?;
        self.reload()
    }

    /// Default pan step, so hosts can turn a direction into fractions.
    pub fn pan_step(&self) -> f64 {
        self.pan.step
    }

    pub fn zoom_in(&mut self) -> Result<&Frame> {
        self.update(StateChange::ZoomIn)?;
        self.reload()
    }

    pub fn zoom_out(&mut self) -> Result<&Frame> {
        self.update(StateChange::ZoomOut)?;
        self.reload()
    }

    pub fn set_layer(&mut self, layer: Layer) -> Result<&Frame> {
        self.update(StateChange::Layer(layer))?;
        self.reload()
    }

    /// Places the single marker at the given point, then reloads.
    pub fn add_marker(&mut self, longitude: f64, latitude: f64) -> Result<&Frame> {
        self.update(StateChange::Marker {
            longitude,
            latitude,
        })?;
        self.reload()
    }

    /// Removes all markers. Does not reload.
    pub fn clear_markers(&mut self) {
        self.state.markers.clear();
    }

    /// Fetches an image for the current state.
    ///
    /// A failed download becomes a [`Frame::Placeholder`]; only validation
    /// errors are returned as `Err`.
    pub fn reload(&mut self) -> Result<&Frame> {
        let request = self.state.to_request(self.image_size);
        let frame = match self.client.fetch(&request) {
            Ok(image) => Frame::Image(image),
            Err(MapError::InvalidRemoteResponse { url }) => {
                log::warn!("showing placeholder, tile request failed: {}", url);
                Frame::Placeholder(self.placeholder.clone())
            }
            Err(e) => return Err(e),
        };
        Ok(&*self.frame.insert(frame))
    }
}
