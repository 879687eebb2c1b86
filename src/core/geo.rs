use crate::core::constants::{
    DEGREES_PER_HEIGHT_AT_ZERO, DEGREES_PER_WIDTH_AT_ZERO, MAX_SCALE, MIN_SCALE,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Checks that a longitude lies in [-180, 180] and hands it back unchanged.
pub fn validate_longitude(value: f64) -> Result<f64> {
    if (-180.0..=180.0).contains(&value) {
        Ok(value)
    } else {
        Err(MapError::LongitudeOutOfRange(value))
    }
}

/// Checks that a latitude lies in [-90, 90] and hands it back unchanged.
pub fn validate_latitude(value: f64) -> Result<f64> {
    if (-90.0..=90.0).contains(&value) {
        Ok(value)
    } else {
        Err(MapError::LatitudeOutOfRange(value))
    }
}

/// Checks that a zoom level lies in [0, 21].
pub fn validate_scale(value: i64) -> Result<u8> {
    if (MIN_SCALE as i64..=MAX_SCALE as i64).contains(&value) {
        Ok(value as u8)
    } else {
        Err(MapError::ScaleOutOfRange(value))
    }
}

/// Resolves a layer wire code (`map`, `sat`, `sat,skl`).
pub fn validate_layer(code: &str) -> Result<Layer> {
    Layer::from_wire(code)
}

/// A geographic coordinate that is known to be in range.
///
/// Fields are private: the only ways to obtain one are [`GeoPoint::new`]
/// and deserialization, and both run the bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    longitude: f64,
    latitude: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = MapError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        GeoPoint::new(raw.longitude, raw.latitude)
    }
}

impl GeoPoint {
    /// Creates a point, longitude first as the services expect.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        Ok(Self {
            longitude: validate_longitude(longitude)?,
            latitude: validate_latitude(latitude)?,
        })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the point moved by the given degree offsets, if still in range.
    pub fn offset(&self, d_lon: f64, d_lat: f64) -> Result<Self> {
        Self::new(self.longitude + d_lon, self.latitude + d_lat)
    }

    /// Renders `"lon,lat"` as used by the `ll` parameter.
    pub fn to_wire_string(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.longitude, self.latitude)
    }
}

/// Integer zoom level in [0, 21].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Scale(u8);

impl Scale {
    pub const MIN: Scale = Scale(MIN_SCALE);
    pub const MAX: Scale = Scale(MAX_SCALE);

    pub fn new(value: i64) -> Result<Self> {
        validate_scale(value).map(Scale)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// One level closer; rejected past [`Scale::MAX`].
    pub fn zoomed_in(&self) -> Result<Self> {
        Self::new(self.0 as i64 + 1)
    }

    /// One level further; rejected below [`Scale::MIN`].
    pub fn zoomed_out(&self) -> Result<Self> {
        Self::new(self.0 as i64 - 1)
    }

    /// Longitude covered by one image width: `720 / 2^scale`.
    pub fn degrees_per_width(&self) -> f64 {
        DEGREES_PER_WIDTH_AT_ZERO / 2_f64.powi(self.0 as i32)
    }

    /// Latitude covered by one image height: `360 / 2^scale`.
    pub fn degrees_per_height(&self) -> f64 {
        DEGREES_PER_HEIGHT_AT_ZERO / 2_f64.powi(self.0 as i32)
    }
}

impl TryFrom<i64> for Scale {
    type Error = MapError;

    fn try_from(value: i64) -> Result<Self> {
        Scale::new(value)
    }
}

impl From<Scale> for u8 {
    fn from(scale: Scale) -> u8 {
        scale.0
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Imagery style rendered by the tile service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Layer {
    #[default]
    #[serde(rename = "map")]
    Map,
    #[serde(rename = "sat")]
    Satellite,
    #[serde(rename = "sat,skl")]
    Hybrid,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Map, Layer::Satellite, Layer::Hybrid];

    /// Value of the `l` query parameter.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Layer::Map => "map",
            Layer::Satellite => "sat",
            Layer::Hybrid => "sat,skl",
        }
    }

    /// Human-readable label for layer pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Layer::Map => "Map",
            Layer::Satellite => "Satellite",
            Layer::Hybrid => "Hybrid",
        }
    }

    pub fn from_wire(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|layer| layer.as_wire() == code)
            .ok_or_else(|| MapError::InvalidLayer(code.to_string()))
    }

    /// Maps a picker label to a layer. "Scheme" is accepted for the road map.
    pub fn from_label(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "map" | "scheme" => Ok(Layer::Map),
            "satellite" => Ok(Layer::Satellite),
            "hybrid" => Ok(Layer::Hybrid),
            _ => Err(MapError::InvalidLayer(label.to_string())),
        }
    }
}

impl FromStr for Layer {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_wire(s).or_else(|_| Self::from_label(s))
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Geographic rectangle covered by a rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoExtent {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoExtent {
    /// Extent of one image centred on `center` at `scale`. Not clipped to world bounds.
    pub fn around(center: &GeoPoint, scale: Scale) -> Self {
        let half_w = scale.degrees_per_width() / 2.0;
        let half_h = scale.degrees_per_height() / 2.0;
        Self {
            west: center.longitude() - half_w,
            south: center.latitude() - half_h,
            east: center.longitude() + half_w,
            north: center.latitude() + half_h,
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.longitude() >= self.west
            && point.longitude() <= self.east
            && point.latitude() >= self.south
            && point.latitude() <= self.north
    }
}
