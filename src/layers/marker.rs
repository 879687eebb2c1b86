use crate::{
    core::{constants::DEFAULT_MARKER_STYLE, geo::GeoPoint},
    Result,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Icon drawn by the tile service for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkerStyle {
    /// Red pin with a dot.
    #[default]
    Pin,
}

impl MarkerStyle {
    pub fn as_wire(&self) -> &'static str {
        match self {
            MarkerStyle::Pin => DEFAULT_MARKER_STYLE,
        }
    }
}

/// A single point overlaid on the rendered map image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    point: GeoPoint,
    style: MarkerStyle,
}

impl Marker {
    /// Builds a marker from raw coordinates, validating both axes.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        Ok(Self::at(GeoPoint::new(longitude, latitude)?))
    }

    pub fn at(point: GeoPoint) -> Self {
        Self {
            point,
            style: MarkerStyle::default(),
        }
    }

    pub fn point(&self) -> GeoPoint {
        self.point
    }

    pub fn style(&self) -> MarkerStyle {
        self.style
    }

    /// Renders `"lon,lat,style"` for the `pt` parameter.
    pub fn to_wire_string(&self) -> String {
        format!("{},{}", self.point.to_wire_string(), self.style.as_wire())
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire_string())
    }
}
