//! Configuration for the viewer core
//!
//! Every field has a default matching the public map services, so an empty
//! JSON object or `MapConfig::default()` yields a working setup apart from
//! the geocoder API key.

use crate::core::constants::{
    DEFAULT_CENTER, DEFAULT_IMAGE_SIZE, DEFAULT_LANG, DEFAULT_SCALE, GEOCODER_URL,
    PAN_CORRECTION_RATIO, PAN_STEP, STATIC_MAP_URL, USER_AGENT,
};
use crate::core::geo::{validate_latitude, validate_longitude, validate_scale, Layer};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub tile_url: String,
    pub geocoder_url: String,
    pub api_key: String,
    pub lang: String,
    pub image_size: (u32, u32),
    /// Startup center as (longitude, latitude).
    pub initial_center: (f64, f64),
    pub initial_scale: u8,
    pub initial_layer: Layer,
    pub pan: PanConfig,
    /// Per-request timeout; `None` leaves the transport default in place.
    pub timeout_secs: Option<u64>,
    /// `User-Agent` header sent to both services.
    pub user_agent: String,
    pub messages: StatusMessages,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: STATIC_MAP_URL.to_string(),
            geocoder_url: GEOCODER_URL.to_string(),
            api_key: String::new(),
            lang: DEFAULT_LANG.to_string(),
            image_size: DEFAULT_IMAGE_SIZE,
            initial_center: DEFAULT_CENTER,
            initial_scale: DEFAULT_SCALE,
            initial_layer: Layer::Map,
            pan: PanConfig::default(),
            timeout_secs: None,
            user_agent: USER_AGENT.to_string(),
            messages: StatusMessages::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MapError::Config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `MAPVIEW_API_KEY`, `MAPVIEW_LANG`,
    /// `MAPVIEW_TILE_URL`, `MAPVIEW_GEOCODER_URL` and `MAPVIEW_USER_AGENT`
    /// when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("MAPVIEW_API_KEY") {
            config.api_key = key;
        }
        if let Ok(lang) = std::env::var("MAPVIEW_LANG") {
            config.lang = lang;
        }
        if let Ok(url) = std::env::var("MAPVIEW_TILE_URL") {
            config.tile_url = url;
        }
        if let Ok(url) = std::env::var("MAPVIEW_GEOCODER_URL") {
            config.geocoder_url = url;
        }
        if let Ok(agent) = std::env::var("MAPVIEW_USER_AGENT") {
            config.user_agent = agent;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_longitude(self.initial_center.0)?;
        validate_latitude(self.initial_center.1)?;
        validate_scale(self.initial_scale as i64)?;
        if self.image_size.0 == 0 || self.image_size.1 == 0 {
            return Err(MapError::Config(format!(
                "image size must be non-zero, got {}x{}",
                self.image_size.0, self.image_size.1
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(MapError::Config("user agent must not be empty".to_string()));
        }
        if !(self.pan.correction_ratio > 0.0) || !(self.pan.step > 0.0) {
            return Err(MapError::Config(format!(
                "pan step and correction ratio must be positive, got {} and {}",
                self.pan.step, self.pan.correction_ratio
            )));
        }
        Ok(())
    }
}

/// How far one discrete pan intent moves the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanConfig {
    /// Fraction of the visible span per intent.
    pub step: f64,
    /// Calibration multiplier applied on top of `step`.
    pub correction_ratio: f64,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            step: PAN_STEP,
            correction_ratio: PAN_CORRECTION_RATIO,
        }
    }
}

/// Status lines shown to the user. Override to localize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessages {
    pub nothing_found: String,
    pub search_failed: String,
    pub image_unavailable: String,
    pub out_of_bounds: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            nothing_found: "Nothing found".to_string(),
            search_failed: "Search is unavailable, try again later".to_string(),
            image_unavailable: "Map image could not be loaded".to_string(),
            out_of_bounds: "Out of bounds".to_string(),
        }
    }
}
