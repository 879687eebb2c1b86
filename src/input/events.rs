use crate::core::geo::Layer;
use serde::{Deserialize, Serialize};

/// Discrete requests a host forwards to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    Pan(PanDirection),
    ZoomIn,
    ZoomOut,
    /// Coordinate triple or free-text address.
    Search(String),
    SelectLayer(Layer),
    /// Drop the marker and search result.
    Clear,
    /// Re-render the current view, e.g. for the first frame.
    Refresh,
}

impl Intent {
    pub const PAN_UP: Intent = Intent::Pan(PanDirection::Up);
    pub const PAN_DOWN: Intent = Intent::Pan(PanDirection::Down);
    pub const PAN_LEFT: Intent = Intent::Pan(PanDirection::Left);
    pub const PAN_RIGHT: Intent = Intent::Pan(PanDirection::Right);

    /// Short label used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Pan(_) => "pan",
            Intent::ZoomIn => "zoom in",
            Intent::ZoomOut => "zoom out",
            Intent::Search(_) => "search",
            Intent::SelectLayer(_) => "select layer",
            Intent::Clear => "clear",
            Intent::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    /// (longitude, latitude) fractions for one step; up is north, right is east.
    pub fn fractions(&self, step: f64) -> (f64, f64) {
        match self {
            PanDirection::Up => (0.0, step),
            PanDirection::Down => (0.0, -step),
            PanDirection::Left => (-step, 0.0),
            PanDirection::Right => (step, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_fractions() {
        assert_eq!(PanDirection::Up.fractions(0.5), (0.0, 0.5));
        assert_eq!(PanDirection::Down.fractions(0.5), (0.0, -0.5));
        assert_eq!(PanDirection::Left.fractions(0.5), (-0.5, 0.0));
        assert_eq!(PanDirection::Right.fractions(0.5), (0.5, 0.0));
    }

    #[test]
    fn test_intent_json() {
        let intent: Intent = serde_json::from_str(r#"{"SelectLayer":"sat"}"#).unwrap();
        assert_eq!(intent, Intent::SelectLayer(Layer::Satellite));
        let intent: Intent = serde_json::from_str(r#"{"Pan":"Left"}"#).unwrap();
        assert_eq!(intent, Intent::PAN_LEFT);
    }

    #[test]
    fn test_intent_names() {
        assert_eq!(Intent::PAN_UP.name(), "pan");
        assert_eq!(Intent::ZoomOut.name(), "zoom out");
        assert_eq!(Intent::Search("x".into()).name(), "search");
        assert_eq!(Intent::Refresh.name(), "refresh");
    }
}
