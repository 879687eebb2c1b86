//! Search box handling: coordinate triples go straight to the viewport,
//! anything else is geocoded first.

use crate::core::geo::{GeoPoint, Scale};
use crate::core::viewport::Viewport;
use crate::geocoding::{GeocodeResult, GeocoderClient};
use crate::{MapError, Result};

/// How a raw search string is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// `<lon> <lat> <scale>`, digits only, no signs.
    Coordinates {
        longitude: f64,
        latitude: f64,
        scale: i64,
    },
    Address(String),
    Empty,
}

fn is_integer(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(token: &str) -> bool {
    match token.split_once('.') {
        Some((whole, frac)) => is_integer(whole) && is_integer(frac),
        None => is_integer(token),
    }
}

impl SearchQuery {
    /// Classifies trimmed input. Only an exact `decimal decimal integer`
    /// sequence counts as coordinates; a leading `-`, a trailing word or a
    /// fourth number sends the input to the geocoder.
    pub fn classify(raw: &str) -> Self {
        let text = raw.trim();
        if text.is_empty() {
            return SearchQuery::Empty;
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        if let [lon, lat, scale] = tokens.as_slice() {
            if is_decimal(lon) && is_decimal(lat) && is_integer(scale) {
                if let (Ok(longitude), Ok(latitude)) = (lon.parse::<f64>(), lat.parse::<f64>()) {
                    // A digit run too long for i64 is out of range anyway.
                    let scale = scale.parse::<i64>().unwrap_or(i64::MAX);
                    return SearchQuery::Coordinates {
                        longitude,
                        latitude,
                        scale,
                    };
                }
            }
        }

        SearchQuery::Address(text.to_string())
    }
}

/// What a search did to the viewport.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Coordinates were entered directly; no geocoder call was made.
    Navigated { center: GeoPoint, scale: Scale },
    /// The address was found, the view recentred and marked.
    Found(GeocodeResult),
    /// The geocoder had no match. The viewport is unchanged.
    NotFound { query: String },
    /// Blank input, nothing to do.
    Empty,
}

pub struct SearchDispatcher {
    geocoder: GeocoderClient,
}

impl SearchDispatcher {
    pub fn new(geocoder: GeocoderClient) -> Self {
        Self { geocoder }
    }

    pub fn geocoder(&self) -> &GeocoderClient {
        &self.geocoder
    }

    /// Runs a search against `viewport`.
    ///
    /// Errors are bounds errors from entered coordinates and
    /// [`MapError::GeocodeRequestFailed`]; "nothing found" is an outcome.
    pub fn dispatch(&self, viewport: &mut Viewport, raw: &str) -> Result<SearchOutcome> {
        match SearchQuery::classify(raw) {
            SearchQuery::Empty => Ok(SearchOutcome::Empty),
            SearchQuery::Coordinates {
                longitude,
                latitude,
                scale,
            } => {
                log::debug!("coordinate search {} {} z{}", longitude, latitude, scale);
                viewport.set_view(longitude, latitude, scale)?;
                viewport.reload()?;
                let state = viewport.state();
                Ok(SearchOutcome::Navigated {
                    center: state.center(),
                    scale: state.scale(),
                })
            }
            SearchQuery::Address(query) => match self.geocoder.geocode(&query) {
                Ok(found) => {
                    let point = found.coordinates;
                    viewport.set_center(point.longitude(), point.latitude())?;
                    viewport.add_marker(point.longitude(), point.latitude())?;
                    log::info!("search {:?} -> {}", query, found.address);
                    Ok(SearchOutcome::Found(found))
                }
                Err(MapError::NoGeocodeResult { query }) => Ok(SearchOutcome::NotFound { query }),
                Err(e) => Err(e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(lon: f64, lat: f64, scale: i64) -> SearchQuery {
        SearchQuery::Coordinates {
            longitude: lon,
            latitude: lat,
            scale,
        }
    }

    #[test]
    fn test_coordinate_triples() {
        assert_eq!(SearchQuery::classify("28.5 41.0 12"), coords(28.5, 41.0, 12));
        assert_eq!(SearchQuery::classify("  37 55.75\t10 "), coords(37.0, 55.75, 10));
        assert_eq!(SearchQuery::classify("200 100 30"), coords(200.0, 100.0, 30));
    }

    #[test]
    fn test_addresses() {
        for text in [
            "Istanbul",
            "40d",
            "-28.5 41.0 12",
            "28.5 -41.0 12",
            "28.5 41.0 12.5",
            "28.5 41.0",
            "28.5 41.0 12 13",
            "Tverskaya 12 7",
            "28. 41.0 12",
            ".5 41.0 12",
        ] {
            assert_eq!(
                SearchQuery::classify(text),
                SearchQuery::Address(text.trim().to_string()),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn test_blank() {
        assert_eq!(SearchQuery::classify(""), SearchQuery::Empty);
        assert_eq!(SearchQuery::classify("  \n"), SearchQuery::Empty);
    }

    #[test]
    fn test_huge_scale_saturates() {
        assert_eq!(
            SearchQuery::classify("1 2 99999999999999999999"),
            coords(1.0, 2.0, i64::MAX)
        );
    }
}
