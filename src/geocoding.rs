//! Forward geocoding: free-text query to coordinates and a formatted address.

use crate::core::constants::{DEFAULT_LANG, GEOCODER_URL};
use crate::core::geo::GeoPoint;
use crate::transport::{HttpTransport, Transport};
use crate::{MapError, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// First match returned by the geocoder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub coordinates: GeoPoint,
    pub address: String,
    /// Object kind, e.g. `house`, `street`, `locality`.
    pub kind: Option<String>,
    /// Match precision, e.g. `exact`, `near`, `other`.
    pub precision: Option<String>,
}

// Only the parts of the response we read are modelled.
#[derive(Debug, Deserialize)]
struct GeocoderEnvelope {
    response: GeocoderResponse,
}

#[derive(Debug, Deserialize)]
struct GeocoderResponse {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember", default)]
    feature_member: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

#[derive(Debug, Deserialize)]
struct GeoObject {
    #[serde(rename = "metaDataProperty")]
    meta: MetaDataProperty,
    #[serde(rename = "Point")]
    point: PointPos,
}

#[derive(Debug, Deserialize)]
struct MetaDataProperty {
    #[serde(rename = "GeocoderMetaData")]
    geocoder: GeocoderMetaData,
}

#[derive(Debug, Deserialize)]
struct GeocoderMetaData {
    text: String,
    kind: Option<String>,
    precision: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PointPos {
    pos: String,
}

/// Parses a `"lon lat"` pair. Longitude comes first and is kept first.
pub fn parse_pos(pos: &str) -> Option<(f64, f64)> {
    let mut parts = pos.split_whitespace();
    let lon = parts.next()?.parse().ok()?;
    let lat = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((lon, lat))
}

/// URL with the API key masked, safe to log and to surface in errors.
fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apikey" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

pub struct GeocoderClient {
    endpoint: Url,
    api_key: String,
    lang: String,
    transport: Arc<dyn Transport>,
}

impl GeocoderClient {
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        lang: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| MapError::Config(format!("geocoder endpoint {:?}: {}", endpoint, e)))?;
        Ok(Self {
            endpoint,
            api_key: api_key.into(),
            lang: lang.into(),
            transport,
        })
    }

    /// Client for the public endpoint over the shared HTTP client.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(GEOCODER_URL, api_key, DEFAULT_LANG, Arc::new(HttpTransport::new()))
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("lang", &self.lang)
            .append_pair("geocode", query)
            .append_pair("format", "json");
        url
    }

    /// Resolves `query` to its first match.
    ///
    /// An empty collection is [`MapError::NoGeocodeResult`]; every transport,
    /// status or parsing problem is [`MapError::GeocodeRequestFailed`].
    pub fn geocode(&self, query: &str) -> Result<GeocodeResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MapError::NoGeocodeResult {
                query: query.to_string(),
            });
        }

        let url = self.request_url(query);
        let failed = |reason: String| MapError::GeocodeRequestFailed {
            url: redacted(&url),
            reason,
        };

        let resp = self
            .transport
            .get(&url)
            .map_err(|e| failed(e.to_string()))?;
        if !resp.is_success() {
            return Err(failed(format!("HTTP {}", resp.status)));
        }

        let envelope: GeocoderEnvelope = serde_json::from_slice(&resp.body)
            .map_err(|e| failed(format!("malformed response: {}", e)))?;

        let Some(first) = envelope
            .response
            .collection
            .feature_member
            .into_iter()
            .next()
        else {
            log::info!("geocoder found nothing for {:?}", query);
            return Err(MapError::NoGeocodeResult {
                query: query.to_string(),
            });
        };

        let geo = first.geo_object;
        let (lon, lat) = parse_pos(&geo.point.pos)
            .ok_or_else(|| failed(format!("unparseable position {:?}", geo.point.pos)))?;
        let coordinates = GeoPoint::new(lon, lat).map_err(|e| failed(e.to_string()))?;

        log::debug!("geocoded {:?} -> {} ({})", query, coordinates, geo.meta.geocoder.text);
        Ok(GeocodeResult {
            coordinates,
            address: geo.meta.geocoder.text,
            kind: geo.meta.geocoder.kind,
            precision: geo.meta.geocoder.precision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::{query_param, RecordingTransport};
    use crate::transport::HttpResponse;

    const ISTANBUL: &str = r#"{
      "response": {
        "GeoObjectCollection": {
          "metaDataProperty": {"GeocoderResponseMetaData": {"request": "Istanbul", "found": "2"}},
          "featureMember": [
            {"GeoObject": {
              "metaDataProperty": {"GeocoderMetaData": {
                "precision": "other", "text": "Türkiye, İstanbul", "kind": "province"}},
              "name": "İstanbul",
              "Point": {"pos": "28.97709 41.005233"}}},
            {"GeoObject": {
              "metaDataProperty": {"GeocoderMetaData": {"text": "Second match"}},
              "Point": {"pos": "1 2"}}}
          ]
        }
      }
    }"#;

    const EMPTY: &str = r#"{"response":{"GeoObjectCollection":{"featureMember":[]}}}"#;

    fn client(transport: Arc<RecordingTransport>) -> GeocoderClient {
        GeocoderClient::new("https://geo.example.test/1.x/", "secret", "en_US", transport).unwrap()
    }

    #[test]
    fn test_first_feature_is_used() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(HttpResponse::new(200, ISTANBUL));

        let result = client(transport.clone()).geocode("Istanbul").unwrap();
        assert_eq!(result.coordinates.longitude(), 28.97709);
        assert_eq!(result.coordinates.latitude(), 41.005233);
        assert_eq!(result.address, "Türkiye, İstanbul");
        assert_eq!(result.kind.as_deref(), Some("province"));

        let url = &transport.requests()[0];
        assert_eq!(query_param(url, "apikey").as_deref(), Some("secret"));
        assert_eq!(query_param(url, "lang").as_deref(), Some("en_US"));
        assert_eq!(query_param(url, "geocode").as_deref(), Some("Istanbul"));
        assert_eq!(query_param(url, "format").as_deref(), Some("json"));
    }

    #[test]
    fn test_empty_collection_is_not_found() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(HttpResponse::new(200, EMPTY));

        let err = client(transport).geocode("40d").unwrap_err();
        assert!(matches!(err, MapError::NoGeocodeResult { ref query } if query == "40d"));
    }

    #[test]
    fn test_http_error_is_request_failure() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(HttpResponse::new(403, "forbidden"));

        match client(transport).geocode("Istanbul").unwrap_err() {
            MapError::GeocodeRequestFailed { url, reason } => {
                assert!(reason.contains("403"));
                assert!(!url.contains("secret"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_transport_failure_is_request_failure() {
        let transport = Arc::new(RecordingTransport::new());
        transport.fail("dns lookup failed");

        match client(transport.clone()).geocode("Istanbul").unwrap_err() {
            MapError::GeocodeRequestFailed { url, reason } => {
                assert!(reason.contains("dns lookup failed"));
                assert!(!url.contains("secret"));
                let url = Url::parse(&url).unwrap();
                assert_eq!(query_param(&url, "apikey").as_deref(), Some("***"));
                assert_eq!(query_param(&url, "geocode").as_deref(), Some("Istanbul"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_malformed_json_is_request_failure() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(HttpResponse::new(200, "{\"response\":"));

        let err = client(transport).geocode("Istanbul").unwrap_err();
        assert!(matches!(err, MapError::GeocodeRequestFailed { .. }));
    }

    #[test]
    fn test_blank_query_skips_network() {
        let transport = Arc::new(RecordingTransport::new());
        let err = client(transport.clone()).geocode("   ").unwrap_err();
        assert!(matches!(err, MapError::NoGeocodeResult { .. }));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_parse_pos_order() {
        assert_eq!(parse_pos("37.617635 55.755814"), Some((37.617635, 55.755814)));
        assert_eq!(parse_pos("37.6"), None);
        assert_eq!(parse_pos("a b"), None);
        assert_eq!(parse_pos("1 2 3"), None);
    }
}
