use mapview::{HttpResponse, MapConfig, Transport, TransportError};
use reqwest::Url;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const TILE_HOST: &str = "tiles.example.test";
pub const GEO_HOST: &str = "geo.example.test";

/// Serves PNG tiles for every tile request and replays queued geocoder bodies.
#[derive(Default)]
pub struct FakeServices {
    geocoder_bodies: Mutex<VecDeque<String>>,
    pub tile_status: Mutex<u16>,
    log: Mutex<Vec<Url>>,
}

impl FakeServices {
    pub fn new() -> Self {
        let services = Self::default();
        *services.tile_status.lock().unwrap() = 200;
        services
    }

    pub fn queue_geocoder(&self, body: &str) {
        self.geocoder_bodies
            .lock()
            .unwrap()
            .push_back(body.to_string());
    }

    pub fn tile_requests(&self) -> Vec<Url> {
        self.requests_to(TILE_HOST)
    }

    pub fn geocoder_requests(&self) -> Vec<Url> {
        self.requests_to(GEO_HOST)
    }

    fn requests_to(&self, host: &str) -> Vec<Url> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.host_str() == Some(host))
            .cloned()
            .collect()
    }
}

impl Transport for FakeServices {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        self.log.lock().unwrap().push(url.clone());
        match url.host_str() {
            Some(TILE_HOST) => {
                let status = *self.tile_status.lock().unwrap();
                Ok(HttpResponse::new(status, png(8, 6)))
            }
            Some(GEO_HOST) => match self.geocoder_bodies.lock().unwrap().pop_front() {
                Some(body) => Ok(HttpResponse::new(200, body)),
                None => Err(TransportError::Other("geocoder not scripted".into())),
            },
            _ => Err(TransportError::Other(format!("unexpected host in {}", url))),
        }
    }
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageOutputFormat::Png)
        .unwrap();
    out.into_inner()
}

pub fn config() -> MapConfig {
    MapConfig {
        tile_url: format!("https://{}/1.x/", TILE_HOST),
        geocoder_url: format!("https://{}/1.x/", GEO_HOST),
        api_key: "test-key".to_string(),
        ..MapConfig::default()
    }
}

pub fn param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub const EMPTY_COLLECTION: &str =
    r#"{"response":{"GeoObjectCollection":{"featureMember":[]}}}"#;

pub fn one_feature(address: &str, pos: &str) -> String {
    format!(
        r#"{{"response":{{"GeoObjectCollection":{{"featureMember":[{{"GeoObject":{{
            "metaDataProperty":{{"GeocoderMetaData":{{"text":"{}","kind":"locality","precision":"other"}}}},
            "Point":{{"pos":"{}"}}}}}}]}}}}}}"#,
        address, pos
    )
}
