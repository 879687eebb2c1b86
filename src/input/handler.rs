use crate::{
    core::{
        config::{MapConfig, StatusMessages},
        viewport::{Frame, Viewport},
    },
    geocoding::GeocoderClient,
    input::{
        events::Intent,
        search::{SearchDispatcher, SearchOutcome},
    },
    transport::{HttpTransport, Transport},
    MapError, Result,
};
use std::sync::Arc;

/// What the host should show after an intent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostUpdate {
    /// A reload ran; fetch the new frame with [`IntentHandler::frame`].
    pub reloaded: bool,
    /// New status line. `Some("")` clears it, `None` leaves it as is.
    pub status: Option<String>,
}

impl HostUpdate {
    fn reloaded() -> Self {
        Self {
            reloaded: true,
            status: None,
        }
    }

    fn status(text: impl Into<String>) -> Self {
        Self {
            reloaded: false,
            status: Some(text.into()),
        }
    }
}

/// Entry point for hosts: turns intents into viewport and search operations
/// and every failure into a status line. Nothing here returns an error.
pub struct IntentHandler {
    viewport: Viewport,
    search: SearchDispatcher,
    messages: StatusMessages,
}

impl IntentHandler {
    pub fn new(viewport: Viewport, search: SearchDispatcher, messages: StatusMessages) -> Self {
        Self {
            viewport,
            search,
            messages,
        }
    }

    /// Wires viewport and geocoder to the endpoints in `config` over one transport.
    pub fn with_transport(config: &MapConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let viewport = Viewport::with_transport(config, transport.clone())?;
        let geocoder = GeocoderClient::new(
            &config.geocoder_url,
            config.api_key.clone(),
            config.lang.clone(),
            transport,
        )?;
        Ok(Self::new(
            viewport,
            SearchDispatcher::new(geocoder),
            config.messages.clone(),
        ))
    }

    pub fn from_config(config: &MapConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(HttpTransport::from_config(config)?))
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.viewport.frame()
    }

    pub fn handle(&mut self, intent: Intent) -> HostUpdate {
        log::debug!("intent {:?}", intent);
        let name = intent.name();
        let result = match intent {
            Intent::Pan(direction) => {
                let (d_lon, d_lat) = direction.fractions(self.viewport.pan_step());
                self.viewport.pan(d_lon, d_lat).map(|_| HostUpdate::reloaded())
            }
            Intent::ZoomIn => self.viewport.zoom_in().map(|_| HostUpdate::reloaded()),
            Intent::ZoomOut => self.viewport.zoom_out().map(|_| HostUpdate::reloaded()),
            Intent::SelectLayer(layer) => {
                self.viewport.set_layer(layer).map(|_| HostUpdate::reloaded())
            }
            Intent::Refresh => self.viewport.reload().map(|_| HostUpdate::reloaded()),
            Intent::Clear => {
                self.viewport.clear_markers();
                self.viewport.reload().map(|_| HostUpdate {
                    reloaded: true,
                    status: Some(String::new()),
                })
            }
            Intent::Search(text) => self.search(&text),
        };

        result.unwrap_or_else(|e| self.report(name, e))
    }

    fn search(&mut self, text: &str) -> Result<HostUpdate> {
        let outcome = self.search.dispatch(&mut self.viewport, text)?;
        Ok(match outcome {
            SearchOutcome::Navigated { center, scale } => HostUpdate {
                reloaded: true,
                status: Some(format!("{} z{}", center, scale)),
            },
            SearchOutcome::Found(found) => HostUpdate {
                reloaded: true,
                status: Some(found.address),
            },
            SearchOutcome::NotFound { .. } => HostUpdate::status(&self.messages.nothing_found),
            SearchOutcome::Empty => HostUpdate::default(),
        })
    }

    fn report(&self, intent: &str, err: MapError) -> HostUpdate {
        if err.is_validation() {
            log::info!("rejected {} intent: {}", intent, err);
            HostUpdate::status(format!("{}: {}", self.messages.out_of_bounds, err))
        } else {
            log::warn!("{} intent failed: {}", intent, err);
            HostUpdate::status(&self.messages.search_failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Layer;
    use crate::transport::testing::{png_body, query_param, RecordingTransport};
    use crate::transport::HttpResponse;

    fn handler(transport: Arc<RecordingTransport>) -> IntentHandler {
        let config = MapConfig {
            tile_url: "https://tiles.example.test/1.x/".to_string(),
            geocoder_url: "https://geo.example.test/1.x/".to_string(),
            api_key: "key".to_string(),
            ..MapConfig::default()
        };
        IntentHandler::with_transport(&config, transport).unwrap()
    }

    #[test]
    fn test_zoom_in_past_max_reports_status() {
        let transport = Arc::new(RecordingTransport::new());
        let mut h = handler(transport.clone());
        for _ in 12..21 {
            transport.respond(HttpResponse::new(200, png_body(1, 1)));
            assert!(h.handle(Intent::ZoomIn).reloaded);
        }

        let update = h.handle(Intent::ZoomIn);
        assert!(!update.reloaded);
        assert!(update.status.unwrap().starts_with("Out of bounds"));
        assert_eq!(h.viewport().state().scale().value(), 21);
        assert_eq!(transport.requests().len(), 9);
    }

    #[test]
    fn test_clear_reloads_without_marker() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(HttpResponse::new(
            200,
            r#"{"response":{"GeoObjectCollection":{"featureMember":[{"GeoObject":{
                "metaDataProperty":{"GeocoderMetaData":{"text":"Somewhere"}},
                "Point":{"pos":"10.5 20.25"}}}]}}}"#,
        ));
        transport.respond(HttpResponse::new(200, png_body(1, 1)));
        transport.respond(HttpResponse::new(200, png_body(1, 1)));
        let mut h = handler(transport.clone());

        let update = h.handle(Intent::Search("Somewhere".into()));
        assert_eq!(update.status.as_deref(), Some("Somewhere"));
        assert_eq!(h.viewport().state().markers().len(), 1);

        let update = h.handle(Intent::Clear);
        assert_eq!(update.status.as_deref(), Some(""));
        let last = transport.requests().pop().unwrap();
        assert_eq!(query_param(&last, "pt"), None);
        assert_eq!(query_param(&last, "ll").as_deref(), Some("10.5,20.25"));
    }

    #[test]
    fn test_geocoder_outage_is_generic_status() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(HttpResponse::new(503, "busy"));
        let mut h = handler(transport);

        let update = h.handle(Intent::Search("Istanbul".into()));
        assert_eq!(
            update.status.as_deref(),
            Some("Search is unavailable, try again later")
        );
    }

    #[test]
    fn test_tile_outage_is_placeholder_not_status() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(HttpResponse::new(500, ""));
        let mut h = handler(transport);

        let update = h.handle(Intent::SelectLayer(Layer::Hybrid));
        assert!(update.reloaded);
        assert_eq!(update.status, None);
        assert!(matches!(h.frame(), Some(Frame::Placeholder(_))));
    }

    #[test]
    fn test_report_splits_validation_from_failures() {
        let h = handler(Arc::new(RecordingTransport::new()));

        let update = h.report("zoom in", MapError::ScaleOutOfRange(22));
        assert!(!update.reloaded);
        assert_eq!(
            update.status.as_deref(),
            Some("Out of bounds: scale 22 is outside [0, 21]")
        );

        let update = h.report("refresh", MapError::Config("http client".into()));
        assert!(!update.reloaded);
        assert_eq!(
            update.status.as_deref(),
            Some("Search is unavailable, try again later")
        );
    }
}
