//! Core constants matching the static-map and geocoder services' defaults.
//! Keeping them in a single place makes it easier to tweak viewer-wide magic numbers.

/// Lowest zoom level the tile service renders.
pub const MIN_SCALE: u8 = 0;

/// Highest zoom level the tile service renders.
pub const MAX_SCALE: u8 = 21;

/// Longitude span of one image width at scale 0.
pub const DEGREES_PER_WIDTH_AT_ZERO: f64 = 720.0;

/// Latitude span of one image height at scale 0.
pub const DEGREES_PER_HEIGHT_AT_ZERO: f64 = 360.0;

/// Default rendered image size in pixels (the service's maximum).
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (650, 450);

/// Startup center as (longitude, latitude).
pub const DEFAULT_CENTER: (f64, f64) = (28.97709, 41.005233);

/// Startup zoom level.
pub const DEFAULT_SCALE: u8 = 12;

/// Fraction of the visible span moved by one discrete pan intent.
pub const PAN_STEP: f64 = 0.5;

/// Calibration ratio applied to every pan: assumed image width over reference width.
pub const PAN_CORRECTION_RATIO: f64 = 450.0 / 350.0;

/// Static map endpoint.
pub const STATIC_MAP_URL: &str = "https://static-maps.yandex.ru/1.x/";

/// Geocoder endpoint.
pub const GEOCODER_URL: &str = "https://geocode-maps.yandex.ru/1.x/";

/// Locale requested from the geocoder.
pub const DEFAULT_LANG: &str = "ru_RU";

/// Marker style token understood by the tile service.
pub const DEFAULT_MARKER_STYLE: &str = "pm2rdm";

/// Separator between markers in the `pt` query parameter.
pub const MARKER_SEPARATOR: char = '~';

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("mapview/", env!("CARGO_PKG_VERSION"));
