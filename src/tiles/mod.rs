pub mod image;
pub mod loader;
pub mod source;

// Re-exports for convenience
pub use self::image::MapImage;
pub use loader::StaticMapClient;
pub use source::{MapSource, StaticMapRequest, StaticMapSource};
