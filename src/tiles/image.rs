use crate::Result;
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use std::fmt;
use std::io::Cursor;

/// A decoded static map image.
#[derive(Clone, PartialEq)]
pub struct MapImage {
    pixels: RgbaImage,
}

impl MapImage {
    /// Decodes any format the tile service serves (PNG, JPEG, GIF).
    pub fn decode(bytes: &[u8]) -> image::ImageResult<Self> {
        let pixels = image::load_from_memory(bytes)?.into_rgba8();
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Row-major RGBA8 pixel data.
    pub fn rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Re-encodes the image as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(self.pixels.clone()).write_to(&mut out, ImageOutputFormat::Png)?;
        Ok(out.into_inner())
    }
}

impl fmt::Debug for MapImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
