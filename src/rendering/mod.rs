//! Rendering pipeline
//!
//! A [`Layout`](crate::model::Layout) is first resolved into a [`layout::Page`]
//! (placement, theme resolution, per-surface display lists), which the raster,
//! vector, and HTML backends then consume independently.

pub mod html;
pub mod layout;
pub mod paint;
pub mod raster;
pub mod vector;

use crate::Result;

/// A rendered RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes, `4 * width * height` long
    pub pixels: Vec<u8>,
}

impl Screenshot {
    /// An all-transparent buffer of the given device size.
    pub fn new(width: u32, height: u32) -> Self {
        Screenshot {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Encode as PNG with the default encoder profile.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.encode_png_with(png::Compression::Default, png::FilterType::Sub)
    }

    /// Encode as PNG with an explicit encoder profile.
    ///
    /// Engines pick different profiles, so encoded bytes may differ between
    /// engines even when the pixels are identical.
    pub fn encode_png_with(
        &self,
        compression: png::Compression,
        filter: png::FilterType,
    ) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(compression);
        encoder.set_filter(filter);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        writer.finish()?;
        Ok(out)
    }

    /// Decode a PNG produced by [`Screenshot::encode_png_with`].
    pub fn from_png(data: &[u8]) -> Result<Screenshot> {
        let decoder = png::Decoder::new(data);
        let mut reader = decoder.read_info()?;
        let mut pixels = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut pixels)?;
        if info.color_type != png::ColorType::Rgba || info.bit_depth != png::BitDepth::Eight {
            return Err(crate::Error::CodecError(format!(
                "unsupported PNG layout: {:?}/{:?}",
                info.color_type, info.bit_depth
            )));
        }
        pixels.truncate(info.buffer_size());
        Ok(Screenshot { width: info.width, height: info.height, pixels })
    }
}
