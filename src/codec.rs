// Encoding the canvas for storage and decoding stored or imported logos.
//
// PNG is the persisted format: lossless, RGBA8, channel-exact on reload.
// JPEG is accepted on the way in for user-imported files. Anything else is
// refused before the pixel decoder runs.

use crate::error::{Error, Result};
use crate::types::PixelBuffer;
use image::{ImageFormat, RgbaImage};
use log::debug;
use std::io::Cursor;

/// Formats `decode` accepts.
pub const SUPPORTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

/// Serialize the whole buffer as an RGBA8 PNG.
pub fn encode(buf: &PixelBuffer) -> Result<Vec<u8>> {
    let (w, h) = dimensions_u32(buf)?;
    let img = RgbaImage::from_raw(w, h, buf.to_rgba_bytes())
        .ok_or_else(|| Error::Encode("pixel data does not match canvas size".into()))?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| Error::Encode(e.to_string()))?;

    let bytes = out.into_inner();
    debug!("Encoded {}x{} canvas to {} PNG bytes", w, h, bytes.len());
    Ok(bytes)
}

/// Decode PNG or JPEG bytes into an RGBA8 image. No partial result on failure.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage> {
    if bytes.is_empty() {
        return Err(Error::Decode("empty input".into()));
    }
    let format = image::guess_format(bytes)
        .map_err(|_| Error::Decode("unrecognized image data".into()))?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(Error::UnsupportedFormat(format!("{format:?}")));
    }

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| Error::Decode(format!("{format:?}: {e}")))?
        .to_rgba8();
    debug!(
        "Decoded {:?} image {}x{} from {} bytes",
        format,
        img.width(),
        img.height(),
        bytes.len()
    );
    Ok(img)
}

fn dimensions_u32(buf: &PixelBuffer) -> Result<(u32, u32)> {
    let w = u32::try_from(buf.width()).map_err(|e| Error::Encode(e.to_string()))?;
    let h = u32::try_from(buf.height()).map_err(|e| Error::Encode(e.to_string()))?;
    Ok((w, h))
}
