// Clear-and-composite: reset the canvas, then center a decoded image on it.
// No scaling: small sources sit centered on the background, big ones are cropped.

use crate::codec;
use crate::error::Result;
use crate::types::{Color, PixelBuffer};
use image::RgbaImage;
use log::debug;
use serde::{Deserialize, Serialize};

/// How imported pixels meet the background underneath.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Copy source samples as-is, alpha included.
    #[default]
    Replace,
    /// Source-over onto the background; the canvas stays opaque.
    Over,
}

/// Top-left corner that centers a `src_w` x `src_h` image on the canvas.
/// Negative when the source is larger than the canvas.
pub fn center_offset(canvas_w: usize, canvas_h: usize, src_w: u32, src_h: u32) -> (i64, i64) {
    let ox = (canvas_w as i64 - src_w as i64) / 2;
    let oy = (canvas_h as i64 - src_h as i64) / 2;
    (ox, oy)
}

/// Reset `buf` to its background, then composite `bytes` centered on it.
///
/// Empty `bytes` is the blank-canvas case and succeeds. When decoding fails
/// the error is returned and the buffer is left blank.
pub fn load_composite(buf: &mut PixelBuffer, bytes: &[u8], mode: BlendMode) -> Result<()> {
    buf.clear_to_background();
    if bytes.is_empty() {
        debug!("No image bytes; canvas reset to background");
        return Ok(());
    }

    let src = codec::decode(bytes)?;
    blit_centered(buf, &src, mode);
    Ok(())
}

/// Copy `src` centered onto `buf`, clipping anything that falls off the canvas.
pub fn blit_centered(buf: &mut PixelBuffer, src: &RgbaImage, mode: BlendMode) {
    let (ox, oy) = center_offset(buf.width(), buf.height(), src.width(), src.height());
    debug!(
        "Compositing {}x{} source at offset ({}, {})",
        src.width(),
        src.height(),
        ox,
        oy
    );

    for (sx, sy, px) in src.enumerate_pixels() {
        let x = ox + sx as i64;
        let y = oy + sy as i64;
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            continue;
        };
        let color = Color::from(px.0);
        let color = match mode {
            BlendMode::Replace => color,
            BlendMode::Over => color.over(buf.get(x, y)),
        };
        buf.set(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::Rgba;

    fn png_of(img: &RgbaImage) -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn offsets_truncate_and_go_negative() {
        assert_eq!(center_offset(500, 500, 50, 50), (225, 225));
        assert_eq!(center_offset(10, 10, 3, 4), (3, 3));
        assert_eq!(center_offset(10, 10, 20, 13), (-5, -1));
    }

    #[test]
    fn empty_bytes_blank_the_canvas() {
        let mut buf = PixelBuffer::new(8, 8, Color::WHITE).unwrap();
        buf.clear(Color::BLACK);
        load_composite(&mut buf, &[], BlendMode::Replace).unwrap();
        assert!(buf.pixels().iter().all(|&c| c == Color::WHITE));
    }

    #[test]
    fn failed_decode_leaves_blank_canvas() {
        let mut buf = PixelBuffer::new(8, 8, Color::WHITE).unwrap();
        buf.clear(Color::BLACK);
        let err = load_composite(&mut buf, b"\x89PNG\r\n\x1a\nbroken", BlendMode::Replace)
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(buf.pixels().iter().all(|&c| c == Color::WHITE));
    }

    #[test]
    fn small_source_is_centered() {
        let mut buf = PixelBuffer::new(10, 10, Color::WHITE).unwrap();
        let mut src = RgbaImage::from_pixel(4, 2, Rgba([0, 0, 255, 255]));
        src.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        load_composite(&mut buf, &png_of(&src), BlendMode::Replace).unwrap();

        assert_eq!(buf.get(3, 4), Color::rgb(255, 0, 0));
        assert_eq!(buf.get(6, 5), Color::rgb(0, 0, 255));
        assert_eq!(buf.get(2, 4), Color::WHITE);
        assert_eq!(buf.get(7, 4), Color::WHITE);
        assert_eq!(buf.get(3, 6), Color::WHITE);
        let blue = buf.pixels().iter().filter(|&&c| c == Color::rgb(0, 0, 255)).count();
        assert_eq!(blue, 7);
    }

    #[test]
    fn oversized_source_is_cropped_not_scaled() {
        let mut buf = PixelBuffer::new(4, 4, Color::WHITE).unwrap();
        // 8x8 gradient: each pixel encodes its own source coordinates
        let src = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 0, 255]));
        load_composite(&mut buf, &png_of(&src), BlendMode::Replace).unwrap();
        // offset is (-2, -2): canvas (0,0) shows source (2,2)
        assert_eq!(buf.get(0, 0), Color::rgb(20, 20, 0));
        assert_eq!(buf.get(3, 3), Color::rgb(50, 50, 0));
    }

    #[test]
    fn replace_keeps_alpha_and_over_flattens() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        let bytes = png_of(&src);

        let mut buf = PixelBuffer::new(2, 2, Color::WHITE).unwrap();
        load_composite(&mut buf, &bytes, BlendMode::Replace).unwrap();
        assert_eq!(buf.get(0, 0), Color::rgba(0, 0, 0, 0));

        load_composite(&mut buf, &bytes, BlendMode::Over).unwrap();
        assert_eq!(buf.get(0, 0), Color::WHITE);
    }
}
