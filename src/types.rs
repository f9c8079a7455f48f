// Core types: the color sample and the pixel buffer every tool writes into.

use crate::error::{Error, Result};

/// One RGBA sample, 8 bits per channel, straight (not premultiplied) alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Pack as 0x00RRGGBB, the layout minifb wants. Alpha is dropped.
    #[inline]
    pub fn to_0rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Source-over this color onto an opaque `dst`; result is opaque.
    pub fn over(self, dst: Color) -> Color {
        let a = self.a as u32;
        let inv = 255 - a;
        let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
        Color::rgb(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Color::rgba(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Fixed-size 2D grid of samples. Dimensions never change after creation.
///
/// Coordinates are signed so brush math can run off the edges freely:
/// anything outside `[0, width) x [0, height)` is clipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    background: Color,
    pixels: Vec<Color>, // row-major, length = width * height
}

impl PixelBuffer {
    /// New buffer filled with `background`.
    pub fn new(width: usize, height: usize, background: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidCanvasSize { width, height });
        }
        Ok(Self {
            width,
            height,
            background,
            pixels: vec![background; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The fill color used by `clear_to_background` and returned for out-of-range reads.
    pub fn background(&self) -> Color {
        self.background
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Write one sample. Out of range is a silent no-op.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Read one sample. Out of range reads the background.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Color {
        match self.index(x, y) {
            Some(idx) => self.pixels[idx],
            None => self.background,
        }
    }

    /// Fill every sample with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn clear_to_background(&mut self) {
        self.clear(self.background);
    }

    /// All samples, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Flatten to RGBA bytes, row-major (what the codec serializes).
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for c in &self.pixels {
            out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        out
    }

    /// Copy the buffer into a 0x00RRGGBB frame for presentation.
    pub fn write_0rgb(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.pixels.iter().map(|c| c.to_0rgb()));
    }
}
