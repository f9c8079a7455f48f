// Round brush: solid disc stamps, and strokes made of stamps spaced <= 1px apart.
//
// Radius rule: membership is decided by the real radius, dx² + dy² <= r².
// The offset loop runs over floor(r), which is exactly the set of integer
// offsets that can pass that test, so e.g. r = 3.5 paints the 37-cell disc.
// Stamp centers from fractional pointer positions are floored.

use crate::error::{Error, Result};
use crate::types::{Color, PixelBuffer};

pub const DEFAULT_RADIUS: f32 = 3.0;

/// Current draw color and radius. Mutated only through the setters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushState {
    color: Color,
    radius: f32,
}

impl BrushState {
    pub fn new(color: Color, radius: f32) -> Result<Self> {
        check_radius(radius)?;
        Ok(Self { color, radius })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Rejects zero, negative, NaN and infinite radii; the old value is kept.
    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            radius: DEFAULT_RADIUS,
        }
    }
}

fn check_radius(radius: f32) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidRadius(radius))
    }
}

/// Paint a filled disc centered at (cx, cy). Cells off the canvas are clipped.
pub fn stamp_at(buf: &mut PixelBuffer, cx: i32, cy: i32, color: Color, radius: f32) {
    if radius.is_nan() || radius < 0.0 {
        return;
    }
    let r = radius.floor() as i64;
    let r2 = radius as f64 * radius as f64;
    let (cx, cy) = (cx as i64, cy as i64);
    let (w, h) = (buf.width() as i64, buf.height() as i64);

    // Scan only the part of the bounding box that lies on the canvas
    let (x_lo, x_hi) = ((-r).max(-cx), r.min(w - 1 - cx));
    let (y_lo, y_hi) = ((-r).max(-cy), r.min(h - 1 - cy));
    for dy in y_lo..=y_hi {
        for dx in x_lo..=x_hi {
            let (fx, fy) = (dx as f64, dy as f64);
            if fx * fx + fy * fy > r2 {
                continue; // outside the circle
            }
            buf.set((cx + dx) as i32, (cy + dy) as i32, color);
        }
    }
}

/// Points along (x0,y0)→(x1,y1), both ends included, at most 1px apart.
///
/// Uses n = ceil(d) steps with t = i/n, so the last sample is exactly the
/// endpoint. A zero-length segment yields the single shared point.
pub fn segment_samples(x0: f32, y0: f32, x1: f32, y1: f32) -> impl Iterator<Item = (f32, f32)> {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let dist = dx.hypot(dy);
    let steps = if dist > 0.0 && dist.is_finite() {
        dist.ceil() as u32
    } else {
        0
    };
    (0..=steps).map(move |i| {
        if i == steps {
            return (x1, y1);
        }
        // multiply before dividing so axis-aligned integer runs land on exact pixels
        let (i, n) = (i as f32, steps as f32);
        (x0 + (dx * i) / n, y0 + (dy * i) / n)
    })
}

/// Stamp along the segment so a fast drag leaves no dotted gaps.
///
/// Only the stretch that passes within `radius` of the canvas is walked, so
/// the work is bounded by the canvas size, not by how far the pointer jumped.
pub fn stroke_to(
    buf: &mut PixelBuffer,
    from: (f32, f32),
    to: (f32, f32),
    color: Color,
    radius: f32,
) {
    if ![from.0, from.1, to.0, to.1].iter().all(|v| v.is_finite()) {
        return;
    }
    let margin = radius.max(0.0) as f64 + 1.0;
    let lo = (-margin, -margin);
    let hi = (buf.width() as f64 + margin, buf.height() as f64 + margin);
    let Some(((x0, y0), (x1, y1))) = clip_segment(from, to, lo, hi) else {
        return;
    };
    for (x, y) in segment_samples(x0, y0, x1, y1) {
        stamp_at(buf, x.floor() as i32, y.floor() as i32, color, radius);
    }
}

/// Liang-Barsky clip of p0→p1 against the box `lo..=hi`.
/// Endpoints already inside are returned untouched.
fn clip_segment(
    p0: (f32, f32),
    p1: (f32, f32),
    lo: (f64, f64),
    hi: (f64, f64),
) -> Option<((f32, f32), (f32, f32))> {
    let (x0, y0) = (p0.0 as f64, p0.1 as f64);
    let (dx, dy) = (p1.0 as f64 - x0, p1.1 as f64 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [
        (-dx, x0 - lo.0),
        (dx, hi.0 - x0),
        (-dy, y0 - lo.1),
        (dy, hi.1 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None; // parallel and outside
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else if t < t0 {
            return None;
        } else {
            t1 = t1.min(t);
        }
    }

    let at = |t: f64| ((x0 + dx * t) as f32, (y0 + dy * t) as f32);
    let start = if t0 > 0.0 { at(t0) } else { p0 };
    let end = if t1 < 1.0 { at(t1) } else { p1 };
    Some((start, end))
}
