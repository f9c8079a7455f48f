// Raster engine for painting brand logos.
//
// A fixed-size RGBA `PixelBuffer`, a round brush that stamps discs and
// joins fast pointer motion into gap-free strokes, centered compositing of
// imported PNG/JPEG bytes, and lossless PNG export. `Editor` ties these
// into one session driven by pointer events from whatever UI hosts it.

pub mod brush;
pub mod codec;
pub mod composite;
pub mod config;
pub mod editor;
pub mod error;
pub mod palette;
pub mod store;
pub mod types;

pub use brush::BrushState;
pub use composite::BlendMode;
pub use config::Config;
pub use editor::{Editor, StrokeState};
pub use error::{Error, Result};
pub use palette::{Palette, Tool};
pub use store::{BlobStore, BrandId, FsBlobStore};
pub use types::{Color, PixelBuffer};
