//! Derives the standard set of square app icons from one canonical source.

mod derive;
mod error;

pub use derive::*;
pub use error::*;

/// Icon edge lengths, in pixels, expected by web app manifests and touch icons.
pub const ICON_SIZES: [u32; 8] = [72, 96, 128, 144, 152, 180, 192, 512];
