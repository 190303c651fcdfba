//! Geometry types shared by the toolkit model and the bridge.
//!
//! Toolkit space:
//! - logical pixels, as reported by the host's screen size
//! - origin top-left
//! - +X right, +Y down

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
