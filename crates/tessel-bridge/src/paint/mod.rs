//! Color model shared by the toolkit and the helpers built on it.
//!
//! Colors are straight (non-premultiplied) alpha, as the toolkit's vertex
//! format expects. Vertices carry them packed into a `u32`.

pub mod color;

pub use color::{Color, PackedColor};
