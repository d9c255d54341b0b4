//! Label rendering and stripping for heading lines.

mod label;
mod strip;

pub use label::render;
pub use strip::Stripper;
