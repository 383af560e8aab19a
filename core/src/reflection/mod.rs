//! Reflection Models

mod bsdf;
mod common;
mod disney;

// Re-export.
pub use bsdf::*;
pub use common::*;
pub use disney::*;
