//! Core

#[macro_use]
extern crate hexf;

// Re-export.
pub mod film;
pub mod filter;
pub mod geometry;
pub mod math;
pub mod microfacet;
pub mod reflection;
pub mod rng;
pub mod sampling;
pub mod spectrum;
