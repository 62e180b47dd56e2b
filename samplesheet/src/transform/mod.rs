//! Transformation module.
//!
//! - Normalize: validated input to the pipeline-ready tables
//! - Pipeline: load, validate, transform and write in one call

pub mod normalize;
pub mod pipeline;

pub use normalize::{transform, Transformed};
pub use pipeline::*;
