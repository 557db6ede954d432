//! Application services

pub mod transform;

pub use transform::{CompressOutput, DecompressOutput, TransformService};
