//! Application layer: services and use cases
//!
//! This layer wires the wire codec to the domain conversions and owns stream I/O.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use services::{CompressOutput, DecompressOutput, TransformService};
