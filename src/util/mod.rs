//! Utility functions

pub mod testing;
