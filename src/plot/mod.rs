//! ASCII plotting for terminal output.
//!
//! - historical overlay + forecast charts (`ascii`)

pub mod ascii;

pub use ascii::*;
