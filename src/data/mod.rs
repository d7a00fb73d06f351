//! Remote data access.
//!
//! - historical consumption CSVs (`history`)

pub mod history;

pub use history::*;
