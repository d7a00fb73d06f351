//! Forecast request construction and the scoring-endpoint client.
//!
//! - date-range expansion + payload construction (`request`)
//! - blocking HTTP calls + validating response parse (`client`)

pub mod client;
pub mod request;

pub use client::*;
pub use request::*;
