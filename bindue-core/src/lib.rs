//! Core types and service wiring for bindue, the "is a bin due today?" checker.

/// Turning scraped collection text into per-category date lists.
pub mod extract;
/// Calendar-day matching of collection dates against a reference date.
pub mod matcher;
/// Domain models shared by the extractor, providers and reporters.
pub mod model;
/// Traits describing the page-fetching interface and its errors.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;

pub use extract::*;
pub use matcher::*;
pub use model::*;
pub use ports::*;
pub use service::*;

// Dev-dependencies used only by the integration tests.
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tokio as _;
