//! Traits describing the page-fetching interface and shared error types.

use std::io;

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::extract::ExtractError;
use crate::model::CouncilMeta;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while fetching and reading a council's collection page.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Reading a saved page from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The page has no element matching the collection-dates selector.
    #[error("Collection dates container not found ({0})")]
    ContainerNotFound(String),
    /// The container selector could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
    /// The container text could not be turned into a schedule.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

#[async_trait]
/// Trait for council-specific sources of collection-page text.
pub trait CollectionPagePort: Send + Sync {
    /// Metadata describing the council handled by this port.
    fn council(&self) -> &CouncilMeta;

    /// Fetch the raw text of the collection-dates container, sections separated by blank lines.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the page cannot be loaded or lacks the container.
    async fn collection_text(&self) -> Result<String, PortError>;
}
