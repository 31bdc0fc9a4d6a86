//! High-level service facade tying a page port to the extractor.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::extract::DateExtractor;
use crate::model::{Category, CollectionSchedule, CouncilMeta, DueReport};
use crate::ports::{CollectionPagePort, PortError};

/// Schedule and due flags produced by one check.
#[derive(Debug, Clone)]
pub struct CollectionCheck {
    /// Dates found per category.
    pub schedule: CollectionSchedule,
    /// Per-category "due on the reference day" flags.
    pub due: DueReport,
}

/// Public entry point for loading a schedule and checking it against a date.
///
/// Each call fetches afresh; nothing is cached between calls.
pub struct BinDueService {
    port: Arc<dyn CollectionPagePort>,
    categories: Vec<Category>,
    extractor: DateExtractor,
}

impl BinDueService {
    /// Create a new service reading `categories` from the given page port.
    #[must_use]
    pub fn new(port: Arc<dyn CollectionPagePort>, categories: Vec<Category>) -> Self {
        Self {
            port,
            categories,
            extractor: DateExtractor::default(),
        }
    }

    /// Replace the default extraction policies.
    #[must_use]
    pub fn with_extractor(mut self, extractor: DateExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Council served by the underlying port.
    #[must_use]
    pub fn council(&self) -> &CouncilMeta {
        self.port.council()
    }

    /// Categories tracked by this service, in report order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Fetch the collection page and extract the schedule.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the page cannot be fetched or a date on it is malformed.
    pub async fn schedule(&self) -> Result<CollectionSchedule, PortError> {
        let council = self.port.council();
        let text = self.port.collection_text().await?;
        debug!(council = %council.name, bytes = text.len(), "fetched collection text");

        let schedule = self.extractor.extract(&text, &self.categories)?;
        info!(
            council = %council.name,
            categories = schedule.len(),
            dates = schedule.iter().map(|(_, dates)| dates.len()).sum::<usize>(),
            "extracted collection schedule"
        );
        Ok(schedule)
    }

    /// Load the schedule and flag the categories due on `reference`.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if loading the schedule fails.
    pub async fn check(&self, reference: NaiveDate) -> Result<CollectionCheck, PortError> {
        let schedule = self.schedule().await?;
        let due = schedule.due_on(&reference);
        for category in due.due_categories() {
            debug!(%category, %reference, "collection due");
        }
        Ok(CollectionCheck { schedule, due })
    }
}
