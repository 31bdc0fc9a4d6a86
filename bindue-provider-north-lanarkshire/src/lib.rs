//! Provider implementation for North Lanarkshire Council's bin collection pages.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use scraper::{Html, Selector};
use tracing::{debug, warn};

use bindue_core::{
    model::{Category, CouncilId, CouncilMeta},
    ports::{CollectionPagePort, PortError},
};

const BASE_URL: &str = "https://www.northlanarkshire.gov.uk/bin-collection-dates";

/// Element holding the per-bin sections on the collection page.
pub const CONTAINER_SELECTOR: &str = "div.bin-collection-dates-container";

/// Property path (`UPRN/USRN`) used when none is configured.
pub const DEFAULT_PROPERTY: &str = "000118099475/48405709";

/// Bin types listed on North Lanarkshire collection pages, in page order.
pub const CATEGORY_NAMES: [&str; 4] = [
    "General Waste",
    "Blue-lidded Recycling Bin",
    "Food and Garden",
    "Glass, Metals, Plastics and Cartons",
];

/// Categories tracked by default.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    CATEGORY_NAMES.into_iter().map(Category::from).collect()
}

/// Live collection page for one property.
pub struct NorthLanarkshirePagePort {
    client: Client,
    meta: CouncilMeta,
    url: String,
}

impl NorthLanarkshirePagePort {
    /// Create a port for the property at `UPRN/USRN`, bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, property: &str) -> Self {
        let property = property.trim().trim_matches('/');
        Self {
            client,
            meta: council_meta(),
            url: format!("{BASE_URL}/{property}"),
        }
    }

    /// Page URL requested by this port.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CollectionPagePort for NorthLanarkshirePagePort {
    fn council(&self) -> &CouncilMeta {
        &self.meta
    }

    async fn collection_text(&self) -> Result<String, PortError> {
        debug!(url = %self.url, "requesting collection page");
        let html = fetch_text(self.client.get(&self.url)).await?;
        container_text(&html)
    }
}

/// Collection page saved to disk or held in memory, for offline runs.
pub struct SavedPagePort {
    meta: CouncilMeta,
    html: String,
}

impl SavedPagePort {
    /// Wrap an already loaded HTML document.
    #[must_use]
    pub fn new(html: String) -> Self {
        Self {
            meta: council_meta(),
            html,
        }
    }

    /// Load an HTML document from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Io`] if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PortError> {
        let html = fs::read_to_string(path)?;
        Ok(Self::new(html))
    }
}

#[async_trait]
impl CollectionPagePort for SavedPagePort {
    fn council(&self) -> &CouncilMeta {
        &self.meta
    }

    async fn collection_text(&self) -> Result<String, PortError> {
        container_text(&self.html)
    }
}

/// Build a live page port behind the core trait object.
#[must_use]
pub fn page_port(client: Client, property: &str) -> Arc<dyn CollectionPagePort> {
    Arc::new(NorthLanarkshirePagePort::new(client, property))
}

/// Text content of the first collection-dates container in `html`.
///
/// Text nodes are concatenated in document order, so the line breaks separating sections in the
/// page source are kept.
///
/// # Errors
///
/// Returns [`PortError::ContainerNotFound`] if the page has no such element.
pub fn container_text(html: &str) -> Result<String, PortError> {
    let selector = Selector::parse(CONTAINER_SELECTOR)
        .map_err(|err| PortError::InvalidSelector(err.to_string()))?;
    let document = Html::parse_document(html);

    let Some(container) = document.select(&selector).next() else {
        warn!(selector = CONTAINER_SELECTOR, "collection container missing from page");
        return Err(PortError::ContainerNotFound(CONTAINER_SELECTOR.to_owned()));
    };

    Ok(container.text().collect())
}

fn council_meta() -> CouncilMeta {
    CouncilMeta {
        id: CouncilId(String::from("north-lanarkshire")),
        name: String::from("North Lanarkshire Council"),
    }
}

// Small helper to fetch a page body with status handling.
async fn fetch_text(req: RequestBuilder) -> Result<String, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .text()
        .await
        .map_err(PortError::from)
}
