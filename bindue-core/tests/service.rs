//! Service facade over an in-memory page port.

use std::sync::Arc;

use async_trait::async_trait;
use bindue_core::{
    BinDueService, Category, CollectionPagePort, CouncilId, CouncilMeta, DateExtractor,
    ExtractError, MergePolicy, PortError, SectionMatch,
};
use chrono::NaiveDate;

// Dependencies of the library that this test target does not touch.
use regex as _;
use reqwest as _;
use serde as _;
use serde_json as _;
use thiserror as _;
use tracing as _;

struct FixedPage {
    meta: CouncilMeta,
    text: String,
}

impl FixedPage {
    fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            meta: CouncilMeta {
                id: CouncilId("test".to_owned()),
                name: "Test Council".to_owned(),
            },
            text: text.to_owned(),
        })
    }
}

#[async_trait]
impl CollectionPagePort for FixedPage {
    fn council(&self) -> &CouncilMeta {
        &self.meta
    }

    async fn collection_text(&self) -> Result<String, PortError> {
        Ok(self.text.clone())
    }
}

struct MissingPage(CouncilMeta);

#[async_trait]
impl CollectionPagePort for MissingPage {
    fn council(&self) -> &CouncilMeta {
        &self.0
    }

    async fn collection_text(&self) -> Result<String, PortError> {
        Err(PortError::ContainerNotFound("div.missing".to_owned()))
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

fn categories() -> Vec<Category> {
    vec![
        Category::from("General Waste"),
        Category::from("Food and Garden"),
    ]
}

#[tokio::test]
async fn check_flags_due_categories() {
    let page = FixedPage::new("General Waste\n31 October 2024\n\nFood and Garden\n01 November 2024");
    let service = BinDueService::new(page, categories());

    let check = service.check(date(2024, 11, 1)).await.expect("check succeeds");

    assert_eq!(check.due.reference(), date(2024, 11, 1));
    assert_eq!(
        check.due.due_categories().collect::<Vec<_>>(),
        [&Category::from("Food and Garden")]
    );
    assert_eq!(check.schedule.len(), 2);
    assert_eq!(service.council().name, "Test Council");
}

#[tokio::test]
async fn nothing_due_on_a_quiet_day() {
    let page = FixedPage::new("General Waste\n31 October 2024");
    let service = BinDueService::new(page, categories());

    let check = service.check(date(2024, 11, 2)).await.expect("check succeeds");
    assert!(!check.due.any_due());
}

#[tokio::test]
async fn malformed_date_surfaces_as_extract_error() {
    let page = FixedPage::new("General Waste\n32 Blorch 2024");
    let service = BinDueService::new(page, categories());

    let err = service.schedule().await.expect_err("malformed date");
    assert!(
        matches!(
            err,
            PortError::Extract(ExtractError::MalformedDate { .. })
        ),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn configured_policies_reach_the_extractor() {
    let page = FixedPage::new("General Waste\n31 October 2024\n\nGeneral Waste\n14 November 2024");
    let service = BinDueService::new(page, categories()).with_extractor(DateExtractor::new(
        SectionMatch::Substring,
        MergePolicy::Append,
    ));

    let schedule = service.schedule().await.expect("valid page");
    assert_eq!(
        schedule.get(&Category::from("General Waste")),
        Some(&[date(2024, 10, 31), date(2024, 11, 14)][..])
    );
}

#[tokio::test]
async fn port_failures_propagate() {
    let port = Arc::new(MissingPage(CouncilMeta {
        id: CouncilId("test".to_owned()),
        name: "Test Council".to_owned(),
    }));
    let service = BinDueService::new(port, categories());

    let err = service.schedule().await.expect_err("missing container");
    assert!(matches!(err, PortError::ContainerNotFound(_)), "unexpected error: {err}");
}
