//! Extraction of per-category collection dates from scraped page text.
//!
//! The page text is split into sections on blank lines. A section belongs to every category whose
//! name it contains (or, with [`SectionMatch::LongestMatch`], only to the longest such name), and
//! every `DD MonthName YYYY` date in an owned section is parsed for its owners.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use chrono::{Month, NaiveDate};
use regex::{Captures, Regex};

use crate::model::{Category, CollectionSchedule, RawSection};

/// Two digits, whitespace, a word, whitespace, four digits: "31 October 2024".
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})\s(\w+)\s(\d{4})").expect("date pattern is a valid regex")
});

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors raised while extracting a schedule.
pub enum ExtractError {
    /// A date-shaped substring in an owned section did not parse.
    #[error("Malformed date {text:?}: {reason}")]
    MalformedDate {
        /// The matched substring.
        text: String,
        /// Which part of the date was rejected.
        reason: DateFault,
    },
    /// A category owned more than one section under [`MergePolicy::RejectDuplicate`].
    #[error("Category {category} found in sections {first_section} and {second_section}")]
    DuplicateSection {
        /// The category named twice.
        category: Category,
        /// Index of the first owning section.
        first_section: usize,
        /// Index of the section that repeated it.
        second_section: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Reason a date-shaped substring was rejected.
pub enum DateFault {
    /// Day field is not two ASCII digits.
    Day,
    /// Month token is not a full English month name.
    MonthName,
    /// Year field is not four ASCII digits, or is before year 1.
    Year,
    /// Fields parse but name no real day, e.g. 31 April.
    OutOfRange,
}

impl fmt::Display for DateFault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DateFault::Day => "invalid day",
            DateFault::MonthName => "unrecognised month name",
            DateFault::Year => "invalid year",
            DateFault::OutOfRange => "day out of range for month",
        };
        formatter.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Which categories a section is assigned to.
pub enum SectionMatch {
    /// Every category whose name occurs in the section.
    #[default]
    Substring,
    /// Only the longest contained category name; earlier categories win ties.
    LongestMatch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// How dates from repeated sections for one category combine.
pub enum MergePolicy {
    /// The last owning section replaces earlier dates.
    #[default]
    Overwrite,
    /// Dates from all owning sections are kept in section order.
    Append,
    /// A second owning section is an error.
    RejectDuplicate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Configurable schedule extractor. The default matches categories by substring and overwrites.
pub struct DateExtractor {
    /// Section ownership policy.
    pub section_match: SectionMatch,
    /// Merge policy for categories owning several sections.
    pub merge: MergePolicy,
}

impl DateExtractor {
    /// Construct an extractor with explicit policies.
    #[must_use]
    pub fn new(section_match: SectionMatch, merge: MergePolicy) -> Self {
        Self {
            section_match,
            merge,
        }
    }

    /// Parse `raw_text` into a schedule covering every entry of `categories`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MalformedDate`] on the first date in an owned section that fails to
    /// parse, and [`ExtractError::DuplicateSection`] when [`MergePolicy::RejectDuplicate`] is set
    /// and a category owns two sections. No partial schedule is returned.
    pub fn extract(
        &self,
        raw_text: &str,
        categories: &[Category],
    ) -> Result<CollectionSchedule, ExtractError> {
        let mut schedule = CollectionSchedule::empty(categories);
        let unique: Vec<Category> = schedule.categories().cloned().collect();
        let mut owned_by: Vec<(&Category, usize)> = Vec::new();

        let text = normalize_line_breaks(raw_text);
        for section in RawSection::split(&text) {
            let owners = self.owners(&section, &unique);
            if owners.is_empty() {
                continue;
            }

            let dates = parse_dates(section.text)?;

            for category in owners {
                if let Some(&(_, first_section)) =
                    owned_by.iter().find(|(known, _)| *known == category)
                {
                    if self.merge == MergePolicy::RejectDuplicate {
                        return Err(ExtractError::DuplicateSection {
                            category: category.clone(),
                            first_section,
                            second_section: section.index,
                        });
                    }
                } else {
                    owned_by.push((category, section.index));
                }

                let Some(slot) = schedule.dates_mut(category) else {
                    continue;
                };
                match self.merge {
                    MergePolicy::Append => slot.extend_from_slice(&dates),
                    MergePolicy::Overwrite | MergePolicy::RejectDuplicate => {
                        slot.clone_from(&dates);
                    }
                }
            }
        }

        Ok(schedule)
    }

    fn owners<'cat>(
        &self,
        section: &RawSection<'_>,
        categories: &'cat [Category],
    ) -> Vec<&'cat Category> {
        let mentioned = categories
            .iter()
            .filter(|category| section.mentions(category));

        match self.section_match {
            SectionMatch::Substring => mentioned.collect(),
            SectionMatch::LongestMatch => mentioned
                .fold(None::<&Category>, |best, category| match best {
                    Some(current) if current.as_str().len() >= category.as_str().len() => {
                        Some(current)
                    }
                    _ => Some(category),
                })
                .into_iter()
                .collect(),
        }
    }
}

/// Extract a schedule with the default policies.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedDate`] if any date in a section owned by a category fails to
/// parse.
pub fn extract(raw_text: &str, categories: &[Category]) -> Result<CollectionSchedule, ExtractError> {
    DateExtractor::default().extract(raw_text, categories)
}

/// Parse every `DD MonthName YYYY` occurrence in `text`, in order of appearance.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedDate`] for the first occurrence that is not a real date.
pub fn parse_dates(text: &str) -> Result<Vec<NaiveDate>, ExtractError> {
    DATE_PATTERN.captures_iter(text).map(|caps| parse_date(&caps)).collect()
}

fn parse_date(caps: &Captures<'_>) -> Result<NaiveDate, ExtractError> {
    let field = |group: usize| caps.get(group).map_or("", |found| found.as_str());
    let malformed = |reason: DateFault| ExtractError::MalformedDate {
        text: field(0).to_owned(),
        reason,
    };

    let day = ascii_number(field(1)).ok_or_else(|| malformed(DateFault::Day))?;
    let month = full_month(field(2)).ok_or_else(|| malformed(DateFault::MonthName))?;
    let year = ascii_number(field(3))
        .and_then(|year| i32::try_from(year).ok())
        .filter(|year| *year >= 1)
        .ok_or_else(|| malformed(DateFault::Year))?;

    NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
        .ok_or_else(|| malformed(DateFault::OutOfRange))
}

// `\d` is Unicode-aware, so non-ASCII digits reach this point and are rejected here.
fn ascii_number(digits: &str) -> Option<u32> {
    if digits.bytes().all(|byte| byte.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

// chrono also accepts three-letter abbreviations; only full names are a valid collection date.
fn full_month(token: &str) -> Option<Month> {
    let month = token.parse::<Month>().ok()?;
    month.name().eq_ignore_ascii_case(token).then_some(month)
}

fn normalize_line_breaks(raw_text: &str) -> Cow<'_, str> {
    if raw_text.contains('\r') {
        Cow::Owned(raw_text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(raw_text)
    }
}
