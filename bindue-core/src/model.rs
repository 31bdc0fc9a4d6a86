//! Domain data structures for councils, waste categories, and collection schedules.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::matcher::{self, CalendarDay};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a council whose bin-collection page bindue can read.
pub struct CouncilId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a council and its human-friendly name.
pub struct CouncilMeta {
    /// Unique identifier.
    pub id: CouncilId,
    /// Display name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Named waste stream such as "General Waste".
///
/// The name doubles as the substring searched for in the scraped page text.
pub struct Category(pub String);

impl Category {
    /// The category name as it appears on the page.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty name would match every section, so extraction ignores it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One blank-line-delimited block of the scraped text.
pub struct RawSection<'text> {
    /// Position among the non-empty sections of the text.
    pub index: usize,
    /// Section text, untrimmed.
    pub text: &'text str,
}

impl<'text> RawSection<'text> {
    /// Split `raw_text` on double line breaks, dropping whitespace-only blocks.
    pub fn split(raw_text: &'text str) -> impl Iterator<Item = RawSection<'text>> {
        raw_text
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .enumerate()
            .map(|(index, text)| RawSection { index, text })
    }

    /// Whether the category name occurs literally anywhere in this section.
    #[must_use]
    pub fn mentions(&self, category: &Category) -> bool {
        !category.is_empty() && self.text.contains(category.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Upcoming collection dates per category, in the caller's category order.
///
/// Every category handed to the extractor has an entry, possibly empty.
pub struct CollectionSchedule {
    entries: Vec<(Category, Vec<NaiveDate>)>,
}

impl CollectionSchedule {
    /// Schedule with every category bound to an empty date list.
    ///
    /// Repeated categories keep only their first position.
    #[must_use]
    pub fn empty<'cat, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = &'cat Category>,
    {
        let mut entries: Vec<(Category, Vec<NaiveDate>)> = Vec::new();
        for category in categories {
            if entries.iter().all(|(known, _)| known != category) {
                entries.push((category.clone(), Vec::new()));
            }
        }
        Self { entries }
    }

    /// Dates recorded for a category, or `None` if the category is unknown.
    #[must_use]
    pub fn get(&self, category: &Category) -> Option<&[NaiveDate]> {
        self.entries
            .iter()
            .find(|(known, _)| known == category)
            .map(|(_, dates)| dates.as_slice())
    }

    pub(crate) fn dates_mut(&mut self, category: &Category) -> Option<&mut Vec<NaiveDate>> {
        self.entries
            .iter_mut()
            .find(|(known, _)| known == category)
            .map(|(_, dates)| dates)
    }

    /// Categories in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter().map(|(category, _)| category)
    }

    /// Iterator over `(category, dates)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &[NaiveDate])> {
        self.entries
            .iter()
            .map(|(category, dates)| (category, dates.as_slice()))
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the schedule tracks no categories at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Which categories have a collection on the reference day.
    #[must_use]
    pub fn due_on<R: CalendarDay + ?Sized>(&self, reference: &R) -> DueReport {
        let entries = self
            .entries
            .iter()
            .map(|(category, dates)| (category.clone(), matcher::any_on(dates, reference)))
            .collect();
        DueReport {
            reference: reference.calendar_day(),
            entries,
        }
    }

    /// Earliest collection for a category on or after `from`.
    #[must_use]
    pub fn next_collection(&self, category: &Category, from: NaiveDate) -> Option<NaiveDate> {
        self.get(category)?
            .iter()
            .copied()
            .filter(|date| *date >= from)
            .min()
    }
}

impl Serialize for CollectionSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// "Due today" flag per category for one reference day.
pub struct DueReport {
    reference: NaiveDate,
    entries: Vec<(Category, bool)>,
}

impl DueReport {
    /// The calendar day the report was computed for.
    #[must_use]
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Whether the given category has a collection on the reference day.
    #[must_use]
    pub fn is_due(&self, category: &Category) -> Option<bool> {
        self.entries
            .iter()
            .find(|(known, _)| known == category)
            .map(|(_, due)| *due)
    }

    /// True if at least one category is due.
    #[must_use]
    pub fn any_due(&self) -> bool {
        self.entries.iter().any(|(_, due)| *due)
    }

    /// Due categories in schedule order.
    pub fn due_categories(&self) -> impl Iterator<Item = &Category> {
        self.entries
            .iter()
            .filter(|(_, due)| *due)
            .map(|(category, _)| category)
    }

    /// Iterator over `(category, due)` pairs in schedule order.
    pub fn iter(&self) -> impl Iterator<Item = (&Category, bool)> {
        self.entries.iter().map(|(category, due)| (category, *due))
    }
}

impl Serialize for DueReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
