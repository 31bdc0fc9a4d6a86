use std::path::PathBuf;

use bindue_core::{Category, DateExtractor, MergePolicy, SectionMatch};
use bindue_provider_north_lanarkshire::{DEFAULT_PROPERTY, default_categories};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, ValueEnum};

/// Check whether any bin is due for collection on a given day.
#[derive(Debug, Parser)]
#[command(name = "bindue", version, about)]
pub(crate) struct Cli {
    /// Property path on the council site, as `UPRN/USRN`
    #[arg(long, env = "BINDUE_PROPERTY", default_value = DEFAULT_PROPERTY)]
    pub property: String,

    /// Read a saved collection page instead of fetching it
    #[arg(long, env = "BINDUE_HTML", value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Bin category to track; repeat or separate with ';' (defaults to the council's four bins)
    #[arg(
        long = "category",
        value_name = "NAME",
        env = "BINDUE_CATEGORIES",
        value_delimiter = ';',
        value_parser = parse_category
    )]
    pub categories: Vec<Category>,

    /// Reference day to check (defaults to today)
    #[arg(long, env = "BINDUE_DATE", value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// What to do when a category appears in more than one section
    #[arg(long, value_enum, env = "BINDUE_MERGE", default_value_t = MergeArg::Overwrite)]
    pub merge: MergeArg,

    /// How sections are assigned to categories
    #[arg(long = "match", value_enum, env = "BINDUE_MATCH", default_value_t = MatchArg::Substring)]
    pub section_match: MatchArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Also list the next collection for every category
    #[arg(long)]
    pub upcoming: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub(crate) fn categories(&self) -> Vec<Category> {
        if self.categories.is_empty() {
            default_categories()
        } else {
            self.categories.clone()
        }
    }

    pub(crate) fn extractor(&self) -> DateExtractor {
        DateExtractor::new(self.section_match.into(), self.merge.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum MergeArg {
    /// Keep the dates of the last matching section
    Overwrite,
    /// Keep the dates of every matching section
    Append,
    /// Fail when a category matches twice
    Reject,
}

impl From<MergeArg> for MergePolicy {
    fn from(arg: MergeArg) -> Self {
        match arg {
            MergeArg::Overwrite => MergePolicy::Overwrite,
            MergeArg::Append => MergePolicy::Append,
            MergeArg::Reject => MergePolicy::RejectDuplicate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum MatchArg {
    /// Every category named in a section owns it
    Substring,
    /// Only the longest category name in a section owns it
    Longest,
}

impl From<MatchArg> for SectionMatch {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Substring => SectionMatch::Substring,
            MatchArg::Longest => SectionMatch::LongestMatch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Human-readable lines
    Text,
    /// Schedule and due flags as JSON
    Json,
}

fn parse_category(raw: &str) -> Result<Category, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("category name must not be empty".to_owned());
    }
    Ok(Category::from(name))
}
