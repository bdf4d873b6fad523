//! Translation codes, endpoint options and response shapes for the Biblia API.
//!
//! # Design
//! Response types mirror the JSON the remote service returns and are passed
//! through untouched. Fields the service sometimes omits are defaulted rather
//! than failing the whole response. Option structs serialize to camelCase in
//! field order, which is the order their keys appear on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

macro_rules! translations {
    ($($variant:ident => $code:tt),+ $(,)?) => {
        /// A Bible translation supported by the API.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum Translation {
            #[default]
            $(#[serde(rename = $code)] $variant,)+
        }

        impl Translation {
            pub const ALL: &'static [Translation] = &[$(Translation::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Translation::$variant => $code,)+
                }
            }
        }
    };
}

translations! {
    Asv => "asv",
    Darby => "darby",
    ArVanDyke => "ar-vandyke",
    Byz => "byz",
    Elzevir => "elzevir",
    Emphbbl => "emphbbl",
    ItDiodati1649 => "it-diodati1649",
    Kjv => "kjv",
    Kjv1900 => "kjv1900",
    Lsg => "lsg",
    EoZamenbib => "eo-zamenbib",
    Leb => "leb",
    Scrmorph => "scrmorph",
    FiRaamattu => "fi-raamattu",
    Rvr60 => "rvr60",
    Rva => "rva",
    BbSbbRusbt => "bb-sbb-rusbt",
    Scr => "scr",
    Tr1894mr => "tr1894mr",
    Svv => "svv",
    Stephens => "stephens",
    Tanakh => "tanakh",
    WbtcPtbrnt => "wbtc-ptbrnt",
    Wh1881mr => "wh1881mr",
    Ylt => "ylt",
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Translation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Translation::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ApiError::UnknownTranslation(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Filters for the bible listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBiblesOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bible: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_query: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    /// Maximum number of entries to return (all if unspecified).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceStyle {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Rendered form of the reference; the service defaults to long.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ReferenceStyle>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    /// Whether to tag chapter references without a verse; the service
    /// defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_chapters: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Verse,
    Fuzzy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preview {
    None,
    Text,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Relevance,
    Passage,
}

/// Search filters. `sort` and `passages` only apply with `SearchMode::Verse`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    /// Passages to search in, e.g. `Matthew-John`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
}

/// Pre-defined passage rendering styles. A style takes precedence over the
/// individual formatting flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassageStyle {
    FullyFormatted,
    OneVersePerLine,
    OneVersePerLineFullReference,
    Quotation,
    SimpleParagraphs,
    BibleTextOnly,
    OrationOneParagraph,
    OrationOneVersePerLine,
    OrationBibleParagraphs,
    FullyFormattedWithFootnotes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatting {
    All,
    Paragraph,
    Character,
    None,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassageOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<PassageStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<Formatting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_letter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footnotes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub each_verse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Request HTML wrapped in JSON instead of plain text. Selects the
    /// `.html.js` path and is not sent as a query parameter.
    #[serde(skip_serializing, default)]
    pub html: bool,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleList {
    pub bibles: Vec<BibleInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BibleInfo {
    pub bible: String,
    pub title: String,
    pub abbreviated_title: String,
    pub publication_date: String,
    pub languages: Vec<String>,
    pub publishers: Vec<String>,
    pub image_url: String,
    pub description: String,
    pub search_fields: Vec<String>,
    pub copyright: String,
    pub extended_copyright: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageText {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReference {
    pub passage: String,
    #[serde(default)]
    pub passages: Vec<ParsedPassage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPassage {
    pub passage: String,
    #[serde(default)]
    pub parts: PassageParts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PassageParts {
    pub book: String,
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
    pub end_chapter: Option<u32>,
    pub end_verse: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub results: Vec<ScanHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanHit {
    pub passage: String,
    pub text_index: usize,
    pub text_length: usize,
}

/// A three-way comparison value, `-1`, `0` or `1` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Ordering3 {
    Less,
    #[default]
    Equal,
    Greater,
}

impl TryFrom<i8> for Ordering3 {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Ordering3::Less),
            0 => Ok(Ordering3::Equal),
            1 => Ok(Ordering3::Greater),
            other => Err(format!("comparison value out of range: {other}")),
        }
    }
}

impl From<Ordering3> for i8 {
    fn from(value: Ordering3) -> Self {
        match value {
            Ordering3::Less => -1,
            Ordering3::Equal => 0,
            Ordering3::Greater => 1,
        }
    }
}

impl From<Ordering3> for std::cmp::Ordering {
    fn from(value: Ordering3) -> Self {
        match value {
            Ordering3::Less => std::cmp::Ordering::Less,
            Ordering3::Equal => std::cmp::Ordering::Equal,
            Ordering3::Greater => std::cmp::Ordering::Greater,
        }
    }
}

/// Structural relationship between two references, as computed remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub equal: bool,
    pub intersects: bool,
    pub compare: Ordering3,
    pub start_to_start: Ordering3,
    pub start_to_end: Ordering3,
    pub end_to_start: Ordering3,
    pub end_to_end: Ordering3,
    pub after: bool,
    pub before: bool,
    pub subset: bool,
    pub strict_subset: bool,
    pub superset: bool,
    pub strict_superset: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub result_count: u32,
    #[serde(default)]
    pub hit_count: u32,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub limit: u32,
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub title: String,
    pub preview: String,
}
