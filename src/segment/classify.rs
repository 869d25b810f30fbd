//! Line classification for the segmenter.
//!
//! Each cleaned line maps to exactly one [`LineKind`]. Tests run in a fixed
//! priority order and some are gated on the parser's [`Stage`], so the same
//! text can classify differently depending on what has been seen so far
//! (e.g. "5 FREE DAYS" is the free-days rule until that rule is known, and a
//! fee line afterwards).

use std::sync::LazyLock;

use regex::Regex;

use super::context::{SplitType, Stage};
use super::model::{ContainerKind, TariffMetadata};

static PAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Page \d+:$").expect("valid page marker regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{00A0}]{2,}").expect("valid whitespace regex"));

/// Applied to the upper-cased line.
static CONTAINER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9\s'’/.\-]+?(MERGED|SPLITTED)$").expect("valid container header regex")
});

/// Applied to the upper-cased line.
static FREE_DAYS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\s+FREE DAYS(?:\s+\d+\s+FREE DAYS)?$").expect("valid free days regex")
});

const PERIOD_PATTERN: &str = r"(?i)Fr[o]?[nm]\s*(?:day\s*)?(\d+)(?:st|nd|rd|th)?\s*(?:to|until)?\s*(?:day\s*)?(\d+)?(?:st|nd|rd|th)?\s*(ONWARDS?)?";

/// "From 1st to 5th", "Fron day 6 until 10th", "From 11th onwards".
pub(crate) static PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PERIOD_PATTERN).expect("valid period regex"));

/// A period followed by its amounts; used to split side-by-side rows.
pub(crate) static PERIOD_WITH_AMOUNTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{PERIOD_PATTERN}\s*\d+(?:\s+\d+)*")).expect("valid period row regex")
});

/// Metadata fields in capture priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Type,
    Tariff,
    FreeDaysRule,
    DaysAfterFreeRule,
    EffectiveDate,
    ExpirationDate,
}

impl MetadataField {
    pub const PRIORITY: [Self; 6] = [
        Self::Type,
        Self::Tariff,
        Self::FreeDaysRule,
        Self::DaysAfterFreeRule,
        Self::EffectiveDate,
        Self::ExpirationDate,
    ];

    /// Whether the upper-cased line carries this field.
    fn matches(self, upper: &str) -> bool {
        match self {
            Self::Type => upper.contains("IMPORT") || upper.contains("EXPORT"),
            Self::Tariff => upper.contains("TARIFF IN USD"),
            Self::FreeDaysRule => upper.contains("FREE DAYS"),
            Self::DaysAfterFreeRule => upper.contains("DAYS AFTER FREE DAYS"),
            Self::EffectiveDate => upper.contains("EFFECTIVE DATE"),
            Self::ExpirationDate => upper.contains("EXPIRATION DATE"),
        }
    }

    pub fn slot(self, meta: &mut TariffMetadata) -> &mut Option<String> {
        match self {
            Self::Type => &mut meta.kind,
            Self::Tariff => &mut meta.tariff,
            Self::FreeDaysRule => &mut meta.free_days_rule,
            Self::DaysAfterFreeRule => &mut meta.days_after_free_rule,
            Self::EffectiveDate => &mut meta.effective_date,
            Self::ExpirationDate => &mut meta.expiration_date,
        }
    }

    fn is_known(self, meta: &TariffMetadata) -> bool {
        let value = match self {
            Self::Type => &meta.kind,
            Self::Tariff => &meta.tariff,
            Self::FreeDaysRule => &meta.free_days_rule,
            Self::DaysAfterFreeRule => &meta.days_after_free_rule,
            Self::EffectiveDate => &meta.effective_date,
            Self::ExpirationDate => &meta.expiration_date,
        };
        value.is_some()
    }
}

/// What a cleaned line means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Start of a new page: the metadata snapshot restarts.
    PageMarker,
    /// Footer or notice.
    Boilerplate,
    Metadata(MetadataField),
    ContainerHeader(ContainerKind),
    /// `DEMURRAGE`, `DETENTION` or `DEMURRAGE DETENTION`.
    FeeHeader(SplitType),
    /// Column header row ("SLAB 20' 40' 45'").
    Slab,
    /// "5 FREE DAYS" or "5 FREE DAYS 7 FREE DAYS".
    FreeDays,
    /// A fee row opening with a period.
    Period,
    Unrecognized,
}

/// Classifies cleaned lines.
pub struct Classifier<'a> {
    boilerplate: &'a [String],
}

impl<'a> Classifier<'a> {
    pub fn new(boilerplate: &'a [String]) -> Self {
        Self { boilerplate }
    }

    pub fn classify(&self, line: &str, snapshot: &TariffMetadata, stage: Stage) -> LineKind {
        if PAGE_MARKER.is_match(line) {
            return LineKind::PageMarker;
        }
        if self.boilerplate.iter().any(|marker| line.contains(marker.as_str())) {
            return LineKind::Boilerplate;
        }

        let upper = line.to_uppercase();

        if let Some(field) = MetadataField::PRIORITY
            .into_iter()
            .find(|field| !field.is_known(snapshot) && field.matches(&upper))
        {
            return LineKind::Metadata(field);
        }

        if stage.accepts_containers() {
            if let Some(caps) = CONTAINER_HEADER.captures(&upper) {
                let kind = if &caps[1] == "MERGED" {
                    ContainerKind::Merged
                } else {
                    ContainerKind::Splitted
                };
                return LineKind::ContainerHeader(kind);
            }
        }

        if !stage.accepts_fee_lines() {
            return LineKind::Unrecognized;
        }

        match upper.as_str() {
            "DEMURRAGE DETENTION" => return LineKind::FeeHeader(SplitType::Both),
            "DETENTION" => return LineKind::FeeHeader(SplitType::Detention),
            "DEMURRAGE" => return LineKind::FeeHeader(SplitType::Demurrage),
            _ => {}
        }

        if upper.starts_with("SLAB") {
            LineKind::Slab
        } else if FREE_DAYS.is_match(&upper) {
            LineKind::FreeDays
        } else if PERIOD.is_match(line) {
            LineKind::Period
        } else {
            LineKind::Unrecognized
        }
    }
}

/// Split document text into trimmed, non-empty lines with whitespace runs
/// collapsed to a single space.
pub fn clean_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| WHITESPACE_RUN.replace_all(line, " ").trim().to_string())
}
