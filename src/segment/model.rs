//! Tariff groups and fee containers assembled by the segmenter.

use serde::Serialize;

/// Metadata lines captured at the top of a tariff schedule.
///
/// Each field holds the whole source line it was captured from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TariffMetadata {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tariff: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_days_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_after_free_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important_info: Option<String>,
}

impl TariffMetadata {
    /// Groups sharing type, effective date and expiration date are the same
    /// schedule, even when printed on different pages.
    pub fn same_schedule(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.effective_date == other.effective_date
            && self.expiration_date == other.expiration_date
    }

    /// Present fields in output order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        [
            &self.kind,
            &self.tariff,
            &self.free_days_rule,
            &self.days_after_free_rule,
            &self.effective_date,
            &self.expiration_date,
            &self.important_info,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
    }
}

/// How a container stores its lines, fixed by its name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Demurrage and detention share one stream.
    Merged,
    /// Demurrage and detention are kept apart.
    Splitted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LineStream {
    Merged(Vec<String>),
    Splitted {
        demurrage: Vec<String>,
        detention: Vec<String>,
    },
}

/// A named fee block, e.g. "DRY CONTAINERS SPLITTED".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub name: String,
    pub lines: LineStream,
}

impl Container {
    pub fn new(name: impl Into<String>, kind: ContainerKind) -> Self {
        let lines = match kind {
            ContainerKind::Merged => LineStream::Merged(Vec::new()),
            ContainerKind::Splitted => LineStream::Splitted {
                demurrage: Vec::new(),
                detention: Vec::new(),
            },
        };
        Self {
            name: name.into(),
            lines,
        }
    }

    pub fn kind(&self) -> ContainerKind {
        match self.lines {
            LineStream::Merged(_) => ContainerKind::Merged,
            LineStream::Splitted { .. } => ContainerKind::Splitted,
        }
    }

    /// All lines in output order: demurrage before detention.
    pub fn output_lines(&self) -> impl Iterator<Item = &str> {
        let (first, second) = match &self.lines {
            LineStream::Merged(lines) => (lines, None),
            LineStream::Splitted {
                demurrage,
                detention,
            } => (demurrage, Some(detention)),
        };
        first
            .iter()
            .chain(second.into_iter().flatten())
            .map(String::as_str)
    }
}

/// One versioned fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TariffGroup {
    pub metadata: TariffMetadata,
    pub containers: Vec<Container>,
}
