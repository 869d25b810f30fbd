//! Segmentation of normalized document text into tariff groups.
//!
//! A single pass over the document's lines. Each line is classified against
//! the current [`ParseContext`] and the matching transition is applied:
//!
//! | Line | Effect |
//! |------|--------|
//! | `Page N:` | metadata snapshot restarts |
//! | footer / notice | dropped |
//! | metadata (`IMPORT`, `EXPIRATION DATE`, ...) | fills the snapshot; the expiration date resolves the group |
//! | `<NAME> MERGED` / `<NAME> SPLITTED` | opens a container |
//! | `DEMURRAGE`, `DETENTION`, `DEMURRAGE DETENTION` | sets the split type |
//! | `SLAB ...`, `<n> FREE DAYS`, `From ...` | appended to the container's stream(s) |
//!
//! Groups with the same type, effective date and expiration date are merged,
//! even across pages.

pub mod classify;
pub mod context;
pub mod model;

use crate::config::SegmentConfig;

pub use classify::{clean_lines, Classifier, LineKind, MetadataField};
pub use context::{ParseContext, SplitType, Stage};
pub use model::{Container, ContainerKind, LineStream, TariffGroup, TariffMetadata};

/// Segment a whole document's text into tariff groups, in discovery order.
pub fn segment(text: &str, config: &SegmentConfig) -> Vec<TariffGroup> {
    let classifier = Classifier::new(&config.boilerplate);
    let mut ctx = ParseContext::new(config.reset_split_on_container);

    for line in clean_lines(text) {
        let kind = classifier.classify(&line, ctx.snapshot(), ctx.stage());
        ctx.apply(kind, line);
    }

    ctx.into_groups()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
Page 1:
CMA CGM
IMPORT DEMURRAGE & DETENTION
Tariff in USD per container
Free days counted in calendar days
Effective date : 01/10/2026
Expiration date : 31/12/2026
";

    #[test]
    fn builds_group_with_metadata() {
        let groups = segment(HEADER, &SegmentConfig::default());
        assert_eq!(groups.len(), 1);
        let meta = &groups[0].metadata;
        assert_eq!(meta.kind.as_deref(), Some("IMPORT DEMURRAGE & DETENTION"));
        assert_eq!(meta.tariff.as_deref(), Some("Tariff in USD per container"));
        assert_eq!(meta.free_days_rule.as_deref(), Some("Free days counted in calendar days"));
        assert_eq!(meta.effective_date.as_deref(), Some("Effective date : 01/10/2026"));
        assert_eq!(meta.expiration_date.as_deref(), Some("Expiration date : 31/12/2026"));
        assert!(meta.days_after_free_rule.is_none());
    }

    #[test]
    fn lines_before_a_schedule_are_ignored() {
        let text = "Page 1:\nDRY MERGED\nFrom 1st to 5th 0 0 0\nDEMURRAGE\n";
        assert!(segment(text, &SegmentConfig::default()).is_empty());
    }

    #[test]
    fn collapsed_whitespace_reaches_metadata() {
        let text = "Page 1:\nIMPORT\nTARIFF   IN  USD\nEXPIRATION DATE 1\n";
        let groups = segment(text, &SegmentConfig::default());
        assert_eq!(groups[0].metadata.tariff.as_deref(), Some("TARIFF IN USD"));
    }

    #[test]
    fn repeated_schedule_merges_across_pages() {
        let text = format!(
            "{HEADER}DRY MERGED\nFrom 1st to 5th 0 0 0\n\n{}REEFER MERGED\nFrom 1st to 3rd 0 0 0\n",
            HEADER.replace("Page 1:", "Page 2:")
        );
        let groups = segment(&text, &SegmentConfig::default());
        assert_eq!(groups.len(), 1);
        let names: Vec<_> = groups[0].containers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["DRY MERGED", "REEFER MERGED"]);
    }

    #[test]
    fn different_expiration_opens_new_group() {
        let text = format!(
            "{HEADER}DRY MERGED\n{}",
            HEADER
                .replace("Page 1:", "Page 2:")
                .replace("31/12/2026", "31/03/2027")
        );
        let groups = segment(&text, &SegmentConfig::default());
        assert_eq!(groups.len(), 2);
        assert!(groups[1].containers.is_empty());
    }

    #[test]
    fn boilerplate_is_dropped() {
        let text = format!("{HEADER}DRY MERGED\nFrom 1st to 5th 0 0 0 Powered by TCPDF\n");
        let groups = segment(&text, &SegmentConfig::default());
        let LineStream::Merged(lines) = &groups[0].containers[0].lines else {
            panic!("expected merged container");
        };
        assert!(lines.is_empty());
    }

    #[test]
    fn container_carries_over_page_break() {
        let text = format!("{HEADER}DRY MERGED\nPage 2:\nCMA CGM\nFrom 6th onwards 50 100 100\n");
        let groups = segment(&text, &SegmentConfig::default());
        let LineStream::Merged(lines) = &groups[0].containers[0].lines else {
            panic!("expected merged container");
        };
        assert_eq!(lines, &["From 6th onwards 50 100 100"]);
    }
}
