//! Parser state for one document and the transition applied per line kind.

use tracing::debug;

use super::classify::{LineKind, MetadataField, PERIOD_WITH_AMOUNTS};
use super::model::{Container, ContainerKind, LineStream, TariffGroup, TariffMetadata};

/// Which stream(s) of a splitted container receive fee lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitType {
    #[default]
    None,
    Demurrage,
    Detention,
    /// Demurrage and detention printed side by side on each line.
    Both,
}

/// Where the parser stands, derived from the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// No schedule identified on this page and no container opened yet.
    AwaitingSchedule,
    /// No schedule identified on this page yet, but the container opened on
    /// an earlier page still receives fee lines.
    CarryingContainer,
    /// Schedule resolved to a group; no container opened yet.
    ScheduleOpen,
    InContainer,
}

impl Stage {
    pub fn accepts_containers(self) -> bool {
        matches!(self, Self::ScheduleOpen | Self::InContainer)
    }

    pub fn accepts_fee_lines(self) -> bool {
        matches!(self, Self::CarryingContainer | Self::InContainer)
    }
}

/// Mutable state threaded through every line of one document.
#[derive(Debug, Default)]
pub struct ParseContext {
    groups: Vec<TariffGroup>,
    /// Metadata seen since the last page marker.
    snapshot: TariffMetadata,
    group: Option<usize>,
    /// `(group, container)` indices of the container receiving fee lines.
    container: Option<(usize, usize)>,
    split: SplitType,
    reset_split_on_container: bool,
}

impl ParseContext {
    pub fn new(reset_split_on_container: bool) -> Self {
        Self {
            reset_split_on_container,
            ..Self::default()
        }
    }

    pub fn stage(&self) -> Stage {
        match (self.snapshot.expiration_date.is_some(), self.container.is_some()) {
            (false, false) => Stage::AwaitingSchedule,
            (false, true) => Stage::CarryingContainer,
            (true, false) => Stage::ScheduleOpen,
            (true, true) => Stage::InContainer,
        }
    }

    pub fn snapshot(&self) -> &TariffMetadata {
        &self.snapshot
    }

    pub fn split(&self) -> SplitType {
        self.split
    }

    pub fn groups(&self) -> &[TariffGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<TariffGroup> {
        self.groups
    }

    /// Apply the transition for a classified line.
    pub fn apply(&mut self, kind: LineKind, line: String) {
        match kind {
            LineKind::PageMarker => self.snapshot = TariffMetadata::default(),
            LineKind::Boilerplate | LineKind::Unrecognized => {}
            LineKind::Metadata(field) => self.capture(field, line),
            LineKind::ContainerHeader(kind) => self.open_container(line, kind),
            LineKind::FeeHeader(split) => self.set_split(split),
            LineKind::Slab => self.route_slab(line),
            LineKind::FreeDays => self.route_free_days(&line),
            LineKind::Period => self.route_period(line),
        }
    }

    fn capture(&mut self, field: MetadataField, line: String) {
        *field.slot(&mut self.snapshot) = Some(line);
        if field == MetadataField::ExpirationDate {
            self.resolve_group();
        }
    }

    fn resolve_group(&mut self) {
        let existing = self
            .groups
            .iter()
            .position(|group| group.metadata.same_schedule(&self.snapshot));

        let index = existing.unwrap_or_else(|| {
            debug!(
                "New tariff group: {}",
                self.snapshot.kind.as_deref().unwrap_or("<untyped>")
            );
            self.groups.push(TariffGroup {
                metadata: self.snapshot.clone(),
                containers: Vec::new(),
            });
            self.groups.len() - 1
        });
        self.group = Some(index);
    }

    fn open_container(&mut self, name: String, kind: ContainerKind) {
        let Some(group_idx) = self.group else {
            return;
        };
        debug!("Opening {kind:?} container: {name}");
        let containers = &mut self.groups[group_idx].containers;
        containers.push(Container::new(name, kind));
        self.container = Some((group_idx, containers.len() - 1));
        if self.reset_split_on_container {
            self.split = SplitType::None;
        }
    }

    fn current(&mut self) -> Option<&mut Container> {
        let (g, c) = self.container?;
        self.groups.get_mut(g)?.containers.get_mut(c)
    }

    fn set_split(&mut self, split: SplitType) {
        self.split = split;
        let Some(container) = self.current() else {
            return;
        };
        if let LineStream::Splitted {
            demurrage,
            detention,
        } = &mut container.lines
        {
            if matches!(split, SplitType::Demurrage | SplitType::Both) {
                demurrage.push("DEMURRAGE".to_string());
            }
            if matches!(split, SplitType::Detention | SplitType::Both) {
                detention.push("DETENTION".to_string());
            }
        }
    }

    /// Column header line. Splitted containers get it in both streams; with
    /// both tables on one line it is cut at the second "SLAB".
    ///
    /// A `Both` line without a second "SLAB" leaves an empty demurrage header
    /// and sends the whole line to detention.
    fn route_slab(&mut self, line: String) {
        let split = self.split;
        let Some(container) = self.current() else {
            return;
        };
        match &mut container.lines {
            LineStream::Merged(lines) => lines.push(line),
            LineStream::Splitted {
                demurrage,
                detention,
            } if split == SplitType::Both => {
                let at = second_occurrence(&line, "SLAB").unwrap_or(0);
                demurrage.push(line[..at].trim().to_string());
                detention.push(line[at..].trim().to_string());
            }
            LineStream::Splitted {
                demurrage,
                detention,
            } => {
                demurrage.push(line.clone());
                detention.push(line);
            }
        }
    }

    fn route_free_days(&mut self, line: &str) {
        let split = self.split;
        let Some(container) = self.current() else {
            return;
        };
        match &mut container.lines {
            LineStream::Merged(lines) => lines.push(line.to_string()),
            LineStream::Splitted {
                demurrage,
                detention,
            } => match split {
                SplitType::Both => {
                    let counts: Vec<&str> = line
                        .split(|c: char| !c.is_ascii_digit())
                        .filter(|s| !s.is_empty())
                        .collect();
                    if let Some(first) = counts.first() {
                        let second = counts.get(1).unwrap_or(first);
                        demurrage.push(format!("{first} FREE DAYS"));
                        detention.push(format!("{second} FREE DAYS"));
                    }
                }
                SplitType::Demurrage => demurrage.push(line.to_string()),
                SplitType::Detention => detention.push(line.to_string()),
                SplitType::None => {}
            },
        }
    }

    fn route_period(&mut self, line: String) {
        let split = self.split;
        let Some(container) = self.current() else {
            return;
        };
        match &mut container.lines {
            LineStream::Merged(lines) => lines.push(line),
            LineStream::Splitted {
                demurrage,
                detention,
            } => match split {
                SplitType::Both => {
                    let starts: Vec<usize> =
                        PERIOD_WITH_AMOUNTS.find_iter(&line).map(|m| m.start()).collect();
                    if let [_, second] = starts[..] {
                        demurrage.push(line[..second].trim().to_string());
                        detention.push(line[second..].trim().to_string());
                    } else {
                        demurrage.push(line.clone());
                        detention.push(line);
                    }
                }
                SplitType::Demurrage => demurrage.push(line),
                SplitType::Detention => detention.push(line),
                SplitType::None => {}
            },
        }
    }
}

/// Byte offset of the second ASCII-case-insensitive occurrence of `needle`.
fn second_occurrence(haystack: &str, needle: &str) -> Option<usize> {
    let mut hits = haystack.char_indices().map(|(i, _)| i).filter(|&i| {
        haystack
            .get(i..i + needle.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(needle))
    });
    hits.next()?;
    hits.next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_schedule(ctx: &mut ParseContext) {
        ctx.apply(LineKind::Metadata(MetadataField::Type), "IMPORT".into());
        ctx.apply(
            LineKind::Metadata(MetadataField::EffectiveDate),
            "EFFECTIVE DATE 01/01".into(),
        );
        ctx.apply(
            LineKind::Metadata(MetadataField::ExpirationDate),
            "EXPIRATION DATE 31/12".into(),
        );
    }

    fn splitted(ctx: &ParseContext, group: usize, container: usize) -> (Vec<String>, Vec<String>) {
        match &ctx.groups()[group].containers[container].lines {
            LineStream::Splitted {
                demurrage,
                detention,
            } => (demurrage.clone(), detention.clone()),
            LineStream::Merged(_) => panic!("expected splitted container"),
        }
    }

    #[test]
    fn stage_progression() {
        let mut ctx = ParseContext::default();
        assert_eq!(ctx.stage(), Stage::AwaitingSchedule);
        open_schedule(&mut ctx);
        assert_eq!(ctx.stage(), Stage::ScheduleOpen);
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Merged), "DRY MERGED".into());
        assert_eq!(ctx.stage(), Stage::InContainer);
        ctx.apply(LineKind::PageMarker, "Page 2:".into());
        assert_eq!(ctx.stage(), Stage::CarryingContainer);
        assert!(ctx.snapshot().kind.is_none());
    }

    #[test]
    fn same_schedule_on_later_page_reuses_group() {
        let mut ctx = ParseContext::default();
        open_schedule(&mut ctx);
        assert_eq!(ctx.groups().len(), 1);
        ctx.apply(LineKind::PageMarker, "Page 2:".into());
        open_schedule(&mut ctx);
        assert_eq!(ctx.groups().len(), 1);
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Merged), "REEFER MERGED".into());
        assert_eq!(ctx.groups()[0].containers.len(), 1);
    }

    #[test]
    fn both_split_routes_headers_and_free_days() {
        let mut ctx = ParseContext::default();
        open_schedule(&mut ctx);
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Splitted), "DRY SPLITTED".into());
        ctx.apply(LineKind::FeeHeader(SplitType::Both), "DEMURRAGE DETENTION".into());
        ctx.apply(LineKind::FreeDays, "5 FREE DAYS 7 FREE DAYS".into());
        ctx.apply(LineKind::Slab, "SLAB 20' 40' 45' SLAB 20' 40' 45'".into());
        ctx.apply(
            LineKind::Period,
            "From 1st to 5th 0 0 0 From 1st to 3rd 5 10 15".into(),
        );
        let (dem, det) = splitted(&ctx, 0, 0);
        assert_eq!(
            dem,
            ["DEMURRAGE", "5 FREE DAYS", "SLAB 20' 40' 45'", "From 1st to 5th 0 0 0"]
        );
        assert_eq!(
            det,
            ["DETENTION", "7 FREE DAYS", "SLAB 20' 40' 45'", "From 1st to 3rd 5 10 15"]
        );
    }

    #[test]
    fn single_free_days_count_is_shared() {
        let mut ctx = ParseContext::default();
        open_schedule(&mut ctx);
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Splitted), "DRY SPLITTED".into());
        ctx.apply(LineKind::FeeHeader(SplitType::Both), "DEMURRAGE DETENTION".into());
        ctx.apply(LineKind::FreeDays, "4 FREE DAYS".into());
        let (dem, det) = splitted(&ctx, 0, 0);
        assert_eq!(dem[1], "4 FREE DAYS");
        assert_eq!(det[1], "4 FREE DAYS");
    }

    #[test]
    fn unsplittable_period_line_is_duplicated() {
        let mut ctx = ParseContext::default();
        open_schedule(&mut ctx);
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Splitted), "DRY SPLITTED".into());
        ctx.apply(LineKind::FeeHeader(SplitType::Both), "DEMURRAGE DETENTION".into());
        ctx.apply(LineKind::Period, "From 16th onwards 90 180 180".into());
        let (dem, det) = splitted(&ctx, 0, 0);
        assert_eq!(dem[1..], ["From 16th onwards 90 180 180"]);
        assert_eq!(det[1..], dem[1..]);
    }

    #[test]
    fn lone_slab_under_both_goes_to_detention() {
        let mut ctx = ParseContext::default();
        open_schedule(&mut ctx);
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Splitted), "DRY SPLITTED".into());
        ctx.apply(LineKind::FeeHeader(SplitType::Both), "DEMURRAGE DETENTION".into());
        ctx.apply(LineKind::Slab, "SLAB 20' 40' 45'".into());
        let (dem, det) = splitted(&ctx, 0, 0);
        assert_eq!(dem, ["DEMURRAGE", ""]);
        assert_eq!(det, ["DETENTION", "SLAB 20' 40' 45'"]);
    }

    #[test]
    fn single_stream_split_routes_to_one_side() {
        let mut ctx = ParseContext::default();
        open_schedule(&mut ctx);
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Splitted), "DRY SPLITTED".into());
        ctx.apply(LineKind::FeeHeader(SplitType::Detention), "DETENTION".into());
        ctx.apply(LineKind::FreeDays, "10 FREE DAYS".into());
        ctx.apply(LineKind::Period, "From 1st to 10th 0 0 0".into());
        // Column headers always reach both streams.
        ctx.apply(LineKind::Slab, "SLAB 20' 40' 45'".into());
        let (dem, det) = splitted(&ctx, 0, 0);
        assert_eq!(dem, ["SLAB 20' 40' 45'"]);
        assert_eq!(
            det,
            ["DETENTION", "10 FREE DAYS", "From 1st to 10th 0 0 0", "SLAB 20' 40' 45'"]
        );
    }

    #[test]
    fn merged_container_keeps_lines_verbatim() {
        let mut ctx = ParseContext::default();
        open_schedule(&mut ctx);
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Merged), "DRY MERGED".into());
        ctx.apply(LineKind::FeeHeader(SplitType::Both), "DEMURRAGE DETENTION".into());
        ctx.apply(LineKind::FreeDays, "5 FREE DAYS 7 FREE DAYS".into());
        ctx.apply(LineKind::Period, "From 1st to 5th 0 0 0 From 1st to 3rd 5 10 15".into());
        let LineStream::Merged(lines) = &ctx.groups()[0].containers[0].lines else {
            panic!("expected merged container");
        };
        assert_eq!(
            lines,
            &["5 FREE DAYS 7 FREE DAYS", "From 1st to 5th 0 0 0 From 1st to 3rd 5 10 15"]
        );
    }

    #[test]
    fn split_state_carries_into_next_container() {
        let mut ctx = ParseContext::new(false);
        open_schedule(&mut ctx);
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Splitted), "DRY SPLITTED".into());
        ctx.apply(LineKind::FeeHeader(SplitType::Demurrage), "DEMURRAGE".into());
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Splitted), "REEFER SPLITTED".into());
        assert_eq!(ctx.split(), SplitType::Demurrage);
        ctx.apply(LineKind::FreeDays, "3 FREE DAYS".into());
        let (dem, det) = splitted(&ctx, 0, 1);
        assert_eq!(dem, ["3 FREE DAYS"]);
        assert!(det.is_empty());
    }

    #[test]
    fn split_state_resets_when_configured() {
        let mut ctx = ParseContext::new(true);
        open_schedule(&mut ctx);
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Splitted), "DRY SPLITTED".into());
        ctx.apply(LineKind::FeeHeader(SplitType::Demurrage), "DEMURRAGE".into());
        ctx.apply(LineKind::ContainerHeader(ContainerKind::Splitted), "REEFER SPLITTED".into());
        assert_eq!(ctx.split(), SplitType::None);
        ctx.apply(LineKind::FreeDays, "3 FREE DAYS".into());
        let (dem, det) = splitted(&ctx, 0, 1);
        assert!(dem.is_empty());
        assert!(det.is_empty());
    }

    #[test]
    fn second_occurrence_is_case_insensitive() {
        assert_eq!(second_occurrence("SLAB a slab b", "SLAB"), Some(7));
        assert_eq!(second_occurrence("SLAB only", "SLAB"), None);
    }
}
