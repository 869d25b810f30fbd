//! Flat text rendering of tariff groups.
//!
//! The output is what downstream comparison consumes, so its shape is fixed:
//!
//! ```text
//! D&D TARIFFS
//! <metadata lines, in field order>
//! <container name>
//! <container lines; demurrage before detention>
//!
//! D&D TARIFFS
//! ...
//! ```

use crate::segment::TariffGroup;

/// Header line opening every group.
pub const GROUP_HEADER: &str = "D&D TARIFFS";

/// Render groups in discovery order, separated by blank lines.
pub fn format_groups(groups: &[TariffGroup]) -> String {
    let mut output = String::new();

    for group in groups {
        output.push_str(GROUP_HEADER);
        output.push('\n');

        for line in group.metadata.lines() {
            output.push_str(line);
            output.push('\n');
        }

        for container in &group.containers {
            output.push_str(&container.name);
            output.push('\n');
            for line in container.output_lines() {
                output.push_str(line);
                output.push('\n');
            }
        }

        output.push('\n');
    }

    output.trim().to_string()
}
