//! Narrative assembly. Runs every section builder in order and renders the
//! result as markdown-style text.

use crate::sections::{ReportInputs, ReportSection, SECTIONS};

/// Build every section in the fixed report order.
pub fn build_sections(inputs: &ReportInputs<'_>) -> Vec<ReportSection> {
    SECTIONS.iter().map(|build| build(inputs)).collect()
}

/// `## Title` headings followed by `- ` bullet lines, one blank line between
/// sections.
pub fn render(sections: &[ReportSection]) -> String {
    sections
        .iter()
        .map(|section| {
            let mut block = format!("## {}\n", section.title);
            for line in &section.lines {
                block.push_str("- ");
                block.push_str(line);
                block.push('\n');
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn compose(inputs: &ReportInputs<'_>) -> String {
    render(&build_sections(inputs))
}
