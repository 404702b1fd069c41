//! Plain-text Mass renderer.

use crate::mass::document::MassDocument;
use crate::model::celebration::Celebration;
use crate::model::part::Part;

/// Width of the rule lines around the celebration header.
pub const RULE_WIDTH: usize = 80;

/// Renders the document as one UTF-8 string.
///
/// Output is a pure function of the document state.
pub fn render(document: &MassDocument) -> String {
    let mut lines = Vec::new();
    if let Some(celebration) = document.celebration() {
        push_header(&mut lines, celebration);
    }
    lines.extend(document.ordered_non_empty_parts().map(part_block));
    lines.join("\n")
}

fn push_header(lines: &mut Vec<String>, celebration: &Celebration) {
    let rule = "=".repeat(RULE_WIDTH);
    lines.push(format!("\n{rule}"));
    lines.push(celebration.name.to_uppercase());
    lines.push(format!("Data: {}", celebration.display_date()));
    lines.push(format!("Cor Litúrgica: {}", celebration.color));
    lines.push(format!("{rule}\n"));
}

fn part_block(part: &Part) -> String {
    let underline = "=".repeat(part.title.chars().count());
    format!("\n{}\n{underline}\n{}\n", part.title, part.content)
}
