//! Human-readable dump of a parsed configuration.

use blockconf_core::ConfigBlock;

use crate::emit::is_eligible;

/// Render one line per block, with an optional declaration listing.
pub fn render_blocks(blocks: &[ConfigBlock], show_values: bool) -> String {
    let mut out = Vec::new();
    let headed = blocks.len().saturating_sub(1);
    let eligible = blocks.iter().filter(|block| is_eligible(block)).count();
    out.push(format!("blocks total={headed} eligible={eligible}"));

    for (number, block) in blocks.iter().enumerate() {
        if number == 0 {
            if block.is_empty() {
                continue;
            }
            out.push(format!(
                "- block 0 (before first header): {} declaration(s)",
                block.entries.len()
            ));
        } else {
            out.push(format!("- block {number}: {}", describe(block)));
        }
        if show_values {
            for (key, value) in &block.entries {
                out.push(format!("    {key} = {value}"));
            }
        }
    }

    out.join("\n")
}

fn describe(block: &ConfigBlock) -> String {
    let id = match (block.get("DefaultVendor"), block.get("DefaultProduct")) {
        (Some(vendor), Some(product)) => format!("id={vendor}:{product}"),
        _ => "id=none".to_string(),
    };
    let mut line = format!("{id} keys={}", block.entries.len());
    if let Some(title) = title(block) {
        line.push_str(&format!(" \"{title}\""));
    }
    line
}

/// First comment line with content beyond the `#` banner characters.
fn title(block: &ConfigBlock) -> Option<&str> {
    block
        .comment
        .lines()
        .map(|line| line.trim_start_matches('#').trim())
        .find(|text| !text.is_empty())
}
