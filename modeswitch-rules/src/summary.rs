//! One-line outcome summary for `generate` runs that write to a file.

use blockconf_core::ConfigBlock;
use serde::Serialize;

use crate::emit::RuleSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerateSummary {
    /// Blocks introduced by a `####` header.
    pub blocks: usize,
    /// Blocks that produced a rule stanza.
    pub eligible: usize,
    /// Stanzas emitted active.
    pub rules: usize,
    /// Stanzas emitted commented out.
    pub duplicates: usize,
}

pub fn summarize(blocks: &[ConfigBlock], rule_set: &RuleSet) -> GenerateSummary {
    let duplicates = rule_set
        .entries
        .iter()
        .filter(|entry| !entry.active)
        .count();
    GenerateSummary {
        blocks: blocks.len().saturating_sub(1),
        eligible: rule_set.entries.len(),
        rules: rule_set.entries.len() - duplicates,
        duplicates,
    }
}

pub fn render(summary: GenerateSummary) -> String {
    format!(
        "generate blocks={} eligible={} rules={} duplicates={}",
        summary.blocks, summary.eligible, summary.rules, summary.duplicates
    )
}
