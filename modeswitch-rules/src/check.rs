//! Configuration lint: finds declarations the generator would silently
//! drop or mishandle, and reports them with a severity per finding.

use std::collections::HashMap;

use blockconf_core::ConfigBlock;
use serde::Serialize;

use crate::options::is_recognized;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckIssue {
    pub severity: CheckSeverity,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Blocks introduced by a `####` header.
    pub blocks: usize,
    /// Blocks that would produce a rule.
    pub eligible: usize,
    pub errors: usize,
    pub warnings: usize,
    pub issues: Vec<CheckIssue>,
}

/// Walk the parsed blocks and collect findings.
///
/// Block numbers in messages follow parse order: block 0 is the
/// placeholder for declarations before the first header, header blocks
/// count from 1.
pub fn build_check_report(blocks: &[ConfigBlock]) -> CheckReport {
    let mut issues = Vec::new();
    let mut eligible = 0;
    let mut seen: HashMap<String, usize> = HashMap::new();

    if let Some(placeholder) = blocks.first() {
        if !placeholder.entries.is_empty() {
            issues.push(warn(
                "headerless_declarations",
                &format!(
                    "{} declaration(s) appear before the first '####' header",
                    placeholder.entries.len()
                ),
            ));
        }
    }

    for (number, block) in blocks.iter().enumerate() {
        for (key, count) in key_counts(block) {
            if !is_recognized(key) {
                issues.push(warn(
                    "unrecognized_key",
                    &format!("block {number}: key {key:?} is not a recognized option"),
                ));
            }
            if count > 1 {
                issues.push(warn(
                    "redeclared_key",
                    &format!(
                        "block {number}: key {key:?} declared {count} times; the last value wins"
                    ),
                ));
            }
        }

        let vendor = block.get("DefaultVendor");
        let product = block.get("DefaultProduct");

        for (key, value) in [("DefaultVendor", vendor), ("DefaultProduct", product)] {
            let Some(value) = value else { continue };
            if value.chars().count() < 2 {
                issues.push(err(
                    "id_too_short",
                    &format!("block {number}: {key} value {value:?} has no room for a hex prefix"),
                ));
            } else if !looks_like_hex_id(value) {
                issues.push(warn(
                    "id_format",
                    &format!(
                        "block {number}: {key} value {value:?} is not 0x-prefixed hex; \
                         the rule will match the raw text minus its first two characters"
                    ),
                ));
            }
        }

        match (vendor, product) {
            (Some(vendor), Some(product)) => {
                eligible += 1;
                let uniq_id = format!("{vendor}:{product}");
                match seen.get(&uniq_id) {
                    Some(first) => issues.push(warn(
                        "duplicate_id",
                        &format!(
                            "block {number}: vendor:product {uniq_id} already used by \
                             block {first}; this rule will be commented out"
                        ),
                    )),
                    None => {
                        seen.insert(uniq_id, number);
                    }
                }
            }
            _ if number == 0 || block.entries.is_empty() => {}
            _ => {
                let missing = if vendor.is_none() && product.is_none() {
                    "DefaultVendor and DefaultProduct"
                } else if vendor.is_none() {
                    "DefaultVendor"
                } else {
                    "DefaultProduct"
                };
                issues.push(warn(
                    "missing_default_ids",
                    &format!("block {number}: missing {missing}; no rule will be generated"),
                ));
            }
        }
    }

    let errors = issues
        .iter()
        .filter(|issue| issue.severity == CheckSeverity::Error)
        .count();
    let warnings = issues
        .iter()
        .filter(|issue| issue.severity == CheckSeverity::Warning)
        .count();

    CheckReport {
        blocks: blocks.len().saturating_sub(1),
        eligible,
        errors,
        warnings,
        issues,
    }
}

/// Plain-text rendering of a check report.
pub fn render_check_text(report: &CheckReport) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "check blocks={} eligible={}",
        report.blocks, report.eligible
    ));
    out.push(format!(
        "result errors={} warnings={}",
        report.errors, report.warnings
    ));
    out.push("issues".to_string());
    if report.issues.is_empty() {
        out.push("- none".to_string());
        return out.join("\n");
    }
    for issue in &report.issues {
        let severity = match issue.severity {
            CheckSeverity::Error => "error",
            CheckSeverity::Warning => "warning",
        };
        out.push(format!("- [{severity}] {}: {}", issue.code, issue.message));
    }
    out.join("\n")
}

/// Distinct keys of a block with their declaration counts, in first
/// occurrence order.
fn key_counts(block: &ConfigBlock) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for key in block.keys() {
        match counts.iter_mut().find(|(seen, _)| *seen == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

fn looks_like_hex_id(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn err(code: &str, message: &str) -> CheckIssue {
    CheckIssue {
        severity: CheckSeverity::Error,
        code: code.to_string(),
        message: message.to_string(),
    }
}

fn warn(code: &str, message: &str) -> CheckIssue {
    CheckIssue {
        severity: CheckSeverity::Warning,
        code: code.to_string(),
        message: message.to_string(),
    }
}
