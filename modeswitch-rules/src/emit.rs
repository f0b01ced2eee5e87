//! udev rule construction and the rules-file renderer.
//!
//! Each eligible config block becomes one rule stanza:
//!
//! 1. **Identity**: `DefaultVendor:DefaultProduct`, taken verbatim from
//!    the block, keys the stanza for duplicate detection.
//! 2. **Command line**: the mode-switch invocation, assembled from a
//!    fixed key sequence so declaration order in the config never
//!    changes the output.
//! 3. **Match line**: `SUBSYSTEM=="usb"` plus the sysfs vendor/product
//!    attributes, with the ids' `0x` prefix stripped, running the
//!    command via `RUN+=`.
//!
//! The first stanza per identity is active; later ones are rendered with
//! a leading `#` so an administrator can swap which entry applies by
//! moving the comment marker, without regenerating the file.

use std::collections::HashSet;

use blockconf_core::ConfigBlock;
use thiserror::Error;

use crate::options::flag_for;

/// Path of the mode-switch utility the generated rules invoke.
pub const MODESWITCH_BIN: &str = "/usr/sbin/usb_modeswitch";

/// Fixed banner at the top of every generated rules file.
pub const RULES_HEADER: &str = "### /etc/udev/rules.d/usb_modeswitch.rules ###\n\
# This file is generated from /etc/usb_modeswitch.conf\n\
#\n\
# For multiply-defined ID, only the first one is uncommented.\n\
# Other ones are available but commented.\n\
#\n";

/// Errors raised while building rule lines.
#[derive(Debug, Error)]
pub enum EmitError {
    /// A vendor or product id is too short to carry the two-character
    /// prefix the udev match strips.
    #[error("{key} value {value:?} is shorter than the 2-character hex prefix")]
    IdTooShort { key: String, value: String },
}

/// How a declaration contributes to the generated command line.
#[derive(Clone, Copy)]
enum FlagStyle {
    /// Append the option followed by the stored value.
    WithValue,
    /// Append the option followed by the value minus its first and last
    /// characters, which are quote delimiters in the config file.
    QuoteStripped,
    /// Append the option alone; the stored value is ignored.
    Toggle,
}

/// Keys that reach the generated command line, in emission order.
///
/// Every other recognized key is accepted by the parser but deliberately
/// left out of the rules, matching what the installed tool expects from
/// a udev trigger.
const COMMAND_SEQUENCE: &[(&str, FlagStyle)] = &[
    ("DefaultVendor", FlagStyle::WithValue),
    ("DefaultProduct", FlagStyle::WithValue),
    ("MessageEndpoint", FlagStyle::WithValue),
    ("MessageContent", FlagStyle::QuoteStripped),
    ("ResponseEndpoint", FlagStyle::WithValue),
    ("DetachStorageOnly", FlagStyle::Toggle),
    ("Interface", FlagStyle::WithValue),
];

/// One emitted rule stanza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    /// Raw vendor:product identity, e.g. `0x12d1:0x1003`.
    pub uniq_id: String,
    /// The source block's accumulated comment text, emitted verbatim.
    pub comment: String,
    /// Full mode-switch invocation embedded in the rule.
    pub command_line: String,
    /// udev match line, without the duplicate marker.
    pub rule_line: String,
    /// False when an earlier block already claimed this id.
    pub active: bool,
}

/// All rule stanzas for one configuration, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub entries: Vec<RuleEntry>,
}

/// Whether a block carries enough identity to become a rule.
pub fn is_eligible(block: &ConfigBlock) -> bool {
    block.has("DefaultVendor") && block.has("DefaultProduct")
}

/// Build the mode-switch invocation for one block.
///
/// Only keys in [`COMMAND_SEQUENCE`] reach the command line, and always
/// in that order, regardless of where the block declares them.
pub fn command_line(block: &ConfigBlock) -> String {
    let mut cmd = String::from(MODESWITCH_BIN);
    for &(key, style) in COMMAND_SEQUENCE {
        let Some(value) = block.get(key) else {
            continue;
        };
        let Some(flag) = flag_for(key) else {
            continue;
        };
        match style {
            FlagStyle::WithValue => cmd.push_str(&format!(" {flag} {value}")),
            FlagStyle::QuoteStripped => {
                cmd.push_str(&format!(" {flag} {}", strip_delimiters(value)))
            }
            FlagStyle::Toggle => cmd.push_str(&format!(" {flag}")),
        }
    }
    cmd
}

/// Collect rule stanzas for every eligible block.
///
/// Blocks without both `DefaultVendor` and `DefaultProduct` are skipped.
/// The first block for a given vendor:product pair is active; later ones
/// are kept but marked inactive so the renderer can comment them out.
pub fn build_rule_set(blocks: &[ConfigBlock]) -> Result<RuleSet, EmitError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for block in blocks {
        let (Some(vendor), Some(product)) =
            (block.get("DefaultVendor"), block.get("DefaultProduct"))
        else {
            continue;
        };

        let uniq_id = format!("{vendor}:{product}");
        let command_line = command_line(block);
        let rule_line = rule_line(vendor, product, &command_line)?;
        let active = seen.insert(uniq_id.clone());

        entries.push(RuleEntry {
            uniq_id,
            comment: block.comment.clone(),
            command_line,
            rule_line,
            active,
        });
    }

    Ok(RuleSet { entries })
}

/// Render a complete rules file: fixed header, then one stanza per rule.
///
/// The output is fully determined by the rule set; rendering the same
/// configuration twice produces byte-identical files.
pub fn render_rules(rule_set: &RuleSet) -> String {
    let mut out = String::from(RULES_HEADER);
    out.push_str("\n\n");
    for entry in &rule_set.entries {
        if !entry.comment.is_empty() {
            out.push_str(&entry.comment);
            out.push('\n');
        }
        out.push_str(&format!("# Vendor:Product id = {}\n", entry.uniq_id));
        if !entry.active {
            out.push('#');
        }
        out.push_str(&entry.rule_line);
        out.push_str("\n\n");
    }
    out
}

fn rule_line(vendor: &str, product: &str, command: &str) -> Result<String, EmitError> {
    Ok(format!(
        "SUBSYSTEM==\"usb\", SYSFS{{idVendor}}==\"{}\", SYSFS{{idProduct}}==\"{}\", RUN+=\"{}\"",
        strip_hex_prefix("DefaultVendor", vendor)?,
        strip_hex_prefix("DefaultProduct", product)?,
        command,
    ))
}

/// Drop the `0x` prefix of an id for the sysfs attribute match. The
/// first two characters are removed as-is; `check` is where malformed
/// ids get diagnosed.
fn strip_hex_prefix<'a>(key: &str, value: &'a str) -> Result<&'a str, EmitError> {
    value.get(2..).ok_or_else(|| EmitError::IdTooShort {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Drop the first and last character of a value. Message payloads are
/// wrapped in quote characters in the config file.
fn strip_delimiters(value: &str) -> &str {
    let mut chars = value.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use blockconf_core::ConfigBlock;
    use pretty_assertions::assert_eq;

    use super::{build_rule_set, command_line, render_rules, EmitError, COMMAND_SEQUENCE};
    use crate::options::is_recognized;

    fn block(comment: &str, entries: &[(&str, &str)]) -> ConfigBlock {
        ConfigBlock {
            comment: comment.to_string(),
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn every_sequence_key_is_a_recognized_option() {
        for (key, _) in COMMAND_SEQUENCE {
            assert!(is_recognized(key), "{key} missing from the option table");
        }
    }

    #[test]
    fn minimal_block_yields_ids_only() {
        let block = block("", &[("DefaultVendor", "0x1234"), ("DefaultProduct", "0xabcd")]);
        assert_eq!(
            command_line(&block),
            "/usr/sbin/usb_modeswitch --default-vendor 0x1234 --default-product 0xabcd"
        );
    }

    #[test]
    fn command_order_is_fixed_regardless_of_declaration_order() {
        let block = block(
            "",
            &[
                ("Interface", "5"),
                ("DefaultProduct", "0x1003"),
                ("MessageEndpoint", "0x05"),
                ("DefaultVendor", "0x12d1"),
            ],
        );
        assert_eq!(
            command_line(&block),
            "/usr/sbin/usb_modeswitch --default-vendor 0x12d1 --default-product 0x1003 \
             --message-endpoint 0x05 --interface 5"
        );
    }

    #[test]
    fn message_content_loses_its_quote_delimiters() {
        let block = block(
            "",
            &[
                ("DefaultVendor", "0x05c6"),
                ("DefaultProduct", "0x1000"),
                ("MessageContent", "\"5553424312345678\""),
            ],
        );
        assert_eq!(
            command_line(&block),
            "/usr/sbin/usb_modeswitch --default-vendor 0x05c6 --default-product 0x1000 \
             --message-content 5553424312345678"
        );
    }

    #[test]
    fn detach_storage_only_is_a_bare_toggle() {
        let block = block(
            "",
            &[
                ("DefaultVendor", "0x12d1"),
                ("DefaultProduct", "0x1003"),
                ("DetachStorageOnly", "0"),
            ],
        );
        let cmd = command_line(&block);
        assert!(cmd.ends_with("--detach-only"), "got {cmd:?}");
    }

    #[test]
    fn recognized_but_unlisted_keys_stay_out_of_the_command() {
        let block = block(
            "",
            &[
                ("DefaultVendor", "0x05c6"),
                ("DefaultProduct", "0x1000"),
                ("TargetVendor", "0x0af0"),
                ("HuaweiMode", "1"),
            ],
        );
        let cmd = command_line(&block);
        assert!(!cmd.contains("--target-vendor"), "got {cmd:?}");
        assert!(!cmd.contains("--huawei-mode"), "got {cmd:?}");
    }

    #[test]
    fn rule_line_strips_the_hex_prefix() {
        let blocks = [block(
            "",
            &[("DefaultVendor", "0x12d1"), ("DefaultProduct", "0x1003")],
        )];
        let rule_set = build_rule_set(&blocks).unwrap();
        assert_eq!(
            rule_set.entries[0].rule_line,
            "SUBSYSTEM==\"usb\", SYSFS{idVendor}==\"12d1\", SYSFS{idProduct}==\"1003\", \
             RUN+=\"/usr/sbin/usb_modeswitch --default-vendor 0x12d1 --default-product 0x1003\""
        );
    }

    #[test]
    fn one_character_id_is_an_error() {
        let blocks = [block("", &[("DefaultVendor", "0"), ("DefaultProduct", "0x1003")])];
        let err = build_rule_set(&blocks).unwrap_err();
        match err {
            EmitError::IdTooShort { key, value } => {
                assert_eq!(key, "DefaultVendor");
                assert_eq!(value, "0");
            }
        }
    }

    #[test]
    fn blocks_without_both_ids_are_skipped() {
        let blocks = [
            block("# comment only", &[]),
            block("", &[("DefaultVendor", "0x1111")]),
            block("", &[("DefaultVendor", "0x2222"), ("DefaultProduct", "0x0001")]),
        ];
        let rule_set = build_rule_set(&blocks).unwrap();
        assert_eq!(rule_set.entries.len(), 1);
        assert_eq!(rule_set.entries[0].uniq_id, "0x2222:0x0001");
    }

    #[test]
    fn second_block_with_same_id_goes_inactive() {
        let blocks = [
            block("", &[("DefaultVendor", "0x05c6"), ("DefaultProduct", "0x1000")]),
            block("", &[("DefaultVendor", "0x05c6"), ("DefaultProduct", "0x1000")]),
            block("", &[("DefaultVendor", "0x05c6"), ("DefaultProduct", "0x1001")]),
        ];
        let rule_set = build_rule_set(&blocks).unwrap();
        let actives: Vec<bool> = rule_set.entries.iter().map(|e| e.active).collect();
        assert_eq!(actives, [true, false, true]);
    }

    #[test]
    fn rendered_file_matches_expected_layout() {
        let blocks = [
            block(
                "#########\n# Example modem",
                &[("DefaultVendor", "0x12d1"), ("DefaultProduct", "0x1003")],
            ),
            block(
                "#########\n# Same id again",
                &[("DefaultVendor", "0x12d1"), ("DefaultProduct", "0x1003")],
            ),
        ];
        let rendered = render_rules(&build_rule_set(&blocks).unwrap());
        assert_eq!(
            rendered,
            "### /etc/udev/rules.d/usb_modeswitch.rules ###\n\
             # This file is generated from /etc/usb_modeswitch.conf\n\
             #\n\
             # For multiply-defined ID, only the first one is uncommented.\n\
             # Other ones are available but commented.\n\
             #\n\
             \n\
             \n\
             #########\n\
             # Example modem\n\
             # Vendor:Product id = 0x12d1:0x1003\n\
             SUBSYSTEM==\"usb\", SYSFS{idVendor}==\"12d1\", SYSFS{idProduct}==\"1003\", \
             RUN+=\"/usr/sbin/usb_modeswitch --default-vendor 0x12d1 --default-product 0x1003\"\n\
             \n\
             #########\n\
             # Same id again\n\
             # Vendor:Product id = 0x12d1:0x1003\n\
             #SUBSYSTEM==\"usb\", SYSFS{idVendor}==\"12d1\", SYSFS{idProduct}==\"1003\", \
             RUN+=\"/usr/sbin/usb_modeswitch --default-vendor 0x12d1 --default-product 0x1003\"\n\
             \n"
        );
    }

    #[test]
    fn empty_rule_set_renders_header_only() {
        let rendered = render_rules(&build_rule_set(&[]).unwrap());
        assert!(rendered.ends_with("#\n\n\n"));
        assert!(!rendered.contains("SUBSYSTEM"));
    }
}
