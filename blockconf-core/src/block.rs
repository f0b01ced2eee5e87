use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// A single configuration block: a run of header-comment lines followed by
/// `;key=value` declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigBlock {
    /// Accumulated header-comment text, newline-joined, without a trailing
    /// newline. Empty for the leading placeholder block.
    pub comment: String,
    /// Key/value declarations in file order. Repeated keys are kept.
    pub entries: Vec<(String, String)>,
}

impl ConfigBlock {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value declared for `key`. When a key is declared more
    /// than once, the last declaration wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the block declares `key` at least once.
    pub fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate declared key names in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Whether the block carries no comment text and no declarations.
    pub fn is_empty(&self) -> bool {
        self.comment.is_empty() && self.entries.is_empty()
    }
}

impl Display for ConfigBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.comment.is_empty() {
            writeln!(f, "{}", self.comment)?;
        }
        for (key, value) in &self.entries {
            writeln!(f, ";{}={}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigBlock;

    #[test]
    fn get_returns_last_declaration_for_repeated_keys() {
        let block = ConfigBlock {
            comment: String::new(),
            entries: vec![
                ("Interface".to_string(), "0".to_string()),
                ("Interface".to_string(), "1".to_string()),
            ],
        };

        assert_eq!(block.get("Interface"), Some("1"));
        assert!(block.has("Interface"));
        assert_eq!(block.get("Configuration"), None);
    }

    #[test]
    fn display_renders_comment_then_declarations() {
        let block = ConfigBlock {
            comment: "#### Some device\n# vendor notes".to_string(),
            entries: vec![("DefaultVendor".to_string(), "0x1234".to_string())],
        };

        assert_eq!(
            block.to_string(),
            "#### Some device\n# vendor notes\n;DefaultVendor=0x1234\n"
        );
    }
}
