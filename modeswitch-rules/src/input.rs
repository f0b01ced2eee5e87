use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use blockconf_core::{parse, ConfigBlock};

/// Load and parse a configuration from `path`, or from standard input
/// when the path is absent or `-`.
pub fn load_blocks(path: Option<&Path>) -> Result<Vec<ConfigBlock>> {
    let (text, source) = match path {
        Some(path) if path.as_os_str() != "-" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (text, path.display().to_string())
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read standard input")?;
            (text, "standard input".to_string())
        }
    };

    parse(&text).with_context(|| format!("failed to parse {source}"))
}
