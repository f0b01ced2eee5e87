use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::block::ConfigBlock;

/// Errors that can occur while writing [`ConfigBlock`]s back to disk.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to write the output file.
    #[error("failed to write config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render blocks back into configuration text.
///
/// The rendering is normalized: lines the parser ignores are gone and
/// blocks are separated by a single blank line. Empty blocks (including
/// the leading placeholder) are skipped. Parsing the result yields the
/// same block list.
pub fn render(blocks: &[ConfigBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        if block.is_empty() {
            continue;
        }
        out.push_str(&block.to_string());
        out.push('\n');
    }
    out
}

/// Render blocks and write the text to `path`.
pub fn write_file(blocks: &[ConfigBlock], path: &Path) -> Result<(), WriteError> {
    fs::write(path, render(blocks))?;
    Ok(())
}
