use std::fs;
use std::mem;
use std::path::Path;

use thiserror::Error;

use crate::block::ConfigBlock;

/// Errors that can occur while parsing configuration text into
/// [`ConfigBlock`]s.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A `;` declaration line carried no `=` separator.
    #[error("malformed declaration on line {line}: no '=' in {text:?}")]
    MalformedDeclaration { line: usize, text: String },
    /// Failed to read the input file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse configuration text into an ordered list of [`ConfigBlock`]s.
///
/// The returned list always starts with a placeholder block collecting any
/// declarations that appear before the first `####` header line. Each header
/// line (four or more leading `#`) opens a new block; `#` lines directly
/// under it extend the block's comment until a blank line; `;key=value`
/// lines declare entries in the current block; everything else is ignored.
pub fn parse(text: &str) -> Result<Vec<ConfigBlock>, ParseError> {
    let mut scanner = Scanner::new();
    for (idx, line) in text.lines().enumerate() {
        scanner.line(idx + 1, line)?;
    }
    Ok(scanner.into_blocks())
}

/// Parse a configuration file into an ordered list of [`ConfigBlock`]s.
pub fn parse_file(path: &Path) -> Result<Vec<ConfigBlock>, ParseError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Single-pass scanner state: finished blocks, the block under
/// construction, and the comment-accumulation flag.
struct Scanner {
    done: Vec<ConfigBlock>,
    current: ConfigBlock,
    in_comment: bool,
}

impl Scanner {
    fn new() -> Self {
        Self {
            done: Vec::new(),
            current: ConfigBlock::new(),
            in_comment: false,
        }
    }

    fn line(&mut self, number: usize, line: &str) -> Result<(), ParseError> {
        // A heavy header always opens a new block, even while a comment is
        // still being accumulated.
        if line.starts_with("####") {
            let mut opened = ConfigBlock::new();
            opened.comment.push_str(line);
            self.done.push(mem::replace(&mut self.current, opened));
            self.in_comment = true;
            return Ok(());
        }

        if line.starts_with('#') && self.in_comment {
            self.current.comment.push('\n');
            self.current.comment.push_str(line);
            return Ok(());
        }

        if line.is_empty() {
            self.in_comment = false;
            return Ok(());
        }

        // Declarations do not end comment accumulation; only a blank line
        // does.
        if let Some(declaration) = line.strip_prefix(';') {
            let Some(eq) = declaration.find('=') else {
                return Err(ParseError::MalformedDeclaration {
                    line: number,
                    text: line.to_string(),
                });
            };
            let key = declaration[..eq].to_string();
            let value = declaration[eq + 1..].trim().to_string();
            self.current.entries.push((key, value));
        }

        Ok(())
    }

    fn into_blocks(mut self) -> Vec<ConfigBlock> {
        self.done.push(self.current);
        self.done
    }
}
