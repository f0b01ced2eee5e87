//! Generic parsing and writing primitives for block-structured INI-like
//! configuration files, used by higher-level tools.

pub mod block;
pub mod parser;
pub mod writer;

pub use block::ConfigBlock;
pub use parser::{parse, parse_file, ParseError};
pub use writer::{render, write_file, WriteError};
