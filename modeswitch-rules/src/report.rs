//! Terminal coloring for check output.

use colored::Colorize;

use crate::check::{render_check_text, CheckReport};

/// Render a check report with severity coloring. `colored` suppresses
/// the escapes on its own when stdout is not a terminal.
pub fn render_check_colored(report: &CheckReport) -> String {
    let mut out = Vec::new();
    for line in render_check_text(report).lines() {
        let line = if line.starts_with("- [error]") {
            line.red().to_string()
        } else if line.starts_with("- [warning]") {
            line.yellow().to_string()
        } else if line.starts_with("result ") {
            line.cyan().to_string()
        } else {
            line.to_string()
        };
        out.push(line);
    }
    out.join("\n")
}
