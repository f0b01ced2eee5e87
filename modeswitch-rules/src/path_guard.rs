use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write the generated rules over the configuration they came
/// from.
pub fn ensure_output_not_input(output: &Path, input: Option<&Path>) -> Result<()> {
    let Some(input) = input else {
        return Ok(());
    };
    if input.as_os_str() == "-" {
        return Ok(());
    }

    let output_path = normalize(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;
    let input_path = normalize(input)
        .with_context(|| format!("failed to resolve input path {}", input.display()))?;

    if output_path == input_path {
        bail!(
            "refusing to overwrite config file: output {} is the input",
            output.display()
        );
    }
    Ok(())
}

fn normalize(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        // Resolves symlinks and relative segments for paths on disk.
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    // The output file usually does not exist yet; anchor it to the
    // current directory instead. `..` segments stay unresolved here.
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().context("current dir")?;
        Ok(cwd.join(path))
    }
}
