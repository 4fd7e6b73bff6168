//! Utility functions for the executor.

use std::path::Path;

use crate::output;

use super::context::Context;
use super::error::ExecuteError;

/// Shell-quote a value for display.
pub fn shell_quote(s: impl std::fmt::Display) -> String {
    let s = s.to_string();
    if !s.is_empty()
        && s.chars().all(|c| {
            c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '=' | ':' | ',')
        })
    {
        s
    } else {
        format!("'{}'", s.replace('\'', "'\"'\"'"))
    }
}

/// Remove a file if it exists.
///
/// Returns whether a file was (or, in dry-run, would have been) removed.
pub fn remove_if_exists(ctx: &Context, path: &Path) -> Result<bool, ExecuteError> {
    if std::fs::symlink_metadata(path).is_err() {
        return Ok(false);
    }

    if ctx.dry_run {
        output::detail(&format!("would remove {}", path.display()));
        return Ok(true);
    }

    std::fs::remove_file(path)?;
    if ctx.verbose {
        output::detail(&format!("removed {}", path.display()));
    }
    Ok(true)
}

/// Remove a directory tree if it exists.
pub fn remove_dir_if_exists(ctx: &Context, path: &Path) -> Result<bool, ExecuteError> {
    if !path.is_dir() {
        return Ok(false);
    }

    if ctx.dry_run {
        output::detail(&format!("would remove {}", path.display()));
        return Ok(true);
    }

    std::fs::remove_dir_all(path)?;
    if ctx.verbose {
        output::detail(&format!("removed {}", path.display()));
    }
    Ok(true)
}
