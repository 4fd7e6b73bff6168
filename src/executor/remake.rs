//! Whether configure and make must run again.

use super::context::Context;
use super::error::ExecuteError;

/// Outcome of resolving the `--no-remake` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemakeDecision {
    /// Reconfigure and rebuild unconditionally
    #[default]
    AlwaysBuild,
    /// Trust the existing Makefile and go straight to installation
    SkipBuild,
}

impl RemakeDecision {
    pub fn should_build(self) -> bool {
        self == RemakeDecision::AlwaysBuild
    }
}

/// Resolve the remake decision.
///
/// Skipping is only allowed when a previous configure left a Makefile
/// behind; asking to skip without one is a configuration error.
pub fn resolve(ctx: &Context, no_remake: bool) -> Result<RemakeDecision, ExecuteError> {
    if !no_remake {
        return Ok(RemakeDecision::AlwaysBuild);
    }

    let makefile = ctx.makefile();
    if !makefile.is_file() {
        return Err(ExecuteError::MissingMakefile(makefile));
    }

    Ok(RemakeDecision::SkipBuild)
}
