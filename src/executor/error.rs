//! Executor error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while orchestrating the native build.
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("command failed: {cmd} (exit code: {code:?})")]
    CommandFailed { cmd: String, code: Option<i32> },

    #[error("command failed: {cmd}\nstderr: {stderr}")]
    CommandFailedWithStderr { cmd: String, stderr: String },

    #[error("failed to start {cmd}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Makefile doesn't exist, let axe build: {0}")]
    MissingMakefile(PathBuf),

    #[error("{tool} is not installed!\nTo continue, please install it:\n    {hint}")]
    ToolMissing { tool: String, hint: String },

    #[error("unable to resolve version helper: {0}")]
    VersionHelper(String),

    #[error("no active environment: pass --prefix or set VIRTUAL_ENV or CONDA_PREFIX")]
    NoPrefix,

    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
