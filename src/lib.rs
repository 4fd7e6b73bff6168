//! Native build orchestrator for the aXe spectral extraction toolkit
//!
//! The aXe C code under `cextern/aXe_c_code` is an autotools project. This
//! crate decides whether it must be reconfigured, drives `configure` and
//! `make` against the active environment prefix, installs the Python
//! package, and removes everything again on `clean`.
//!
//! # Commands
//!
//! - `build_ext` / `install` - configure, `make clean`, `make install`, then
//!   install the package. `--no-remake` trusts an existing Makefile.
//! - `clean` - `make clean`, remove installed binaries and `config.h`.
//! - `test` - run pytest against the package.
//! - `build_sphinx` - build the native code, then the HTML docs.
//! - `version` - resolve the release helper and write `version.py`.
//!
//! # Example
//!
//! ```no_run
//! use axe_build::{Context, Executor, Options};
//!
//! let ctx = Context::with_prefix("/opt/env").source_root("/src/pyaxe");
//! let outcome = Executor::new(ctx).run("install", &Options::default())?;
//! assert_eq!(outcome.code(), 0);
//! # Ok::<(), axe_build::ExecuteError>(())
//! ```

pub mod config;
pub mod executor;
pub mod manifest;
pub mod output;

pub use config::Config;
pub use executor::{
    lookup, Context, ExecuteError, Executor, Operation, Options, Outcome, RemakeDecision, Runner,
    Step, SystemRunner, COMMANDS,
};
