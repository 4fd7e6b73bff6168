//! axe-build CLI - configure, build, install and clean the aXe C toolkit
//!
//! Usage:
//!   axe-build install [--no-remake]     Configure, build and install
//!   axe-build build_ext [--no-remake]   Same as install
//!   axe-build clean [--all]             Remove build output and binaries
//!   axe-build test [-- ARGS...]         Run pytest against the package
//!   axe-build build_sphinx              Build the HTML documentation
//!   axe-build version                   Write the package version module

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use axe_build::config::{self, Config};
use axe_build::{output, Context, Executor, Options};

#[derive(Parser)]
#[command(name = "axe-build")]
#[command(about = "Configure, build and install the aXe spectral extraction toolkit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Environment prefix (default: $VIRTUAL_ENV, then $CONDA_PREFIX)
    #[arg(short, long, global = true, env = "AXE_PREFIX")]
    prefix: Option<PathBuf>,

    /// Project checkout (default: current directory)
    #[arg(short = 's', long, global = true)]
    source_root: Option<PathBuf>,

    /// Metadata file (default: <source-root>/axe-build.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print commands without running them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print commands as they run
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure, build, and install the aXe C code
    #[command(name = "build_ext")]
    BuildExt {
        /// Don't remake the aXe C executables
        #[arg(long = "no-remake", alias = "noremake")]
        no_remake: bool,
    },

    /// Configure, build, and install the aXe C code, then the package
    Install {
        /// Don't remake the aXe C executables
        #[arg(long = "no-remake", alias = "noremake")]
        no_remake: bool,
    },

    /// Clean C binaries and build output
    Clean {
        /// Also remove built libraries, scripts and bdist output
        #[arg(short, long)]
        all: bool,
    },

    /// Run the test suite
    Test {
        /// Extra arguments passed to pytest
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Build Sphinx documentation with the C toolkit
    #[command(name = "build_sphinx")]
    BuildSphinx {
        /// Don't remake the aXe C executables
        #[arg(long = "no-remake", alias = "noremake")]
        no_remake: bool,
    },

    /// Resolve version metadata and write the version module
    Version,
}

impl Commands {
    /// Name in the dispatch table plus the options it carries.
    fn into_dispatch(self) -> (&'static str, Options) {
        match self {
            Commands::BuildExt { no_remake } => (
                "build_ext",
                Options {
                    no_remake,
                    ..Default::default()
                },
            ),
            Commands::Install { no_remake } => (
                "install",
                Options {
                    no_remake,
                    ..Default::default()
                },
            ),
            Commands::Clean { all } => (
                "clean",
                Options {
                    all,
                    ..Default::default()
                },
            ),
            Commands::Test { args } => (
                "test",
                Options {
                    extra_args: args,
                    ..Default::default()
                },
            ),
            Commands::BuildSphinx { no_remake } => (
                "build_sphinx",
                Options {
                    no_remake,
                    ..Default::default()
                },
            ),
            Commands::Version => ("version", Options::default()),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let ctx = create_context(&cli)?;
    let (command, opts) = cli.command.into_dispatch();

    let executor = Executor::new(ctx);
    if executor.context().verbose {
        output::detail(&format!(
            "{} with prefix {}",
            command,
            executor.context().prefix.display()
        ));
    }

    let outcome = executor
        .run(command, &opts)
        .with_context(|| format!("{} failed", command))?;
    Ok(outcome.code())
}

/// Build the configuration once; every command receives it by reference.
fn create_context(cli: &Cli) -> Result<Context> {
    let source_root = match &cli.source_root {
        Some(dir) => std::path::absolute(dir)
            .with_context(|| format!("Failed to resolve source root: {}", dir.display()))?,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| source_root.join(config::CONFIG_FILE));
    let config = Config::load(&config_path)?;

    // configure and the installer run from other directories
    let prefix = config::resolve_prefix(cli.prefix.clone())?;
    let prefix = std::path::absolute(&prefix)
        .with_context(|| format!("Failed to resolve prefix: {}", prefix.display()))?;

    Ok(Context::with_prefix(prefix)
        .source_root(source_root)
        .config(config)
        .dry_run(cli.dry_run)
        .verbose(cli.verbose))
}
