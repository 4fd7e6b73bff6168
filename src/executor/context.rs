//! Build configuration shared by every operation.

use std::path::PathBuf;

use crate::config::Config;
use crate::manifest;

/// Build configuration, constructed once per invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Active environment's installation prefix
    pub prefix: PathBuf,
    /// Project checkout holding the native sources and package
    pub source_root: PathBuf,
    /// Project metadata and build settings
    pub config: Config,
    /// If true, log commands without executing them
    pub dry_run: bool,
    /// If true, print commands as they execute
    pub verbose: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            prefix: PathBuf::from("/usr/local"),
            source_root: PathBuf::from("."),
            config: Config::default(),
            dry_run: false,
            verbose: false,
        }
    }
}

impl Context {
    /// Create a new context with the given prefix.
    pub fn with_prefix(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Set the project root.
    pub fn source_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_root = dir.into();
        self
    }

    /// Set the project metadata.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set dry run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set verbose mode.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Directory holding `configure` and the generated Makefile.
    pub fn native_dir(&self) -> PathBuf {
        self.source_root.join(&self.config.build.native_dir)
    }

    /// Environment executable directory where the toolkit installs binaries.
    pub fn bin_dir(&self) -> PathBuf {
        self.prefix.join("bin")
    }

    pub fn makefile(&self) -> PathBuf {
        self.native_dir().join(manifest::MAKEFILE)
    }

    pub fn config_header(&self) -> PathBuf {
        self.native_dir().join(manifest::CONFIG_HEADER)
    }

    pub fn package_name(&self) -> &str {
        &self.config.metadata.package_name
    }

    /// Arguments for `./configure`. Every dependency lives in the prefix.
    pub fn configure_args(&self) -> Vec<String> {
        let prefix = self.prefix.display();
        vec![
            format!("--with-cfitsio={}", prefix),
            format!("--with-wcstools={}", prefix),
            format!("--with-gsl={}", prefix),
            format!("--libdir={}", prefix),
            format!("--prefix={}", prefix),
        ]
    }
}
