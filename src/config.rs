//! Project metadata and environment prefix resolution.
//!
//! Metadata lives in `axe-build.toml` at the project root. Every key is
//! optional; a missing file yields the defaults below.
//!
//! ```toml
//! [metadata]
//! package_name = "pyaxe"
//!
//! [build]
//! native_dir = "cextern/aXe_c_code"
//! installer = ["python", "-m", "pip", "install", "--no-deps", "--no-build-isolation", "."]
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::executor::ExecuteError;

/// Default metadata file name, relative to the project root.
pub const CONFIG_FILE: &str = "axe-build.toml";

/// Environment variables consulted for the prefix, in order.
pub const PREFIX_VARS: &[&str] = &["AXE_PREFIX", "VIRTUAL_ENV", "CONDA_PREFIX"];

/// Parsed contents of `axe-build.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub metadata: Metadata,
    pub build: BuildSettings,
}

/// Package metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Metadata {
    /// Python package name; also the pytest target and version module location
    pub package_name: String,
    pub description: String,
    pub long_description: String,
    pub author: String,
    pub author_email: String,
    pub license: String,
    pub url: String,
    pub classifier: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            package_name: "pyaxe".to_string(),
            description: "aXe - spectral extraction for HST".to_string(),
            long_description: "aXe spectral extraction for HST minus the IRAF".to_string(),
            author: "STScI".to_string(),
            author_email: "https://hsthelp.stsci.edu".to_string(),
            license: "3-Clause BSD".to_string(),
            url: "http://axe-info.stsci.edu".to_string(),
            classifier: "Programming Language :: Python :: 3".to_string(),
        }
    }
}

/// Native build settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSettings {
    /// C source directory holding `configure`, relative to the project root
    pub native_dir: PathBuf,
    /// Package installer command line, run from the project root
    pub installer: Vec<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            native_dir: PathBuf::from("cextern/aXe_c_code"),
            installer: ["python", "-m", "pip", "install", "--no-deps", "--no-build-isolation", "."]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Parse metadata from TOML text.
    pub fn parse(content: &str) -> Result<Self, ExecuteError> {
        let config: Config = toml::from_str(content).map_err(|e| ExecuteError::Config {
            path: PathBuf::from(CONFIG_FILE),
            message: e.message().to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load metadata from a file; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ExecuteError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            ExecuteError::Config { message, .. } => ExecuteError::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    fn validate(&self) -> Result<(), ExecuteError> {
        let invalid = |message: &str| ExecuteError::Config {
            path: PathBuf::from(CONFIG_FILE),
            message: message.to_string(),
        };

        let name = &self.metadata.package_name;
        if name.is_empty() {
            return Err(invalid("metadata.package_name cannot be empty"));
        }
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(invalid(
                "metadata.package_name may only contain alphanumeric characters and underscores",
            ));
        }
        if self.build.native_dir.is_absolute() {
            return Err(invalid("build.native_dir must be relative to the project root"));
        }
        if self.build.installer.is_empty() {
            return Err(invalid("build.installer cannot be empty"));
        }
        Ok(())
    }
}

/// Resolve the active environment's installation prefix.
///
/// An explicit `--prefix` wins; otherwise the first non-empty variable in
/// [`PREFIX_VARS`] is used verbatim.
pub fn resolve_prefix(explicit: Option<PathBuf>) -> Result<PathBuf, ExecuteError> {
    resolve_prefix_with(explicit, |key| std::env::var_os(key))
}

/// Same as [`resolve_prefix`] with an injectable variable lookup.
pub fn resolve_prefix_with(
    explicit: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<OsString>,
) -> Result<PathBuf, ExecuteError> {
    if let Some(prefix) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(prefix);
    }

    PREFIX_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(ExecuteError::NoPrefix)
}
