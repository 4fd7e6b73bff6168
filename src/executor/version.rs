//! Version metadata.
//!
//! The release helper (`relic`) is used from the project checkout when
//! present and cloned once otherwise. The package version itself comes from
//! `git describe` and is written to `<package>/version.py`.

use std::fmt;
use std::path::PathBuf;

use crate::config::Metadata;
use crate::output::{self, SpinnerGuard};

use super::context::Context;
use super::error::ExecuteError;
use super::runner::{Runner, Step};
use super::{Operation, Options, Outcome};

pub const HELPER_REPO: &str = "https://github.com/spacetelescope/relic.git";
pub const HELPER_DIR: &str = "relic";

/// Version reported when git cannot describe the checkout.
const UNKNOWN_VERSION: &str = "0.0.0.dev0";

/// Result of locating the release helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelperResolution {
    FoundLocally(PathBuf),
    Fetched(PathBuf),
    Failed(String),
}

/// Locate the release helper, cloning it when the checkout has none.
///
/// There is exactly one fallback; a failed clone is not retried.
pub fn resolve_helper(ctx: &Context, runner: &dyn Runner) -> HelperResolution {
    let local = ctx.source_root.join(HELPER_DIR);
    if local.is_dir() {
        return HelperResolution::FoundLocally(local);
    }

    let step = Step::new("git", &ctx.source_root)
        .args(["clone", HELPER_REPO, HELPER_DIR]);

    let _guard = SpinnerGuard::new(&format!("cloning {}", HELPER_DIR));
    match runner.output(&step) {
        Ok(_) => HelperResolution::Fetched(local),
        Err(e) => HelperResolution::Failed(e.to_string()),
    }
}

/// Version derived from `git describe --tags --long --always`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub tag: String,
    /// Commits since the tag
    pub post: u32,
    pub commit: String,
}

impl VersionInfo {
    pub fn unknown() -> Self {
        Self {
            tag: UNKNOWN_VERSION.to_string(),
            post: 0,
            commit: "unknown".to_string(),
        }
    }

    /// Parse `<tag>-<count>-g<sha>`, or a bare sha for untagged history.
    pub fn parse_describe(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let mut parts = s.rsplitn(3, '-');
        let (sha, count, tag) = (parts.next(), parts.next(), parts.next());

        if let (Some(sha), Some(count), Some(tag)) = (sha, count, tag) {
            if let (Some(sha), Ok(post)) = (sha.strip_prefix('g'), count.parse()) {
                if !tag.is_empty() {
                    return Some(Self {
                        tag: tag.to_string(),
                        post,
                        commit: sha.to_string(),
                    });
                }
            }
        }

        if s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(Self {
                commit: s.to_string(),
                ..Self::unknown()
            });
        }

        None
    }

    /// PEP 386 style version string.
    pub fn pep386(&self) -> String {
        let base = self.tag.strip_prefix('v').unwrap_or(&self.tag);
        if self.post == 0 {
            base.to_string()
        } else {
            format!("{}.dev{}", base, self.post)
        }
    }

    /// Contents of the generated `version.py`, including package metadata.
    pub fn render_module(&self, metadata: &Metadata) -> String {
        let fields = [
            ("__version__", self.pep386()),
            ("__version_post__", self.post.to_string()),
            ("__version_commit__", self.commit.clone()),
            ("__package_name__", metadata.package_name.clone()),
            ("__description__", metadata.description.clone()),
            ("__author__", metadata.author.clone()),
            ("__author_email__", metadata.author_email.clone()),
            ("__license__", metadata.license.clone()),
            ("__url__", metadata.url.clone()),
            ("__classifier__", metadata.classifier.clone()),
            ("__long_description__", metadata.long_description.clone()),
        ];

        let mut module = String::from("# Generated by axe-build. Do not edit.\n");
        for (name, value) in fields {
            module.push_str(&format!("{} = {}\n", name, py_string(&value)));
        }
        module
    }
}

/// Quote a value as a Python string literal.
fn py_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pep386(), self.commit)
    }
}

/// Describe the checkout, falling back to [`VersionInfo::unknown`].
pub fn describe(ctx: &Context, runner: &dyn Runner) -> VersionInfo {
    let step = Step::new("git", &ctx.source_root).args(["describe", "--tags", "--long", "--always"]);
    runner
        .output(&step)
        .ok()
        .and_then(|out| VersionInfo::parse_describe(&out))
        .unwrap_or_else(VersionInfo::unknown)
}

/// Write `<source_root>/<package>/version.py`.
pub fn write_module(ctx: &Context, info: &VersionInfo) -> Result<PathBuf, ExecuteError> {
    let path = ctx.source_root.join(ctx.package_name()).join("version.py");
    if ctx.dry_run {
        output::detail(&format!("would write {}", path.display()));
        return Ok(path);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, info.render_module(&ctx.config.metadata))?;
    Ok(path)
}

/// Resolve the helper, describe the checkout and write `version.py`.
///
/// A helper that can be neither found nor fetched is fatal.
pub fn stamp(ctx: &Context, runner: &dyn Runner) -> Result<(VersionInfo, PathBuf), ExecuteError> {
    match resolve_helper(ctx, runner) {
        HelperResolution::FoundLocally(path) => {
            output::detail(&format!("using {}", path.display()));
        }
        HelperResolution::Fetched(path) => {
            output::detail(&format!("cloned {} to {}", HELPER_REPO, path.display()));
        }
        HelperResolution::Failed(reason) => return Err(ExecuteError::VersionHelper(reason)),
    }

    let info = describe(ctx, runner);
    let path = write_module(ctx, &info)?;
    Ok((info, path))
}

/// `version`.
pub struct ResolveVersion;

impl Operation for ResolveVersion {
    fn run(
        &self,
        ctx: &Context,
        runner: &dyn Runner,
        _opts: &Options,
    ) -> Result<Outcome, ExecuteError> {
        output::action("Resolving version metadata");
        let (info, path) = stamp(ctx, runner)?;

        output::success(&format!("{} {} -> {}", ctx.package_name(), info, path.display()));
        Ok(Outcome::Success)
    }
}
