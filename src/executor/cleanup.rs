//! Clean phase - removes native build output, installed binaries and the
//! package build tree.

use std::path::PathBuf;

use crate::{manifest, output};

use super::build::make_step;
use super::context::Context;
use super::error::ExecuteError;
use super::runner::Runner;
use super::util::{remove_dir_if_exists, remove_if_exists};
use super::{Operation, Options, Outcome};

/// Build tree entries removed by a plain clean.
const TEMP_DIRS: &[&str] = &["temp"];

/// Additional build tree entries removed by `clean --all`.
const ALL_DIRS: &[&str] = &["lib", "scripts", "bdist"];

/// Check whether a build tree entry is `stem` or a platform variant of it
/// (`temp.linux-x86_64-3.11`, `scripts-3.11`).
fn matches_stem(name: &str, stem: &str) -> bool {
    match name.strip_prefix(stem) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('-'),
        None => false,
    }
}

/// `clean`.
pub struct Clean;

impl Operation for Clean {
    fn run(
        &self,
        ctx: &Context,
        runner: &dyn Runner,
        opts: &Options,
    ) -> Result<Outcome, ExecuteError> {
        output::action("Cleaning C binaries for aXe");

        output::sub_action("make clean");
        runner.check(&make_step(ctx, "clean"))?;

        output::sub_action("installed binaries");
        let removed = remove_installed_binaries(ctx)?;
        output::detail(&format!(
            "{} of {} binaries removed from {}",
            removed.len(),
            manifest::BINARIES.len(),
            ctx.bin_dir().display()
        ));

        if remove_if_exists(ctx, &ctx.config_header())? {
            output::detail(&format!("removed {}", ctx.config_header().display()));
        }

        output::sub_action("build tree");
        clean_build_tree(ctx, opts.all)?;

        output::success("clean finished");
        Ok(Outcome::Success)
    }
}

/// Remove every manifest binary present in the environment's bin directory.
///
/// Missing binaries are skipped. Returns the paths that were removed.
pub fn remove_installed_binaries(ctx: &Context) -> Result<Vec<PathBuf>, ExecuteError> {
    let bin_dir = ctx.bin_dir();
    let mut removed = Vec::new();

    for name in manifest::BINARIES {
        let path = bin_dir.join(name);
        if remove_if_exists(ctx, &path)? {
            removed.push(path);
        }
    }

    Ok(removed)
}

/// Remove package build directories under `<source_root>/build`.
///
/// Entries are matched by stem (`temp.linux-x86_64-3.11`, `lib`, ...).
pub fn clean_build_tree(ctx: &Context, all: bool) -> Result<Vec<PathBuf>, ExecuteError> {
    let build_dir = ctx.source_root.join("build");
    let mut removed = Vec::new();

    if !build_dir.is_dir() {
        return Ok(removed);
    }

    let stems: Vec<&str> = if all {
        TEMP_DIRS.iter().chain(ALL_DIRS).copied().collect()
    } else {
        TEMP_DIRS.to_vec()
    };

    for entry in std::fs::read_dir(&build_dir)?.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if stems.iter().any(|stem| matches_stem(&name, stem)) {
            let path = entry.path();
            if remove_dir_if_exists(ctx, &path)? {
                removed.push(path);
            }
        }
    }

    if all && !ctx.dry_run && std::fs::read_dir(&build_dir)?.next().is_none() {
        std::fs::remove_dir(&build_dir)?;
    }

    removed.sort();
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Context) {
        let dir = TempDir::new().unwrap();
        let ctx = Context::with_prefix(dir.path().join("env")).source_root(dir.path().join("src"));
        std::fs::create_dir_all(ctx.bin_dir()).unwrap();
        std::fs::create_dir_all(ctx.source_root.join("build")).unwrap();
        (dir, ctx)
    }

    #[test]
    fn test_remove_installed_binaries_only_touches_manifest() {
        let (_dir, ctx) = setup();
        std::fs::write(ctx.bin_dir().join("aXe_GOL2AF"), "").unwrap();
        std::fs::write(ctx.bin_dir().join("aXe_BE"), "").unwrap();
        std::fs::write(ctx.bin_dir().join("python"), "").unwrap();

        let removed = remove_installed_binaries(&ctx).unwrap();

        assert_eq!(removed.len(), 2);
        assert!(!ctx.bin_dir().join("aXe_GOL2AF").exists());
        assert!(!ctx.bin_dir().join("aXe_BE").exists());
        assert!(ctx.bin_dir().join("python").exists());
    }

    #[test]
    fn test_remove_installed_binaries_missing_bin_dir() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::with_prefix(dir.path().join("nowhere"));
        assert!(remove_installed_binaries(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_remove_installed_binaries_dry_run_keeps_files() {
        let (_dir, ctx) = setup();
        let ctx = ctx.dry_run(true);
        std::fs::write(ctx.bin_dir().join("aXe_TFIT"), "").unwrap();

        let removed = remove_installed_binaries(&ctx).unwrap();
        assert_eq!(removed, vec![ctx.bin_dir().join("aXe_TFIT")]);
        assert!(ctx.bin_dir().join("aXe_TFIT").exists());
    }

    #[test]
    fn test_clean_build_tree_default_removes_temp_only() {
        let (_dir, ctx) = setup();
        let build = ctx.source_root.join("build");
        std::fs::create_dir_all(build.join("temp.linux-x86_64-3.11")).unwrap();
        std::fs::create_dir_all(build.join("lib.linux-x86_64-3.11")).unwrap();

        let removed = clean_build_tree(&ctx, false).unwrap();

        assert_eq!(removed, vec![build.join("temp.linux-x86_64-3.11")]);
        assert!(build.join("lib.linux-x86_64-3.11").exists());
    }

    #[test]
    fn test_clean_build_tree_all() {
        let (_dir, ctx) = setup();
        let build = ctx.source_root.join("build");
        for name in ["temp.x", "lib", "scripts-3.11", "bdist.linux-x86_64"] {
            std::fs::create_dir_all(build.join(name)).unwrap();
        }

        let removed = clean_build_tree(&ctx, true).unwrap();

        assert_eq!(removed.len(), 4);
        assert!(!build.exists());
    }

    #[test]
    fn test_clean_build_tree_keeps_unrelated_entries() {
        let (_dir, ctx) = setup();
        let build = ctx.source_root.join("build");
        std::fs::create_dir_all(build.join("sphinx")).unwrap();

        clean_build_tree(&ctx, true).unwrap();
        assert!(build.join("sphinx").exists());
    }

    #[test]
    fn test_clean_build_tree_keeps_lookalike_names() {
        let (_dir, ctx) = setup();
        let build = ctx.source_root.join("build");
        for name in ["library_docs", "scriptsold", "temporary", "bdistro", "lib.linux-x86_64"] {
            std::fs::create_dir_all(build.join(name)).unwrap();
        }

        let removed = clean_build_tree(&ctx, true).unwrap();

        assert_eq!(removed, vec![build.join("lib.linux-x86_64")]);
        assert!(build.join("library_docs").exists());
        assert!(build.join("scriptsold").exists());
        assert!(build.join("temporary").exists());
        assert!(build.join("bdistro").exists());
    }

    #[test]
    fn test_matches_stem() {
        assert!(matches_stem("lib", "lib"));
        assert!(matches_stem("lib.linux-x86_64-3.11", "lib"));
        assert!(matches_stem("scripts-3.11", "scripts"));
        assert!(!matches_stem("library_docs", "lib"));
        assert!(!matches_stem("sphinx", "temp"));
    }

    #[test]
    fn test_clean_build_tree_without_build_dir() {
        let dir = TempDir::new().unwrap();
        let ctx = Context::default().source_root(dir.path());
        assert!(clean_build_tree(&ctx, true).unwrap().is_empty());
    }
}
