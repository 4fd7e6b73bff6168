//! Install phase - configures, compiles and installs the aXe C code, stamps
//! the version module, then runs the package installer.

use crate::output;

use super::context::Context;
use super::error::ExecuteError;
use super::remake::{self, RemakeDecision};
use super::runner::{Runner, Step};
use super::version;
use super::{Operation, Options, Outcome};

/// `install` and `build_ext`.
pub struct Install;

impl Operation for Install {
    fn run(
        &self,
        ctx: &Context,
        runner: &dyn Runner,
        opts: &Options,
    ) -> Result<Outcome, ExecuteError> {
        let decision = remake::resolve(ctx, opts.no_remake)?;
        let installer = installer_step(ctx, runner)?;

        output::action("Resolving version metadata");
        let (info, path) = version::stamp(ctx, runner)?;
        output::detail(&format!("{} -> {}", info, path.display()));

        build_native(ctx, runner, decision)?;

        output::action(&format!("Installing {}", ctx.package_name()));
        runner.check(&installer)?;

        output::success(&format!("{} installed into {}", ctx.package_name(), ctx.prefix.display()));
        Ok(Outcome::Success)
    }
}

/// `sh ./configure` with every dependency path pointing at the prefix.
pub fn configure_step(ctx: &Context) -> Step {
    Step::new("sh", ctx.native_dir())
        .arg("./configure")
        .args(ctx.configure_args())
}

/// `make <target>` in the native source directory.
pub fn make_step(ctx: &Context, target: &str) -> Step {
    Step::new("make", ctx.native_dir()).arg(target)
}

/// Configure, clean and install the native toolkit unless the decision
/// says the existing build is trusted.
pub fn build_native(
    ctx: &Context,
    runner: &dyn Runner,
    decision: RemakeDecision,
) -> Result<(), ExecuteError> {
    if !decision.should_build() {
        output::skip(&format!(
            "Makefile present in {}, skipping configure and make",
            ctx.native_dir().display()
        ));
        return Ok(());
    }

    output::action("Building aXe C code");

    output::sub_action("configure");
    runner.check(&configure_step(ctx))?;

    output::sub_action("make clean");
    runner.check(&make_step(ctx, "clean"))?;

    output::sub_action("make install");
    runner.check(&make_step(ctx, "install"))?;

    Ok(())
}

/// Build the package installer step from the configured command line.
///
/// The installer program is looked up in the environment first so the
/// package lands in the same prefix as the native binaries.
pub fn installer_step(ctx: &Context, runner: &dyn Runner) -> Result<Step, ExecuteError> {
    let (program, args) = ctx
        .config
        .build
        .installer
        .split_first()
        .ok_or_else(|| ExecuteError::Config {
            path: ctx.source_root.join(crate::config::CONFIG_FILE),
            message: "build.installer cannot be empty".to_string(),
        })?;

    let resolved = runner
        .locate(program, &ctx.bin_dir())
        .ok_or_else(|| ExecuteError::ToolMissing {
            tool: program.clone(),
            hint: format!("activate the environment at {}", ctx.prefix.display()),
        })?;

    Ok(Step::new(resolved.display().to_string(), &ctx.source_root).args(args.iter().cloned()))
}
