//! Test delegation to pytest.

use crate::output;

use super::context::Context;
use super::error::ExecuteError;
use super::runner::{Runner, Step};
use super::{Operation, Options, Outcome};

pub const TEST_RUNNER: &str = "pytest";

/// `test`.
pub struct TestRun;

impl Operation for TestRun {
    fn run(
        &self,
        ctx: &Context,
        runner: &dyn Runner,
        opts: &Options,
    ) -> Result<Outcome, ExecuteError> {
        let Some(pytest) = runner.locate(TEST_RUNNER, &ctx.bin_dir()) else {
            output::warning("Unable to run tests...");
            return Err(ExecuteError::ToolMissing {
                tool: TEST_RUNNER.to_string(),
                hint: "pip install pytest".to_string(),
            });
        };

        let step = Step::new(pytest.display().to_string(), &ctx.source_root)
            .arg(ctx.package_name())
            .args(opts.extra_args.iter().cloned());

        output::action(&format!("Testing {}", ctx.package_name()));
        let code = runner.status(&step)?;

        // A runner killed by a signal still counts as a failed run.
        Ok(Outcome::Exit(code.unwrap_or(1)))
    }
}
