//! Sphinx documentation build. The API docs import the compiled toolkit, so
//! the native build runs first.

use crate::output;

use super::build::build_native;
use super::context::Context;
use super::error::ExecuteError;
use super::remake;
use super::runner::{Runner, Step};
use super::{Operation, Options, Outcome};

pub const DOC_BUILDER: &str = "sphinx-build";

/// `build_sphinx`.
pub struct BuildDocs;

impl Operation for BuildDocs {
    fn run(
        &self,
        ctx: &Context,
        runner: &dyn Runner,
        opts: &Options,
    ) -> Result<Outcome, ExecuteError> {
        let sphinx = runner
            .locate(DOC_BUILDER, &ctx.bin_dir())
            .ok_or_else(|| ExecuteError::ToolMissing {
                tool: "Sphinx".to_string(),
                hint: "pip install sphinx".to_string(),
            })?;

        let decision = remake::resolve(ctx, opts.no_remake)?;
        build_native(ctx, runner, decision)?;

        output::action("Building Sphinx documentation");
        let step = Step::new(sphinx.display().to_string(), &ctx.source_root)
            .args(["-b", "html", "./docs", "./docs/_build/html"]);
        runner.check(&step)?;

        output::success("documentation written to docs/_build/html");
        Ok(Outcome::Success)
    }
}
