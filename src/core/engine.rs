// src/core/engine.rs
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use super::{
    ArgumentRewriter, Pipeline, ProcessRunner, RevisionScanner, StepKind, StepStatus,
    SystemRunner,
};

/// What one invocation did
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Steps that were run, in order
    pub pipeline: Pipeline,

    /// Earlier revision the diff was taken against
    pub predecessor: Option<String>,

    /// Status of the compile step, `None` if it could not be started
    pub compile_status: Option<StepStatus>,
}

impl Outcome {
    /// Process exit code: the compiler's, or 1 if it has none
    pub fn exit_code(&self) -> i32 {
        self.compile_status.and_then(|s| s.code).unwrap_or(1)
    }
}

/// Main orchestration engine: rewrite arguments, find the previous revision,
/// run the external steps
pub struct Engine {
    config: Config,
    work_dir: PathBuf,
    rewriter: ArgumentRewriter,
    scanner: RevisionScanner,
    runner: Box<dyn ProcessRunner>,
}

impl Engine {
    /// Engine spawning real processes in `work_dir`
    pub fn new(config: Config, work_dir: PathBuf) -> Self {
        let runner = Box::new(SystemRunner::new(work_dir.clone()));
        Self::with_runner(config, work_dir, runner)
    }

    pub fn with_runner(config: Config, work_dir: PathBuf, runner: Box<dyn ProcessRunner>) -> Self {
        debug!("Loaded configuration: {:?}", config);

        let rewriter = ArgumentRewriter::new(&config.files);
        let scanner = RevisionScanner::new(&config.files);

        Self {
            config,
            work_dir,
            rewriter,
            scanner,
            runner,
        }
    }

    /// Decide which steps to run for `args` without running them.
    ///
    /// Fails only when the target source file cannot be stat'ed.
    pub fn plan(&self, args: &[String]) -> Result<(Pipeline, Option<String>)> {
        let rewritten = self.rewriter.rewrite(args);

        let Some(target) = rewritten.target else {
            debug!("No {} argument, passing through", self.config.files.source_extension);
            return Ok((Pipeline::compile_only(&self.config, args), None));
        };

        if !rewritten.shadowed.is_empty() {
            warn!(
                "Several source files given, using the last one; ignoring {}",
                rewritten.shadowed.join(", ")
            );
        }

        info!("Filename {}", target.file_name);
        info!("Prefix is {}", target.prefix);

        match self.scanner.find_predecessor(&self.work_dir, &target)? {
            Some(predecessor) => {
                info!("Comparing with {}", predecessor.name);
                let pipeline = Pipeline::diff_and_compile(
                    &self.config,
                    &target.base,
                    &target.file_name,
                    &predecessor.name,
                    &rewritten.rewritten,
                );
                Ok((pipeline, Some(predecessor.name)))
            }
            None => {
                debug!("No earlier revision of {}", target.file_name);
                Ok((Pipeline::compile_only(&self.config, args), None))
            }
        }
    }

    /// Plan and run every step in order; step failures never stop the
    /// sequence
    pub async fn run(&self, args: &[String]) -> Result<Outcome> {
        let (pipeline, predecessor) = self.plan(args)?;
        let mut compile_status = None;

        for step in &pipeline.steps {
            let status = match self.runner.run(step).await {
                Ok(status) => {
                    if !status.success() {
                        warn!("{} exited with {:?}", step, status.code);
                    }
                    Some(status)
                }
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            };

            if step.kind == StepKind::Compile {
                compile_status = status;
            }
        }

        Ok(Outcome {
            pipeline,
            predecessor,
            compile_status,
        })
    }
}
