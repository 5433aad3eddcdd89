use std::fmt;
use std::path::PathBuf;

use crate::config::Config;

/// What an external step is expected to accomplish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Duplicate an auxiliary file under the changes name
    CarryAuxiliary,

    /// Run the diff tool against the predecessor revision
    Diff,

    /// Run the document compiler
    Compile,

    /// Copy the compiled changes output over the regular output
    PublishOutput,
}

/// One external process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub program: String,
    pub args: Vec<String>,

    /// File that receives the process's stdout, relative to the working dir
    pub stdout: Option<PathBuf>,
}

impl Step {
    fn new(kind: StepKind, program: &str, args: Vec<String>) -> Self {
        Self {
            kind,
            program: program.to_string(),
            args,
            stdout: None,
        }
    }

    fn copy(config: &Config, from: String, to: String, kind: StepKind) -> Self {
        Self::new(kind, &config.tools.copy, vec![from, to])
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        if let Some(stdout) = &self.stdout {
            write!(f, " > {}", stdout.display())?;
        }
        Ok(())
    }
}

/// Ordered external steps for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub steps: Vec<Step>,
}

impl Pipeline {
    /// Carry auxiliaries, diff against `predecessor`, compile the changes
    /// file and publish its output under the base name.
    pub fn diff_and_compile(
        config: &Config,
        base: &str,
        target_file: &str,
        predecessor: &str,
        rewritten_args: &[String],
    ) -> Self {
        let files = &config.files;
        let mut steps = Vec::new();

        for ext in &files.carried_extensions {
            steps.push(Step::copy(
                config,
                format!("{}{}", base, ext),
                files.changes_name(base, ext),
                StepKind::CarryAuxiliary,
            ));
        }

        let mut diff_args = config.tools.latexdiff_args.clone();
        diff_args.push(predecessor.to_string());
        diff_args.push(target_file.to_string());
        let mut diff = Step::new(StepKind::Diff, &config.tools.latexdiff, diff_args);
        diff.stdout = Some(PathBuf::from(files.changes_name(base, &files.source_extension)));
        steps.push(diff);

        steps.push(Step::new(StepKind::Compile, &config.tools.latex, rewritten_args.to_vec()));

        steps.push(Step::copy(
            config,
            files.changes_name(base, &files.output_extension),
            format!("{}{}", base, files.output_extension),
            StepKind::PublishOutput,
        ));

        Self { steps }
    }

    /// Run the compiler on the arguments as given
    pub fn compile_only(config: &Config, args: &[String]) -> Self {
        Self {
            steps: vec![Step::new(StepKind::Compile, &config.tools.latex, args.to_vec())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_diff_and_compile_sequence() {
        let config = Config::default();
        let pipeline = Pipeline::diff_and_compile(
            &config,
            "paper3",
            "paper3.tex",
            "paper2.tex",
            &args(&["-src", "paper3.changes.tex"]),
        );

        let rendered: Vec<String> = pipeline.steps.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "cp paper3.aux paper3.changes.aux",
                "cp paper3.bbl paper3.changes.bbl",
                "latexdiff paper2.tex paper3.tex > paper3.changes.tex",
                "latex -src paper3.changes.tex",
                "cp paper3.changes.dvi paper3.dvi",
            ]
        );

        let kinds: Vec<StepKind> = pipeline.steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::CarryAuxiliary,
                StepKind::CarryAuxiliary,
                StepKind::Diff,
                StepKind::Compile,
                StepKind::PublishOutput,
            ]
        );
    }

    #[test]
    fn test_latexdiff_args_precede_file_names() {
        let mut config = Config::default();
        config.tools.latexdiff_args = args(&["--type=CFONT"]);

        let pipeline = Pipeline::diff_and_compile(&config, "a1", "a1.tex", "a0.tex", &[]);
        let diff = pipeline.steps.iter().find(|s| s.kind == StepKind::Diff).unwrap();
        assert_eq!(diff.args, args(&["--type=CFONT", "a0.tex", "a1.tex"]));
    }

    #[test]
    fn test_compile_only_passes_arguments_through() {
        let pipeline = Pipeline::compile_only(&Config::default(), &args(&["draftA.tex"]));
        assert_eq!(pipeline.steps.len(), 1);
        assert_eq!(pipeline.steps[0].to_string(), "latex draftA.tex");
        assert!(pipeline.steps[0].stdout.is_none());
    }
}
