use clap::Parser;
use anyhow::Result;

use crate::core::{Engine, Outcome};

/// Everything after the program name is handed to `latex`, so clap's own
/// help and version flags are switched off.
#[derive(Parser, Debug)]
#[command(name = "latexchanges")]
#[command(about = "Compile a latexdiff against the previous revision, then run latex")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Compiler arguments; the one ending in .tex is the document
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub async fn execute(self, engine: Engine) -> Result<Outcome> {
        Ok(engine.run(&self.args).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_captured_verbatim() {
        let cli = Cli::try_parse_from([
            "latexchanges",
            "-interaction=nonstopmode",
            "--help",
            "paper3.tex",
        ])
        .unwrap();

        assert_eq!(cli.args, vec!["-interaction=nonstopmode", "--help", "paper3.tex"]);
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["latexchanges"]).unwrap();
        assert!(cli.args.is_empty());
    }
}
