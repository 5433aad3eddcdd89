use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ChangesError, Result};

/// Environment variable naming an optional TOML configuration file
pub const CONFIG_ENV_VAR: &str = "LATEXCHANGES_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External programs invoked by the pipeline
    pub tools: ToolsConfig,

    /// File naming conventions
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Document compiler
    pub latex: String,

    /// Diff tool producing the marked-up source
    pub latexdiff: String,

    /// Extra arguments for latexdiff, placed before the two file names
    pub latexdiff_args: Vec<String>,

    /// File copy utility
    pub copy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Extension that marks an argument as the document source
    pub source_extension: String,

    /// Marker inserted between base name and extension for derived files
    pub changes_marker: String,

    /// Auxiliary files duplicated under the changes name before compiling
    pub carried_extensions: Vec<String>,

    /// Compiler output copied back to the base name afterwards
    pub output_extension: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            latex: "latex".to_string(),
            latexdiff: "latexdiff".to_string(),
            latexdiff_args: Vec::new(),
            copy: "cp".to_string(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            source_extension: ".tex".to_string(),
            changes_marker: ".changes".to_string(),
            carried_extensions: vec![".aux".to_string(), ".bbl".to_string()],
            output_extension: ".dvi".to_string(),
        }
    }
}

impl FilesConfig {
    /// `.changes.tex` with the default settings
    pub fn changes_source_suffix(&self) -> String {
        format!("{}{}", self.changes_marker, self.source_extension)
    }

    /// Derived name `<base><marker><extension>`
    pub fn changes_name(&self, base: &str, extension: &str) -> String {
        format!("{}{}{}", base, self.changes_marker, extension)
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChangesError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ChangesError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by `LATEXCHANGES_CONFIG`, or fall back to defaults.
    ///
    /// Nothing is discovered on disk implicitly.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.files.source_extension.is_empty() {
            return Err(ChangesError::Config(
                "files.source_extension must not be empty".to_string(),
            ));
        }
        if self.files.changes_marker.is_empty() {
            return Err(ChangesError::Config(
                "files.changes_marker must not be empty".to_string(),
            ));
        }
        for (key, program) in [
            ("tools.latex", &self.tools.latex),
            ("tools.latexdiff", &self.tools.latexdiff),
            ("tools.copy", &self.tools.copy),
        ] {
            if program.trim().is_empty() {
                return Err(ChangesError::Config(format!("{} must not be empty", key)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_defaults_match_historical_tools() {
        let config = Config::default();
        assert_eq!(config.tools.latex, "latex");
        assert_eq!(config.tools.latexdiff, "latexdiff");
        assert_eq!(config.files.source_extension, ".tex");
        assert_eq!(config.files.changes_source_suffix(), ".changes.tex");
        assert_eq!(config.files.changes_name("paper3", ".aux"), "paper3.changes.aux");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("latexchanges.toml");
        file.write_str("[tools]\nlatex = \"pdflatex\"\nlatexdiff_args = [\"--flatten\"]\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.tools.latex, "pdflatex");
        assert_eq!(config.tools.latexdiff_args, vec!["--flatten".to_string()]);
        assert_eq!(config.tools.copy, "cp");
        assert_eq!(config.files.output_extension, ".dvi");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = Config::load(temp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ChangesError::Config(_)));
    }

    #[test]
    fn test_empty_extension_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("bad.toml");
        file.write_str("[files]\nsource_extension = \"\"\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("source_extension"));
    }
}
