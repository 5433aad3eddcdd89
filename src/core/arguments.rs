use regex::Regex;

use crate::config::FilesConfig;

/// The source file named on the command line and the names derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    /// The argument exactly as given, e.g. `paper3.tex`
    pub file_name: String,

    /// File name without the source extension, e.g. `paper3`
    pub base: String,

    /// Leading text up to the first digit or dot, e.g. `paper`
    pub prefix: String,
}

/// Result of scanning the command line for the document source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenArgs {
    /// Arguments as received, without the program name
    pub original: Vec<String>,

    /// Arguments with the target replaced by its changes name
    pub rewritten: Vec<String>,

    /// Last source argument found, if any
    pub target: Option<TargetFile>,

    /// Earlier source arguments that were replaced in `rewritten` but are no
    /// longer tracked as the target
    pub shadowed: Vec<String>,
}

/// Finds the document source among the compiler arguments and derives the
/// names used by the rest of the pipeline
pub struct ArgumentRewriter {
    /// Splits a file name at the first digit or dot
    prefix_split: Regex,

    files: FilesConfig,
}

impl ArgumentRewriter {
    pub fn new(files: &FilesConfig) -> Self {
        Self {
            prefix_split: Regex::new(r"[0-9.]").expect("Invalid prefix regex"),
            files: files.clone(),
        }
    }

    /// Revision group of a file name: the maximal leading run without digits
    /// or dots
    pub fn prefix_of<'a>(&self, name: &'a str) -> &'a str {
        self.prefix_split.split(name).next().unwrap_or("")
    }

    /// Replace every source argument with `<base><marker><extension>`.
    ///
    /// Each match overwrites the previously recorded target, so with several
    /// source arguments the last one is the target. A bare extension is
    /// rewritten but never becomes the target.
    pub fn rewrite(&self, args: &[String]) -> RewrittenArgs {
        let extension = self.files.source_extension.as_str();
        let mut rewritten = Vec::with_capacity(args.len());
        let mut target: Option<TargetFile> = None;
        let mut shadowed = Vec::new();

        for arg in args {
            match arg.strip_suffix(extension) {
                Some(base) => {
                    rewritten.push(self.files.changes_name(base, extension));
                    if base.is_empty() {
                        continue;
                    }
                    let found = TargetFile {
                        file_name: arg.clone(),
                        base: base.to_string(),
                        prefix: self.prefix_of(arg).to_string(),
                    };
                    if let Some(previous) = target.replace(found) {
                        shadowed.push(previous.file_name);
                    }
                }
                None => rewritten.push(arg.clone()),
            }
        }

        RewrittenArgs {
            original: args.to_vec(),
            rewritten,
            target,
            shadowed,
        }
    }
}
