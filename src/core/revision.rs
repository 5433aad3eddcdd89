use std::path::Path;
use std::time::SystemTime;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::FilesConfig;
use crate::error::{ChangesError, Result};
use super::arguments::TargetFile;

/// A sibling source file that may be an earlier revision of the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub modified: SystemTime,
}

/// Pick the candidate with the latest modification time strictly before
/// `target_modified`.
///
/// Ties keep the first candidate seen.
pub fn select_predecessor(target_modified: SystemTime, candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;

    for candidate in candidates {
        if candidate.modified >= target_modified {
            continue;
        }
        if best.map_or(true, |b| candidate.modified > b.modified) {
            best = Some(candidate);
        }
    }

    best
}

/// Looks through a directory for earlier revisions of a document
pub struct RevisionScanner {
    files: FilesConfig,
}

impl RevisionScanner {
    pub fn new(files: &FilesConfig) -> Self {
        Self {
            files: files.clone(),
        }
    }

    /// Modification time of the target file, which must exist
    pub fn target_modified(&self, dir: &Path, target: &TargetFile) -> Result<SystemTime> {
        let path = dir.join(&target.file_name);
        std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map_err(|source| ChangesError::TargetMetadata { path, source })
    }

    /// Whether a directory entry belongs to the revision group of `prefix`
    pub fn is_candidate(&self, name: &str, prefix: &str) -> bool {
        name.starts_with(prefix)
            && name.ends_with(&self.files.source_extension)
            && !name.ends_with(&self.files.changes_source_suffix())
    }

    /// Same-prefix source files in `dir`, sorted by name
    pub fn candidates(&self, dir: &Path, prefix: &str) -> Result<Vec<Candidate>> {
        let mut found = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(ChangesError::Io(e.into())),
                Err(e) => {
                    warn!("Skipping unreadable directory entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if !self.is_candidate(name, prefix) {
                continue;
            }

            match entry.metadata().map_err(std::io::Error::from).and_then(|m| m.modified()) {
                Ok(modified) => found.push(Candidate {
                    name: name.to_string(),
                    modified,
                }),
                Err(e) => warn!("Skipping {}: {}", name, e),
            }
        }

        debug!("{} candidate revision(s) for prefix {:?}", found.len(), prefix);
        Ok(found)
    }

    /// The immediate predecessor revision of `target` in `dir`, if any
    pub fn find_predecessor(&self, dir: &Path, target: &TargetFile) -> Result<Option<Candidate>> {
        let target_modified = self.target_modified(dir, target)?;
        let candidates = self.candidates(dir, &target.prefix)?;
        Ok(select_predecessor(target_modified, &candidates).cloned())
    }
}
