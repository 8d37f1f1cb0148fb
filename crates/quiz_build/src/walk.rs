//! Source discovery and output naming.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::BuildError;

/// Directories whose name starts with this are not descended into.
pub const DEFAULT_SKIP_PREFIX: &str = "_";

/// Source → output file-name suffix substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    pub source_suffix: String,
    pub output_suffix: String,
}

impl Naming {
    /// `*quiz-source.md` → `*quiz.md`.
    pub fn quiz() -> Self {
        Self {
            source_suffix: "quiz-source.md".into(),
            output_suffix: "quiz.md".into(),
        }
    }

    /// `*.md` → `*.html`.
    pub fn html() -> Self {
        Self {
            source_suffix: ".md".into(),
            output_suffix: ".html".into(),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(&self.source_suffix))
    }
}

impl Default for Naming {
    fn default() -> Self {
        Self::quiz()
    }
}

/// Sibling output path for `source`, or `None` when the name does not carry
/// the source suffix.
pub fn output_path(source: &Path, naming: &Naming) -> Option<PathBuf> {
    let name = source.file_name()?.to_str()?;
    let stem = name.strip_suffix(naming.source_suffix.as_str())?;
    Some(source.with_file_name(format!("{}{}", stem, naming.output_suffix)))
}

/// What to collect and which subdirectories to prune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    pub naming: Naming,
    /// Empty prunes nothing.
    pub skip_prefix: String,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            naming: Naming::quiz(),
            skip_prefix: DEFAULT_SKIP_PREFIX.to_string(),
        }
    }
}

fn is_skipped_dir(entry: &walkdir::DirEntry, skip_prefix: &str) -> bool {
    entry.depth() > 0
        && !skip_prefix.is_empty()
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|n| n.starts_with(skip_prefix))
}

/// Every file under `root` matching `options.naming`, sorted. Subdirectories
/// whose name starts with `options.skip_prefix` are pruned. Unreadable entries
/// below the root are logged and skipped.
pub fn collect_sources(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>, BuildError> {
    let naming = &options.naming;
    let skip_prefix = options.skip_prefix.as_str();
    let mut sources = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e, skip_prefix));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(BuildError::Walk {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && naming.matches(entry.path()) {
            sources.push(entry.into_path());
        }
    }

    sources.sort();
    tracing::debug!(root = %root.display(), count = sources.len(), "collected sources");
    Ok(sources)
}
