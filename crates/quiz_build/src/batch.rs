//! Batch step: render every source under a root and write the sibling output.
//!
//! Files are independent. A failed read or write is logged and recorded in
//! the report; the batch carries on and nothing is rolled back.

use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::render::{render_quiz, RenderRules};
use crate::walk::{collect_sources, output_path, Naming, WalkOptions, DEFAULT_SKIP_PREFIX};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub naming: Naming,
    pub skip_prefix: String,
    pub rules: RenderRules,
    /// Report outputs without writing them.
    pub dry_run: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            naming: Naming::quiz(),
            skip_prefix: DEFAULT_SKIP_PREFIX.to_string(),
            rules: RenderRules::quiz(),
            dry_run: false,
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// `(source, output)` pairs written (or that would be, on a dry run).
    pub written: Vec<(PathBuf, PathBuf)>,
    pub failed: Vec<(PathBuf, BuildError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Read `source`, render it with `rules`, write the result to `output`.
pub fn transform_file(source: &Path, output: &Path, rules: &RenderRules) -> Result<(), BuildError> {
    let markdown = std::fs::read_to_string(source).map_err(|e| BuildError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;
    let html = render_quiz(&markdown, rules);
    std::fs::write(output, html).map_err(|e| BuildError::Write {
        path: output.to_path_buf(),
        source: e,
    })
}

/// Transform every source under `root`. Only a failure to walk `root` itself
/// is returned as an error.
pub fn run_batch(root: &Path, options: &BatchOptions) -> Result<BatchReport, BuildError> {
    let walk = WalkOptions {
        naming: options.naming.clone(),
        skip_prefix: options.skip_prefix.clone(),
    };
    let sources = collect_sources(root, &walk)?;
    let mut report = BatchReport::default();

    for source in sources {
        let Some(output) = output_path(&source, &options.naming) else {
            report.failed.push((source.clone(), BuildError::Naming(source)));
            continue;
        };

        if options.dry_run {
            tracing::info!(source = %source.display(), output = %output.display(), "would write");
            report.written.push((source, output));
            continue;
        }

        match transform_file(&source, &output, &options.rules) {
            Ok(()) => {
                tracing::info!(source = %source.display(), output = %output.display(), "rendered");
                report.written.push((source, output));
            }
            Err(e) => {
                tracing::error!(error = %e, "quiz render failed");
                report.failed.push((source, e));
            }
        }
    }

    Ok(report)
}
