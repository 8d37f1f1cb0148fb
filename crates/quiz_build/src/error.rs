use std::path::PathBuf;

/// Quiz build error. Per-file variants are logged and collected by the batch;
/// only a walk failure at the root stops it.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("cannot walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no output name for {0}")]
    Naming(PathBuf),
}
