//! Quiz pre-rendering for the documentation site: markdown with per-node
//! render rules, a directory walk, and the batch step that writes results
//! next to their sources.

pub mod batch;
pub mod error;
pub mod render;
pub mod walk;

pub use batch::{run_batch, transform_file, BatchOptions, BatchReport};
pub use error::BuildError;
pub use render::{render_quiz, Node, NodeKind, RenderFn, RenderRules};
pub use walk::{collect_sources, output_path, Naming, WalkOptions};
