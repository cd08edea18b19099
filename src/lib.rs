//! refdoc: turn a documentation generator's reflection graph into a
//! simplified, serializable document model.
//!
//! - `reflection`: the input graph, deserialized from TypeDoc-style JSON
//! - `visitor`: the mapping from reflections to document entries
//! - `model`: the output records
//! - `types`, `render`: the collaborators the visitor is handed
//! - `config`, `paths`: options and path helpers

pub mod config;
pub mod model;
pub mod paths;
pub mod reflection;
pub mod render;
pub mod types;
pub mod visitor;

pub use config::VisitorOptions;
pub use model::*;
pub use reflection::Reflection;
pub use render::{create_renderer, BlockRenderer};
pub use types::{TypeResolver, TypeScriptResolver};
pub use visitor::Visitor;
