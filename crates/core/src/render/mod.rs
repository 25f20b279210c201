//! Rendering of resolved types into source text

pub mod imports;
pub mod type_renderer;

pub use imports::{ImportGroup, ImportRegistry};
pub use type_renderer::TypeRenderer;
