pub mod io;
pub mod language;
pub mod render;

// Re-export key types for easier usage
pub use language::*;
pub use render::{
    DEFAULT_MARKER, RenderOptions,
    classify::{LineKind, classify},
    render, render_with,
};
