//! Host-side plumbing around the line renderer.
//!
//! Everything here is driven by host events (panel creation, visibility
//! changes, document edits); rendering itself stays in `rustmd-engine`.

pub mod debounce;
pub mod document;
pub mod highlight;
pub mod page;
pub mod panel;
pub mod registry;

pub use debounce::Debouncer;
pub use document::{ActiveDocument, NO_ACTIVE_EDITOR};
pub use highlight::{Highlighter, PassthroughHighlighter};
pub use page::{PageOptions, render_page};
pub use panel::{Disposable, PanelSettings, PreviewPanel, ViewColumn};
pub use registry::PanelRegistry;
