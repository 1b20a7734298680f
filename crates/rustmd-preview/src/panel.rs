use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use rustmd_engine::{RenderOptions, UNKNOWN_LANGUAGE, language_tag_for_path, render_with};

use crate::debounce::Debouncer;
use crate::document::{ActiveDocument, NO_ACTIVE_EDITOR};
use crate::highlight::{Highlighter, PassthroughHighlighter};
use crate::page::{PageOptions, render_page};

pub const PANEL_TITLE: &str = "Rust MD";

/// Editor column a panel is shown in, counted from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ViewColumn(pub u8);

impl ViewColumn {
    pub const ONE: ViewColumn = ViewColumn(1);

    /// The column to the right of the active editor, or the first column.
    pub fn beside(active: Option<ViewColumn>) -> ViewColumn {
        match active {
            Some(ViewColumn(n)) => ViewColumn(n.saturating_add(1)),
            None => ViewColumn::ONE,
        }
    }
}

/// A resource released when its panel is disposed.
pub struct Disposable {
    label: String,
    release: Box<dyn FnOnce()>,
}

impl Disposable {
    pub fn new(label: impl Into<String>, release: impl FnOnce() + 'static) -> Self {
        Self {
            label: label.into(),
            release: Box::new(release),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn dispose(self) {
        log::debug!("Releasing {}", self.label);
        (self.release)();
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

pub struct PanelSettings {
    pub render: RenderOptions,
    pub page: PageOptions,
    pub debounce: Duration,
    pub highlighter: Box<dyn Highlighter>,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            page: PageOptions::default(),
            debounce: Duration::from_millis(1000),
            highlighter: Box::new(PassthroughHighlighter),
        }
    }
}

/// The preview shown next to the editor.
///
/// Every refresh fully replaces the page; there is no diffing.
pub struct PreviewPanel {
    title: String,
    column: ViewColumn,
    visible: bool,
    html: String,
    render_count: usize,
    settings: PanelSettings,
    debouncer: Debouncer,
    disposables: Vec<Disposable>,
}

impl PreviewPanel {
    /// Creates a visible panel and renders the active document into it.
    pub fn open(
        column: ViewColumn,
        settings: PanelSettings,
        document: Option<&ActiveDocument>,
    ) -> Self {
        log::info!(
            "Opening preview panel in column {} (highlighter: {})",
            column.0,
            settings.highlighter.name()
        );
        let mut panel = Self {
            title: PANEL_TITLE.to_string(),
            column,
            visible: true,
            html: String::new(),
            render_count: 0,
            debouncer: Debouncer::new(settings.debounce),
            settings,
            disposables: Vec::new(),
        };
        panel.update(document);
        panel
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn column(&self) -> ViewColumn {
        self.column
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn register(&mut self, disposable: Disposable) {
        self.disposables.push(disposable);
    }

    /// Moves the panel to `column` and shows it.
    pub fn reveal(&mut self, column: ViewColumn, document: Option<&ActiveDocument>) {
        self.column = column;
        self.on_visibility_changed(true, document);
    }

    pub fn on_visibility_changed(&mut self, visible: bool, document: Option<&ActiveDocument>) {
        let became_visible = visible && !self.visible;
        self.visible = visible;
        if became_visible {
            self.update(document);
        }
    }

    /// The host switched editors; only refreshes while the panel is shown.
    pub fn on_active_document_changed(&mut self, document: Option<&ActiveDocument>) {
        if document.is_some() && self.visible {
            self.update(document);
        }
    }

    /// An edit landed in `edited`; refreshes are debounced and only track the
    /// active document.
    pub fn on_document_edited(
        &mut self,
        edited: &Path,
        active: Option<&ActiveDocument>,
        now: Instant,
    ) {
        if active.is_some_and(|doc| doc.file_name == edited) {
            self.debouncer.schedule(now);
        }
    }

    /// Runs a pending debounced refresh once it is due. Returns whether the
    /// page was re-rendered.
    pub fn tick(&mut self, now: Instant, document: Option<&ActiveDocument>) -> bool {
        if self.debouncer.fire_if_due(now) {
            self.update(document);
            true
        } else {
            false
        }
    }

    /// Re-renders the page from scratch.
    pub fn update(&mut self, document: Option<&ActiveDocument>) {
        let (text, language) = match document {
            Some(doc) => (doc.text.as_str(), language_tag_for_path(&doc.file_name)),
            None => (NO_ACTIVE_EDITOR, UNKNOWN_LANGUAGE.to_string()),
        };

        let fragment = render_with(text, &language, &self.settings.render);
        let highlighted = self.settings.highlighter.highlight(&fragment);
        self.html = render_page(&highlighted, &self.settings.page);
        self.render_count += 1;

        log::debug!(
            "Rendered {} bytes of preview (language: {language})",
            self.html.len()
        );
    }

    /// Tears the panel down, releasing resources newest first.
    pub fn dispose(mut self) {
        log::info!("Disposing preview panel");
        self.debouncer.cancel();
        while let Some(disposable) = self.disposables.pop() {
            disposable.dispose();
        }
    }
}
