use crate::document::ActiveDocument;
use crate::panel::{PanelSettings, PreviewPanel, ViewColumn};

/// Owns the single live preview panel.
///
/// Created once by the host integration and torn down with it. At most one
/// panel exists at a time; asking for another reveals the existing one.
#[derive(Default)]
pub struct PanelRegistry {
    current: Option<PreviewPanel>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveals the live panel in `column`, or opens one with settings from
    /// `settings`. The closure only runs when a panel is created.
    pub fn create_or_reveal<F>(
        &mut self,
        column: ViewColumn,
        document: Option<&ActiveDocument>,
        settings: F,
    ) -> &mut PreviewPanel
    where
        F: FnOnce() -> PanelSettings,
    {
        let panel = match self.current.take() {
            Some(mut panel) => {
                log::debug!("Revealing existing preview panel");
                panel.reveal(column, document);
                panel
            }
            None => PreviewPanel::open(column, settings(), document),
        };
        self.current.insert(panel)
    }

    pub fn current(&self) -> Option<&PreviewPanel> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut PreviewPanel> {
        self.current.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Closes the live panel, if any. Returns whether one was disposed.
    pub fn dispose(&mut self) -> bool {
        match self.current.take() {
            Some(panel) => {
                panel.dispose();
                true
            }
            None => false,
        }
    }
}

impl Drop for PanelRegistry {
    fn drop(&mut self) {
        self.dispose();
    }
}
