use anyhow::Result;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustmd_engine::io::{self, IoError};
use rustmd_preview::{ActiveDocument, PreviewPanel};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

/// How often the debouncer is checked while no events arrive.
const TICK: Duration = Duration::from_millis(100);

/// Whether a filesystem event concerns the watched document.
pub fn touches_document(event: &Event, document: &Path) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    relevant
        && event
            .paths
            .iter()
            .any(|path| path.file_name().is_some() && path.file_name() == document.file_name())
}

/// One turn of the watch loop.
///
/// `reloaded` carries the freshly read document text when the file changed
/// since the last turn. Returns whether a page was written.
pub fn step(
    panel: &mut PreviewPanel,
    document: &mut ActiveDocument,
    reloaded: Option<Result<String, IoError>>,
    now: Instant,
    output: &Path,
) -> Result<bool> {
    match reloaded {
        Some(Ok(text)) => {
            document.text = text;
            panel.on_document_edited(&document.file_name, Some(&*document), now);
        }
        Some(Err(e)) => log::warn!("Failed to reload {}: {e}", document.file_name.display()),
        None => {}
    }

    if panel.tick(now, Some(&*document)) {
        io::write_page(output, panel.html())?;
        log::info!("Wrote preview to {}", output.display());
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Re-renders `document` into `output` until the watcher goes away.
pub fn run(panel: &mut PreviewPanel, mut document: ActiveDocument, output: &Path) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.send(res);
    })?;

    // Watch the directory so atomic saves (temp file + rename) are seen
    let dir = document
        .file_name
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    log::info!(
        "Watching {} for changes (Ctrl-C to stop)",
        document.file_name.display()
    );

    loop {
        let mut changed = false;
        match rx.recv_timeout(TICK) {
            Ok(Ok(event)) => changed = touches_document(&event, &document.file_name),
            Ok(Err(e)) => log::warn!("File watcher error: {e}"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
        // A single save often arrives as a burst of events
        while let Ok(res) = rx.try_recv() {
            if let Ok(event) = res {
                changed |= touches_document(&event, &document.file_name);
            }
        }

        let reloaded = changed.then(|| io::read_document(&document.file_name));
        step(panel, &mut document, reloaded, Instant::now(), output)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use rustmd_preview::{PanelSettings, ViewColumn};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    fn open(document: &ActiveDocument) -> PreviewPanel {
        PreviewPanel::open(ViewColumn::ONE, PanelSettings::default(), Some(document))
    }

    #[test]
    fn test_touches_document() {
        let document = Path::new("notes/intro.rsmd");

        assert!(touches_document(
            &event(EventKind::Modify(ModifyKind::Any), "/home/u/notes/intro.rsmd"),
            document
        ));
        assert!(touches_document(
            &event(EventKind::Create(CreateKind::File), "./intro.rsmd"),
            document
        ));
        assert!(!touches_document(
            &event(EventKind::Modify(ModifyKind::Any), "/home/u/notes/other.rsmd"),
            document
        ));
        assert!(!touches_document(
            &event(EventKind::Access(AccessKind::Any), "/home/u/notes/intro.rsmd"),
            document
        ));
    }

    #[test]
    fn test_edits_write_page_once_debounce_fires() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out").join("page.html");
        let mut document = ActiveDocument::new(dir.path().join("intro.rsmd"), "first");
        let mut panel = open(&document);
        let start = Instant::now();

        let wrote = step(&mut panel, &mut document, Some(Ok("second".into())), start, &output).unwrap();
        assert!(!wrote);
        assert!(!output.exists());

        let at = |ms| start + Duration::from_millis(ms);
        assert!(!step(&mut panel, &mut document, Some(Ok("third".into())), at(300), &output).unwrap());
        assert!(!step(&mut panel, &mut document, None, at(1000), &output).unwrap());
        assert!(step(&mut panel, &mut document, None, at(1300), &output).unwrap());

        let page = fs::read_to_string(&output).unwrap();
        assert!(page.contains(">third</span>"));
        assert_eq!(panel.render_count(), 2);

        // Nothing pending, nothing written
        assert!(!step(&mut panel, &mut document, None, at(5000), &output).unwrap());
    }

    #[test]
    fn test_each_fire_rewrites_page() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("page.html");
        let mut document = ActiveDocument::new(dir.path().join("intro.rsmd"), "first");
        let mut panel = open(&document);
        let start = Instant::now();
        let at = |ms| start + Duration::from_millis(ms);

        step(&mut panel, &mut document, Some(Ok("$ one".into())), at(0), &output).unwrap();
        assert!(step(&mut panel, &mut document, None, at(1000), &output).unwrap());
        step(&mut panel, &mut document, Some(Ok("$ two".into())), at(2000), &output).unwrap();
        assert!(step(&mut panel, &mut document, None, at(3000), &output).unwrap());

        let page = fs::read_to_string(&output).unwrap();
        assert!(page.contains(">two</code>"));
        assert!(!page.contains(">one</code>"));
    }

    #[test]
    fn test_read_failure_keeps_last_document() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("page.html");
        let path = dir.path().join("intro.rsmd");
        let mut document = ActiveDocument::new(&path, "kept");
        let mut panel = open(&document);

        let failed = Some(Err(IoError::NotFound(path)));
        let wrote = step(&mut panel, &mut document, failed, Instant::now(), &output).unwrap();

        assert!(!wrote);
        assert_eq!(document.text, "kept");
        assert!(!panel.has_pending_refresh());
        assert!(!output.exists());
    }
}
