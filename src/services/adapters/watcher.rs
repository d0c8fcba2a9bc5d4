use super::message::AppMessage;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Watches the currently displayed folder (non-recursive) and reports
/// content changes as `AppMessage::DirChanged`. Retargeted on navigation;
/// the receiver re-lists the directory, so event coalescing only needs to
/// be per-event.
pub struct DirWatcher {
    watcher: RecommendedWatcher,
    watched: Option<PathBuf>,
}

impl DirWatcher {
    pub fn new(tx: Sender<AppMessage>) -> Result<Self, notify::Error> {
        let watcher = RecommendedWatcher::new(
            move |result: Result<notify::Event, notify::Error>| {
                let event = match result {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::debug!(error = %e, "watch error");
                        return;
                    }
                };
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                for dir in changed_dirs(&event.paths) {
                    let _ = tx.send(AppMessage::DirChanged { path: dir });
                }
            },
            notify::Config::default(),
        )?;
        Ok(Self {
            watcher,
            watched: None,
        })
    }

    /// Watch `dir`, dropping the previous watch target if any.
    pub fn watch(&mut self, dir: &Path) -> Result<(), notify::Error> {
        if let Some(prev) = self.watched.take() {
            let _ = self.watcher.unwatch(&prev);
        }
        self.watcher.watch(dir, RecursiveMode::NonRecursive)?;
        self.watched = Some(dir.to_path_buf());
        tracing::debug!(dir = %dir.display(), "watching directory");
        Ok(())
    }

    pub fn watched(&self) -> Option<&Path> {
        self.watched.as_deref()
    }
}

/// Event paths name entries inside the watched directory; the changed
/// directory is their parent. Deduplicated, order preserved.
fn changed_dirs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for path in paths {
        let dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| path.clone());
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_changed_dirs_coalesces_per_parent() {
        let paths = vec![
            PathBuf::from("/work/a.txt"),
            PathBuf::from("/work/b.txt"),
            PathBuf::from("/work/sub/c.txt"),
        ];
        assert_eq!(
            changed_dirs(&paths),
            vec![PathBuf::from("/work"), PathBuf::from("/work/sub")]
        );
    }

    #[test]
    fn test_changed_dirs_root_falls_back_to_itself() {
        assert_eq!(changed_dirs(&[PathBuf::from("/")]), vec![PathBuf::from("/")]);
    }

    #[test]
    fn test_watch_retargets() {
        let tmp_a = tempfile::tempdir().unwrap();
        let tmp_b = tempfile::tempdir().unwrap();
        let (tx, _rx) = mpsc::channel();

        let mut watcher = DirWatcher::new(tx).unwrap();
        assert!(watcher.watched().is_none());

        watcher.watch(tmp_a.path()).unwrap();
        assert_eq!(watcher.watched(), Some(tmp_a.path()));

        watcher.watch(tmp_b.path()).unwrap();
        assert_eq!(watcher.watched(), Some(tmp_b.path()));
    }
}
