use crate::models::FileTreeNode;
use std::path::PathBuf;

/// Results and notifications delivered from background work to the
/// UI-owning context. The explicit channel replaces any global
/// "contents changed" broadcast: producers hold a `Sender`, the workspace
/// drains the `Receiver`.
#[derive(Debug)]
pub enum AppMessage {
    DirLoaded {
        path: PathBuf,
        nodes: Vec<FileTreeNode>,
    },
    DirLoadError {
        path: PathBuf,
        error: String,
    },
    /// The watched directory's contents changed on disk.
    DirChanged {
        path: PathBuf,
    },
    FileLoaded {
        path: PathBuf,
        content: String,
    },
    /// Terminal "not supported" state for this file (binary type or
    /// undecodable content). Not retried.
    FileUnsupported {
        path: PathBuf,
    },
    FileLoadError {
        path: PathBuf,
        error: String,
    },
}
