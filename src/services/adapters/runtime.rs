use super::message::AppMessage;
use crate::models::DocumentKind;
use crate::services::ports::{AsyncExecutor, BoxFuture};
use crate::services::tree;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Owns the tokio runtime and runs I/O-bound work off the UI context.
/// Results come back as [`AppMessage`]s on the channel; the UI context is
/// never blocked.
pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    /// Executor handle for services that spawn their own background tasks.
    pub fn executor(&self) -> Arc<dyn AsyncExecutor> {
        Arc::new(TokioExecutor {
            handle: self.runtime.handle().clone(),
        })
    }

    /// List `path` off the UI context; delivers `DirLoaded` or
    /// `DirLoadError`. Concurrent loads for different paths run in
    /// parallel; a superseded result is dropped by the receiver.
    pub fn load_dir(&self, path: PathBuf) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let listing = {
                let path = path.clone();
                tokio::task::spawn_blocking(move || tree::list_children(&path)).await
            };
            let message = match listing {
                Ok(Ok(nodes)) => AppMessage::DirLoaded { path, nodes },
                Ok(Err(e)) => AppMessage::DirLoadError {
                    path,
                    error: e.to_string(),
                },
                Err(e) => AppMessage::DirLoadError {
                    path,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(message);
        });
    }

    /// Read a file's text off the UI context; delivers `FileLoaded`,
    /// `FileUnsupported` (known-binary type or non-UTF-8 content) or
    /// `FileLoadError`.
    pub fn load_file(&self, path: PathBuf) {
        let tx = self.tx.clone();
        if DocumentKind::from_path(&path) == DocumentKind::Unsupported {
            let _ = tx.send(AppMessage::FileUnsupported { path });
            return;
        }
        self.runtime.spawn(async move {
            let message = match tokio::fs::read(&path).await {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(content) => AppMessage::FileLoaded { path, content },
                    Err(_) => AppMessage::FileUnsupported { path },
                },
                Err(e) => AppMessage::FileLoadError {
                    path,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(message);
        });
    }
}

struct TokioExecutor {
    handle: tokio::runtime::Handle,
}

impl AsyncExecutor for TokioExecutor {
    fn spawn(&self, task: BoxFuture) {
        self.handle.spawn(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::mpsc;
    use std::time::Duration;

    const RECV_TIMEOUT: Duration = Duration::from_secs(5);

    fn runtime() -> (AsyncRuntime, mpsc::Receiver<AppMessage>) {
        let (tx, rx) = mpsc::channel();
        (AsyncRuntime::new(tx).unwrap(), rx)
    }

    #[test]
    fn test_load_dir_delivers_ordered_nodes() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("a.txt"), "x").unwrap();

        let (runtime, rx) = runtime();
        runtime.load_dir(tmp.path().to_path_buf());

        match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
            AppMessage::DirLoaded { path, nodes } => {
                assert_eq!(path, tmp.path());
                let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
                assert_eq!(names, vec!["sub", "a.txt"]);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_load_dir_reports_error_for_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file_path = tmp.path().join("plain.txt");
        fs::write(&file_path, "x").unwrap();

        let (runtime, rx) = runtime();
        runtime.load_dir(file_path.clone());

        match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
            AppMessage::DirLoadError { path, .. } => assert_eq!(path, file_path),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_load_file_text() {
        let tmp = tempfile::tempdir().unwrap();
        let file_path = tmp.path().join("doc.md");
        fs::write(&file_path, "# hello").unwrap();

        let (runtime, rx) = runtime();
        runtime.load_file(file_path.clone());

        match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
            AppMessage::FileLoaded { path, content } => {
                assert_eq!(path, file_path);
                assert_eq!(content, "# hello");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_load_file_undecodable_is_unsupported() {
        let tmp = tempfile::tempdir().unwrap();
        let file_path = tmp.path().join("blob.txt");
        fs::write(&file_path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let (runtime, rx) = runtime();
        runtime.load_file(file_path.clone());

        match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
            AppMessage::FileUnsupported { path } => assert_eq!(path, file_path),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_executor_spawns_on_the_runtime() {
        let (runtime, _rx) = runtime();
        let executor = runtime.executor();
        let (done_tx, done_rx) = mpsc::channel();
        executor.spawn(Box::pin(async move {
            let _ = done_tx.send(42u32);
        }));
        assert_eq!(done_rx.recv_timeout(RECV_TIMEOUT).unwrap(), 42);
    }

    #[test]
    fn test_load_file_known_binary_is_unsupported_without_read() {
        let (runtime, rx) = runtime();
        // path does not exist; classification alone decides
        runtime.load_file(PathBuf::from("/no/such/image.png"));

        match rx.recv_timeout(RECV_TIMEOUT).unwrap() {
            AppMessage::FileUnsupported { path } => {
                assert_eq!(path, PathBuf::from("/no/such/image.png"))
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
