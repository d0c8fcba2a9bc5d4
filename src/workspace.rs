//! 工作区：聚合导航历史与目录树状态
//!
//! 表现层通过离散的读写操作与工作区交互：写操作改变状态并触发后台加载，
//! 读操作返回当前快照，消息经 handle_message 回流。不依赖语言级属性观察。

use crate::models::{FileTreeNode, NavHistory};
use crate::services::adapters::{AppMessage, AsyncRuntime};
use crate::services::tree::TreeCache;
use crate::syntax::LanguageTag;
use std::path::{Path, PathBuf};

/// 当前目录列表的加载状态
#[derive(Debug)]
pub enum ListingState {
    Loading,
    Loaded(Vec<FileTreeNode>),
    /// 目录不可读：空列表 + 失败指示
    Failed(String),
}

/// 选中文件的查看状态
#[derive(Debug)]
pub enum DocumentState {
    Loading,
    Text {
        content: String,
        language: Option<LanguageTag>,
    },
    /// 终态：类型不支持或内容无法解码
    Unsupported,
    Failed(String),
}

pub struct Workspace {
    nav: NavHistory,
    tree: TreeCache,
    runtime: AsyncRuntime,
    listing: ListingState,
    selected: Option<PathBuf>,
    document: Option<DocumentState>,
}

impl Workspace {
    pub fn new(start: PathBuf, runtime: AsyncRuntime) -> Self {
        let mut workspace = Self {
            nav: NavHistory::new(start),
            tree: TreeCache::new(),
            runtime,
            listing: ListingState::Loading,
            selected: None,
            document: None,
        };
        workspace.request_listing();
        workspace
    }

    // ==================== 读访问 ====================

    pub fn nav(&self) -> &NavHistory {
        &self.nav
    }

    pub fn current(&self) -> &Path {
        self.nav.current()
    }

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn document(&self) -> Option<&DocumentState> {
        self.document.as_ref()
    }

    // ==================== 导航操作 ====================

    pub fn navigate_to(&mut self, to: PathBuf) {
        self.nav.navigate(to);
        self.request_listing();
    }

    pub fn go_back(&mut self) {
        self.apply_nav(NavHistory::back);
    }

    pub fn go_forward(&mut self) {
        self.apply_nav(NavHistory::forward);
    }

    pub fn go_up(&mut self) {
        self.apply_nav(NavHistory::up);
    }

    fn apply_nav(&mut self, op: fn(&mut NavHistory)) {
        let before = self.nav.current().to_path_buf();
        op(&mut self.nav);
        if self.nav.current() != before {
            self.request_listing();
        }
    }

    /// 选中文件并触发后台读取
    pub fn select(&mut self, path: PathBuf) {
        self.selected = Some(path.clone());
        self.document = Some(DocumentState::Loading);
        self.runtime.load_file(path);
    }

    fn request_listing(&mut self) {
        let current = self.nav.current().to_path_buf();
        tracing::debug!(dir = %current.display(), "listing directory");
        if let Some(cached) = self.tree.cached(&current) {
            self.listing = ListingState::Loaded(cached.to_vec());
            return;
        }
        self.listing = ListingState::Loading;
        self.runtime.load_dir(current);
    }

    // ==================== 消息回流 ====================

    /// 处理一条后台消息。过期的目录结果（路径已不是当前位置）直接丢弃。
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::DirLoaded { path, nodes } => {
                self.tree.store(path.clone(), nodes.clone());
                if path == self.nav.current() {
                    self.listing = ListingState::Loaded(nodes);
                }
            }
            AppMessage::DirLoadError { path, error } => {
                if path == self.nav.current() {
                    self.listing = ListingState::Failed(error);
                }
            }
            AppMessage::DirChanged { path } => {
                self.tree.invalidate(&path);
                if path == self.nav.current() {
                    self.listing = ListingState::Loading;
                    self.runtime.load_dir(path);
                }
            }
            AppMessage::FileLoaded { path, content } => {
                if self.selected.as_deref() == Some(path.as_path()) {
                    self.document = Some(DocumentState::Text {
                        language: LanguageTag::from_path(&path),
                        content,
                    });
                }
            }
            AppMessage::FileUnsupported { path } => {
                if self.selected.as_deref() == Some(path.as_path()) {
                    self.document = Some(DocumentState::Unsupported);
                }
            }
            AppMessage::FileLoadError { path, error } => {
                if self.selected.as_deref() == Some(path.as_path()) {
                    self.document = Some(DocumentState::Failed(error));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn workspace(start: &Path) -> (Workspace, mpsc::Receiver<AppMessage>) {
        let (tx, rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(tx).unwrap();
        (Workspace::new(start.to_path_buf(), runtime), rx)
    }

    fn node(path: &str) -> FileTreeNode {
        FileTreeNode::new(PathBuf::from(path), false)
    }

    #[test]
    fn test_dir_loaded_for_current_updates_listing() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut workspace, _rx) = workspace(tmp.path());

        workspace.handle_message(AppMessage::DirLoaded {
            path: tmp.path().to_path_buf(),
            nodes: vec![node("/x/a.txt")],
        });
        match workspace.listing() {
            ListingState::Loaded(nodes) => assert_eq!(nodes.len(), 1),
            other => panic!("unexpected listing state: {:?}", other),
        }
    }

    #[test]
    fn test_superseded_dir_result_is_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut workspace, _rx) = workspace(tmp.path());

        // 用户已导航走；旧目录的结果只进缓存，不覆盖当前列表
        workspace.handle_message(AppMessage::DirLoaded {
            path: PathBuf::from("/stale/dir"),
            nodes: vec![node("/stale/dir/a.txt")],
        });
        assert!(matches!(workspace.listing(), ListingState::Loading));
        assert!(workspace.tree.cached(Path::new("/stale/dir")).is_some());
    }

    #[test]
    fn test_dir_error_for_current_marks_failed() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut workspace, _rx) = workspace(tmp.path());

        workspace.handle_message(AppMessage::DirLoadError {
            path: tmp.path().to_path_buf(),
            error: "permission denied".to_string(),
        });
        assert!(matches!(workspace.listing(), ListingState::Failed(_)));
    }

    #[test]
    fn test_navigation_tracks_history() {
        let tmp = tempfile::tempdir().unwrap();
        let sub = tmp.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let (mut workspace, _rx) = workspace(tmp.path());

        workspace.navigate_to(sub.clone());
        assert_eq!(workspace.current(), sub.as_path());
        assert!(workspace.nav().can_go_back());

        workspace.go_back();
        assert_eq!(workspace.current(), tmp.path());
        assert!(workspace.nav().can_go_forward());

        workspace.go_forward();
        assert_eq!(workspace.current(), sub.as_path());

        workspace.go_up();
        assert_eq!(workspace.current(), tmp.path());
    }

    #[test]
    fn test_file_results_only_apply_to_selection() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("doc.md");
        std::fs::write(&file, "# hi").unwrap();
        let (mut workspace, _rx) = workspace(tmp.path());

        workspace.select(file.clone());
        assert!(matches!(
            workspace.document(),
            Some(DocumentState::Loading)
        ));

        // 其它文件的结果不改变当前文档
        workspace.handle_message(AppMessage::FileLoaded {
            path: tmp.path().join("other.txt"),
            content: "x".to_string(),
        });
        assert!(matches!(
            workspace.document(),
            Some(DocumentState::Loading)
        ));

        workspace.handle_message(AppMessage::FileLoaded {
            path: file.clone(),
            content: "# hi".to_string(),
        });
        match workspace.document() {
            Some(DocumentState::Text { content, language }) => {
                assert_eq!(content, "# hi");
                assert_eq!(*language, Some(LanguageTag::Markdown));
            }
            other => panic!("unexpected document state: {:?}", other),
        }

        workspace.handle_message(AppMessage::FileUnsupported { path: file });
        assert!(matches!(
            workspace.document(),
            Some(DocumentState::Unsupported)
        ));
    }

    #[test]
    fn test_dir_changed_invalidates_memo() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut workspace, _rx) = workspace(tmp.path());

        workspace.handle_message(AppMessage::DirLoaded {
            path: tmp.path().to_path_buf(),
            nodes: vec![node("/x/a.txt")],
        });
        workspace.handle_message(AppMessage::DirChanged {
            path: tmp.path().to_path_buf(),
        });
        assert!(workspace.tree.cached(tmp.path()).is_none());
        assert!(matches!(workspace.listing(), ListingState::Loading));
    }
}
