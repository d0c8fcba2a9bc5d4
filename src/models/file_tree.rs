//! 文件树数据模型

use std::path::{Path, PathBuf};

/// 惰性文件树节点
///
/// `children` 的三态：
/// - `None`：尚未拉取
/// - `Some(空)`：已拉取且目录为空
/// - `Some(非空)`：已拉取
///
/// 「已拉取为空」和「尚未拉取」永不合并。
#[derive(Debug, Clone)]
pub struct FileTreeNode {
    pub location: PathBuf,
    pub name: String,
    pub is_directory: bool,
    pub children: Option<Vec<FileTreeNode>>,
}

impl FileTreeNode {
    /// 以已知类型创建未拉取的节点
    pub fn new(location: PathBuf, is_directory: bool) -> Self {
        let name = location
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| location.to_string_lossy().to_string());
        Self {
            location,
            name,
            is_directory,
            children: None,
        }
    }

    /// 通过 stat 判断类型创建节点（路径不存在时视为文件）
    pub fn from_path(location: PathBuf) -> Self {
        let is_directory = std::fs::metadata(&location)
            .map(|m| m.is_dir())
            .unwrap_or(false);
        Self::new(location, is_directory)
    }

    pub fn is_fetched(&self) -> bool {
        self.children.is_some()
    }

    pub fn set_children(&mut self, children: Vec<FileTreeNode>) {
        self.children = Some(children);
    }

    /// 在子树中定位 `path` 对应的节点并安装其子列表
    ///
    /// 返回是否找到目标节点。只沿已拉取的分支下降。
    pub fn attach_children(&mut self, path: &Path, children: Vec<FileTreeNode>) -> bool {
        if self.location == path {
            self.children = Some(children);
            return true;
        }
        if !path.starts_with(&self.location) {
            return false;
        }
        if let Some(existing) = self.children.as_mut() {
            for child in existing.iter_mut() {
                if child.attach_children(path, children.clone()) {
                    return true;
                }
            }
        }
        false
    }

    /// 在子树中查找节点
    pub fn find(&self, path: &Path) -> Option<&FileTreeNode> {
        if self.location == path {
            return Some(self);
        }
        if !path.starts_with(&self.location) {
            return None;
        }
        self.children
            .as_ref()?
            .iter()
            .find_map(|child| child.find(path))
    }
}

// 节点身份即 location
impl PartialEq for FileTreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for FileTreeNode {}

/// 是否排除该目录项（隐藏文件 + 系统噪音）
pub fn should_ignore(name: &str) -> bool {
    name.starts_with('.') || matches!(name, "Thumbs.db" | "desktop.ini")
}
