//! 导航历史（浏览器模型）
//!
//! entries + cursor 的线性历史：
//! - 当前位置总是 entries[cursor]
//! - Back/Forward 只移动 cursor，不丢弃条目
//! - 在历史中间发起新导航时，截断 cursor 之后的前进历史

use std::path::{Path, PathBuf};

/// 导航历史状态机
///
/// 不变量：entries 永不为空，0 <= cursor < entries.len()
#[derive(Debug, Clone)]
pub struct NavHistory {
    entries: Vec<PathBuf>,
    cursor: usize,
}

impl NavHistory {
    /// 以起始位置创建历史
    pub fn new(start: PathBuf) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    /// 当前位置
    pub fn current(&self) -> &Path {
        &self.entries[self.cursor]
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// 文件系统根目录没有父目录
    pub fn can_go_up(&self) -> bool {
        self.current().parent().is_some()
    }

    /// 导航到新位置
    ///
    /// 已在当前位置时为 no-op；否则丢弃 cursor 之后的前进历史再追加
    pub fn navigate(&mut self, to: PathBuf) {
        if *self.current() == to {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(to);
        self.cursor = self.entries.len() - 1;
    }

    pub fn back(&mut self) {
        if self.can_go_back() {
            self.cursor -= 1;
        }
    }

    pub fn forward(&mut self) {
        if self.can_go_forward() {
            self.cursor += 1;
        }
    }

    /// 进入父目录（根目录时 no-op）
    pub fn up(&mut self) {
        let parent = match self.current().parent() {
            Some(p) => p.to_path_buf(),
            None => return,
        };
        self.navigate(parent);
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
