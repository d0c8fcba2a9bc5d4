//! 数据模型层

pub mod document;
pub mod file_tree;
pub mod nav_history;

pub use document::DocumentKind;
pub use file_tree::{should_ignore, FileTreeNode};
pub use nav_history::NavHistory;
