//! zview - 文件浏览与文本/Markdown 预览核心库
//!
//! 模块结构：
//! - models: 数据模型（NavHistory, FileTreeNode, DocumentKind）
//! - services: 服务层（TreeCache, AssetResolver, Settings）+ ports/adapters
//! - syntax: 正则高亮
//! - preview: 预览宿主文档拼装
//! - workspace: 顶层聚合（表现层的唯一入口）

pub mod logging;
pub mod models;
pub mod preview;
pub mod services;
pub mod syntax;
pub mod workspace;

pub use workspace::{DocumentState, ListingState, Workspace};
