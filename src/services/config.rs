//! 配置服务：查看器设置
//!
//! <cache>/.zview/settings.json，缺失字段取默认值

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const MARKED_CDN: &str = "https://cdn.jsdelivr.net/npm/marked/marked.min.js";
pub const MERMAID_CDN: &str = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js";

const SETTINGS_DIR: &str = ".zview";
const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Markdown 渲染脚本来源
    #[serde(default = "default_marked_source")]
    pub marked_source: String,
    /// 图表渲染脚本来源
    #[serde(default = "default_mermaid_source")]
    pub mermaid_source: String,
    /// 后台刷新请求超时（秒）
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_marked_source() -> String {
    MARKED_CDN.to_string()
}

fn default_mermaid_source() -> String {
    MERMAID_CDN.to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            marked_source: default_marked_source(),
            mermaid_source: default_mermaid_source(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    crate::services::adapters::cache_root().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content =
            serde_json::to_string_pretty(&Settings::default()).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(&path, content)?;
    }
    Ok(path)
}

pub fn load_settings() -> Option<Settings> {
    let path = get_settings_path()?;
    let data = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}
