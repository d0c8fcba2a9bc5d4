//! OS-facing service adapters (filesystem, network, async runtime).

pub mod cache_store;
pub mod http;
pub mod message;
pub mod runtime;
pub mod watcher;

pub use cache_store::CacheStore;
pub use http::HttpFetcher;
pub use message::AppMessage;
pub use runtime::AsyncRuntime;
pub use watcher::DirWatcher;

use crate::services::assets::AssetResolver;
use crate::services::config::Settings;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Production wiring for the asset pipeline: default cache directory +
/// HTTP fetch configured from settings + the runtime's executor.
pub fn default_asset_resolver(
    settings: &Settings,
    runtime: &AsyncRuntime,
) -> std::io::Result<AssetResolver> {
    let store = Arc::new(CacheStore::open_default()?);
    let fetch = Arc::new(HttpFetcher::new(Duration::from_secs(
        settings.fetch_timeout_secs,
    )));
    Ok(AssetResolver::new(store, fetch, runtime.executor()))
}

const APP_NAME: &str = "zview";
const ASSET_DIR: &str = "assets";
const LOG_DIR: &str = "logs";

/// Platform cache root (the parent `zview/` directories live under).
pub(crate) fn cache_root() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

fn app_cache_dir() -> Option<PathBuf> {
    cache_root().map(|dir| dir.join(APP_NAME))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Cannot determine {} directory", what),
        )
    })?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Asset cache directory, created on first use.
pub fn ensure_asset_cache_dir() -> std::io::Result<PathBuf> {
    ensure_dir(app_cache_dir().map(|d| d.join(ASSET_DIR)), "asset cache")
}

/// Log directory, created on first use.
pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(app_cache_dir().map(|d| d.join(LOG_DIR)), "log")
}
