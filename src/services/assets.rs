//! Tiered asset resolution + one-shot background refresh.
//!
//! `resolve` answers synchronously from the best local tier (cache, then
//! bundled copy, then a remote reference) and schedules at most one
//! background refresh per asset name per process lifetime. The refresh is
//! fire-and-forget: callers never wait on it and never see its failures.

use crate::services::config::Settings;
use crate::services::ports::{
    AssetRecord, AssetTier, AsyncExecutor, ByteStore, RemoteFetch, ResolvedAsset,
};
use rustc_hash::FxHashSet;
use std::sync::{Arc, Mutex};

/// Asset name of the markdown renderer script.
pub const MARKDOWN_RENDERER: &str = "marked.min.js";
/// Asset name of the diagram renderer script.
pub const DIAGRAM_RENDERER: &str = "mermaid.min.js";

/// The two assets the preview host needs, sourced per settings. Bundled
/// copies are supplied by the embedding application, which knows where its
/// resources live.
pub fn builtin_records(settings: &Settings) -> (AssetRecord, AssetRecord) {
    (
        AssetRecord::new(MARKDOWN_RENDERER, &settings.marked_source),
        AssetRecord::new(DIAGRAM_RENDERER, &settings.mermaid_source),
    )
}

pub struct AssetResolver {
    store: Arc<dyn ByteStore>,
    fetch: Arc<dyn RemoteFetch>,
    executor: Arc<dyn AsyncExecutor>,
    refreshed: Mutex<FxHashSet<String>>,
}

impl AssetResolver {
    pub fn new(
        store: Arc<dyn ByteStore>,
        fetch: Arc<dyn RemoteFetch>,
        executor: Arc<dyn AsyncExecutor>,
    ) -> Self {
        Self {
            store,
            fetch,
            executor,
            refreshed: Mutex::new(FxHashSet::default()),
        }
    }

    /// Resolve ready-to-embed content for `record`.
    ///
    /// Never blocks on the network. Local-tier content is escaped so it can
    /// sit verbatim inside a host `<script>` block; the remote tier returns
    /// the source URL for the host to fetch live. Every call schedules the
    /// (at most one) background refresh, keeping the cache current for the
    /// next launch.
    pub fn resolve(&self, record: &AssetRecord) -> ResolvedAsset {
        if self.store.exists(&record.name) {
            if let Ok(bytes) = self.store.read(&record.name) {
                self.schedule_refresh(record);
                return ResolvedAsset {
                    content: escape_script_close(&String::from_utf8_lossy(&bytes)),
                    tier: AssetTier::Cache,
                };
            }
            tracing::warn!(asset = %record.name, "cached asset unreadable, falling back");
        }

        if let Some(bundled) = &record.bundled {
            // Seed the cache so the next call hits tier 1. Failure only costs
            // the seeding, not the answer.
            if let Err(e) = self.store.replace(&record.name, bundled) {
                tracing::warn!(asset = %record.name, error = %e, "failed to seed asset cache");
            }
            self.schedule_refresh(record);
            return ResolvedAsset {
                content: escape_script_close(&String::from_utf8_lossy(bundled)),
                tier: AssetTier::Bundled,
            };
        }

        self.schedule_refresh(record);
        ResolvedAsset {
            content: record.source_url.clone(),
            tier: AssetTier::Remote,
        }
    }

    /// One background refresh per asset name per process lifetime; the latch
    /// never reverts, so later failures wait for the next launch.
    fn schedule_refresh(&self, record: &AssetRecord) {
        {
            let mut refreshed = self
                .refreshed
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !refreshed.insert(record.name.clone()) {
                return;
            }
        }

        let store = Arc::clone(&self.store);
        let fetch = self.fetch.fetch(&record.source_url);
        let name = record.name.clone();
        tracing::debug!(asset = %name, "scheduling asset refresh");
        self.executor.spawn(Box::pin(async move {
            match fetch.await {
                Ok(bytes) => match store.replace(&name, &bytes) {
                    Ok(()) => {
                        tracing::info!(asset = %name, bytes = bytes.len(), "asset cache refreshed")
                    }
                    Err(e) => {
                        tracing::debug!(asset = %name, error = %e, "asset cache write failed")
                    }
                },
                Err(e) => tracing::debug!(asset = %name, error = %e, "asset refresh dropped"),
            }
        }));
    }
}

/// Escape the one sequence that would terminate a host `<script>` block
/// early.
pub fn escape_script_close(text: &str) -> String {
    text.replace("</script>", "<\\/script>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ports::{BoxFuture, FetchError, FetchFuture};
    use std::collections::HashMap;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MemStore {
        blobs: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MemStore {
        fn new() -> Self {
            Self {
                blobs: Mutex::new(HashMap::new()),
            }
        }

        fn seeded(name: &str, bytes: &[u8]) -> Self {
            let store = Self::new();
            store
                .blobs
                .lock()
                .unwrap()
                .insert(name.to_string(), bytes.to_vec());
            store
        }
    }

    impl ByteStore for MemStore {
        fn exists(&self, name: &str) -> bool {
            self.blobs.lock().unwrap().contains_key(name)
        }

        fn read(&self, name: &str) -> io::Result<Vec<u8>> {
            self.blobs
                .lock()
                .unwrap()
                .get(name)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
        }

        fn replace(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
            self.blobs
                .lock()
                .unwrap()
                .insert(name.to_string(), bytes.to_vec());
            Ok(())
        }
    }

    struct CountingFetch {
        calls: AtomicUsize,
        payload: Vec<u8>,
    }

    impl CountingFetch {
        fn new(payload: &[u8]) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                payload: payload.to_vec(),
            }
        }
    }

    impl RemoteFetch for CountingFetch {
        fn fetch(&self, _url: &str) -> FetchFuture {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let payload = self.payload.clone();
            Box::pin(async move { Ok(payload) })
        }
    }

    struct FailingFetch;

    impl RemoteFetch for FailingFetch {
        fn fetch(&self, _url: &str) -> FetchFuture {
            Box::pin(async { Err(FetchError::Status(503)) })
        }
    }

    /// Runs spawned tasks to completion before returning, making the
    /// fire-and-forget refresh observable in tests.
    struct InlineExecutor {
        runtime: tokio::runtime::Runtime,
    }

    impl InlineExecutor {
        fn new() -> Self {
            Self {
                runtime: tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap(),
            }
        }
    }

    impl AsyncExecutor for InlineExecutor {
        fn spawn(&self, task: BoxFuture) {
            self.runtime.block_on(task);
        }
    }

    fn resolver(
        store: Arc<dyn ByteStore>,
        fetch: Arc<dyn RemoteFetch>,
    ) -> AssetResolver {
        AssetResolver::new(store, fetch, Arc::new(InlineExecutor::new()))
    }

    fn record() -> AssetRecord {
        AssetRecord::new("lib.js", "https://cdn.example/lib.js")
    }

    #[test]
    fn test_cache_tier_served_first() {
        let store = Arc::new(MemStore::seeded("lib.js", b"cached content"));
        let resolved = resolver(store, Arc::new(CountingFetch::new(b"fresh"))).resolve(&record());
        assert_eq!(resolved.tier, AssetTier::Cache);
        assert_eq!(resolved.content, "cached content");
    }

    #[test]
    fn test_bundled_tier_seeds_cache_then_cache_tier_wins() {
        let store = Arc::new(MemStore::new());
        let fetch = Arc::new(FailingFetch);
        let resolver = resolver(store.clone(), fetch);
        let record = record().with_bundled(b"bundled content".to_vec());

        let first = resolver.resolve(&record);
        assert_eq!(first.tier, AssetTier::Bundled);
        assert_eq!(first.content, "bundled content");
        assert!(store.exists("lib.js"));

        let second = resolver.resolve(&record);
        assert_eq!(second.tier, AssetTier::Cache);
    }

    #[test]
    fn test_remote_tier_when_nothing_local() {
        let store = Arc::new(MemStore::new());
        let resolved = resolver(store, Arc::new(FailingFetch)).resolve(&record());
        assert_eq!(resolved.tier, AssetTier::Remote);
        assert_eq!(resolved.content, "https://cdn.example/lib.js");
    }

    #[test]
    fn test_refresh_triggers_exactly_once_per_name() {
        let store = Arc::new(MemStore::seeded("lib.js", b"stale"));
        let fetch = Arc::new(CountingFetch::new(b"fresh"));
        let resolver = resolver(store.clone(), fetch.clone());

        for _ in 0..5 {
            resolver.resolve(&record());
        }
        assert_eq!(fetch.calls.load(Ordering::SeqCst), 1);
        // the successful refresh replaced the cached bytes
        assert_eq!(store.read("lib.js").unwrap(), b"fresh");
        // a post-refresh resolve serves the new bytes without re-triggering
        let resolved = resolver.resolve(&record());
        assert_eq!(resolved.tier, AssetTier::Cache);
        assert_eq!(resolved.content, "fresh");
        assert_eq!(fetch.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_distinct_names_refresh_independently() {
        let store = Arc::new(MemStore::new());
        let fetch = Arc::new(CountingFetch::new(b"fresh"));
        let resolver = resolver(store, fetch.clone());

        resolver.resolve(&AssetRecord::new("a.js", "https://cdn.example/a.js"));
        resolver.resolve(&AssetRecord::new("b.js", "https://cdn.example/b.js"));
        resolver.resolve(&AssetRecord::new("a.js", "https://cdn.example/a.js"));
        assert_eq!(fetch.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_refresh_is_dropped_silently() {
        let store = Arc::new(MemStore::seeded("lib.js", b"stale"));
        let resolver = resolver(store.clone(), Arc::new(FailingFetch));

        let resolved = resolver.resolve(&record());
        assert_eq!(resolved.tier, AssetTier::Cache);
        // cache untouched, no error surfaced, no retry within this process
        assert_eq!(store.read("lib.js").unwrap(), b"stale");
        let again = resolver.resolve(&record());
        assert_eq!(again.content, "stale");
    }

    #[test]
    fn test_script_close_escaped_in_local_tiers() {
        let store = Arc::new(MemStore::seeded("lib.js", b"if (a</script>b) {}"));
        let resolved = resolver(store, Arc::new(FailingFetch)).resolve(&record());
        assert_eq!(resolved.content, "if (a<\\/script>b) {}");
    }

    #[test]
    fn test_builtin_records_follow_settings() {
        let mut settings = Settings::default();
        settings.marked_source = "https://mirror.example/marked.js".to_string();
        let (marked, mermaid) = builtin_records(&settings);
        assert_eq!(marked.name, MARKDOWN_RENDERER);
        assert_eq!(marked.source_url, "https://mirror.example/marked.js");
        assert_eq!(mermaid.name, DIAGRAM_RENDERER);
        assert_eq!(mermaid.source_url, settings.mermaid_source);
        assert!(marked.bundled.is_none());
    }

    #[test]
    fn test_escape_script_close() {
        assert_eq!(escape_script_close("plain"), "plain");
        assert_eq!(
            escape_script_close("x</script><script>y"),
            "x<\\/script><script>y"
        );
    }
}
