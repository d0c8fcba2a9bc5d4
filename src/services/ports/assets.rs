//! Asset capabilities: persistent byte cache + remote fetch.

use std::future::Future;
use std::io;
use std::pin::Pin;

pub type FetchFuture =
    Pin<Box<dyn Future<Output = std::result::Result<Vec<u8>, FetchError>> + Send + 'static>>;

#[derive(Debug)]
pub enum FetchError {
    Request(String),
    Status(u16),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(msg) => write!(f, "request failed: {}", msg),
            FetchError::Status(code) => write!(f, "unexpected status: {}", code),
        }
    }
}

impl std::error::Error for FetchError {}

/// Named byte blobs in a stable, application-scoped location.
pub trait ByteStore: Send + Sync {
    fn exists(&self, name: &str) -> bool;

    fn read(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Replace the stored blob atomically: a concurrent reader observes
    /// either the old bytes or the new bytes, never a partial write.
    fn replace(&self, name: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Asynchronous byte download from a URL. Used only by the background
/// refresh; the synchronous resolve path never touches it.
pub trait RemoteFetch: Send + Sync {
    fn fetch(&self, url: &str) -> FetchFuture;
}

/// A named external asset and where its content can come from.
#[derive(Debug, Clone)]
pub struct AssetRecord {
    pub name: String,
    pub source_url: String,
    /// Shipped-with-the-app copy, used to seed the cache before the first
    /// successful refresh.
    pub bundled: Option<Vec<u8>>,
}

impl AssetRecord {
    pub fn new(name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            bundled: None,
        }
    }

    pub fn with_bundled(mut self, bytes: Vec<u8>) -> Self {
        self.bundled = Some(bytes);
        self
    }
}

/// Which tier served the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetTier {
    Cache,
    Bundled,
    /// No local bytes; `content` is the source URL and the host fetches it
    /// live.
    Remote,
}

#[derive(Debug, Clone)]
pub struct ResolvedAsset {
    pub content: String,
    pub tier: AssetTier,
}

impl ResolvedAsset {
    /// Script element for the host document. Local tiers inline the content
    /// (already escaped by the resolver); the remote tier references the URL.
    pub fn script_tag(&self) -> String {
        match self.tier {
            AssetTier::Remote => format!("<script src=\"{}\"></script>", self.content),
            AssetTier::Cache | AssetTier::Bundled => {
                format!("<script>\n{}\n</script>", self.content)
            }
        }
    }
}
