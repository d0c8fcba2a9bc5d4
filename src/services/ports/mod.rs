//! Service ports: traits + data contracts.

pub mod assets;
pub mod file;
pub mod runtime;

pub use assets::{
    AssetRecord, AssetTier, ByteStore, FetchError, FetchFuture, RemoteFetch, ResolvedAsset,
};
pub use file::{FileError, Result as FileResult};
pub use runtime::{AsyncExecutor, BoxFuture};
