//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types shared across the crate.
//! - `adapters`: OS/runtime specific implementations (IO/async/network).

pub mod adapters;
pub mod assets;
pub mod config;
pub mod ports;
pub mod tree;

pub use assets::AssetResolver;
pub use config::Settings;
pub use tree::TreeCache;
