#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod dependencies;
pub mod enqueue;
pub mod error;
pub mod host;
pub mod manifest;
pub mod resolver;

pub use config::AssetsConfig;
pub use dependencies::{DependencyDescriptor, get_dependencies};
pub use enqueue::{BundleEnqueuer, EnqueueReport, EnqueueStrategy, enqueue_bundle};
pub use error::{AssetError, Result};
pub use host::{AssetRegistrar, RecordingRegistrar, Registration, ScriptTag, StyleTag, ThemePaths};
pub use manifest::{Manifest, ManifestCache, MissingManifestPolicy};
pub use resolver::{AssetResolver, VERSION};
