//! Loading the bundler manifest and caching it for the lifetime of a resolver.

mod cache;
mod model;

pub use cache::{ManifestCache, MissingManifestPolicy};
pub use model::{Entrypoint, EntrypointAssets, Manifest};
