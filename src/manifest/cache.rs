//! Caller-owned, load-once cache for the manifest.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AssetError, Result};
use crate::manifest::Manifest;

/// What to do when the manifest file does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingManifestPolicy {
  /// Continue with an empty manifest; best-effort lookups fall back to unresolved names.
  #[default]
  Empty,
  /// Fail with [`AssetError::ManifestMissing`].
  Fatal,
}

/// Lazily loaded manifest bound to one file location.
///
/// The file is read on the first call to [`ManifestCache::get`] and never again for the lifetime
/// of the cache. A failed load is not cached, so the next call retries.
#[derive(Debug)]
pub struct ManifestCache {
  path: PathBuf,
  policy: MissingManifestPolicy,
  manifest: OnceLock<Manifest>,
}

impl ManifestCache {
  /// Create an empty cache for the manifest at `path`.
  pub fn new(path: impl Into<PathBuf>, policy: MissingManifestPolicy) -> Self {
    Self {
      path: path.into(),
      policy,
      manifest: OnceLock::new(),
    }
  }

  /// Cache that already holds a manifest; the file is never read.
  pub fn preloaded(path: impl Into<PathBuf>, manifest: Manifest) -> Self {
    let cache = Self::new(path, MissingManifestPolicy::Empty);
    let _ = cache.manifest.set(manifest);
    cache
  }

  /// Location the manifest is read from.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Policy applied when the file is absent.
  pub fn policy(&self) -> MissingManifestPolicy {
    self.policy
  }

  /// Whether the manifest has been loaded already.
  pub fn is_loaded(&self) -> bool {
    self.manifest.get().is_some()
  }

  /// Return the cached manifest, loading it on first use.
  pub fn get(&self) -> Result<&Manifest> {
    if let Some(manifest) = self.manifest.get() {
      debug!(path = %self.path.display(), "reusing cached manifest");
      return Ok(manifest);
    }

    let manifest = self.read()?;
    Ok(self.manifest.get_or_init(|| manifest))
  }

  fn read(&self) -> Result<Manifest> {
    if !self.path.is_file() {
      return match self.policy {
        MissingManifestPolicy::Empty => {
          warn!(path = %self.path.display(), "manifest file is missing, using an empty manifest");
          Ok(Manifest::default())
        }
        MissingManifestPolicy::Fatal => Err(AssetError::ManifestMissing {
          path: self.path.clone(),
        }),
      };
    }

    let manifest = Manifest::load(&self.path)?;
    debug!(
      path = %self.path.display(),
      assets = manifest.assets.len(),
      entrypoints = manifest.entrypoints.len(),
      "loaded manifest"
    );
    Ok(manifest)
  }
}
