//! Error type shared by the manifest, resolver and enqueue helpers.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while resolving or registering theme assets.
///
/// Every variant is terminal for the current render: the embedding host is expected to stop
/// and surface the message. Soft conditions (unknown asset under best-effort lookup, absent
/// dependency descriptor, empty asset category) never produce an error.
#[derive(Debug, Error)]
pub enum AssetError {
  /// The manifest file does not exist and the cache was configured to treat that as fatal.
  #[error("manifest file is missing at {}", path.display())]
  ManifestMissing {
    /// Location that was probed.
    path: PathBuf,
  },
  /// The manifest file exists but could not be read.
  #[error("failed to read manifest {}: {source}", path.display())]
  ManifestRead {
    /// Location that was read.
    path: PathBuf,
    /// Underlying I/O error.
    source: std::io::Error,
  },
  /// The manifest file is not valid manifest JSON.
  #[error("failed to parse manifest {}: {source}", path.display())]
  ManifestParse {
    /// Location that was parsed.
    path: PathBuf,
    /// Underlying JSON error.
    source: serde_json::Error,
  },
  /// Strict lookup could not find the asset under its full or normalised name.
  #[error("asset '{0}' not found in the manifest")]
  AssetNotFound(String),
  /// The manifest points at a file that is not present in the output directory.
  #[error("asset file '{}' not found", path.display())]
  AssetFileMissing {
    /// Expected location of the built file.
    path: PathBuf,
  },
  /// A built asset exists but could not be read as text.
  #[error("failed to read asset {}: {source}", path.display())]
  AssetRead {
    /// Location of the built file.
    path: PathBuf,
    /// Underlying I/O error.
    source: std::io::Error,
  },
  /// The entry has no `entrypoints` record in the manifest.
  #[error("entry point '{0}' does not exist in the manifest")]
  EntryNotFound(String),
  /// A host capability (paths or registration) is not available.
  #[error("required host capability is not available: {0}")]
  HostUnavailable(&'static str),
  /// A dependency descriptor exists but could not be understood.
  #[error("invalid dependency descriptor {}: {reason}", path.display())]
  Descriptor {
    /// Descriptor file that failed to parse.
    path: PathBuf,
    /// Human readable reason.
    reason: String,
  },
  /// Configuration could not be loaded.
  #[error("failed to load configuration {}: {reason}", path.display())]
  Config {
    /// Configuration file.
    path: PathBuf,
    /// Human readable reason.
    reason: String,
  },
  /// The host refused a style or script registration.
  #[error("host rejected registration of '{handle}': {reason}")]
  Registration {
    /// Handle that was being registered.
    handle: String,
    /// Reason reported by the host.
    reason: String,
  },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AssetError>;
