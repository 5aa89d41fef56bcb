//! Resolving the dependency list and version declared for an entry.

mod descriptor;

use std::path::PathBuf;

use tracing::debug;

pub use descriptor::{DependencyDescriptor, parse_json_descriptor, parse_php_descriptor};

use crate::asset_paths::normalize_asset_name;
use crate::error::Result;
use crate::resolver::AssetResolver;

const SIDECAR_PATTERNS: [&str; 4] = [
  "{entry}.asset.php",
  "scripts/{entry}.asset.php",
  "{entry}.asset.json",
  "scripts/{entry}.asset.json",
];

/// Conventional sidecar descriptor locations for an entry, relative to the output directory.
pub fn sidecar_candidates(entry: &str) -> Vec<String> {
  SIDECAR_PATTERNS
    .iter()
    .map(|pattern| pattern.replace("{entry}", entry))
    .collect()
}

/// Locate the descriptor file for an entry without reading it.
///
/// The first `php` file listed by the entry's manifest entrypoint wins when it exists on disk,
/// followed by the conventional sidecar names.
pub fn find_descriptor(resolver: &AssetResolver, entry: &str) -> Result<Option<PathBuf>> {
  let entry = normalize_asset_name(entry, true);
  let paths = resolver.paths();

  let bundled = resolver
    .manifest()?
    .entrypoint(&entry)
    .and_then(|entrypoint| entrypoint.assets.php.first())
    .map(|file| paths.dir_for(file))
    .filter(|path| path.is_file());

  if bundled.is_some() {
    return Ok(bundled);
  }

  Ok(
    sidecar_candidates(&entry)
      .iter()
      .map(|candidate| paths.dir_for(candidate))
      .find(|path| path.is_file()),
  )
}

/// Dependencies and version for an entry, read fresh on every call.
///
/// A missing descriptor is the common case and yields the empty default. Only a descriptor that
/// exists but cannot be parsed, or a manifest that cannot be loaded, is an error.
pub fn get_dependencies(resolver: &AssetResolver, entry: &str) -> Result<DependencyDescriptor> {
  match find_descriptor(resolver, entry)? {
    Some(path) => {
      let descriptor = DependencyDescriptor::load(&path)?;
      debug!(
        entry,
        path = %path.display(),
        dependencies = descriptor.dependencies.len(),
        "resolved dependency descriptor"
      );
      Ok(descriptor)
    }
    None => {
      debug!(entry, "no dependency descriptor found");
      Ok(DependencyDescriptor::default())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::host::ThemePaths;
  use crate::manifest::{ManifestCache, MissingManifestPolicy};
  use std::fs;
  use std::path::Path;
  use tempfile::tempdir;

  fn resolver(dir: &Path, manifest: &str) -> AssetResolver {
    fs::write(dir.join("manifest.json"), manifest).unwrap();
    AssetResolver::new(
      ThemePaths::new("https://site.test/public", dir),
      ManifestCache::new(dir.join("manifest.json"), MissingManifestPolicy::Fatal),
    )
  }

  fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  #[test]
  fn returns_default_without_descriptor() {
    let dir = tempdir().unwrap();
    let resolver = resolver(dir.path(), "{}");

    let descriptor = get_dependencies(&resolver, "main").unwrap();
    assert!(descriptor.dependencies.is_empty());
    assert_eq!(descriptor.version, None);
  }

  #[test]
  fn prefers_descriptor_listed_by_entrypoint() {
    let dir = tempdir().unwrap();
    let resolver = resolver(
      dir.path(),
      r#"{"entrypoints": {"main": {"assets": {"php": ["/scripts/main.bundle.asset.php"]}}}}"#,
    );
    write(
      dir.path(),
      "scripts/main.bundle.asset.php",
      "<?php return array('dependencies' => array('wp-element'), 'version' => 'bundle');",
    );
    write(
      dir.path(),
      "main.asset.php",
      "<?php return array('dependencies' => array(), 'version' => 'sidecar');",
    );

    let descriptor = get_dependencies(&resolver, "scripts/main.js").unwrap();
    assert_eq!(descriptor.version.as_deref(), Some("bundle"));
    assert_eq!(descriptor.dependencies, vec!["wp-element"]);
  }

  #[test]
  fn falls_back_to_sidecar_when_listed_file_is_absent() {
    let dir = tempdir().unwrap();
    let resolver = resolver(
      dir.path(),
      r#"{"entrypoints": {"editor": {"assets": {"php": ["/scripts/gone.asset.php"]}}}}"#,
    );
    write(
      dir.path(),
      "scripts/editor.asset.json",
      r#"{"dependencies": ["wp-blocks"], "version": "e1"}"#,
    );

    let descriptor = get_dependencies(&resolver, "editor").unwrap();
    assert_eq!(descriptor.dependencies, vec!["wp-blocks"]);
    assert_eq!(descriptor.version.as_deref(), Some("e1"));
  }

  #[test]
  fn reads_descriptors_fresh_on_each_call() {
    let dir = tempdir().unwrap();
    let resolver = resolver(dir.path(), "{}");
    write(dir.path(), "main.asset.json", r#"{"version": "1"}"#);
    assert_eq!(get_dependencies(&resolver, "main").unwrap().version.as_deref(), Some("1"));

    write(dir.path(), "main.asset.json", r#"{"version": "2"}"#);
    assert_eq!(get_dependencies(&resolver, "main").unwrap().version.as_deref(), Some("2"));
  }

  #[test]
  fn lists_sidecar_candidates_in_lookup_order() {
    assert_eq!(sidecar_candidates("main"), vec![
      "main.asset.php".to_string(),
      "scripts/main.asset.php".to_string(),
      "main.asset.json".to_string(),
      "scripts/main.asset.json".to_string(),
    ]);
  }
}
