//! Registering an entry's scripts and styles with the host.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::asset_paths::{AssetKind, bundle_handle, entry_handle, normalize_asset_name};
use crate::dependencies::{DependencyDescriptor, get_dependencies};
use crate::error::{AssetError, Result};
use crate::host::{AssetRegistrar, ScriptTag, StyleTag};
use crate::resolver::AssetResolver;

/// How an entry is mapped onto manifest records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnqueueStrategy {
  /// Direct `styles/{entry}.css` and `scripts/{entry}.js` keys; missing keys are skipped.
  Flat,
  /// `entrypoints.{entry}.assets`; a missing entrypoint is an error.
  #[default]
  Entrypoints,
}

/// Everything registered for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnqueueReport {
  /// Registered stylesheets in order.
  pub styles: Vec<StyleTag>,
  /// Registered scripts in order.
  pub scripts: Vec<ScriptTag>,
  /// Descriptor files handed to the host for side-loading.
  pub included: Vec<PathBuf>,
}

impl EnqueueReport {
  /// Whether nothing was registered.
  pub fn is_empty(&self) -> bool {
    self.styles.is_empty() && self.scripts.is_empty() && self.included.is_empty()
  }
}

/// Resolves entries through an [`AssetResolver`] and hands the results to a registrar.
#[derive(Debug, Clone, Copy)]
pub struct BundleEnqueuer<'a> {
  resolver: &'a AssetResolver,
}

impl<'a> BundleEnqueuer<'a> {
  /// Create an enqueuer borrowing the resolver.
  pub fn new(resolver: &'a AssetResolver) -> Self {
    Self { resolver }
  }

  /// Register the scripts and styles of `entry` with the host.
  pub fn enqueue_bundle<R: AssetRegistrar + ?Sized>(
    &self,
    registrar: &mut R,
    entry: &str,
    namespace: &str,
    strategy: EnqueueStrategy,
  ) -> Result<EnqueueReport> {
    if !registrar.is_available() {
      return Err(AssetError::HostUnavailable("asset registration"));
    }

    match strategy {
      EnqueueStrategy::Flat => self.enqueue_flat(registrar, entry, namespace),
      EnqueueStrategy::Entrypoints => self.enqueue_entrypoint(registrar, entry, namespace),
    }
  }

  fn enqueue_flat<R: AssetRegistrar + ?Sized>(
    &self,
    registrar: &mut R,
    entry: &str,
    namespace: &str,
  ) -> Result<EnqueueReport> {
    let mut report = EnqueueReport::default();
    let entry = normalize_asset_name(entry, true);
    if entry.is_empty() {
      return Ok(report);
    }

    let handle = bundle_handle(namespace, &entry);
    let DependencyDescriptor {
      dependencies,
      version,
    } = get_dependencies(self.resolver, &handle)?;

    let style_key = format!("styles/{handle}.css");
    if self.resolver.asset_exists(&style_key)? {
      let tag = StyleTag {
        handle: handle.clone(),
        src: self.resolver.try_resolve(&style_key)?,
        deps: Vec::new(),
        version: version.clone(),
      };
      register_style(registrar, &mut report, tag)?;
    }

    let script_key = format!("scripts/{handle}.js");
    if self.resolver.asset_exists(&script_key)? {
      let tag = ScriptTag {
        handle,
        src: self.resolver.try_resolve(&script_key)?,
        deps: dependencies,
        version,
        in_footer: true,
      };
      register_script(registrar, &mut report, tag)?;
    }

    Ok(report)
  }

  fn enqueue_entrypoint<R: AssetRegistrar + ?Sized>(
    &self,
    registrar: &mut R,
    entry: &str,
    namespace: &str,
  ) -> Result<EnqueueReport> {
    let mut report = EnqueueReport::default();
    let normalized = normalize_asset_name(entry, true);
    let manifest = self.resolver.manifest()?;
    let assets = manifest
      .entrypoint(&normalized)
      .map(|entrypoint| &entrypoint.assets)
      .ok_or_else(|| AssetError::EntryNotFound(entry.to_string()))?;

    let DependencyDescriptor {
      dependencies,
      version,
    } = get_dependencies(self.resolver, &normalized)?;
    let paths = self.resolver.paths();

    for (index, css) in assets.css.iter().enumerate() {
      let tag = StyleTag {
        handle: entry_handle(namespace, &normalized, AssetKind::Style, index),
        src: paths.url_for(css),
        deps: Vec::new(),
        version: version.clone(),
      };
      register_style(registrar, &mut report, tag)?;
    }

    for (index, js) in assets.js.iter().enumerate() {
      let tag = ScriptTag {
        handle: entry_handle(namespace, &normalized, AssetKind::Script, index),
        src: paths.url_for(js),
        deps: dependencies.clone(),
        version: version.clone(),
        in_footer: true,
      };
      register_script(registrar, &mut report, tag)?;
    }

    for php in &assets.php {
      let path = paths.dir_for(php);
      if !path.is_file() {
        continue;
      }
      debug!(entry = %normalized, path = %path.display(), "including dependency descriptor");
      registrar.include_descriptor(&path)?;
      report.included.push(path);
    }

    Ok(report)
  }
}

fn register_style<R: AssetRegistrar + ?Sized>(
  registrar: &mut R,
  report: &mut EnqueueReport,
  tag: StyleTag,
) -> Result<()> {
  debug!(handle = %tag.handle, src = %tag.src, "enqueue style");
  registrar.enqueue_style(tag.clone())?;
  report.styles.push(tag);
  Ok(())
}

fn register_script<R: AssetRegistrar + ?Sized>(
  registrar: &mut R,
  report: &mut EnqueueReport,
  tag: ScriptTag,
) -> Result<()> {
  debug!(handle = %tag.handle, src = %tag.src, deps = ?tag.deps, "enqueue script");
  registrar.enqueue_script(tag.clone())?;
  report.scripts.push(tag);
  Ok(())
}

/// Register `entry` using a borrowed resolver. Shorthand for [`BundleEnqueuer::enqueue_bundle`].
pub fn enqueue_bundle<R: AssetRegistrar + ?Sized>(
  resolver: &AssetResolver,
  registrar: &mut R,
  entry: &str,
  namespace: &str,
  strategy: EnqueueStrategy,
) -> Result<EnqueueReport> {
  BundleEnqueuer::new(resolver).enqueue_bundle(registrar, entry, namespace, strategy)
}
