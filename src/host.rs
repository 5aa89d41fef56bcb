//! Capabilities consumed from the hosting CMS: theme paths and tag registration.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::asset_paths::join_url;
use crate::error::Result;

/// Public root of the theme build output, as a URL and as a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePaths {
  /// Base URL of the output directory, e.g. `https://site.test/wp-content/themes/acme/public`.
  pub base_url: String,
  /// Filesystem path of the same directory.
  pub base_dir: PathBuf,
}

impl ThemePaths {
  /// Create paths from an already joined base URL and directory.
  pub fn new(base_url: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
    Self {
      base_url: base_url.into(),
      base_dir: base_dir.into(),
    }
  }

  /// URL of a path relative to the output directory.
  pub fn url_for(&self, relative: &str) -> String {
    join_url(&self.base_url, relative)
  }

  /// Filesystem location of a path relative to the output directory.
  pub fn dir_for(&self, relative: &str) -> PathBuf {
    let trimmed = relative.trim_start_matches(['/', '\\']);
    self.base_dir.join(trimmed)
  }
}

/// Stylesheet registration handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleTag {
  /// Unique handle the host uses to deduplicate the tag.
  pub handle: String,
  /// Public URL of the stylesheet.
  pub src: String,
  /// Handles this stylesheet depends on.
  pub deps: Vec<String>,
  /// Cache-busting version, if known.
  pub version: Option<String>,
}

/// Script registration handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptTag {
  /// Unique handle the host uses to deduplicate the tag.
  pub handle: String,
  /// Public URL of the script.
  pub src: String,
  /// Handles this script depends on, used by the host to order output.
  pub deps: Vec<String>,
  /// Cache-busting version, if known.
  pub version: Option<String>,
  /// Whether the script is printed before `</body>` instead of in `<head>`.
  pub in_footer: bool,
}

/// Registration capability of the host (`wp_enqueue_style` / `wp_enqueue_script`).
pub trait AssetRegistrar {
  /// Returns `false` when the host cannot register tags at all in the current context.
  fn is_available(&self) -> bool {
    true
  }

  /// Register a stylesheet.
  fn enqueue_style(&mut self, tag: StyleTag) -> Result<()>;

  /// Register a script.
  fn enqueue_script(&mut self, tag: ScriptTag) -> Result<()>;

  /// Side-load a dependency descriptor listed by an entrypoint.
  fn include_descriptor(&mut self, path: &Path) -> Result<()>;
}

/// Single call recorded by [`RecordingRegistrar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Registration {
  /// `enqueue_style` call.
  Style(StyleTag),
  /// `enqueue_script` call.
  Script(ScriptTag),
  /// `include_descriptor` call.
  Include {
    /// Descriptor file that was side-loaded.
    path: PathBuf,
  },
}

/// Registrar that keeps every call in order instead of talking to a live host.
#[derive(Debug, Default, Clone)]
pub struct RecordingRegistrar {
  registrations: Vec<Registration>,
}

impl RecordingRegistrar {
  /// Create an empty recorder.
  pub fn new() -> Self {
    Self::default()
  }

  /// Calls recorded so far.
  pub fn registrations(&self) -> &[Registration] {
    &self.registrations
  }

  /// Consume the recorder and return the recorded calls.
  pub fn into_registrations(self) -> Vec<Registration> {
    self.registrations
  }

  /// Recorded stylesheet registrations.
  pub fn styles(&self) -> impl Iterator<Item = &StyleTag> {
    self.registrations.iter().filter_map(|entry| match entry {
      Registration::Style(tag) => Some(tag),
      _ => None,
    })
  }

  /// Recorded script registrations.
  pub fn scripts(&self) -> impl Iterator<Item = &ScriptTag> {
    self.registrations.iter().filter_map(|entry| match entry {
      Registration::Script(tag) => Some(tag),
      _ => None,
    })
  }
}

impl AssetRegistrar for RecordingRegistrar {
  fn enqueue_style(&mut self, tag: StyleTag) -> Result<()> {
    self.registrations.push(Registration::Style(tag));
    Ok(())
  }

  fn enqueue_script(&mut self, tag: ScriptTag) -> Result<()> {
    self.registrations.push(Registration::Script(tag));
    Ok(())
  }

  fn include_descriptor(&mut self, path: &Path) -> Result<()> {
    self.registrations.push(Registration::Include {
      path: path.to_path_buf(),
    });
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn joins_relative_paths_onto_both_roots() {
    let paths = ThemePaths::new("https://site.test/themes/acme/public/", "/srv/acme/public");

    assert_eq!(
      paths.url_for("/scripts/main.123.js"),
      "https://site.test/themes/acme/public/scripts/main.123.js"
    );
    assert_eq!(
      paths.dir_for("/scripts/main.123.js"),
      PathBuf::from("/srv/acme/public").join("scripts/main.123.js")
    );
  }

  #[test]
  fn recorder_keeps_call_order() {
    let mut recorder = RecordingRegistrar::new();
    recorder
      .enqueue_script(ScriptTag {
        handle: "a".into(),
        src: "/a.js".into(),
        deps: Vec::new(),
        version: None,
        in_footer: true,
      })
      .unwrap();
    recorder
      .enqueue_style(StyleTag {
        handle: "b".into(),
        src: "/b.css".into(),
        deps: Vec::new(),
        version: Some("1".into()),
      })
      .unwrap();

    assert_eq!(recorder.registrations().len(), 2);
    assert!(matches!(recorder.registrations()[0], Registration::Script(_)));
    assert_eq!(recorder.styles().count(), 1);
    assert_eq!(recorder.scripts().count(), 1);
  }

  #[test]
  fn registrations_serialise_with_kind_tag() {
    let value = serde_json::to_value(Registration::Include {
      path: PathBuf::from("scripts/main.asset.php"),
    })
    .unwrap();

    assert_eq!(value["kind"], "include");
    assert_eq!(value["path"], "scripts/main.asset.php");
  }
}
