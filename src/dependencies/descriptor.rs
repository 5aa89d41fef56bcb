//! Parsing the sidecar descriptors written by the dependency extraction plugin.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AssetError, Result};

/// Script handles a bundle depends on plus its cache-busting version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DependencyDescriptor {
  /// Handles that must load first. Duplicates are removed, first occurrence wins.
  #[serde(default)]
  pub dependencies: Vec<String>,
  /// Content hash of the bundle, if the build produced one.
  #[serde(default)]
  pub version: Option<String>,
}

impl DependencyDescriptor {
  /// Build a descriptor, dropping duplicate and blank handles.
  pub fn new(dependencies: impl IntoIterator<Item = String>, version: Option<String>) -> Self {
    let mut unique: Vec<String> = Vec::new();
    for handle in dependencies {
      let handle = handle.trim().to_string();
      if !handle.is_empty() && !unique.contains(&handle) {
        unique.push(handle);
      }
    }

    Self {
      dependencies: unique,
      version: version.filter(|value| !value.is_empty()),
    }
  }

  /// Read a descriptor from disk. `.json` files are parsed as JSON, anything else as the PHP
  /// `return array(...)` form.
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).map_err(|err| AssetError::Descriptor {
      path: path.to_path_buf(),
      reason: err.to_string(),
    })?;

    let is_json = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
      parse_json_descriptor(&content)
    } else {
      parse_php_descriptor(&content)
    };

    parsed.map_err(|reason| AssetError::Descriptor {
      path: path.to_path_buf(),
      reason,
    })
  }
}

/// Parse the JSON output format (`{"dependencies": [...], "version": "..."}`).
pub fn parse_json_descriptor(content: &str) -> std::result::Result<DependencyDescriptor, String> {
  let raw: DependencyDescriptor = serde_json::from_str(content).map_err(|err| err.to_string())?;
  Ok(DependencyDescriptor::new(raw.dependencies, raw.version))
}

/// Parse the PHP output format without executing it.
///
/// Accepts both `array(...)` and short `[...]` syntax with single or double quoted strings, e.g.
/// `<?php return array('dependencies' => array('wp-element'), 'version' => 'a1b2');`. Only flat
/// lists of handles are understood; the nested `array('id' => ..., 'import' => ...)` records of
/// script-module descriptors are rejected.
pub fn parse_php_descriptor(content: &str) -> std::result::Result<DependencyDescriptor, String> {
  let patterns = php_patterns();
  if !patterns.return_stmt.is_match(content) {
    return Err("descriptor does not return an array".into());
  }

  let dependencies: Vec<String> = match patterns.dependencies.captures(content) {
    Some(caps) => {
      let list = caps.get(1).map_or("", |m| m.as_str());
      if list.contains(['(', '[']) || list.contains("=>") {
        return Err("nested dependency arrays are not supported".into());
      }
      patterns
        .string
        .captures_iter(list)
        .filter_map(|item| item.get(1).or_else(|| item.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
    }
    None => Vec::new(),
  };

  let version = patterns.version.captures(content).and_then(|caps| {
    caps
      .get(1)
      .or_else(|| caps.get(2))
      .map(|m| m.as_str().to_string())
  });

  Ok(DependencyDescriptor::new(dependencies, version))
}

struct PhpPatterns {
  return_stmt: Regex,
  dependencies: Regex,
  version: Regex,
  string: Regex,
}

fn php_patterns() -> &'static PhpPatterns {
  static PATTERNS: OnceLock<PhpPatterns> = OnceLock::new();
  PATTERNS.get_or_init(|| PhpPatterns {
    return_stmt: Regex::new(r"(?is)^\s*<\?php\s.*\breturn\s*(?:array\s*\(|\[)")
      .expect("invalid return regex"),
    dependencies: Regex::new(
      r#"(?is)['"]dependencies['"]\s*=>\s*(?:array\s*\(|\[)([^)\]]*)[)\]]"#,
    )
    .expect("invalid dependencies regex"),
    version: Regex::new(r#"(?is)['"]version['"]\s*=>\s*(?:'([^']*)'|"([^"]*)"|null)"#)
      .expect("invalid version regex"),
    string: Regex::new(r#"'([^']*)'|"([^"]*)""#).expect("invalid string regex"),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn parses_long_array_syntax() {
    let descriptor = parse_php_descriptor(
      "<?php return array('dependencies' => array('react', 'wp-element', 'wp-i18n'), 'version' => '5f3c9a1b');",
    )
    .unwrap();

    assert_eq!(descriptor.dependencies, vec!["react", "wp-element", "wp-i18n"]);
    assert_eq!(descriptor.version.as_deref(), Some("5f3c9a1b"));
  }

  #[test]
  fn parses_short_array_syntax_across_lines() {
    let descriptor = parse_php_descriptor(
      "<?php\n\nreturn [\n  \"dependencies\" => [\"wp-blocks\", \"wp-dom-ready\"],\n  \"version\" => \"abc\",\n];\n",
    )
    .unwrap();

    assert_eq!(descriptor.dependencies, vec!["wp-blocks", "wp-dom-ready"]);
    assert_eq!(descriptor.version.as_deref(), Some("abc"));
  }

  #[test]
  fn handles_empty_dependencies_and_null_version() {
    let descriptor =
      parse_php_descriptor("<?php return array('dependencies' => array(), 'version' => null);")
        .unwrap();

    assert_eq!(descriptor, DependencyDescriptor::default());
  }

  #[test]
  fn rejects_files_without_a_returned_array() {
    assert!(parse_php_descriptor("<?php echo 'hello';").is_err());
    assert!(parse_php_descriptor("just text").is_err());
  }

  #[test]
  fn rejects_nested_module_dependencies() {
    let long = parse_php_descriptor(
      "<?php return array('dependencies' => array(array('id' => '@wordpress/interactivity', 'import' => 'dynamic')), 'version' => 'm1');",
    );
    let short = parse_php_descriptor(
      "<?php return ['dependencies' => [['id' => '@wordpress/interactivity']], 'version' => 'm1'];",
    );

    assert!(long.unwrap_err().contains("nested"));
    assert!(short.unwrap_err().contains("nested"));
  }

  #[test]
  fn parses_json_and_deduplicates() {
    let descriptor =
      parse_json_descriptor(r#"{"dependencies": ["react", "react", " "], "version": "1.2"}"#)
        .unwrap();

    assert_eq!(descriptor.dependencies, vec!["react"]);
    assert_eq!(descriptor.version.as_deref(), Some("1.2"));
  }

  #[test]
  fn load_picks_format_by_extension() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("main.asset.json");
    let php = dir.path().join("main.asset.php");
    fs::write(&json, r#"{"dependencies": ["jquery"]}"#).unwrap();
    fs::write(&php, "<?php return array('dependencies' => array('jquery'), 'version' => 'v');").unwrap();

    assert_eq!(DependencyDescriptor::load(&json).unwrap().dependencies, vec!["jquery"]);
    assert_eq!(DependencyDescriptor::load(&php).unwrap().version.as_deref(), Some("v"));
  }

  #[test]
  fn load_reports_malformed_descriptors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.asset.json");
    fs::write(&path, "{").unwrap();

    assert!(matches!(
      DependencyDescriptor::load(&path),
      Err(AssetError::Descriptor { .. })
    ));
  }
}
