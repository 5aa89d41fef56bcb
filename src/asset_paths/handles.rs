/// Kind of tag registered for an entrypoint file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Stylesheet registered through the style capability.
    Style,
    /// Script registered through the script capability.
    Script,
}

impl AssetKind {
    fn suffix(self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Script => "script",
        }
    }
}

/// Handle used by the flat strategy: the entry itself, scoped by the namespace when present.
pub fn bundle_handle(namespace: &str, entry: &str) -> String {
    let namespace = namespace.trim_matches('/');
    if namespace.is_empty() {
        entry.to_string()
    } else {
        format!("{namespace}/{entry}")
    }
}

/// Handle used by the entrypoint strategy, e.g. `wpa/main-style`.
///
/// The host deduplicates registrations by handle, so every file after the first one of the same
/// kind gets a numeric suffix (`-2`, `-3`, ...) to keep it from being dropped.
pub fn entry_handle(namespace: &str, entry: &str, kind: AssetKind, index: usize) -> String {
    let base = format!("{}-{}", bundle_handle(namespace, entry), kind.suffix());
    if index == 0 {
        base
    } else {
        format!("{base}-{}", index + 1)
    }
}
