const KNOWN_PREFIXES: [&str; 2] = ["scripts/", "styles/"];
const KNOWN_EXTENSIONS: [&str; 2] = [".js", ".css"];

/// Reduce an asset or entry reference to its logical entry name.
///
/// One leading `scripts/` or `styles/` directory is removed. When `strip_extension` is set, a
/// trailing `.js` or `.css` is removed as well, so `scripts/main.js` and `styles/main.css`
/// both name the `main` entry.
pub fn normalize_asset_name(name: &str, strip_extension: bool) -> String {
    let mut value = KNOWN_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name);

    if strip_extension {
        value = KNOWN_EXTENSIONS
            .iter()
            .find_map(|extension| value.strip_suffix(extension))
            .unwrap_or(value);
    }

    value.to_string()
}
