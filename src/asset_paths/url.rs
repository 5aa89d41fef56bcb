/// Join a base URL (or path) and a relative asset path with exactly one `/` between them.
///
/// Manifests written with `publicPath: '/'` carry a leading slash while hand-written keys do
/// not; both forms must produce the same URL. Backslashes from Windows builds are normalised.
pub fn join_url(base: &str, path: &str) -> String {
    let path = path.replace('\\', "/");
    let path = path.trim_start_matches('/');
    let base = base.trim_end_matches('/');

    if path.is_empty() {
        return base.to_string();
    }

    format!("{base}/{path}")
}
