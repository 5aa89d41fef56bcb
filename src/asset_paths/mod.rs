//! Helpers for naming manifest assets and turning them into URLs and handles.
//!
//! The pieces are split into small submodules so that name normalisation, handle naming and
//! URL joining can be tested on their own. Both enqueue strategies and the resolver share them.

mod handles;
mod names;
mod url;

pub use handles::{AssetKind, bundle_handle, entry_handle};
pub use names::normalize_asset_name;
pub use url::join_url;
