//! Lookup for optional files under the asset root.
use std::path::Path;

use bevy::prelude::*;

const ASSET_ROOT: &str = "assets";

/// Loads an asset only when its file is present, so absent art or audio is skipped instead of
/// producing load errors every time it would be used.
pub fn load_if_present<A: Asset>(asset_server: &AssetServer, path: &str) -> Option<Handle<A>> {
    if Path::new(ASSET_ROOT).join(path).is_file() {
        Some(asset_server.load(path.to_owned()))
    } else {
        debug!("Optional asset {} not found; skipping", path);
        None
    }
}
