use neighborhood_map_core::popup::AssetResolver;
use std::path::PathBuf;

/// Resolves popup images against a local directory. Remote URLs are taken
/// as-is since the terminal only prints them.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetResolver for DirectoryAssets {
    fn is_available(&self, asset: &str) -> bool {
        let asset = asset.trim();
        if asset.starts_with("http://") || asset.starts_with("https://") {
            return true;
        }
        !asset.is_empty() && self.root.join(asset).is_file()
    }
}
