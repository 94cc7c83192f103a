//! Where report images come from.

use crate::error::AssetError;
use crate::image::Image;
use std::collections::HashMap;
use std::path::PathBuf;

/// Supplies images by identifier
pub trait AssetStore {
    fn load_image(&self, id: &str) -> Result<Image, AssetError>;
}

/// Loads images from files below a root directory; identifiers are relative paths
#[derive(Clone, Debug)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new<P: Into<PathBuf>>(root: P) -> DirectoryAssets {
        DirectoryAssets { root: root.into() }
    }
}

impl AssetStore for DirectoryAssets {
    fn load_image(&self, id: &str) -> Result<Image, AssetError> {
        let path = self.root.join(id);
        if !path.is_file() {
            return Err(AssetError::Missing(path.display().to_string()));
        }
        Image::new_from_disk(path)
    }
}

/// Images already in memory, e.g. decoded once and shared between renders
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    images: HashMap<String, Image>,
}

impl MemoryAssets {
    pub fn new() -> MemoryAssets {
        MemoryAssets::default()
    }

    pub fn insert<S: Into<String>>(&mut self, id: S, image: Image) {
        self.images.insert(id.into(), image);
    }

    pub fn with<S: Into<String>>(mut self, id: S, image: Image) -> MemoryAssets {
        self.insert(id, image);
        self
    }
}

impl AssetStore for MemoryAssets {
    fn load_image(&self, id: &str) -> Result<Image, AssetError> {
        self.images
            .get(id)
            .cloned()
            .ok_or_else(|| AssetError::Missing(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    #[test]
    fn memory_assets_hand_out_copies() {
        let assets = MemoryAssets::new().with("logo", Image::new_raster(DynamicImage::new_rgb8(2, 2)));
        assert_eq!(assets.load_image("logo").expect("present").width, 2);
        assert!(matches!(assets.load_image("seal"), Err(AssetError::Missing(id)) if id == "seal"));
    }

    #[test]
    fn missing_files_are_reported_by_path() {
        let assets = DirectoryAssets::new("/nonexistent-asset-root");
        assert!(matches!(assets.load_image("logo.png"), Err(AssetError::Missing(_))));
    }
}
