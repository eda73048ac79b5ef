//! Filesystem locations of the ticket font and emblem

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use template::{AssetError, AssetSource};

/// Asset key of the Dhivehi TrueType font
pub const FONT_KEY: &str = "font";

/// Asset key of the title emblem image
pub const EMBLEM_KEY: &str = "emblem";

/// Reads ticket assets from configured paths on every load
#[derive(Debug, Clone)]
pub struct FsAssets {
    font_path: PathBuf,
    emblem_path: PathBuf,
}

impl FsAssets {
    pub fn new(font_path: impl Into<PathBuf>, emblem_path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: font_path.into(),
            emblem_path: emblem_path.into(),
        }
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    pub fn emblem_path(&self) -> &Path {
        &self.emblem_path
    }

    fn path_for(&self, key: &str) -> Option<&Path> {
        match key {
            FONT_KEY => Some(&self.font_path),
            EMBLEM_KEY => Some(&self.emblem_path),
            _ => None,
        }
    }
}

impl Default for FsAssets {
    fn default() -> Self {
        Self::new("faruma.ttf", Path::new("static").join("crown.png"))
    }
}

impl AssetSource for FsAssets {
    fn load(&self, key: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.path_for(key).ok_or_else(|| AssetError::NotFound {
            key: key.to_string(),
            location: "no configured path".to_string(),
        })?;

        std::fs::read(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => AssetError::NotFound {
                key: key.to_string(),
                location: format!("'{}'", path.display()),
            },
            _ => AssetError::Io {
                key: key.to_string(),
                source,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let assets = FsAssets::default();
        assert_eq!(assets.font_path(), Path::new("faruma.ttf"));
        assert_eq!(assets.emblem_path(), Path::new("static/crown.png"));
    }

    #[test]
    fn test_load_existing_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("faruma.ttf");
        std::fs::write(&font, b"font bytes").unwrap();

        let assets = FsAssets::new(&font, dir.path().join("crown.png"));
        assert_eq!(assets.load(FONT_KEY).unwrap(), b"font bytes");

        match assets.load(EMBLEM_KEY) {
            Err(AssetError::NotFound { key, location }) => {
                assert_eq!(key, EMBLEM_KEY);
                assert!(location.contains("crown.png"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_key() {
        let assets = FsAssets::default();
        assert!(matches!(
            assets.load("logo"),
            Err(AssetError::NotFound { .. })
        ));
    }
}
