//! Asset lookup for fonts and images referenced by a layout

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors returned by an [`AssetSource`]
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset '{key}' not found at {location}")]
    NotFound { key: String, location: String },

    #[error("Failed to read asset '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves asset keys used in a layout to file bytes
pub trait AssetSource {
    /// Load the bytes for `key`
    fn load(&self, key: &str) -> Result<Vec<u8>, AssetError>;
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn load(&self, key: &str) -> Result<Vec<u8>, AssetError> {
        (**self).load(key)
    }
}

/// In-memory asset source
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    assets: BTreeMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset, builder style
    pub fn with(mut self, key: &str, data: Vec<u8>) -> Self {
        self.insert(key, data);
        self
    }

    pub fn insert(&mut self, key: &str, data: Vec<u8>) {
        self.assets.insert(key.to_string(), data);
    }
}

impl AssetSource for MemoryAssets {
    fn load(&self, key: &str) -> Result<Vec<u8>, AssetError> {
        self.assets
            .get(key)
            .cloned()
            .ok_or_else(|| AssetError::NotFound {
                key: key.to_string(),
                location: "memory".to_string(),
            })
    }
}

/// Assets fetched up front, before anything is drawn
#[derive(Debug, Clone, Default)]
pub struct LoadedAssets {
    data: BTreeMap<String, Vec<u8>>,
}

impl LoadedAssets {
    /// Load every key from `source`, failing on the first missing one
    pub fn load<'k, S, I>(source: &S, keys: I) -> Result<Self, AssetError>
    where
        S: AssetSource + ?Sized,
        I: IntoIterator<Item = &'k str>,
    {
        let mut data = BTreeMap::new();
        for key in keys {
            if !data.contains_key(key) {
                data.insert(key.to_string(), source.load(key)?);
            }
        }
        Ok(Self { data })
    }

    /// Bytes of a preloaded asset
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_assets() {
        let assets = MemoryAssets::new().with("font", vec![1, 2, 3]);
        assert_eq!(assets.load("font").unwrap(), vec![1, 2, 3]);

        match assets.load("emblem") {
            Err(AssetError::NotFound { key, .. }) => assert_eq!(key, "emblem"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_loaded_assets_dedup_keys() {
        let assets = MemoryAssets::new().with("emblem", vec![9]);
        let loaded = LoadedAssets::load(&assets, ["emblem", "emblem"]).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("emblem"), Some(&[9u8][..]));
        assert_eq!(loaded.get("font"), None);
    }

    #[test]
    fn test_loaded_assets_fails_on_missing() {
        let assets = MemoryAssets::new().with("font", vec![0]);
        let err = LoadedAssets::load(&assets, ["font", "emblem"]).unwrap_err();
        assert!(matches!(err, AssetError::NotFound { ref key, .. } if key == "emblem"));
    }
}
