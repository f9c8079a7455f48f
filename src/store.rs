// Logo blobs keyed by brand id.
//
// The editor only ever hands opaque PNG bytes across this boundary. Whatever
// sits behind it (a database column, a directory) is not the editor's concern.

use crate::error::Result;
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub type BrandId = u32;

pub trait BlobStore {
    /// `Ok(None)` and `Ok(Some(empty))` both mean "no logo yet".
    fn load(&self, brand: BrandId) -> Result<Option<Vec<u8>>>;

    fn save(&mut self, brand: BrandId, bytes: &[u8]) -> Result<()>;
}

/// One `<brand>.png` file per brand in a directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, brand: BrandId) -> PathBuf {
        self.root.join(format!("{brand}.png"))
    }
}

impl BlobStore for FsBlobStore {
    fn load(&self, brand: BrandId) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(brand);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!("Read {} bytes from {}", bytes.len(), path.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored logo at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, brand: BrandId, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(brand);
        // atomic replace
        let tmp = path.with_extension("png.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        info!("Saved logo for brand {} ({} bytes)", brand, bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_brand_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());
        assert!(store.load(42).unwrap().is_none());
    }

    #[test]
    fn save_then_load_returns_same_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsBlobStore::new(dir.path().join("nested").join("brands"));
        store.save(7, b"logo bytes").unwrap();
        assert_eq!(store.load(7).unwrap().as_deref(), Some(&b"logo bytes"[..]));
        assert!(store.path_for(7).ends_with("7.png"));
        assert!(!store.path_for(7).with_extension("png.tmp").exists());
    }

    #[test]
    fn empty_file_loads_as_empty_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());
        fs::write(store.path_for(3), b"").unwrap();
        assert_eq!(store.load(3).unwrap(), Some(Vec::new()));
    }
}
