use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use medstock_core::{StoreError, StoreResult};

use super::r#trait::DocumentStore;

/// Directory-backed document store: one `<key>.json` file per document.
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// a crash mid-write leaves either the previous or the new document, never a
/// truncated one. A crash between an in-memory change and the write still
/// loses that change.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    root: PathBuf,
}

impl FileDocumentStore {
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::validation(format!(
                "invalid document key '{key}'"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl DocumentStore for FileDocumentStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::backend(format!(
                "failed to read {}: {err}",
                path.display()
            ))),
        }
    }

    fn write(&self, key: &str, document: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|err| {
            StoreError::backend(format!(
                "failed to create data directory {}: {err}",
                self.root.display()
            ))
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, document).map_err(|err| {
            StoreError::backend(format!("failed to write {}: {err}", tmp.display()))
        })?;
        fs::rename(&tmp, &path).map_err(|err| {
            StoreError::backend(format!("failed to replace {}: {err}", path.display()))
        })?;
        Ok(())
    }
}
