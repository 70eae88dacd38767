use crate::errors::{ErrorKind, StoreError, StoreResult};
use crate::store::Store;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

impl Store {
    /// Serializes the entire store graph into an opaque byte blob.
    ///
    /// The encoding is self-describing: every field keeps its type tag and
    /// every number its native width, so [`Store::from_dump`] reconstructs
    /// the graph exactly. The format is only read by this crate.
    pub fn dump(&self) -> StoreResult<Vec<u8>> {
        bincode::serde::encode_to_vec(self, bincode::config::legacy()).map_err(|err| {
            log::error!("failed to encode store: {}", err);
            StoreError::new(
                &format!("failed to encode store: {}", err),
                ErrorKind::EncodeError,
            )
        })
    }

    /// Reconstructs a store from bytes produced by [`Store::dump`].
    ///
    /// # Errors
    ///
    /// Fails with `NilOrInvalidInput` for empty input and `DecodeError` for
    /// malformed or trailing bytes.
    pub fn from_dump(data: &[u8]) -> StoreResult<Store> {
        if data.is_empty() {
            log::error!("cannot load a store from empty data");
            return Err(StoreError::new(
                "cannot load a store from empty data",
                ErrorKind::NilOrInvalidInput,
            ));
        }

        let (store, consumed): (Store, usize) =
            bincode::serde::decode_from_slice(data, bincode::config::legacy()).map_err(|err| {
                log::error!("failed to decode store: {}", err);
                StoreError::new(
                    &format!("failed to decode store: {}", err),
                    ErrorKind::DecodeError,
                )
            })?;

        if consumed != data.len() {
            log::error!(
                "failed to decode store: {} trailing bytes",
                data.len() - consumed
            );
            return Err(StoreError::new(
                &format!("failed to decode store: {} trailing bytes", data.len() - consumed),
                ErrorKind::DecodeError,
            ));
        }

        Ok(store)
    }

    /// Writes the encoded store to a file, crash-safely.
    ///
    /// The bytes go to a temporary file in the destination's directory
    /// (created if necessary), are synced to stable storage, and the temp
    /// file is atomically renamed over the destination. The destination is
    /// never observed partially written; a failed dump leaves the previous
    /// file untouched and no temp file behind.
    pub fn dump_to_file(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            log::error!("dump failed: destination path is empty");
            return Err(StoreError::new(
                "destination path is empty",
                ErrorKind::NilOrInvalidInput,
            ));
        }

        let data = self.dump()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // The temp file lives in the destination directory so the final
        // rename stays on one filesystem. It is removed on drop if any step
        // before the rename fails.
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;

        match tmp.persist(path) {
            Ok(_) => {
                log::info!("store dumped to '{}' ({} bytes)", path.display(), data.len());
                Ok(())
            }
            Err(persist_error) => {
                // Windows refuses to rename over an existing file; remove
                // the destination and retry the rename once.
                log::warn!(
                    "rename to '{}' failed: {}; removing destination and retrying",
                    path.display(),
                    persist_error.error
                );
                let tmp = persist_error.file;
                fs::remove_file(path)?;
                tmp.persist(path).map_err(|err| StoreError::from(err.error))?;
                log::info!("store dumped to '{}' ({} bytes)", path.display(), data.len());
                Ok(())
            }
        }
    }

    /// Reads a file written by [`Store::dump_to_file`] and reconstructs the
    /// store.
    ///
    /// An empty path is an error; a missing file surfaces the underlying IO
    /// error.
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Store> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            log::error!("load failed: source path is empty");
            return Err(StoreError::new(
                "source path is empty",
                ErrorKind::NilOrInvalidInput,
            ));
        }

        let data = fs::read(path)?;
        log::debug!("read {} bytes from '{}'", data.len(), path.display());
        Store::from_dump(&data)
    }
}
