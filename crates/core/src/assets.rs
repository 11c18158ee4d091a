//! Content-addressed image store.
//!
//! Every uploaded image is named `<sha256-hex>.jpg` after its own bytes,
//! so identical uploads collapse onto one file and a second write of the
//! same content is a no-op. Files are written to a temporary name in the
//! same directory and renamed into place; readers see either no file or
//! the complete file.
//!
//! Reads fall back to [`DEFAULT_ASSET`] when the requested name is absent,
//! so a catalog UI always has something to render.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::hashing::sha256_hex;

/// Suffix shared by every stored asset.
pub const ASSET_SUFFIX: &str = ".jpg";

/// Served in place of any asset that does not exist.
pub const DEFAULT_ASSET: &str = "default.jpg";

/// Derive the stored filename for a byte buffer.
pub fn asset_filename(bytes: &[u8]) -> String {
    format!("{}{ASSET_SUFFIX}", sha256_hex(bytes))
}

/// Outcome of [`AssetStore::put`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub name: String,
    /// `false` when the content was already present.
    pub created: bool,
}

/// Bytes resolved by [`AssetStore::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// The file actually served; [`DEFAULT_ASSET`] on fallback.
    pub name: String,
    pub bytes: Vec<u8>,
    pub is_fallback: bool,
}

/// A directory of content-addressed image files.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `bytes`, returning the digest-derived filename.
    ///
    /// Idempotent: storing the same content twice yields the same name and
    /// leaves exactly one file.
    pub async fn put(&self, bytes: &[u8]) -> Result<StoredAsset, CoreError> {
        let name = asset_filename(bytes);
        let path = self.root.join(&name);

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|source| asset_write_error(&name, source))?;
        if exists {
            tracing::debug!(asset = %name, "Asset already stored");
            return Ok(StoredAsset {
                name,
                created: false,
            });
        }

        let tmp = self.root.join(scratch_name(&name));
        if let Err(source) = tokio::fs::write(&tmp, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(asset_write_error(&name, source));
        }
        // A concurrent writer of the same content may win the rename; the
        // bytes are identical, so whichever lands last is correct.
        if let Err(source) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(asset_write_error(&name, source));
        }

        tracing::info!(asset = %name, size = bytes.len(), "Stored new asset");
        Ok(StoredAsset {
            name,
            created: true,
        })
    }

    /// Whether an asset with this filename is on disk.
    pub async fn exists(&self, name: &str) -> Result<bool, CoreError> {
        check_name(name)?;
        tokio::fs::try_exists(self.root.join(name))
            .await
            .map_err(|source| asset_read_error(name, source))
    }

    /// Write and remove a scratch file to confirm uploads can land.
    pub async fn check_writable(&self) -> Result<(), CoreError> {
        let scratch = self.root.join(scratch_name("health"));
        tokio::fs::write(&scratch, b"")
            .await
            .map_err(|source| asset_write_error("health check", source))?;
        tokio::fs::remove_file(&scratch)
            .await
            .map_err(|source| asset_write_error("health check", source))
    }

    /// Resolve `name` to bytes, falling back to [`DEFAULT_ASSET`].
    ///
    /// Names without the `.jpg` suffix, or containing path separators or
    /// control characters, are rejected with [`CoreError::InvalidRequest`].
    /// If neither the asset nor the default is present the result is
    /// [`CoreError::NotFound`].
    pub async fn get(&self, name: &str) -> Result<Asset, CoreError> {
        check_name(name)?;

        match self.read_if_present(name).await? {
            Some(bytes) => Ok(Asset {
                name: name.to_string(),
                bytes,
                is_fallback: false,
            }),
            None => {
                tracing::debug!(asset = %name, "Asset not found, serving default");
                let bytes = self
                    .read_if_present(DEFAULT_ASSET)
                    .await?
                    .ok_or_else(|| CoreError::NotFound {
                        entity: "Asset",
                        id: DEFAULT_ASSET.to_string(),
                    })?;
                Ok(Asset {
                    name: DEFAULT_ASSET.to_string(),
                    bytes,
                    is_fallback: true,
                })
            }
        }
    }

    /// Read a stored file, treating anything that is not a readable regular
    /// file as absent.
    async fn read_if_present(&self, name: &str) -> Result<Option<Vec<u8>>, CoreError> {
        match tokio::fs::read(self.root.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::NotFound | ErrorKind::IsADirectory | ErrorKind::InvalidInput
                ) =>
            {
                Ok(None)
            }
            Err(source) => Err(asset_read_error(name, source)),
        }
    }
}

/// Hidden, unique name for a file that is about to be renamed or removed.
fn scratch_name(label: &str) -> String {
    format!(".{label}.{}.tmp", uuid::Uuid::new_v4().simple())
}

fn asset_read_error(name: &str, source: std::io::Error) -> CoreError {
    CoreError::AssetRead {
        name: name.to_string(),
        source,
    }
}

fn asset_write_error(name: &str, source: std::io::Error) -> CoreError {
    CoreError::AssetWrite {
        name: name.to_string(),
        source,
    }
}

/// Accept only bare `*.jpg` file names.
fn check_name(name: &str) -> Result<(), CoreError> {
    if !name.ends_with(ASSET_SUFFIX) {
        return Err(CoreError::InvalidRequest(format!(
            "Image path does not end with {ASSET_SUFFIX}"
        )));
    }
    if name.contains(['/', '\\']) || name.chars().any(char::is_control) {
        return Err(CoreError::InvalidRequest(format!(
            "Invalid image name {name:?}"
        )));
    }
    Ok(())
}
