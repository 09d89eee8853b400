//! # campus-storage
//!
//! Upload helper for Campus Hub. Every upload lands under a [`Bucket`] prefix in
//! a single [`ObjectStore`] and is addressed publicly as
//! `{public_base_url}/{bucket}/{path}`.
//!
//! The backing store is chosen by [`StorageConfig::backend`]:
//! - `local`: [`LocalFileSystem`] rooted at `storage.root`
//! - `memory`: [`InMemory`], mostly for tests
//! - `s3`: any S3-compatible endpoint via [`AmazonS3Builder`]

mod bucket;
mod error;

pub use bucket::Bucket;
pub use error::StorageError;

use std::sync::Arc;

use campus_config::{StorageBackend, StorageConfig};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};

/// Extension used when the original file name has none.
pub const DEFAULT_EXTENSION: &str = "bin";

const MAX_EXTENSION_LEN: usize = 10;

/// Uploads, reads, and deletes objects in the configured store.
#[derive(Debug, Clone)]
pub struct ObjectStorage {
    store: Arc<dyn ObjectStore>,
    base_url: String,
    max_upload_bytes: usize,
}

impl ObjectStorage {
    /// Build the store selected by `config.backend`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotConfigured`] for an S3 backend without
    /// credentials, or the underlying error if the store cannot be created.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let store: Arc<dyn ObjectStore> = match config.backend {
            StorageBackend::Memory => Arc::new(InMemory::new()),
            StorageBackend::Local => {
                std::fs::create_dir_all(&config.root)?;
                Arc::new(LocalFileSystem::new_with_prefix(&config.root)?)
            }
            StorageBackend::S3 => {
                if !config.is_s3_configured() {
                    return Err(StorageError::NotConfigured(
                        "s3 backend needs a bucket and credentials".into(),
                    ));
                }
                let mut builder = AmazonS3Builder::new()
                    .with_bucket_name(&config.s3_bucket)
                    .with_region(&config.s3_region)
                    .with_access_key_id(&config.access_key_id)
                    .with_secret_access_key(&config.secret_access_key);
                if !config.s3_endpoint.is_empty() {
                    builder = builder
                        .with_endpoint(&config.s3_endpoint)
                        .with_allow_http(config.s3_endpoint.starts_with("http://"));
                }
                Arc::new(builder.build()?)
            }
        };
        tracing::debug!(backend = ?config.backend, "object storage ready");
        Ok(Self::new(store, config.base_url(), config.max_upload_bytes))
    }

    pub fn new(store: Arc<dyn ObjectStore>, base_url: &str, max_upload_bytes: usize) -> Self {
        Self {
            store,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_upload_bytes,
        }
    }

    /// In-memory store with the default size limit.
    #[must_use]
    pub fn in_memory(base_url: &str) -> Self {
        Self::new(
            Arc::new(InMemory::new()),
            base_url,
            StorageConfig::default().max_upload_bytes,
        )
    }

    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Store `bytes` under `{bucket}/{folder}/{generated name}` and return the
    /// public URL.
    ///
    /// The generated name is `{random}-{unix_millis}.{ext}`, keeping only the
    /// extension of `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::TooLarge`] above the configured limit,
    /// [`StorageError::InvalidPath`] for a bad folder, or the store error.
    pub async fn upload(
        &self,
        bucket: Bucket,
        folder: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        if bytes.len() > self.max_upload_bytes {
            return Err(StorageError::TooLarge {
                size: bytes.len(),
                limit: self.max_upload_bytes,
            });
        }

        let folder = clean_relative(folder, true)?;
        let name = object_name(file_name)?;
        let relative = if folder.is_empty() {
            name
        } else {
            format!("{folder}/{name}")
        };

        let size = bytes.len();
        self.store
            .put(&object_path(bucket, &relative), PutPayload::from(bytes))
            .await?;
        tracing::debug!(%bucket, path = %relative, size, "uploaded object");

        Ok(self.public_url(bucket, &relative))
    }

    /// Upload every file, returning URLs in input order.
    ///
    /// Stops at the first failure. Objects stored before the failure are kept.
    pub async fn upload_many(
        &self,
        bucket: Bucket,
        folder: &str,
        files: Vec<(String, Vec<u8>)>,
    ) -> Result<Vec<String>, StorageError> {
        let mut urls = Vec::with_capacity(files.len());
        for (file_name, bytes) in files {
            urls.push(self.upload(bucket, folder, &file_name, bytes).await?);
        }
        Ok(urls)
    }

    /// Read an object back.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no object exists at `path`.
    pub async fn get(&self, bucket: Bucket, path: &str) -> Result<Vec<u8>, StorageError> {
        let relative = clean_relative(path, false)?;
        let location = object_path(bucket, &relative);
        match self.store.get(&location).await {
            Ok(result) => Ok(result.bytes().await?.to_vec()),
            Err(object_store::Error::NotFound { .. }) => {
                Err(StorageError::NotFound(format!("{bucket}/{relative}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an object. Deleting a missing object succeeds.
    pub async fn delete(&self, bucket: Bucket, path: &str) -> Result<(), StorageError> {
        let relative = clean_relative(path, false)?;
        match self.store.delete(&object_path(bucket, &relative)).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => {
                tracing::debug!(%bucket, path = %relative, "deleted object");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete_many(&self, bucket: Bucket, paths: &[String]) -> Result<(), StorageError> {
        for path in paths {
            self.delete(bucket, path).await?;
        }
        Ok(())
    }

    #[must_use]
    pub fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!("{}/{bucket}/{path}", self.base_url)
    }

    /// Split one of our public URLs back into bucket and object path.
    #[must_use]
    pub fn locate(&self, url: &str) -> Option<(Bucket, String)> {
        let rest = url.strip_prefix(&self.base_url)?.strip_prefix('/')?;
        let (bucket, path) = rest.split_once('/')?;
        let bucket = bucket.parse().ok()?;
        if path.is_empty() {
            return None;
        }
        Some((bucket, path.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

fn object_path(bucket: Bucket, relative: &str) -> Path {
    Path::from(format!("{bucket}/{relative}"))
}

/// Normalize a caller-supplied relative path. Rejects traversal segments.
fn clean_relative(raw: &str, allow_empty: bool) -> Result<String, StorageError> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return if allow_empty {
            Ok(String::new())
        } else {
            Err(StorageError::InvalidPath(raw.to_string()))
        };
    }
    let valid = trimmed.split('/').all(|segment| {
        !segment.is_empty()
            && segment != "."
            && segment != ".."
            && !segment.contains('\\')
            && !segment.chars().any(char::is_control)
    });
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(StorageError::InvalidPath(raw.to_string()))
    }
}

/// Lower-cased extension of `file_name`, or [`DEFAULT_EXTENSION`].
#[must_use]
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// `{random}-{unix_millis}.{ext}`
fn object_name(file_name: &str) -> Result<String, StorageError> {
    let mut random = [0u8; 8];
    getrandom::fill(&mut random).map_err(|e| StorageError::Random(e.to_string()))?;
    let random: String = random.iter().map(|b| format!("{b:02x}")).collect();
    let millis = chrono::Utc::now().timestamp_millis();
    Ok(format!("{random}-{millis}.{}", extension_of(file_name)))
}

/// Content type served for an object, guessed from its extension.
#[must_use]
pub fn content_type_for(path: &str) -> &'static str {
    match extension_of(path).as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain; charset=utf-8",
        "mp4" => "video/mp4",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
