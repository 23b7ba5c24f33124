//! Storage service implementation using Apache OpenDAL.

use chrono::Utc;
use opendal::{Operator, services};
use tracing::debug;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Reference to a stored binary artifact.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Storage key the bytes were written under.
    pub key: String,
    /// Public URL the artifact is retrievable from.
    pub url: String,
}

/// Storage service for uploaded document binaries.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if file size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Generate the storage key for an upload.
    ///
    /// Format: `{unix_millis}-{sanitized_filename}`; the timestamp prefix
    /// keeps keys unique across re-uploads of the same filename.
    #[must_use]
    pub fn object_key(timestamp_millis: i64, filename: &str) -> String {
        format!("{timestamp_millis}-{}", sanitize_filename(filename))
    }

    /// Public retrieval URL for a storage key.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.config.public_base_url.trim_end_matches('/'))
    }

    /// Write uploaded bytes and return the storage reference.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the write is rejected by the
    /// provider.
    pub async fn store(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredObject, StorageError> {
        self.validate_upload(content_type, u64::try_from(bytes.len()).unwrap_or(u64::MAX))?;

        let key = Self::object_key(Utc::now().timestamp_millis(), filename);
        self.operator.write(&key, bytes).await?;

        debug!(key = %key, provider = self.config.provider.name(), "stored upload");

        Ok(StoredObject {
            url: self.public_url(&key),
            key,
        })
    }

    /// Check if a file exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        self.operator.stat(key).await.is_ok()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

/// Sanitize filename for use inside a storage key.
///
/// Only ASCII alphanumeric characters, dots, hyphens, and underscores pass
/// through; everything else becomes an underscore.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
