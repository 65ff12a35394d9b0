//! Parsing of OSS storage URNs attached to item versions.

use crate::error::CoreError;

/// Prefix shared by every OSS object URN.
pub const OSS_OBJECT_URN_PREFIX: &str = "urn:adsk.objects:os.object:";

/// Bucket and object key of a stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    pub bucket_key: String,
    pub object_key: String,
}

impl StorageObject {
    /// Parse `urn:adsk.objects:os.object:<bucket>/<object>`.
    ///
    /// The object key keeps any further `/` separators.
    pub fn parse(urn: &str) -> Result<Self, CoreError> {
        let urn = urn.trim();
        if urn.is_empty() {
            return Err(CoreError::Validation(
                "make sure the input version id has correct value".into(),
            ));
        }

        let rest = urn.strip_prefix(OSS_OBJECT_URN_PREFIX).ok_or_else(|| {
            CoreError::Validation(format!("Not an OSS object URN: '{urn}'"))
        })?;

        match rest.split_once('/') {
            Some((bucket, object)) if !bucket.is_empty() && !object.is_empty() => Ok(Self {
                bucket_key: bucket.to_string(),
                object_key: object.to_string(),
            }),
            _ => Err(CoreError::Validation(format!(
                "Storage URN must name a bucket and an object: '{urn}'"
            ))),
        }
    }

    /// Render the object back into its URN form.
    pub fn urn(&self) -> String {
        format!("{OSS_OBJECT_URN_PREFIX}{}/{}", self.bucket_key, self.object_key)
    }
}

/// Bucket used for the temporary export output of a given application.
pub fn output_bucket_key(client_id: &str) -> String {
    format!("{}_designautomation", client_id.to_lowercase())
}
