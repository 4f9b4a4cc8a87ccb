use crate::{Result, Type, Version};
use serde_json::Value;

/// Checks raw STAC documents against the json-schema for their kind and version.
///
/// Implementations own their schemas and load them once; the
/// [stac-client-validate](https://docs.rs/stac-client-validate) crate
/// provides one backed by bundled schemas.
pub trait SchemaValidator: Send + Sync {
    /// Validates `value` as a `r#type` document of STAC `version`.
    ///
    /// Fails with [Error::Schema](crate::Error::Schema) naming the first
    /// violation.
    fn validate(&self, r#type: Type, version: &Version, value: &Value) -> Result<()>;
}
