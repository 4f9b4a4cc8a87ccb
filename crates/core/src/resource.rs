//! The shared construction path of all resource wrappers.

use crate::{Error, Result, SchemaValidator, Version};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::fmt::Display;

/// The kinds of STAC documents this crate wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// A catalog, the root or an intermediate node of the link graph.
    Catalog,

    /// A collection of items that share metadata.
    Collection,

    /// A single GeoJSON feature.
    #[serde(rename = "Feature")]
    Item,

    /// A GeoJSON feature collection of items.
    #[serde(rename = "FeatureCollection")]
    ItemCollection,
}

/// A typed, read-only view over a parsed STAC document.
///
/// Wrappers are built once from the raw JSON. If a validator is supplied the
/// raw document is checked against the schema for its declared STAC version
/// before anything is parsed.
pub trait Resource: DeserializeOwned {
    /// The kind of document this wrapper reads.
    const TYPE: Type;

    /// Returns the STAC version the raw document declares.
    ///
    /// The default reads the `stac_version` field and fails if it is absent.
    fn declared_version(value: &Value) -> Result<Version> {
        value
            .get("stac_version")
            .and_then(|v| v.as_str())
            .map(Version::from)
            .ok_or(Error::MissingField("stac_version"))
    }

    /// Validates a raw document.
    fn validate_value(value: &Value, validator: &dyn SchemaValidator) -> Result<()> {
        let version = Self::declared_version(value)?;
        validator.validate(Self::TYPE, &version, value)
    }

    /// Builds this wrapper from raw JSON, validating first if a validator is provided.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stac_client::{Catalog, Resource};
    ///
    /// let catalog = Catalog::from_value(
    ///     json!({"stac_version": "0.8.0", "id": "root", "description": "d", "links": []}),
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(catalog.id().unwrap(), "root");
    /// ```
    fn from_value(value: Value, validator: Option<&dyn SchemaValidator>) -> Result<Self> {
        if let Some(validator) = validator {
            Self::validate_value(&value, validator)?;
        }
        serde_json::from_value(value).map_err(Error::from)
    }
}

impl Type {
    /// Returns the file stem of this type's json-schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::Type;
    ///
    /// assert_eq!(Type::Collection.schema_name(), "collection");
    /// ```
    pub fn schema_name(&self) -> &'static str {
        match self {
            Type::Catalog => "catalog",
            Type::Collection => "collection",
            Type::Item => "item",
            Type::ItemCollection => "item-collection",
        }
    }

    /// Returns the path of this type's json-schema for a version, e.g. `jsonschemas/0.8.0/item.json`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::{Type, Version};
    ///
    /// assert_eq!(
    ///     Type::Item.schema_path(&Version::v0_8_0).unwrap(),
    ///     "jsonschemas/0.8.0/item.json"
    /// );
    /// ```
    pub fn schema_path(&self, version: &Version) -> Option<String> {
        version
            .schema_dir()
            .map(|dir| format!("{dir}/{}.json", self.schema_name()))
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Catalog => f.write_str("Catalog"),
            Type::Collection => f.write_str("Collection"),
            Type::Item => f.write_str("Feature"),
            Type::ItemCollection => f.write_str("FeatureCollection"),
        }
    }
}
