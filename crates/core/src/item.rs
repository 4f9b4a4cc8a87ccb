use crate::{Error, Link, Resource, Result, Type, Version};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The STAC version of items that don't declare one.
///
/// STAC v0.7.0 items omitted `stac_version`.
pub static DEFAULT_ITEM_VERSION: Version = Version::v0_7_0;

/// A GeoJSON feature with STAC metadata, representing one scene or product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    stac_version: Option<Version>,

    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    r#type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    bbox: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    collection: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    geometry: Option<Geometry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Properties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<Vec<Link>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    assets: Option<IndexMap<String, Asset>>,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

/// The GeoJSON geometry of an item, as written in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    r#type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<Value>,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

/// The properties of an item.
///
/// Only `datetime` is required by every STAC version; the rest are common
/// metadata that some versions and extensions add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    datetime: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    providers: Option<Vec<crate::Provider>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<String>,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

/// A named file attached to an item, e.g. one spectral band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    r#type: Option<String>,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

impl Item {
    /// Returns the STAC version of this item.
    ///
    /// Items that don't declare a version are v0.7.0.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stac_client::{Item, Resource, Version};
    ///
    /// let item = Item::from_value(json!({"type": "Feature", "id": "an-id"}), None).unwrap();
    /// assert_eq!(*item.stac_version(), Version::v0_7_0);
    /// ```
    pub fn stac_version(&self) -> &Version {
        self.stac_version.as_ref().unwrap_or(&DEFAULT_ITEM_VERSION)
    }

    /// Returns this item's id.
    pub fn id(&self) -> Result<&str> {
        self.id.as_deref().ok_or(Error::MissingField("id"))
    }

    /// Returns this item's GeoJSON type, which should always be `Feature`.
    pub fn r#type(&self) -> Result<&str> {
        self.r#type.as_deref().ok_or(Error::MissingField("type"))
    }

    /// Returns this item's bounding box.
    pub fn bbox(&self) -> Result<&[f64]> {
        self.bbox.as_deref().ok_or(Error::MissingField("bbox"))
    }

    /// Returns the id of this item's collection.
    pub fn collection(&self) -> Result<&str> {
        self.collection
            .as_deref()
            .ok_or(Error::MissingField("collection"))
    }

    /// Returns this item's geometry.
    pub fn geometry(&self) -> Result<&Geometry> {
        self.geometry
            .as_ref()
            .ok_or(Error::MissingField("geometry"))
    }

    /// Returns this item's properties.
    pub fn properties(&self) -> Result<&Properties> {
        self.properties
            .as_ref()
            .ok_or(Error::MissingField("properties"))
    }

    /// Returns this item's links.
    pub fn links(&self) -> Result<&[Link]> {
        self.links.as_deref().ok_or(Error::MissingField("links"))
    }

    /// Returns this item's assets, keyed by name.
    pub fn assets(&self) -> Result<&IndexMap<String, Asset>> {
        self.assets.as_ref().ok_or(Error::MissingField("assets"))
    }

    /// Returns one asset by key.
    pub fn asset(&self, key: &str) -> Result<Option<&Asset>> {
        self.assets().map(|assets| assets.get(key))
    }

    /// Returns fields that aren't part of the item definition.
    pub fn additional_fields(&self) -> &Map<String, Value> {
        &self.additional_fields
    }
}

impl Geometry {
    /// Returns the GeoJSON type of this geometry, e.g. `Polygon`.
    pub fn r#type(&self) -> Result<&str> {
        self.r#type.as_deref().ok_or(Error::MissingField("type"))
    }

    /// Returns the raw coordinates of this geometry.
    pub fn coordinates(&self) -> Result<&Value> {
        self.coordinates
            .as_ref()
            .ok_or(Error::MissingField("coordinates"))
    }

    /// Converts this geometry to a [geojson::Geometry].
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::Geometry;
    ///
    /// let geometry: Geometry = serde_json::from_str(r#"{"type": "Point", "coordinates": [0, 0]}"#).unwrap();
    /// let geometry = geometry.to_geojson().unwrap();
    /// assert!(matches!(geometry.value, geojson::Value::Point(_)));
    /// ```
    pub fn to_geojson(&self) -> Result<geojson::Geometry> {
        let value = serde_json::to_value(self)?;
        geojson::Geometry::from_json_value(value).map_err(Error::from)
    }
}

impl Properties {
    /// Returns the acquisition datetime.
    pub fn datetime(&self) -> Result<&str> {
        self.datetime
            .as_deref()
            .ok_or(Error::MissingField("datetime"))
    }

    /// Returns the license of the item's data.
    pub fn license(&self) -> Result<&str> {
        self.license.as_deref().ok_or(Error::MissingField("license"))
    }

    /// Returns the providers of the item's data.
    pub fn providers(&self) -> Result<&[crate::Provider]> {
        self.providers
            .as_deref()
            .ok_or(Error::MissingField("providers"))
    }

    /// Returns the item's title.
    pub fn title(&self) -> Result<&str> {
        self.title.as_deref().ok_or(Error::MissingField("title"))
    }

    /// Returns when the item's metadata was created.
    pub fn created(&self) -> Result<&str> {
        self.created.as_deref().ok_or(Error::MissingField("created"))
    }

    /// Returns when the item's metadata was last updated.
    pub fn updated(&self) -> Result<&str> {
        self.updated.as_deref().ok_or(Error::MissingField("updated"))
    }

    /// Returns a property that isn't one of the common fields, e.g. `eo:cloud_cover`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.additional_fields.get(key)
    }
}

impl Asset {
    /// Returns the url of this asset's file.
    pub fn href(&self) -> Result<&str> {
        self.href.as_deref().ok_or(Error::MissingField("href"))
    }

    /// Returns this asset's title.
    pub fn title(&self) -> Result<&str> {
        self.title.as_deref().ok_or(Error::MissingField("title"))
    }

    /// Returns this asset's media type.
    pub fn r#type(&self) -> Result<&str> {
        self.r#type.as_deref().ok_or(Error::MissingField("type"))
    }
}

impl Resource for Item {
    const TYPE: Type = Type::Item;

    fn declared_version(value: &Value) -> Result<Version> {
        Ok(value
            .get("stac_version")
            .and_then(|v| v.as_str())
            .map(Version::from)
            .unwrap_or_else(|| DEFAULT_ITEM_VERSION.clone()))
    }
}
