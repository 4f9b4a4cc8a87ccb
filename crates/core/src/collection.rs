use crate::{Catalog, Error, ITEMS_REL, Link, Resource, Result, Type};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Deref;

/// A named, queryable grouping of items that share metadata.
///
/// A collection is a [Catalog] with more fields, and dereferences to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(flatten)]
    catalog: Catalog,

    #[serde(skip_serializing_if = "Option::is_none")]
    keywords: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    providers: Option<Vec<Provider>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    extent: Option<Extent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    summaries: Option<IndexMap<String, Summary>>,
}

/// An organization that captures or processes the data of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

/// The spatial and temporal extents of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    #[serde(skip_serializing_if = "Option::is_none")]
    spatial: Option<SpatialExtent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    temporal: Option<TemporalExtent>,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

/// The spatial extent of a collection.
///
/// STAC v0.7.0 writes the extent as a bare `[w, s, e, n]` array; later
/// versions wrap it in an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpatialExtent {
    /// `{"bbox": [[w, s, e, n], ...]}`
    Boxes {
        /// One or more bounding boxes, the first covering all the others.
        bbox: Vec<Vec<f64>>,
    },

    /// `{"bbox": [w, s, e, n]}`
    Box {
        /// The bounding box.
        bbox: Vec<f64>,
    },

    /// `[w, s, e, n]`
    Raw(Vec<f64>),
}

/// The temporal extent of a collection.
///
/// Like [SpatialExtent], STAC v0.7.0 writes a bare `[start, end]` array. An
/// open end is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemporalExtent {
    /// `{"interval": [[start, end], ...]}`
    Intervals {
        /// One or more intervals, the first covering all the others.
        interval: Vec<Vec<Option<String>>>,
    },

    /// `{"interval": [start, end]}`
    Interval {
        /// The interval.
        interval: Vec<Option<String>>,
    },

    /// `[start, end]`
    Raw(Vec<Option<String>>),
}

/// A summary of one field across a collection's items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Summary {
    /// Every distinct value of the field.
    Values(Vec<Value>),

    /// The range of a numeric or datetime field.
    Stats {
        /// The minimum value.
        min: Value,

        /// The maximum value.
        max: Value,
    },

    /// Anything else, e.g. a json-schema.
    Other(Value),
}

impl Collection {
    /// Creates a new collection from a catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::{Catalog, Collection, Version};
    ///
    /// let collection = Collection::new(Catalog::new("an-id", "a description", Version::v0_8_0));
    /// assert_eq!(collection.id().unwrap(), "an-id");
    /// ```
    pub fn new(catalog: Catalog) -> Collection {
        Collection {
            catalog,
            keywords: None,
            version: None,
            license: None,
            providers: None,
            extent: None,
            properties: None,
            summaries: None,
        }
    }

    /// Returns the catalog part of this collection.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns this collection's keywords.
    pub fn keywords(&self) -> Result<&[String]> {
        self.keywords
            .as_deref()
            .ok_or(Error::MissingField("keywords"))
    }

    /// Returns this collection's version, which is not its STAC version.
    pub fn version(&self) -> Result<&str> {
        self.version.as_deref().ok_or(Error::MissingField("version"))
    }

    /// Returns this collection's license.
    pub fn license(&self) -> Result<&str> {
        self.license.as_deref().ok_or(Error::MissingField("license"))
    }

    /// Returns this collection's providers.
    pub fn providers(&self) -> Result<&[Provider]> {
        self.providers
            .as_deref()
            .ok_or(Error::MissingField("providers"))
    }

    /// Returns this collection's extent.
    pub fn extent(&self) -> Result<&Extent> {
        self.extent.as_ref().ok_or(Error::MissingField("extent"))
    }

    /// Returns the properties shared by all of this collection's items.
    pub fn properties(&self) -> Result<&Map<String, Value>> {
        self.properties
            .as_ref()
            .ok_or(Error::MissingField("properties"))
    }

    /// Returns this collection's summaries.
    ///
    /// Summaries were added in STAC v0.8.0.
    pub fn summaries(&self) -> Result<&IndexMap<String, Summary>> {
        self.summaries
            .as_ref()
            .ok_or(Error::MissingField("summaries"))
    }

    /// Returns the first `items` link of this collection, if there is one.
    pub fn items_link(&self) -> Result<Option<&Link>> {
        self.catalog.link(ITEMS_REL)
    }
}

impl Provider {
    /// Returns this provider's name.
    pub fn name(&self) -> Result<&str> {
        self.name.as_deref().ok_or(Error::MissingField("name"))
    }

    /// Returns this provider's description.
    pub fn description(&self) -> Result<&str> {
        self.description
            .as_deref()
            .ok_or(Error::MissingField("description"))
    }

    /// Returns this provider's roles, e.g. `producer` or `host`.
    pub fn roles(&self) -> Result<&[String]> {
        self.roles.as_deref().ok_or(Error::MissingField("roles"))
    }

    /// Returns this provider's homepage.
    pub fn url(&self) -> Result<&str> {
        self.url.as_deref().ok_or(Error::MissingField("url"))
    }
}

impl Extent {
    /// Returns the spatial extent.
    pub fn spatial(&self) -> Result<&SpatialExtent> {
        self.spatial.as_ref().ok_or(Error::MissingField("spatial"))
    }

    /// Returns the temporal extent.
    pub fn temporal(&self) -> Result<&TemporalExtent> {
        self.temporal
            .as_ref()
            .ok_or(Error::MissingField("temporal"))
    }
}

impl SpatialExtent {
    /// Returns the overall bounding box, whatever the shape of the extent.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::SpatialExtent;
    ///
    /// let extent: SpatialExtent = serde_json::from_str("[-180.0, -90.0, 180.0, 90.0]").unwrap();
    /// assert_eq!(extent.bbox().unwrap(), &[-180.0, -90.0, 180.0, 90.0]);
    /// ```
    pub fn bbox(&self) -> Option<&[f64]> {
        match self {
            SpatialExtent::Boxes { bbox } => bbox.first().map(Vec::as_slice),
            SpatialExtent::Box { bbox } | SpatialExtent::Raw(bbox) => Some(bbox),
        }
    }
}

impl TemporalExtent {
    /// Returns the overall `[start, end]` interval, whatever the shape of the extent.
    pub fn interval(&self) -> Option<&[Option<String>]> {
        match self {
            TemporalExtent::Intervals { interval } => interval.first().map(Vec::as_slice),
            TemporalExtent::Interval { interval } | TemporalExtent::Raw(interval) => {
                Some(interval)
            }
        }
    }
}

impl Deref for Collection {
    type Target = Catalog;

    fn deref(&self) -> &Catalog {
        &self.catalog
    }
}

impl Resource for Collection {
    const TYPE: Type = Type::Collection;
}
