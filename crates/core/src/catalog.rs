use crate::{CHILD_REL, Error, Link, Resource, Result, Type, Version, href};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The root, or an intermediate node, of a STAC service's link graph.
///
/// Every field is read through an accessor. Fields STAC requires fail with
/// [Error::MissingField] when the document lacks them; `title` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(skip_serializing_if = "Option::is_none")]
    stac_version: Option<Version>,

    #[serde(skip_serializing_if = "Option::is_none")]
    stac_extensions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<Vec<Link>>,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

impl Catalog {
    /// Creates a new catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::{Catalog, Version};
    ///
    /// let catalog = Catalog::new("an-id", "a description", Version::v0_8_0);
    /// assert_eq!(catalog.description().unwrap(), "a description");
    /// ```
    pub fn new(id: impl ToString, description: impl ToString, version: Version) -> Catalog {
        Catalog {
            stac_version: Some(version),
            stac_extensions: None,
            id: Some(id.to_string()),
            title: None,
            description: Some(description.to_string()),
            links: Some(Vec::new()),
            additional_fields: Map::new(),
        }
    }

    /// Adds a link to this catalog.
    pub fn with_link(mut self, link: Link) -> Catalog {
        self.links.get_or_insert_with(Vec::new).push(link);
        self
    }

    /// Returns the STAC version this catalog declares.
    pub fn stac_version(&self) -> Result<&Version> {
        self.stac_version
            .as_ref()
            .ok_or(Error::MissingField("stac_version"))
    }

    /// Returns the extensions this catalog declares, if any.
    pub fn stac_extensions(&self) -> Option<&[String]> {
        self.stac_extensions.as_deref()
    }

    /// Returns this catalog's id.
    pub fn id(&self) -> Result<&str> {
        self.id.as_deref().ok_or(Error::MissingField("id"))
    }

    /// Returns this catalog's title, if it has one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns this catalog's description.
    pub fn description(&self) -> Result<&str> {
        self.description
            .as_deref()
            .ok_or(Error::MissingField("description"))
    }

    /// Returns this catalog's links, in document order.
    pub fn links(&self) -> Result<&[Link]> {
        self.links.as_deref().ok_or(Error::MissingField("links"))
    }

    /// Returns the first link with the given relation.
    pub fn link(&self, rel: &str) -> Result<Option<&Link>> {
        for link in self.links()? {
            if link.is(rel)? {
                return Ok(Some(link));
            }
        }
        Ok(None)
    }

    /// Returns the ids of the collections this catalog links to as children.
    ///
    /// The id of a child is the last path segment of its link's href, without
    /// any query string.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::{Catalog, Link, Version};
    ///
    /// let catalog = Catalog::new("root", "d", Version::v0_8_0)
    ///     .with_link(Link::new("http://stac.test/collections/my_collection1?x=y", "child"))
    ///     .with_link(Link::new("http://stac.test/", "self"));
    /// let ids = catalog.child_ids().unwrap();
    /// assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["my_collection1"]);
    /// ```
    pub fn child_ids(&self) -> Result<IndexSet<String>> {
        let mut ids = IndexSet::new();
        for link in self.links()? {
            if link.is(CHILD_REL)? {
                let _ = ids.insert(href::last_segment(link.href()?).to_string());
            }
        }
        Ok(ids)
    }

    /// Returns fields that aren't part of the catalog definition.
    pub fn additional_fields(&self) -> &Map<String, Value> {
        &self.additional_fields
    }
}

impl Resource for Catalog {
    const TYPE: Type = Type::Catalog;
}
