use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Child links.
pub const CHILD_REL: &str = "child";

/// Item-collection links on a collection.
pub const ITEMS_REL: &str = "items";

/// The next page of results.
pub const NEXT_REL: &str = "next";

/// One entry of a document's `links` array.
///
/// `rel` and `href` are always present in a valid document. They aren't
/// defaulted here: reading one that's missing is an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    rel: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    r#type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

impl Link {
    /// Creates a new link.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::Link;
    ///
    /// let link = Link::new("http://stac.test/collections/an-id", "child");
    /// assert_eq!(link.rel().unwrap(), "child");
    /// ```
    pub fn new(href: impl ToString, rel: impl ToString) -> Link {
        Link {
            href: Some(href.to_string()),
            rel: Some(rel.to_string()),
            ..Default::default()
        }
    }

    /// Sets this link's media type.
    pub fn with_type(mut self, r#type: impl ToString) -> Link {
        self.r#type = Some(r#type.to_string());
        self
    }

    /// Sets this link's title.
    pub fn with_title(mut self, title: impl ToString) -> Link {
        self.title = Some(title.to_string());
        self
    }

    /// Returns the relation of this link.
    pub fn rel(&self) -> Result<&str> {
        self.rel.as_deref().ok_or(Error::MissingField("rel"))
    }

    /// Returns the target url of this link.
    pub fn href(&self) -> Result<&str> {
        self.href.as_deref().ok_or(Error::MissingField("href"))
    }

    /// Returns the media type of this link.
    pub fn media_type(&self) -> Result<&str> {
        self.r#type.as_deref().ok_or(Error::MissingField("type"))
    }

    /// Returns the title of this link.
    pub fn title(&self) -> Result<&str> {
        self.title.as_deref().ok_or(Error::MissingField("title"))
    }

    /// Returns true if this link has the given relation.
    ///
    /// Fails if the link has no `rel`.
    pub fn is(&self, rel: &str) -> Result<bool> {
        self.rel().map(|r| r == rel)
    }

    /// Returns any fields on this link beyond the four STAC defines.
    pub fn additional_fields(&self) -> &Map<String, Value> {
        &self.additional_fields
    }
}
