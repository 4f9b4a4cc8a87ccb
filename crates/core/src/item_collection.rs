use crate::{Error, Item, Link, NEXT_REL, Resource, Result, SchemaValidator, Type, Version};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

const TOKEN_PARAMS: [&str; 2] = ["next", "token"];

/// A page of items returned by a search or an items request.
///
/// Item collections are produced fresh for every query and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCollection {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    r#type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<Vec<Item>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<Vec<Link>>,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

impl ItemCollection {
    /// Creates an item collection with no features and no links.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::ItemCollection;
    ///
    /// let item_collection = ItemCollection::empty();
    /// assert!(item_collection.features().unwrap().is_empty());
    /// ```
    pub fn empty() -> ItemCollection {
        ItemCollection {
            r#type: Some("FeatureCollection".to_string()),
            features: Some(Vec::new()),
            links: Some(Vec::new()),
            additional_fields: Map::new(),
        }
    }

    /// Returns the GeoJSON type, which should always be `FeatureCollection`.
    pub fn r#type(&self) -> Result<&str> {
        self.r#type.as_deref().ok_or(Error::MissingField("type"))
    }

    /// Returns the items on this page.
    pub fn features(&self) -> Result<&[Item]> {
        self.features
            .as_deref()
            .ok_or(Error::MissingField("features"))
    }

    /// Returns this page's links.
    pub fn links(&self) -> Result<&[Link]> {
        self.links.as_deref().ok_or(Error::MissingField("links"))
    }

    /// Returns the opaque token of the next page, if there is one.
    ///
    /// The token is the `next` (or `token`) query parameter of the first
    /// `next` link. Pass it back as [Filter::next](crate::Filter::next) to
    /// fetch the following page.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stac_client::{ItemCollection, Resource};
    ///
    /// let item_collection = ItemCollection::from_value(json!({
    ///     "type": "FeatureCollection",
    ///     "features": [],
    ///     "links": [{"rel": "next", "href": "http://stac.test/search?next=abc"}]
    /// }), None).unwrap();
    /// assert_eq!(item_collection.next_token().unwrap().unwrap(), "abc");
    /// ```
    pub fn next_token(&self) -> Result<Option<String>> {
        let Some(links) = self.links.as_deref() else {
            return Ok(None);
        };
        for link in links {
            if link.is(NEXT_REL)? {
                // Only the query is read, so any base resolves relative hrefs.
                let url = Url::parse("http://localhost/")?.join(link.href()?)?;
                return Ok(url
                    .query_pairs()
                    .find(|(key, _)| TOKEN_PARAMS.contains(&key.as_ref()))
                    .map(|(_, value)| value.into_owned()));
            }
        }
        Ok(None)
    }

    /// Returns fields that aren't part of the item collection definition, e.g. `context`.
    pub fn additional_fields(&self) -> &Map<String, Value> {
        &self.additional_fields
    }
}

impl Resource for ItemCollection {
    const TYPE: Type = Type::ItemCollection;

    fn declared_version(value: &Value) -> Result<Version> {
        Ok(value
            .get("stac_version")
            .and_then(|v| v.as_str())
            .map(Version::from)
            .unwrap_or_default())
    }

    /// Validates every feature as an item of its own declared version.
    fn validate_value(value: &Value, validator: &dyn SchemaValidator) -> Result<()> {
        if let Some(features) = value.get("features").and_then(|f| f.as_array()) {
            for feature in features {
                Item::validate_value(feature, validator)?;
            }
        }
        Ok(())
    }
}

impl IntoIterator for ItemCollection {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.unwrap_or_default().into_iter()
    }
}
