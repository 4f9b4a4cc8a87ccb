//! Rust client for [SpatioTemporal Asset Catalog (STAC)](https://stacspec.org/) APIs.
//!
//! A [Client] walks a service's link graph: from the root [Catalog], through
//! its `child` links to [Collection]s, and through each collection's `items`
//! link to [ItemCollection]s of [Item]s. Search and items requests are shaped
//! from a version-agnostic [Filter] for the STAC [Version] the service speaks.
//!
//! The client doesn't do http itself. It sends [Request]s through a
//! [Transport]; [stac-client-io](https://docs.rs/stac-client-io) provides one
//! built on **reqwest**.
//!
//! # Examples
//!
//! ```
//! use serde_json::{Value, json};
//! use stac_client::{Client, Request, Result, Transport};
//!
//! struct Static;
//!
//! impl Transport for Static {
//!     fn fetch(&self, _: &Request) -> Result<Value> {
//!         Ok(json!({
//!             "stac_version": "0.8.0",
//!             "id": "root",
//!             "description": "An example service",
//!             "links": [{"rel": "child", "href": "http://stac.test/collections/my_collection1"}]
//!         }))
//!     }
//! }
//!
//! let mut client = Client::new("http://stac.test", Static);
//! let ids = client.collection_ids().unwrap();
//! assert!(ids.contains("my_collection1"));
//! ```
//!
//! # Validation
//!
//! Give the client a [SchemaValidator] to check every fetched document
//! against the json-schema of its declared STAC version:
//!
//! ```ignore
//! let client = Client::new(url, transport).with_validator(stac_client_validate::Validator::new());
//! ```

#![warn(missing_docs, unused_qualifications)]

mod catalog;
mod client;
mod collection;
mod error;
pub mod filter;
pub mod href;
mod item;
mod item_collection;
mod link;
mod request;
mod resource;
mod validate;
mod version;

pub use {
    catalog::Catalog,
    client::{Client, Conformance},
    collection::{Collection, Extent, Provider, SpatialExtent, Summary, TemporalExtent},
    error::Error,
    filter::{Bbox, Filter, GetFilter},
    item::{Asset, DEFAULT_ITEM_VERSION, Geometry, Item, Properties},
    item_collection::ItemCollection,
    link::{CHILD_REL, ITEMS_REL, Link, NEXT_REL},
    request::{ACCESS_TOKEN_PARAM, Method, Request, Transport},
    resource::{Resource, Type},
    validate::SchemaValidator,
    version::{Pagination, Version},
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
