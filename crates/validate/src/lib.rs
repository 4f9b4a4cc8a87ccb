//! Validate STAC API responses with [json-schema](https://json-schema.org/).
//!
//! One schema is bundled per kind and STAC version, at
//! `jsonschemas/{version}/{kind}.json`, for catalogs, collections and items
//! of v0.7.0 through v0.9.0.
//!
//! # Examples
//!
//! Hand a [Validator] to a client to check everything it fetches:
//!
//! ```
//! # struct Offline;
//! # impl stac_client::Transport for Offline {
//! #     fn fetch(&self, _: &stac_client::Request) -> stac_client::Result<serde_json::Value> {
//! #         unimplemented!()
//! #     }
//! # }
//! use stac_client::Client;
//! use stac_client_validate::Validator;
//!
//! let client = Client::new("http://stac.test", Offline).with_validator(Validator::new());
//! ```
//!
//! Or validate a wrapper directly with the [Validate] trait:
//!
//! ```
//! use stac_client::{Catalog, Version};
//! use stac_client_validate::Validate;
//!
//! Catalog::new("an-id", "a description", Version::v0_8_0).validate().unwrap();
//! ```
//!
//! [Validator] compiles each schema once and is cheap to clone, so re-use
//! it when validating many documents.

use serde::Serialize;
use stac_client::Resource;

mod validator;

pub use {stac_client::Error, validator::Validator};

/// Public result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Validate a STAC wrapper with [json-schema](https://json-schema.org/).
pub trait Validate: Resource + Serialize {
    /// Validates this object against the schema of its declared version.
    ///
    /// If you're doing multiple validations, use one [Validator] with
    /// [Resource::from_value], which re-uses compiled schemas.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stac_client::{Item, Resource};
    /// use stac_client_validate::Validate;
    ///
    /// let item = Item::from_value(json!({"type": "Feature", "id": "an-id"}), None).unwrap();
    /// let _ = item.validate().unwrap_err();
    /// ```
    fn validate(&self) -> Result<()> {
        let value = serde_json::to_value(self)?;
        Self::validate_value(&value, &Validator::new())
    }
}

impl<T: Resource + Serialize> Validate for T {}
