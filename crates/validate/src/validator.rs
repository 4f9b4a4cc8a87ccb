use crate::Result;
use jsonschema::Validator as JsonschemaValidator;
use serde_json::Value;
use stac_client::{Error, SchemaValidator, Type, Version};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

/// A registry of the bundled STAC json-schemas.
///
/// Each schema is compiled the first time a document of its kind and version
/// is validated, then reused. The registry is cheap to clone; clones share
/// compiled schemas.
#[derive(Clone, Default)]
pub struct Validator {
    validators: Arc<Mutex<HashMap<(Type, Version), Arc<JsonschemaValidator>>>>,
}

impl Validator {
    /// Creates a new validator.
    ///
    /// No schema is compiled until it is first needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client_validate::Validator;
    ///
    /// let validator = Validator::new();
    /// ```
    pub fn new() -> Validator {
        Validator::default()
    }

    /// Validates a raw document as a `r#type` of STAC `version`.
    ///
    /// Fails with [Error::Schema] naming the first violation, or with
    /// [Error::UnsupportedVersion] if no schema is bundled for the version.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stac_client::{Type, Version};
    /// use stac_client_validate::Validator;
    ///
    /// let validator = Validator::new();
    /// let catalog = json!({"stac_version": "0.8.0", "id": "root", "description": "d", "links": []});
    /// validator.validate_value(Type::Catalog, &Version::v0_8_0, &catalog).unwrap();
    /// ```
    pub fn validate_value(&self, r#type: Type, version: &Version, value: &Value) -> Result<()> {
        let validator = self.validator(r#type, version)?;
        if let Some(error) = validator.iter_errors(value).next() {
            tracing::debug!("{} v{version} is invalid: {error}", r#type);
            Err(Error::Schema {
                kind: r#type,
                version: version.clone(),
                path: error.instance_path.to_string(),
                message: error.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn validator(&self, r#type: Type, version: &Version) -> Result<Arc<JsonschemaValidator>> {
        let mut validators = self
            .validators
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(validator) = validators.get(&(r#type, version.clone())) {
            return Ok(validator.clone());
        }
        let schema = schema(r#type, version)
            .ok_or_else(|| Error::UnsupportedVersion(version.to_string()))?;
        let invalid = |message: String| Error::InvalidSchema {
            kind: r#type,
            version: version.clone(),
            message,
        };
        let schema: Value =
            serde_json::from_str(schema).map_err(|error| invalid(error.to_string()))?;
        let validator = jsonschema::options()
            .build(&schema)
            .map_err(|error| invalid(error.to_string()))?;
        tracing::debug!("compiled {} schema for v{version}", r#type);
        let validator = Arc::new(validator);
        let _ = validators.insert((r#type, version.clone()), validator.clone());
        Ok(validator)
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let validators = self
            .validators
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Validator")
            .field("compiled", &validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaValidator for Validator {
    fn validate(&self, r#type: Type, version: &Version, value: &Value) -> Result<()> {
        self.validate_value(r#type, version, value)
    }
}

/// Returns the bundled schema at `jsonschemas/{version}/{kind}.json`.
fn schema(r#type: Type, version: &Version) -> Option<&'static str> {
    macro_rules! schemas {
        ($($t:ident, $v:ident, $path:expr);* $(;)?) => {
            match (r#type, version) {
                $((Type::$t, Version::$v) => Some(include_str!($path)),)*
                _ => None,
            }
        };
    }

    schemas!(
        Catalog, v0_7_0, "../jsonschemas/0.7.0/catalog.json";
        Collection, v0_7_0, "../jsonschemas/0.7.0/collection.json";
        Item, v0_7_0, "../jsonschemas/0.7.0/item.json";
        Catalog, v0_8_0, "../jsonschemas/0.8.0/catalog.json";
        Collection, v0_8_0, "../jsonschemas/0.8.0/collection.json";
        Item, v0_8_0, "../jsonschemas/0.8.0/item.json";
        Catalog, v0_8_1, "../jsonschemas/0.8.1/catalog.json";
        Collection, v0_8_1, "../jsonschemas/0.8.1/collection.json";
        Item, v0_8_1, "../jsonschemas/0.8.1/item.json";
        Catalog, v0_9_0, "../jsonschemas/0.9.0/catalog.json";
        Collection, v0_9_0, "../jsonschemas/0.9.0/collection.json";
        Item, v0_9_0, "../jsonschemas/0.9.0/item.json";
    )
}

#[cfg(test)]
mod tests {
    use super::Validator;
    use rstest::rstest;
    use serde_json::{Value, json};
    use stac_client::{Error, Type, Version};

    fn collection(version: &str) -> Value {
        let (spatial, temporal) = if version == "0.7.0" {
            (
                json!([-180.0, -90.0, 180.0, 90.0]),
                json!(["2016-01-01T00:00:00Z", null]),
            )
        } else {
            (
                json!({"bbox": [[-180.0, -90.0, 180.0, 90.0]]}),
                json!({"interval": [["2016-01-01T00:00:00Z", null]]}),
            )
        };
        json!({
            "stac_version": version,
            "id": "C4_64_16D",
            "description": "CBERS-4 AWFI cube",
            "license": "MIT",
            "extent": {"spatial": spatial, "temporal": temporal},
            "links": [{"rel": "self", "href": "http://stac.test/collections/C4_64_16D"}]
        })
    }

    fn item(version: Option<&str>) -> Value {
        let mut item = json!({
            "type": "Feature",
            "id": "feature1",
            "bbox": [-122.6, 37.5, -122.3, 37.6],
            "geometry": {"type": "Point", "coordinates": [-122.4, 37.55]},
            "properties": {"datetime": "2016-05-03T13:21:30.040Z"},
            "links": [],
            "assets": {"thumbnail": {"href": "http://stac.test/thumbnail.png"}}
        });
        if let Some(version) = version {
            item["stac_version"] = json!(version);
        }
        item
    }

    #[rstest]
    #[case(Version::v0_7_0)]
    #[case(Version::v0_8_0)]
    #[case(Version::v0_8_1)]
    #[case(Version::v0_9_0)]
    fn valid_collection(#[case] version: Version) {
        Validator::new()
            .validate_value(Type::Collection, &version, &collection(&version.to_string()))
            .unwrap();
    }

    #[test]
    fn nested_extent_is_invalid_for_v0_7_0() {
        let error = Validator::new()
            .validate_value(Type::Collection, &Version::v0_7_0, &collection("0.8.0"))
            .unwrap_err();
        assert!(matches!(error, Error::Schema { kind: Type::Collection, .. }));
    }

    #[test]
    fn missing_license() {
        let mut value = collection("0.8.0");
        let _ = value.as_object_mut().unwrap().remove("license");
        let error = Validator::new()
            .validate_value(Type::Collection, &Version::v0_8_0, &value)
            .unwrap_err();
        assert!(error.to_string().contains("license"), "{error}");
    }

    #[test]
    fn first_violation_path() {
        let mut value = collection("0.9.0");
        value["links"][0] = json!({"rel": "self"});
        let error = Validator::new()
            .validate_value(Type::Collection, &Version::v0_9_0, &value)
            .unwrap_err();
        match error {
            Error::Schema { path, .. } => assert_eq!(path, "/links/0"),
            _ => panic!("unexpected error: {error}"),
        }
    }

    #[test]
    fn items_without_version_are_v0_7_0() {
        let validator = Validator::new();
        validator
            .validate_value(Type::Item, &Version::v0_7_0, &item(None))
            .unwrap();
        let _ = validator
            .validate_value(Type::Item, &Version::v0_8_0, &item(None))
            .unwrap_err();
        validator
            .validate_value(Type::Item, &Version::v0_8_0, &item(Some("0.8.0")))
            .unwrap();
    }

    #[test]
    fn unsupported_version() {
        let error = Validator::new()
            .validate_value(Type::Catalog, &Version::from("1.0.0"), &json!({}))
            .unwrap_err();
        assert!(matches!(error, Error::UnsupportedVersion(v) if v == "1.0.0"));
    }

    #[test]
    fn item_collections_have_no_schema() {
        let error = Validator::new()
            .validate_value(Type::ItemCollection, &Version::v0_8_0, &json!({}))
            .unwrap_err();
        assert!(matches!(error, Error::UnsupportedVersion(_)));
    }

    #[test]
    fn compiled_once() {
        let validator = Validator::new();
        let catalog = json!({"stac_version": "0.8.0", "id": "root", "description": "d", "links": []});
        for _ in 0..3 {
            validator
                .validate_value(Type::Catalog, &Version::v0_8_0, &catalog)
                .unwrap();
        }
        assert_eq!(validator.clone().validators.lock().unwrap().len(), 1);
    }
}
