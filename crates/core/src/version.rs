use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{convert::Infallible, fmt::Display, str::FromStr};

/// The version of the STAC specification a service speaks.
///
/// Every behavior that differs between versions is answered here, so
/// supporting a new version means adding a variant and its answers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[allow(non_camel_case_types)]
pub enum Version {
    /// [v0.7.0](https://github.com/radiantearth/stac-spec/releases/tag/v0.7.0)
    v0_7_0,

    /// [v0.8.0](https://github.com/radiantearth/stac-spec/releases/tag/v0.8.0)
    v0_8_0,

    /// [v0.8.1](https://github.com/radiantearth/stac-spec/releases/tag/v0.8.1)
    v0_8_1,

    /// [v0.9.0](https://github.com/radiantearth/stac-spec/releases/tag/v0.9.0)
    #[default]
    v0_9_0,

    /// A version this crate doesn't know about.
    ///
    /// Unknown versions are navigated and queried like the newest known
    /// version, but they can't be validated.
    Unknown(String),
}

/// How a service pages through search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// A numeric `page` parameter.
    Page,

    /// An opaque `next` token, taken from the previous page's links.
    Token,
}

impl Version {
    /// Returns the name of the query parameter that carries a datetime filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::Version;
    ///
    /// assert_eq!(Version::v0_7_0.datetime_key(), "time");
    /// assert_eq!(Version::v0_8_0.datetime_key(), "datetime");
    /// ```
    pub fn datetime_key(&self) -> &'static str {
        match self {
            Version::v0_7_0 => "time",
            _ => "datetime",
        }
    }

    /// Returns the pagination style of this version.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::{Pagination, Version};
    ///
    /// assert_eq!(Version::v0_7_0.pagination(), Pagination::Page);
    /// assert_eq!(Version::v0_9_0.pagination(), Pagination::Token);
    /// ```
    pub fn pagination(&self) -> Pagination {
        match self {
            Version::v0_7_0 => Pagination::Page,
            _ => Pagination::Token,
        }
    }

    /// Returns the directory that holds this version's json-schemas, e.g. `jsonschemas/0.8.0`.
    ///
    /// Returns `None` for unknown versions.
    pub fn schema_dir(&self) -> Option<String> {
        match self {
            Version::Unknown(_) => None,
            _ => Some(format!("jsonschemas/{self}")),
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Version::v0_7_0 => f.write_str("0.7.0"),
            Version::v0_8_0 => f.write_str("0.8.0"),
            Version::v0_8_1 => f.write_str("0.8.1"),
            Version::v0_9_0 => f.write_str("0.9.0"),
            Version::Unknown(v) => f.write_str(v),
        }
    }
}

impl FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Version, Infallible> {
        match s {
            "0.7.0" => Ok(Version::v0_7_0),
            "0.8.0" => Ok(Version::v0_8_0),
            "0.8.1" => Ok(Version::v0_8_1),
            "0.9.0" => Ok(Version::v0_9_0),
            _ => Ok(Version::Unknown(s.to_string())),
        }
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Version {
        match s.parse() {
            Ok(version) => version,
            Err(infallible) => match infallible {},
        }
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Version, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Version::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Pagination, Version};
    use rstest::rstest;

    #[rstest]
    #[case("0.7.0", Version::v0_7_0)]
    #[case("0.8.0", Version::v0_8_0)]
    #[case("0.8.1", Version::v0_8_1)]
    #[case("0.9.0", Version::v0_9_0)]
    #[case("v0.9.0", Version::Unknown("v0.9.0".to_string()))]
    #[case("1.0.0", Version::Unknown("1.0.0".to_string()))]
    fn parse(#[case] s: &str, #[case] expected: Version) {
        assert_eq!(Version::from(s), expected);
    }

    #[test]
    fn display_round_trips() {
        for version in [
            Version::v0_7_0,
            Version::v0_8_0,
            Version::v0_8_1,
            Version::v0_9_0,
        ] {
            assert_eq!(Version::from(version.to_string().as_str()), version);
        }
    }

    #[test]
    fn unknown_behaves_like_newest() {
        let unknown = Version::from("1.0.0-beta.2");
        assert_eq!(unknown.datetime_key(), "datetime");
        assert_eq!(unknown.pagination(), Pagination::Token);
        assert!(unknown.schema_dir().is_none());
    }

    #[test]
    fn schema_dir() {
        assert_eq!(
            Version::v0_8_1.schema_dir().unwrap(),
            "jsonschemas/0.8.1"
        );
    }

    #[test]
    fn serde() {
        let version: Version = serde_json::from_str("\"0.8.0\"").unwrap();
        assert_eq!(version, Version::v0_8_0);
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"0.8.0\"");
    }
}
