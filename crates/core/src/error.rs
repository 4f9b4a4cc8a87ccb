use crate::{Type, Version};
use thiserror::Error;

/// Error enum for crate-specific errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The response body was not JSON or GeoJSON.
    #[error("unexpected content type from {url}: {content_type}")]
    Format {
        /// The url that was fetched.
        url: String,

        /// The content type the server reported, or an empty string if it sent none.
        content_type: String,
    },

    /// [geojson::Error]
    #[error(transparent)]
    Geojson(#[from] Box<geojson::Error>),

    /// This value can't be turned into a bounding box.
    #[error("ambiguous bbox: {0}")]
    InvalidBbox(String),

    /// A filter value is malformed.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// A bundled json-schema could not be compiled.
    #[error("invalid schema for {kind} v{version}: {message}")]
    InvalidSchema {
        /// The kind of STAC object the schema describes.
        kind: Type,

        /// The STAC version of the schema.
        version: Version,

        /// Why the schema could not be compiled.
        message: String,
    },

    /// Returned when there is not a required field on a STAC object.
    #[error("no \"{0}\" field in the JSON object")]
    MissingField(&'static str),

    /// A collection could not be retrieved from the service.
    #[error("collection not found: {id}")]
    NotFound {
        /// The requested collection id.
        id: String,

        /// The failure that occurred while fetching the collection.
        #[source]
        source: Box<Error>,
    },

    /// A document failed json-schema validation.
    ///
    /// Only the first violation is reported.
    #[error("{kind} v{version} failed validation at \"{path}\": {message}")]
    Schema {
        /// The kind of STAC object that was validated.
        kind: Type,

        /// The STAC version the document declared.
        version: Version,

        /// The json pointer to the offending value.
        path: String,

        /// The violation.
        message: String,
    },

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// The request failed or the server returned a non-success status.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// The url that was requested.
        url: String,

        /// The http status code, if the server responded.
        status: Option<u16>,

        /// A description of the failure.
        message: String,
    },

    /// There is no schema for this STAC version.
    #[error("unsupported STAC version: {0}")]
    UnsupportedVersion(String),

    /// [url::ParseError]
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns true if this is a [Error::NotFound].
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::Error;
    ///
    /// let error = Error::NotFound {
    ///     id: "an-id".to_string(),
    ///     source: Box::new(Error::MissingField("id")),
    /// };
    /// assert!(error.is_not_found());
    /// ```
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns the http status, if this error came from a server response.
    ///
    /// Looks through [Error::NotFound] to the wrapped cause.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => *status,
            Error::NotFound { source, .. } => source.status(),
            _ => None,
        }
    }
}

impl From<geojson::Error> for Error {
    fn from(error: geojson::Error) -> Error {
        Error::Geojson(Box::new(error))
    }
}
