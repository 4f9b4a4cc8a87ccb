//! Wire requests and the transport seam.

use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use url::Url;

/// The query parameter that carries an access token.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// The http verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Parameters travel in the query string.
    #[default]
    Get,

    /// Parameters travel in a JSON body.
    Post,
}

/// One request to a STAC service, fully shaped for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The http verb.
    pub method: Method,

    /// The url, without query parameters.
    pub url: String,

    /// Query parameters, in order.
    pub params: Vec<(String, String)>,

    /// The JSON body of a POST.
    pub body: Option<Value>,
}

/// Fetches JSON documents over some transport.
///
/// Implementations must follow redirects, fail with
/// [Error::Transport](crate::Error::Transport) on a non-2xx status, and fail
/// with [Error::Format](crate::Error::Format) when the response isn't
/// `application/json` or `application/geo+json`.
pub trait Transport {
    /// Sends the request and returns the parsed response body.
    fn fetch(&self, request: &Request) -> Result<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, request: &Request) -> Result<Value> {
        (**self).fetch(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn fetch(&self, request: &Request) -> Result<Value> {
        (**self).fetch(request)
    }
}

impl Request {
    /// Creates a GET request with no parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::{Method, Request};
    ///
    /// let request = Request::get("http://stac.test/collections");
    /// assert_eq!(request.method, Method::Get);
    /// ```
    pub fn get(url: impl ToString) -> Request {
        Request {
            method: Method::Get,
            url: url.to_string(),
            params: Vec::new(),
            body: None,
        }
    }

    /// Creates a POST request with a JSON body.
    pub fn post(url: impl ToString, body: Value) -> Request {
        Request {
            method: Method::Post,
            url: url.to_string(),
            params: Vec::new(),
            body: Some(body),
        }
    }

    /// Appends a query parameter.
    pub fn with_param(mut self, key: impl ToString, value: impl ToString) -> Request {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Returns the value of the first query parameter with this key.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if this key is set, either as a parameter or in the url's own query.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::Request;
    ///
    /// let request = Request::get("http://stac.test/collections/a/items?access_token=abc");
    /// assert!(request.has_param("access_token"));
    /// assert!(!request.has_param("limit"));
    /// assert!(request.with_param("limit", 10).has_param("limit"));
    /// ```
    pub fn has_param(&self, key: &str) -> bool {
        self.param(key).is_some()
            || Url::parse(&self.url).is_ok_and(|url| url.query_pairs().any(|(k, _)| k == key))
    }

    /// Returns the full url, with query parameters appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::Request;
    ///
    /// let request = Request::get("http://stac.test/search")
    ///     .with_param("bbox", "-56.8,-15.9,-53.1,-13.9")
    ///     .with_param("limit", 2);
    /// assert_eq!(
    ///     request.url_with_query().unwrap().as_str(),
    ///     "http://stac.test/search?bbox=-56.8%2C-15.9%2C-53.1%2C-13.9&limit=2"
    /// );
    /// ```
    pub fn url_with_query(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)?;
        if !self.params.is_empty() {
            let _ = url.query_pairs_mut().extend_pairs(&self.params);
        }
        Ok(url)
    }
}

impl Display for Request {
    /// Writes the verb and url, with any access token redacted.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let method = match self.method {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        let redact = |key: &str, value: &str| {
            if key == ACCESS_TOKEN_PARAM {
                "***".to_string()
            } else {
                value.to_string()
            }
        };
        match self.url_with_query() {
            Ok(mut url) => {
                let pairs: Vec<(String, String)> = url
                    .query_pairs()
                    .map(|(key, value)| (key.to_string(), redact(&key, &value)))
                    .collect();
                if !pairs.is_empty() {
                    let _ = url.query_pairs_mut().clear().extend_pairs(pairs);
                }
                write!(f, "{method} {url}")
            }
            Err(_) => {
                write!(f, "{method} {}", self.url)?;
                for (i, (key, value)) in self.params.iter().enumerate() {
                    let separator = if i == 0 && !self.url.contains('?') {
                        '?'
                    } else {
                        '&'
                    };
                    write!(f, "{separator}{key}={}", redact(key, value))?;
                }
                Ok(())
            }
        }
    }
}
