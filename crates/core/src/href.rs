//! Utilities for working with hrefs.

use crate::Result;
use std::borrow::Cow;
use url::Url;

/// Makes an href absolute relative to the url of the document it came from.
///
/// # Examples
///
/// ```
/// use stac_client::href::make_absolute;
///
/// assert_eq!(
///     make_absolute("./items", "http://stac.test/collections/a/").unwrap(),
///     "http://stac.test/collections/a/items"
/// );
/// assert_eq!(
///     make_absolute("http://other.test/items", "http://stac.test/").unwrap(),
///     "http://other.test/items"
/// );
/// ```
pub fn make_absolute<'a>(href: &'a str, base: &str) -> Result<Cow<'a, str>> {
    if Url::parse(href).is_ok() {
        Ok(href.into())
    } else {
        let url = Url::parse(base)?.join(href)?;
        Ok(url.to_string().into())
    }
}

/// Returns the last path segment of an href, without any query string.
///
/// # Examples
///
/// ```
/// use stac_client::href::last_segment;
///
/// assert_eq!(last_segment("http://stac.test/collections/C4_64_16D?access_token=x"), "C4_64_16D");
/// assert_eq!(last_segment("http://stac.test/collections/C4_64_16D/"), "C4_64_16D");
/// assert_eq!(last_segment("my_collection1"), "my_collection1");
/// ```
pub fn last_segment(href: &str) -> &str {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// Removes any trailing slashes from a root url.
///
/// # Examples
///
/// ```
/// assert_eq!(stac_client::href::trim_root("http://stac.test/stac/"), "http://stac.test/stac");
/// ```
pub fn trim_root(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Returns the base url of the service's `/collections` endpoints.
///
/// Some services expose their STAC landing page at `{service}/stac` and their
/// collections at `{service}/collections`. Any other root is the service
/// itself.
///
/// # Examples
///
/// ```
/// use stac_client::href::service_root;
///
/// assert_eq!(service_root("http://stac.test/stac"), "http://stac.test");
/// assert_eq!(service_root("http://stac.test/bdc-stac/0.8.0"), "http://stac.test/bdc-stac/0.8.0");
/// ```
pub fn service_root(root: &str) -> &str {
    let root = trim_root(root);
    root.strip_suffix("/stac").unwrap_or(root)
}
