//! Navigate a STAC service's link graph and query its items.

use crate::{
    ACCESS_TOKEN_PARAM, Catalog, Collection, Error, Filter, Item, ItemCollection, Method, Request,
    Resource, Result, SchemaValidator, Transport, Version, href,
};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt::Display, sync::Arc};
use url::Url;

/// A client for one STAC service.
///
/// The client lazily fetches the root catalog and caches it, together with
/// every collection it fetches, for its whole lifetime. A fetched collection
/// is never refetched by [Client::collection]; only [Client::collections]
/// refreshes the cache.
///
/// Navigation methods that fill the cache take `&mut self`. Share a client
/// across threads behind a mutex, or build one per thread.
///
/// # Examples
///
/// ```no_run
/// # fn get(transport: impl stac_client::Transport) -> stac_client::Result<()> {
/// use stac_client::{Client, Filter};
///
/// let mut client = Client::new("http://brazildatacube.dpi.inpe.br/stac/", transport);
/// for id in client.collection_ids()? {
///     println!("{id}");
/// }
/// let collection = client.collection("C4_64_16D_STK-1")?;
/// let items = client.items(&collection, Some(Filter::new().limit(10)))?;
/// # Ok(())
/// # }
/// ```
pub struct Client<T> {
    url: String,
    access_token: Option<String>,
    validator: Option<Arc<dyn SchemaValidator>>,
    transport: T,
    root: Option<Catalog>,
    collections: IndexMap<String, Option<Collection>>,
}

/// The conformance classes a service implements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conformance {
    /// Urls of the conformance classes.
    #[serde(rename = "conformsTo")]
    pub conforms_to: Vec<String>,
}

impl<T: Transport> Client<T> {
    /// Creates a client for the service rooted at `url`.
    ///
    /// Trailing slashes are removed from the url. Nothing is fetched until the
    /// first navigation call.
    ///
    /// # Examples
    ///
    /// ```
    /// # struct Offline;
    /// # impl stac_client::Transport for Offline {
    /// #     fn fetch(&self, _: &stac_client::Request) -> stac_client::Result<serde_json::Value> {
    /// #         unimplemented!()
    /// #     }
    /// # }
    /// use stac_client::Client;
    ///
    /// let client = Client::new("http://stac.test/stac/", Offline);
    /// assert_eq!(client.url(), "http://stac.test/stac");
    /// assert_eq!(client.to_string(), "<STAC [http://stac.test/stac]>");
    /// ```
    pub fn new(url: &str, transport: T) -> Client<T> {
        Client {
            url: href::trim_root(url).to_string(),
            access_token: None,
            validator: None,
            transport,
            root: None,
            collections: IndexMap::new(),
        }
    }

    /// Appends an `access_token` query parameter to every request.
    pub fn with_access_token(mut self, access_token: impl ToString) -> Client<T> {
        self.access_token = Some(access_token.to_string());
        self
    }

    /// Validates every fetched document before wrapping it.
    pub fn with_validator(mut self, validator: impl SchemaValidator + 'static) -> Client<T> {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Returns the root url of the service.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the STAC version of the service, once the root catalog has been fetched.
    pub fn version(&self) -> Option<&Version> {
        self.root
            .as_ref()
            .and_then(|root| root.stac_version().ok())
    }

    /// Returns the root catalog, fetching it on first use.
    pub fn catalog(&mut self) -> Result<&Catalog> {
        let catalog = match self.root.take() {
            Some(catalog) => catalog,
            None => self.get(Request::get(&self.url))?,
        };
        Ok(self.root.insert(catalog))
    }

    /// Returns the ids of the collections the root catalog links to.
    ///
    /// The root catalog is fetched once; later calls answer from the cache.
    /// Every id not yet cached is registered as a placeholder, so
    /// [Client::cached_collections] shows it as not fetched.
    pub fn collection_ids(&mut self) -> Result<IndexSet<String>> {
        let ids = self.catalog()?.child_ids()?;
        let mut added = 0;
        for id in &ids {
            if !self.collections.contains_key(id) {
                let _ = self.collections.insert(id.clone(), None);
                added += 1;
            }
        }
        if added > 0 {
            tracing::info!("discovered {added} collection(s) at {}", self.url);
        }
        Ok(ids)
    }

    /// Fetches every collection from `/collections` and caches each one.
    ///
    /// Always hits the network, overwriting cached collections and
    /// placeholders alike. Returns the whole cache.
    pub fn collections(&mut self) -> Result<&IndexMap<String, Option<Collection>>> {
        let url = format!("{}/collections", href::service_root(&self.url));
        let mut value = self.fetch(Request::get(url))?;
        let values = match value.get_mut("collections").map(Value::take) {
            Some(Value::Array(values)) => values,
            _ => return Err(Error::MissingField("collections")),
        };
        for value in values {
            let collection = Collection::from_value(value, self.validator())?;
            let id = collection.id()?.to_string();
            let _ = self.collections.insert(id, Some(collection));
        }
        tracing::info!(
            "cached {} collection(s) from {}",
            self.collections.len(),
            self.url
        );
        Ok(&self.collections)
    }

    /// Returns the collection cache: every known id, with `None` for ids that
    /// have been discovered but not fetched.
    pub fn cached_collections(&self) -> &IndexMap<String, Option<Collection>> {
        &self.collections
    }

    /// Returns one collection, fetching it if it isn't cached.
    ///
    /// The id doesn't have to be among the discovered child links. Any
    /// failure to fetch it is reported as [Error::NotFound].
    pub fn collection(&mut self, id: &str) -> Result<Collection> {
        if let Some(Some(collection)) = self.collections.get(id) {
            return Ok(collection.clone());
        }
        let url = format!("{}/collections/{id}", href::service_root(&self.url));
        let value = self
            .fetch(Request::get(url))
            .map_err(|source| Error::NotFound {
                id: id.to_string(),
                source: Box::new(source),
            })?;
        let collection = Collection::from_value(value, self.validator())?;
        let _ = self
            .collections
            .insert(id.to_string(), Some(collection.clone()));
        Ok(collection)
    }

    /// Searches the service's `/search` endpoint.
    ///
    /// The filter is checked before anything is fetched. The root catalog is
    /// then fetched if needed, to learn the STAC version.
    /// Filters with `intersects` or `query` are POSTed as JSON; everything
    /// else is a GET.
    pub fn search(&mut self, filter: Filter) -> Result<ItemCollection> {
        let filter = filter.valid()?;
        let version = self.catalog()?.stac_version()?.clone();
        let request = filter.into_request(&format!("{}/search", self.url), &version)?;
        self.get(request)
    }

    /// Returns a page of a collection's items.
    ///
    /// A collection without an `items` link has no items; the result is then
    /// empty rather than an error. Items endpoints only take query strings, so
    /// a filter with `intersects` or `query` is rejected before any request.
    pub fn items(&self, collection: &Collection, filter: Option<Filter>) -> Result<ItemCollection> {
        let filter = filter.unwrap_or_default();
        if filter.method() == Method::Post {
            return Err(Error::InvalidFilter(
                "intersects and query are only supported by search".to_string(),
            ));
        }
        let Some(url) = self.items_url(collection)? else {
            tracing::warn!("collection {} has no items link", collection.id()?);
            return Ok(ItemCollection::empty());
        };
        let version = self.collection_version(collection);
        let request = filter.into_request(&url, &version)?;
        self.get(request)
    }

    /// Returns one item of a collection.
    ///
    /// Returns `None` if the collection has no `items` link.
    pub fn item(&self, collection: &Collection, item_id: &str) -> Result<Option<Item>> {
        let Some(url) = self.items_url(collection)? else {
            tracing::warn!("collection {} has no items link", collection.id()?);
            return Ok(None);
        };
        let mut url = Url::parse(&url)?;
        let _ = url
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(item_id);
        self.get(Request::get(url)).map(Some)
    }

    /// Returns the conformance classes of the service.
    pub fn conformance(&self) -> Result<Conformance> {
        let value = self.fetch(Request::get(format!("{}/conformance", self.url)))?;
        serde_json::from_value(value).map_err(Error::from)
    }

    fn validator(&self) -> Option<&dyn SchemaValidator> {
        self.validator.as_deref()
    }

    fn items_url(&self, collection: &Collection) -> Result<Option<String>> {
        let Some(link) = collection.items_link()? else {
            return Ok(None);
        };
        let base = match collection.link("self")? {
            Some(link) => link.href()?.to_string(),
            None => format!(
                "{}/collections/{}",
                href::service_root(&self.url),
                collection.id()?
            ),
        };
        Ok(Some(href::make_absolute(link.href()?, &base)?.into_owned()))
    }

    fn collection_version(&self, collection: &Collection) -> Version {
        collection
            .stac_version()
            .ok()
            .or_else(|| self.version())
            .cloned()
            .unwrap_or_default()
    }

    fn get<R: Resource>(&self, request: Request) -> Result<R> {
        let value = self.fetch(request)?;
        R::from_value(value, self.validator())
    }

    fn fetch(&self, mut request: Request) -> Result<Value> {
        if let Some(access_token) = self.access_token.as_deref()
            && !request.has_param(ACCESS_TOKEN_PARAM)
        {
            request = request.with_param(ACCESS_TOKEN_PARAM, access_token);
        }
        tracing::debug!("{request}");
        self.transport.fetch(&request)
    }
}

impl<T> Display for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<STAC [{}]>", self.url)
    }
}

impl<T> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("validate", &self.validator.is_some())
            .field("collections", &self.collections.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Client;
    use crate::{
        Collection, Error, Filter, Method, Request, Result, SchemaValidator, Transport, Type, Version,
    };
    use geojson::{Geometry, Value as GeoValue};
    use serde_json::{Value, json};
    use std::{cell::RefCell, collections::HashMap};

    /// Answers from a fixed table of urls and records every request.
    #[derive(Default)]
    struct Recording {
        responses: HashMap<String, Value>,
        requests: RefCell<Vec<Request>>,
    }

    impl Recording {
        fn with(mut self, url: &str, value: Value) -> Recording {
            let _ = self.responses.insert(url.to_string(), value);
            self
        }

        fn count(&self) -> usize {
            self.requests.borrow().len()
        }

        fn last(&self) -> Request {
            self.requests.borrow().last().cloned().unwrap()
        }
    }

    impl Transport for Recording {
        fn fetch(&self, request: &Request) -> Result<Value> {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .get(&request.url)
                .cloned()
                .ok_or_else(|| Error::Transport {
                    url: request.url.clone(),
                    status: Some(404),
                    message: "Not Found".to_string(),
                })
        }
    }

    struct Reject;

    impl SchemaValidator for Reject {
        fn validate(&self, r#type: Type, version: &Version, _: &Value) -> Result<()> {
            Err(Error::Schema {
                kind: r#type,
                version: version.clone(),
                path: "/links".to_string(),
                message: "rejected".to_string(),
            })
        }
    }

    fn root(version: &str) -> Value {
        json!({
            "stac_version": version,
            "id": "root",
            "description": "d",
            "links": [
                {"rel": "self", "href": "http://stac.test/stac"},
                {"rel": "child", "href": "http://stac.test/collections/my_collection1?access_token=x"},
                {"rel": "child", "href": "../collections/my_collection2/"}
            ]
        })
    }

    fn collection(id: &str, items: bool) -> Value {
        let mut links = vec![json!({"rel": "self", "href": format!("http://stac.test/collections/{id}")})];
        if items {
            links.push(json!({"rel": "items", "href": format!("http://stac.test/collections/{id}/items")}));
        }
        json!({
            "stac_version": "0.8.0",
            "id": id,
            "description": "d",
            "license": "MIT",
            "extent": {
                "spatial": {"bbox": [[-180.0, -90.0, 180.0, 90.0]]},
                "temporal": {"interval": [["2016-01-01T00:00:00Z", null]]}
            },
            "links": links
        })
    }

    fn page() -> Value {
        json!({"type": "FeatureCollection", "features": [{"type": "Feature", "id": "feature1"}], "links": []})
    }

    #[test]
    fn collection_ids() {
        let transport = Recording::default().with("http://stac.test/stac", root("0.8.0"));
        let mut client = Client::new("http://stac.test/stac/", &transport);
        let ids = client.collection_ids().unwrap();
        assert_eq!(
            ids.into_iter().collect::<Vec<_>>(),
            vec!["my_collection1", "my_collection2"]
        );
        assert!(client.cached_collections()["my_collection1"].is_none());
        assert_eq!(*client.version().unwrap(), Version::v0_8_0);
    }

    #[test]
    fn collection_ids_fetches_once() {
        let transport = Recording::default().with("http://stac.test/stac", root("0.8.0"));
        let mut client = Client::new("http://stac.test/stac", &transport);
        let first = client.collection_ids().unwrap();
        let second = client.collection_ids().unwrap();
        assert_eq!(first, second);
        assert_eq!(transport.count(), 1);
    }

    #[test]
    fn single_child() {
        let transport = Recording::default().with(
            "http://stac.test",
            json!({
                "stac_version": "0.8.0",
                "id": "root",
                "description": "d",
                "links": [{"rel": "child", "href": "http://stac.test/collections/my_collection1"}]
            }),
        );
        let mut client = Client::new("http://stac.test", &transport);
        assert_eq!(
            client.collection_ids().unwrap().into_iter().collect::<Vec<_>>(),
            vec!["my_collection1"]
        );
    }

    #[test]
    fn access_token() {
        let transport = Recording::default().with("http://stac.test/stac", root("0.8.0"));
        let mut client = Client::new("http://stac.test/stac", &transport).with_access_token("secret");
        let _ = client.collection_ids().unwrap();
        assert_eq!(transport.last().param("access_token").unwrap(), "secret");
        assert!(format!("{client:?}").contains("***"));
        assert!(!format!("{client:?}").contains("secret"));
    }

    #[test]
    fn collections_overwrite_placeholders() {
        let transport = Recording::default()
            .with("http://stac.test/stac", root("0.8.0"))
            .with(
                "http://stac.test/collections",
                json!({"collections": [collection("my_collection1", true), collection("my_collection3", true)]}),
            );
        let mut client = Client::new("http://stac.test/stac", &transport);
        let _ = client.collection_ids().unwrap();
        let collections = client.collections().unwrap();
        assert!(collections["my_collection1"].is_some());
        assert!(collections["my_collection2"].is_none());
        assert!(collections["my_collection3"].is_some());
        assert_eq!(transport.last().url, "http://stac.test/collections");

        let _ = client.collections().unwrap();
        assert_eq!(transport.count(), 3);
    }

    #[test]
    fn collections_without_array() {
        let transport = Recording::default().with("http://stac.test/collections", json!({"links": []}));
        let mut client = Client::new("http://stac.test", &transport);
        assert!(matches!(
            client.collections().unwrap_err(),
            Error::MissingField("collections")
        ));
    }

    #[test]
    fn collection_is_cached() {
        let transport = Recording::default().with(
            "http://stac.test/collections/my_collection1",
            collection("my_collection1", true),
        );
        let mut client = Client::new("http://stac.test/stac", &transport);
        let first = client.collection("my_collection1").unwrap();
        let second = client.collection("my_collection1").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.license().unwrap(), "MIT");
        assert_eq!(transport.count(), 1);
    }

    #[test]
    fn collection_not_among_children() {
        let transport = Recording::default()
            .with("http://stac.test/stac", root("0.8.0"))
            .with(
                "http://stac.test/collections/hidden",
                collection("hidden", true),
            );
        let mut client = Client::new("http://stac.test/stac", &transport);
        let _ = client.collection_ids().unwrap();
        assert_eq!(client.collection("hidden").unwrap().id().unwrap(), "hidden");
    }

    #[test]
    fn collection_not_found() {
        let transport = Recording::default();
        let mut client = Client::new("http://stac.test/stac", &transport);
        let error = client.collection("missing").unwrap_err();
        assert!(error.is_not_found());
        assert_eq!(error.status(), Some(404));
        assert!(matches!(
            error,
            Error::NotFound { ref id, .. } if id == "missing"
        ));
    }

    #[test]
    fn collection_fails_validation() {
        let transport = Recording::default().with(
            "http://stac.test/collections/my_collection1",
            collection("my_collection1", true),
        );
        let mut client = Client::new("http://stac.test", &transport).with_validator(Reject);
        assert!(matches!(
            client.collection("my_collection1").unwrap_err(),
            Error::Schema { kind: Type::Collection, .. }
        ));
    }

    #[test]
    fn items_without_link() {
        let transport = Recording::default().with(
            "http://stac.test/collections/empty",
            collection("empty", false),
        );
        let mut client = Client::new("http://stac.test", &transport);
        let collection = client.collection("empty").unwrap();
        let items = client.items(&collection, None).unwrap();
        assert!(items.features().unwrap().is_empty());
        assert!(client.item(&collection, "feature1").unwrap().is_none());
        assert_eq!(transport.count(), 1);
    }

    #[test]
    fn items() {
        let transport = Recording::default()
            .with(
                "http://stac.test/collections/my_collection1",
                collection("my_collection1", true),
            )
            .with("http://stac.test/collections/my_collection1/items", page());
        let mut client = Client::new("http://stac.test", &transport);
        let collection = client.collection("my_collection1").unwrap();
        let items = client
            .items(&collection, Some(Filter::new().bbox([10.0, 0.0, 0.0, 5.0]).limit(1)))
            .unwrap();
        assert_eq!(items.features().unwrap().len(), 1);
        let request = transport.last();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.param("bbox").unwrap(), "0,0,10,5");
        assert_eq!(request.param("limit").unwrap(), "1");
    }

    #[test]
    fn items_reject_intersects() {
        let transport = Recording::default().with(
            "http://stac.test/collections/my_collection1",
            collection("my_collection1", true),
        );
        let mut client = Client::new("http://stac.test", &transport);
        let collection = client.collection("my_collection1").unwrap();
        let filter = Filter::new().intersects(Geometry::new(GeoValue::Point(vec![0.0, 0.0])));
        assert!(matches!(
            client.items(&collection, Some(filter)).unwrap_err(),
            Error::InvalidFilter(_)
        ));
        assert_eq!(transport.count(), 1);
    }

    #[test]
    fn item() {
        let transport = Recording::default()
            .with(
                "http://stac.test/collections/my_collection1",
                collection("my_collection1", true),
            )
            .with(
                "http://stac.test/collections/my_collection1/items/feature1",
                json!({"type": "Feature", "id": "feature1"}),
            );
        let mut client = Client::new("http://stac.test", &transport);
        let collection = client.collection("my_collection1").unwrap();
        let item = client.item(&collection, "feature1").unwrap().unwrap();
        assert_eq!(item.id().unwrap(), "feature1");
    }

    #[test]
    fn search_v0_8_0() {
        let transport = Recording::default()
            .with("http://stac.test/stac", root("0.8.0"))
            .with("http://stac.test/stac/search", page());
        let mut client = Client::new("http://stac.test/stac", &transport);
        let filter = Filter::new()
            .bbox("-56.8,-15.9,-53.1,-13.9")
            .datetime("2016-09-13/2019-12-31");
        let _ = client.search(filter).unwrap();
        assert_eq!(transport.count(), 2);
        let request = transport.last();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.param("bbox").unwrap(), "-56.8,-15.9,-53.1,-13.9");
        assert_eq!(request.param("datetime").unwrap(), "2016-09-13/2019-12-31");
        assert!(request.param("time").is_none());
    }

    #[test]
    fn search_v0_7_0() {
        let transport = Recording::default()
            .with("http://stac.test/stac", root("0.7.0"))
            .with("http://stac.test/stac/search", page());
        let mut client = Client::new("http://stac.test/stac", &transport);
        let filter = Filter::new()
            .bbox("-56.8,-15.9,-53.1,-13.9")
            .datetime("2016-09-13/2019-12-31");
        let _ = client.search(filter).unwrap();
        let request = transport.last();
        assert_eq!(request.param("time").unwrap(), "2016-09-13/2019-12-31");
        assert!(request.param("datetime").is_none());
    }

    #[test]
    fn search_intersects_posts() {
        let transport = Recording::default()
            .with("http://stac.test/stac", root("0.8.0"))
            .with("http://stac.test/stac/search", page());
        let mut client = Client::new("http://stac.test/stac", &transport);
        let filter = Filter::new().intersects(Geometry::new(GeoValue::Point(vec![0.0, 0.0])));
        let _ = client.search(filter).unwrap();
        let request = transport.last();
        assert_eq!(request.method, Method::Post);
        assert!(request.params.is_empty());
        assert_eq!(
            request.body.unwrap()["intersects"],
            json!({"type": "Point", "coordinates": [0.0, 0.0]})
        );
    }

    #[test]
    fn search_with_bad_bbox_fails_before_request() {
        let transport = Recording::default().with("http://stac.test/stac", root("0.8.0"));
        let mut client = Client::new("http://stac.test/stac", &transport);
        let _ = client.collection_ids().unwrap();
        assert!(matches!(
            client.search(Filter::new().bbox("")).unwrap_err(),
            Error::InvalidBbox(_)
        ));
        assert_eq!(transport.count(), 1);
    }

    #[test]
    fn search_checks_filter_before_fetching_root() {
        let transport = Recording::default().with("http://stac.test/stac", root("0.8.0"));
        let mut client = Client::new("http://stac.test/stac", &transport);
        assert!(matches!(
            client.search(Filter::new().bbox("")).unwrap_err(),
            Error::InvalidBbox(_)
        ));
        assert!(matches!(
            client.search(Filter::new().datetime("yesterday")).unwrap_err(),
            Error::InvalidFilter(_)
        ));
        let both = Filter::new()
            .bbox("-56.8,-15.9,-53.1,-13.9")
            .intersects(Geometry::new(GeoValue::Point(vec![0.0, 0.0])));
        assert!(matches!(
            client.search(both).unwrap_err(),
            Error::InvalidFilter(_)
        ));
        assert_eq!(transport.count(), 0);
        assert!(client.version().is_none());
    }

    #[test]
    fn token_already_in_link() {
        let mut collection = collection("my_collection1", false);
        collection["links"]
            .as_array_mut()
            .unwrap()
            .push(json!({"rel": "items", "href": "http://stac.test/collections/my_collection1/items?access_token=embedded"}));
        let collection: Collection = serde_json::from_value(collection).unwrap();
        let transport = Recording::default().with(
            "http://stac.test/collections/my_collection1/items?access_token=embedded",
            page(),
        );
        let client = Client::new("http://stac.test/stac", &transport).with_access_token("secret");
        let _ = client.items(&collection, None).unwrap();
        let request = transport.last();
        assert!(request.param("access_token").is_none());
        assert_eq!(
            request.url_with_query().unwrap().query(),
            Some("access_token=embedded")
        );
    }

    #[test]
    fn item_with_token_in_link() {
        let mut collection = collection("my_collection1", false);
        collection["links"]
            .as_array_mut()
            .unwrap()
            .push(json!({"rel": "items", "href": "http://stac.test/collections/my_collection1/items/?access_token=embedded"}));
        let collection: Collection = serde_json::from_value(collection).unwrap();
        let transport = Recording::default().with(
            "http://stac.test/collections/my_collection1/items/feature1?access_token=embedded",
            json!({"type": "Feature", "id": "feature1"}),
        );
        let client = Client::new("http://stac.test/stac", &transport).with_access_token("secret");
        let item = client.item(&collection, "feature1").unwrap().unwrap();
        assert_eq!(item.id().unwrap(), "feature1");
        assert!(transport.last().param("access_token").is_none());
    }

    #[test]
    fn root_without_links() {
        let transport = Recording::default().with(
            "http://stac.test/stac",
            json!({"stac_version": "0.8.0", "id": "root", "description": "d"}),
        );
        let mut client = Client::new("http://stac.test/stac", &transport);
        assert!(matches!(
            client.collection_ids().unwrap_err(),
            Error::MissingField("links")
        ));
        assert!(client.cached_collections().is_empty());
    }

    #[test]
    fn conformance() {
        let transport = Recording::default().with(
            "http://stac.test/stac/conformance",
            json!({"conformsTo": ["http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/core"]}),
        );
        let client = Client::new("http://stac.test/stac", &transport);
        let conformance = client.conformance().unwrap();
        assert_eq!(conformance.conforms_to.len(), 1);
    }
}
