//! Item filters and their translation to the wire.
//!
//! Callers write a version-agnostic [Filter]. [Filter::into_request] picks the
//! http verb, normalizes the bbox, coerces list fields, and renames keys for
//! the STAC version the service speaks.

use crate::{Error, Method, Pagination, Request, Result, Version};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use geo::BoundingRect;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A bounding box as a caller may write it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bbox {
    /// A comma-separated `west,south,east,north` string.
    Text(String),

    /// Four numbers.
    Coordinates(Vec<f64>),

    /// A geometry, whose bounding rectangle is used.
    Geometry(geojson::Geometry),
}

/// Parameters that narrow a search or an items request.
///
/// Keys are version-agnostic; the translation to a service's STAC version
/// happens in [Filter::into_request].
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Only items whose footprint intersects this box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,

    /// A single instant or date, or a `/`-separated interval with optional `..` ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    /// The maximum number of items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// The page number, for services that page numerically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,

    /// The opaque token of the next page, for services that page by token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// Only items in these collections.
    ///
    /// Deserializes from either an array or a comma-separated string.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        default,
        deserialize_with = "comma_list"
    )]
    pub collections: Vec<String>,

    /// Only items with these ids.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        default,
        deserialize_with = "comma_list"
    )]
    pub ids: Vec<String>,

    /// Only items whose geometry intersects this geometry.
    ///
    /// Forces a POST.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersects: Option<geojson::Geometry>,

    /// Property queries of the query extension.
    ///
    /// Forces a POST.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, Value>>,

    /// Parameters this crate doesn't interpret, passed through as-is.
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

/// The query-string form of a [Filter].
///
/// List fields are comma-joined and structured fields are JSON-encoded.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetFilter {
    /// The normalized `west,south,east,north` bbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<String>,

    /// The datetime filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    /// The page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,

    /// The page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    /// The next-page token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// Comma-joined collection ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<String>,

    /// Comma-joined item ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<String>,

    /// JSON-encoded intersects geometry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersects: Option<String>,

    /// JSON-encoded query object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Everything else.
    #[serde(flatten)]
    pub additional_fields: IndexMap<String, String>,
}

/// Normalizes a bbox to a `west,south,east,north` string.
///
/// Any accepted input is reduced to its bounding rectangle. Normalizing an
/// already-normalized string returns the same string.
///
/// # Examples
///
/// ```
/// use stac_client::{Bbox, filter::normalize_bbox};
///
/// let normalized = normalize_bbox(&Bbox::from("-53.1, -13.9, -56.8, -15.9")).unwrap();
/// assert_eq!(normalized, "-56.8,-15.9,-53.1,-13.9");
/// assert_eq!(normalize_bbox(&Bbox::from(normalized.as_str())).unwrap(), normalized);
/// let _ = normalize_bbox(&Bbox::from("")).unwrap_err();
/// ```
pub fn normalize_bbox(bbox: &Bbox) -> Result<String> {
    let [west, south, east, north] = bounds(bbox)?;
    Ok(format!("{west},{south},{east},{north}"))
}

/// Returns the bounding rectangle of a bbox as `[west, south, east, north]`.
pub fn bounds(bbox: &Bbox) -> Result<[f64; 4]> {
    match bbox {
        Bbox::Text(s) => {
            if s.trim().is_empty() {
                return Err(Error::InvalidBbox(format!("{s:?}")));
            }
            let coordinates = s
                .split(',')
                .map(|part| part.trim().parse::<f64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| Error::InvalidBbox(format!("{s:?}")))?;
            rectangle(&coordinates)
        }
        Bbox::Coordinates(coordinates) => rectangle(coordinates),
        Bbox::Geometry(geometry) => {
            let geometry: geo::Geometry = geometry.clone().try_into()?;
            let rect = geometry
                .bounding_rect()
                .ok_or_else(|| Error::InvalidBbox("empty geometry".to_string()))?;
            Ok([rect.min().x, rect.min().y, rect.max().x, rect.max().y])
        }
    }
}

fn rectangle(coordinates: &[f64]) -> Result<[f64; 4]> {
    match *coordinates {
        [x0, y0, x1, y1] if coordinates.iter().all(|c| c.is_finite()) => {
            Ok([x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)])
        }
        _ => Err(Error::InvalidBbox(format!("{coordinates:?}"))),
    }
}

impl Filter {
    /// Creates an empty filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::Filter;
    ///
    /// let filter = Filter::new().limit(10).collections(vec!["C4_64_16D".to_string()]);
    /// ```
    pub fn new() -> Filter {
        Filter::default()
    }

    /// Sets the bbox.
    pub fn bbox(mut self, bbox: impl Into<Bbox>) -> Filter {
        self.bbox = Some(bbox.into());
        self
    }

    /// Sets the datetime.
    pub fn datetime(mut self, datetime: impl ToString) -> Filter {
        self.datetime = Some(datetime.to_string());
        self
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: u64) -> Filter {
        self.limit = Some(limit);
        self
    }

    /// Sets the page number.
    pub fn page(mut self, page: u64) -> Filter {
        self.page = Some(page);
        self
    }

    /// Sets the next-page token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(mut self, next: impl ToString) -> Filter {
        self.next = Some(next.to_string());
        self
    }

    /// Sets the collections.
    pub fn collections(mut self, collections: Vec<String>) -> Filter {
        self.collections = collections;
        self
    }

    /// Sets the ids.
    pub fn ids(mut self, ids: Vec<String>) -> Filter {
        self.ids = ids;
        self
    }

    /// Sets the intersects geometry.
    pub fn intersects(mut self, intersects: impl Into<geojson::Geometry>) -> Filter {
        self.intersects = Some(intersects.into());
        self
    }

    /// Sets the query object.
    pub fn query(mut self, query: Map<String, Value>) -> Filter {
        self.query = Some(query);
        self
    }

    /// Returns the verb this filter must be sent with.
    ///
    /// A geometry or a property query can't be expressed in a query string,
    /// so either one forces a POST.
    ///
    /// # Examples
    ///
    /// ```
    /// use geojson::{Geometry, Value};
    /// use stac_client::{Filter, Method};
    ///
    /// assert_eq!(Filter::new().bbox("0,0,1,1").method(), Method::Get);
    /// let filter = Filter::new().intersects(Geometry::new(Value::Point(vec![0.0, 0.0])));
    /// assert_eq!(filter.method(), Method::Post);
    /// ```
    pub fn method(&self) -> Method {
        if self.intersects.is_some() || self.query.is_some() {
            Method::Post
        } else {
            Method::Get
        }
    }

    /// Returns an error if this filter is malformed.
    ///
    /// Returns the filter unchanged if it is valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::Filter;
    ///
    /// let filter = Filter::new().datetime("2016-09-13/2019-12-31").valid().unwrap();
    /// let _ = filter.datetime("yesterday").valid().unwrap_err();
    /// ```
    pub fn valid(self) -> Result<Filter> {
        if self.bbox.is_some() && self.intersects.is_some() {
            return Err(Error::InvalidFilter(
                "bbox and intersects can't both be set".to_string(),
            ));
        }
        if let Some(bbox) = self.bbox.as_ref() {
            let _ = bounds(bbox)?;
        }
        if let Some(datetime) = self.datetime.as_deref() {
            check_datetime(datetime)?;
        }
        Ok(self)
    }

    /// Shapes this filter into a request to `url` for a service of `version`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_client::{Filter, Version};
    ///
    /// let filter = Filter::new().datetime("2016-09-13/2019-12-31");
    /// let request = filter.into_request("http://stac.test/search", &Version::v0_7_0).unwrap();
    /// assert_eq!(request.param("time").unwrap(), "2016-09-13/2019-12-31");
    /// ```
    pub fn into_request(self, url: &str, version: &Version) -> Result<Request> {
        let mut filter = self.valid()?;
        if filter.next.is_some() && version.pagination() == Pagination::Page {
            return Err(Error::InvalidFilter(format!(
                "STAC v{version} pages with `page`, not a `next` token"
            )));
        }
        let datetime_key = version.datetime_key();
        match filter.method() {
            Method::Get => {
                let get_filter = GetFilter::try_from(filter)?;
                let mut request = Request::get(url);
                for (key, value) in get_filter.into_params() {
                    if key == "datetime" {
                        request = request.with_param(datetime_key, value);
                    } else {
                        request = request.with_param(key, value);
                    }
                }
                Ok(request)
            }
            Method::Post => {
                if let Some(bbox) = filter.bbox.take() {
                    filter.bbox = Some(Bbox::Coordinates(bounds(&bbox)?.to_vec()));
                }
                let mut body = serde_json::to_value(filter)?;
                if let Some(object) = body.as_object_mut() {
                    if let Some(datetime) = object.remove("datetime") {
                        let _ = object.insert(datetime_key.to_string(), datetime);
                    }
                }
                Ok(Request::post(url, body))
            }
        }
    }
}

impl GetFilter {
    /// Returns the set parameters as key-value pairs, in field order.
    pub fn into_params(self) -> Vec<(String, String)> {
        let fields = [
            ("bbox", self.bbox),
            ("datetime", self.datetime),
            ("limit", self.limit),
            ("page", self.page),
            ("next", self.next),
            ("collections", self.collections),
            ("ids", self.ids),
            ("intersects", self.intersects),
            ("query", self.query),
        ];
        fields
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
            .chain(self.additional_fields)
            .collect()
    }
}

fn check_datetime(datetime: &str) -> Result<()> {
    let invalid = || Error::InvalidFilter(format!("unrecognized datetime: {datetime}"));
    if let Some((start, end)) = datetime.split_once('/') {
        let start = open_or_start(start).ok_or_else(invalid)?;
        let end = open_or_start(end).ok_or_else(invalid)?;
        match (start, end) {
            (None, None) => Err(Error::InvalidFilter(format!(
                "datetime interval is open at both ends: {datetime}"
            ))),
            (Some(start), Some(end)) if end < start => Err(Error::InvalidFilter(format!(
                "datetime interval ends before it starts: {datetime}"
            ))),
            _ => Ok(()),
        }
    } else {
        start_of(datetime).map(|_| ()).ok_or_else(invalid)
    }
}

/// `Some(None)` for an open end, `None` if unparseable.
fn open_or_start(s: &str) -> Option<Option<DateTime<FixedOffset>>> {
    if s.is_empty() || s == ".." {
        Some(None)
    } else {
        start_of(s).map(Some)
    }
}

fn start_of(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime);
    }
    let date = match s.len() {
        4 if s.chars().all(|c| c.is_ascii_digit()) => {
            NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1)?
        }
        7 => NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()?,
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?,
    };
    let midnight = NaiveTime::from_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&date.and_time(midnight)).fixed_offset())
}

fn comma_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum List {
        Text(String),
        Values(Vec<String>),
    }

    Ok(match List::deserialize(deserializer)? {
        List::Text(s) => split(&s),
        List::Values(values) => values,
    })
}

fn split(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn to_param(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl TryFrom<Filter> for GetFilter {
    type Error = Error;

    fn try_from(filter: Filter) -> Result<GetFilter> {
        let bbox = filter.bbox.as_ref().map(normalize_bbox).transpose()?;
        let intersects = filter
            .intersects
            .map(|intersects| serde_json::to_string(&intersects))
            .transpose()?;
        let query = filter
            .query
            .map(|query| serde_json::to_string(&query))
            .transpose()?;
        let collections = if filter.collections.is_empty() {
            None
        } else {
            Some(filter.collections.join(","))
        };
        let ids = if filter.ids.is_empty() {
            None
        } else {
            Some(filter.ids.join(","))
        };
        Ok(GetFilter {
            bbox,
            datetime: filter.datetime,
            limit: filter.limit.map(|limit| limit.to_string()),
            page: filter.page.map(|page| page.to_string()),
            next: filter.next,
            collections,
            ids,
            intersects,
            query,
            additional_fields: filter
                .additional_fields
                .into_iter()
                .map(|(key, value)| (key, to_param(value)))
                .collect(),
        })
    }
}

impl TryFrom<GetFilter> for Filter {
    type Error = Error;

    fn try_from(get_filter: GetFilter) -> Result<Filter> {
        let number = |key: &str, value: Option<String>| -> Result<Option<u64>> {
            value
                .map(|value| {
                    value.parse::<u64>().map_err(|_| {
                        Error::InvalidFilter(format!("{key} must be a non-negative integer: {value}"))
                    })
                })
                .transpose()
        };
        let intersects = get_filter
            .intersects
            .map(|intersects| serde_json::from_str(&intersects))
            .transpose()?;
        let query = get_filter
            .query
            .map(|query| serde_json::from_str(&query))
            .transpose()?;
        Ok(Filter {
            bbox: get_filter.bbox.map(Bbox::Text),
            datetime: get_filter.datetime,
            limit: number("limit", get_filter.limit)?,
            page: number("page", get_filter.page)?,
            next: get_filter.next,
            collections: get_filter
                .collections
                .map(|collections| split(&collections))
                .unwrap_or_default(),
            ids: get_filter.ids.map(|ids| split(&ids)).unwrap_or_default(),
            intersects,
            query,
            additional_fields: get_filter
                .additional_fields
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        })
    }
}

impl From<&str> for Bbox {
    fn from(s: &str) -> Bbox {
        Bbox::Text(s.to_string())
    }
}

impl From<String> for Bbox {
    fn from(s: String) -> Bbox {
        Bbox::Text(s)
    }
}

impl From<Vec<f64>> for Bbox {
    fn from(coordinates: Vec<f64>) -> Bbox {
        Bbox::Coordinates(coordinates)
    }
}

impl From<[f64; 4]> for Bbox {
    fn from(coordinates: [f64; 4]) -> Bbox {
        Bbox::Coordinates(coordinates.to_vec())
    }
}

impl From<geojson::Geometry> for Bbox {
    fn from(geometry: geojson::Geometry) -> Bbox {
        Bbox::Geometry(geometry)
    }
}

impl TryFrom<&Value> for Bbox {
    type Error = Error;

    /// Reads a bbox from loosely-typed JSON.
    ///
    /// Scalars other than strings are ambiguous and rejected.
    fn try_from(value: &Value) -> Result<Bbox> {
        match value {
            Value::String(s) => Ok(Bbox::Text(s.clone())),
            Value::Array(values) => values
                .iter()
                .map(|v| v.as_f64())
                .collect::<Option<Vec<_>>>()
                .map(Bbox::Coordinates)
                .ok_or_else(|| Error::InvalidBbox(value.to_string())),
            Value::Object(_) => Ok(Bbox::Geometry(geojson::Geometry::from_json_value(
                value.clone(),
            )?)),
            _ => Err(Error::InvalidBbox(value.to_string())),
        }
    }
}
