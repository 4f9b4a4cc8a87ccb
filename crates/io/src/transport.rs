use crate::Result;
use mime::Mime;
use reqwest::{
    blocking::{Client, Response},
    header::CONTENT_TYPE,
};
use serde_json::Value;
use stac_client::{Error, Method, Request, Transport};
use url::Url;

/// A [Transport] over blocking http.
///
/// Redirects are followed. A non-2xx status is an [Error::Transport] and a
/// body that isn't `application/json` or `application/geo+json` is an
/// [Error::Format].
///
/// # Examples
///
/// ```no_run
/// use stac_client::Client;
/// use stac_client_io::HttpTransport;
///
/// let transport = HttpTransport::new().unwrap();
/// let mut client = Client::new("http://brazildatacube.dpi.inpe.br/stac/", transport);
/// let ids = client.collection_ids().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with this crate's user agent.
    pub fn new() -> Result<HttpTransport> {
        let client = Client::builder().user_agent(crate::user_agent()).build()?;
        Ok(HttpTransport { client })
    }

    /// Creates a transport from a configured [reqwest] client, e.g. one with timeouts.
    pub fn with_client(client: Client) -> HttpTransport {
        HttpTransport { client }
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, request: &Request) -> stac_client::Result<Value> {
        let url = request.url_with_query()?;
        let builder = match request.method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => {
                let builder = self.client.post(url.clone());
                match request.body.as_ref() {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };
        let response = builder
            .send()
            .map_err(|error| transport_error(&url, error))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("unsuccessful status")
                    .to_string(),
            });
        }
        check_content_type(&url, &response)?;
        response
            .json()
            .map_err(|error| transport_error(&url, error))
    }
}

fn check_content_type(url: &Url, response: &Response) -> stac_client::Result<()> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let is_json = content_type
        .parse::<Mime>()
        .map(|mime| {
            mime.type_() == mime::APPLICATION
                && (mime.subtype() == mime::JSON
                    || (mime.subtype() == "geo"
                        && mime.suffix().is_some_and(|suffix| suffix == mime::JSON)))
        })
        .unwrap_or(false);
    if is_json {
        Ok(())
    } else {
        tracing::warn!("{url} responded with content type {content_type:?}");
        Err(Error::Format {
            url: url.to_string(),
            content_type: content_type.to_string(),
        })
    }
}

fn transport_error(url: &Url, error: reqwest::Error) -> Error {
    Error::Transport {
        url: url.to_string(),
        status: error.status().map(|status| status.as_u16()),
        message: error.to_string(),
    }
}
