//! Blocking http for [stac-client](https://docs.rs/stac-client).
//!
//! [HttpTransport] plugs into a [stac_client::Client] and [Downloader] writes
//! asset files to disk.
//!
//! # Examples
//!
//! ```no_run
//! use stac_client::Client;
//! use stac_client_io::{HttpTransport, download};
//!
//! let mut client = Client::new("http://brazildatacube.dpi.inpe.br/stac/", HttpTransport::new().unwrap());
//! let collection = client.collection("C4_64_16D_STK-1").unwrap();
//! for item in client.items(&collection, None).unwrap() {
//!     for asset in item.assets().unwrap().values() {
//!         let _ = download(asset.href().unwrap(), Some("downloads".as_ref())).unwrap();
//!     }
//! }
//! ```

mod download;
mod error;
mod transport;

pub use {
    download::{Downloader, download},
    error::Error,
    transport::HttpTransport,
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns a string suitable for use as a HTTP user agent.
pub fn user_agent() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
}
