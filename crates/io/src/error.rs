use thiserror::Error;

/// Crate-specific error enum
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An error occurred when downloading an href.
    #[error("error when downloading href={href}: {message}")]
    Download {
        /// The href that we were trying to download.
        href: String,

        /// The http status, if the server responded.
        status: Option<u16>,

        /// The underlying error message.
        message: String,
    },

    /// [std::io::Error]
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The href has no path segment to name the downloaded file after.
    #[error("no file name in href: {0}")]
    NoFileName(String),

    #[error(transparent)]
    /// [reqwest::Error]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    /// [stac_client::Error]
    StacClient(#[from] stac_client::Error),

    /// [url::ParseError]
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}
