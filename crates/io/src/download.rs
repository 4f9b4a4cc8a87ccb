use crate::{Error, Result};
use reqwest::blocking::Client;
use stac_client::Asset;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use url::Url;

/// Streams asset files to local storage.
///
/// Downloads are independent one-shot requests; nothing is cached.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
}

/// Downloads an href into a directory with a default [Downloader].
///
/// The file is named after the last path segment of the href. Without a
/// directory, the file goes to the current working directory.
///
/// # Examples
///
/// ```no_run
/// let path = stac_client_io::download(
///     "http://stac.test/collections/C4_64_16D/items/a/thumbnail.png",
///     Some("downloads".as_ref()),
/// )
/// .unwrap();
/// ```
pub fn download(href: &str, directory: Option<&Path>) -> Result<PathBuf> {
    Downloader::new()?.download(href, directory)
}

impl Downloader {
    /// Creates a downloader with this crate's user agent.
    pub fn new() -> Result<Downloader> {
        let client = Client::builder().user_agent(crate::user_agent()).build()?;
        Ok(Downloader { client })
    }

    /// Creates a downloader from a configured [reqwest] client.
    pub fn with_client(client: Client) -> Downloader {
        Downloader { client }
    }

    /// Downloads `href` into `directory`, creating the directory if needed.
    ///
    /// The body is streamed to a temporary file in `directory`, which only
    /// replaces the destination once the whole body has arrived. Returns the
    /// path of the written file.
    pub fn download(&self, href: &str, directory: Option<&Path>) -> Result<PathBuf> {
        let url = Url::parse(href)?;
        let file_name = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .map(String::from)
            .ok_or_else(|| Error::NoFileName(href.to_string()))?;
        let directory = match directory {
            Some(directory) => directory.to_path_buf(),
            None => std::env::current_dir()?,
        };
        std::fs::create_dir_all(&directory)?;

        tracing::debug!("GET {href}");
        let mut response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download {
                href: href.to_string(),
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("unsuccessful status")
                    .to_string(),
            });
        }
        let path = directory.join(&file_name);
        let mut file = NamedTempFile::new_in(&directory)?;
        let bytes = response.copy_to(&mut file)?;
        let _ = file.persist(&path).map_err(|error| error.error)?;
        tracing::info!("downloaded {bytes} bytes to {}", path.display());
        Ok(path)
    }

    /// Downloads an asset's file into `directory`.
    pub fn download_asset(&self, asset: &Asset, directory: Option<&Path>) -> Result<PathBuf> {
        self.download(asset.href()?, directory)
    }
}

#[cfg(test)]
mod tests {
    use super::Downloader;
    use crate::Error;
    use mockito::Server;
    use serde_json::json;
    use stac_client::Asset;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn download_creates_directory() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/items/a/thumbnail.png")
            .with_header("content-type", "image/png")
            .with_body(b"not really a png")
            .create();
        let tempdir = TempDir::new().unwrap();
        let directory = tempdir.path().join("nested").join("downloads");
        let path = Downloader::new()
            .unwrap()
            .download(
                &format!("{}/items/a/thumbnail.png", server.url()),
                Some(directory.as_path()),
            )
            .unwrap();
        assert_eq!(path, directory.join("thumbnail.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"not really a png");
        assert_eq!(std::fs::read_dir(&directory).unwrap().count(), 1);
        mock.assert();
    }

    #[test]
    fn interrupted_download_leaves_nothing() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/B02.tif")
            .with_chunked_body(|writer| {
                writer.write_all(b"the first part")?;
                Err(std::io::Error::other("connection dropped"))
            })
            .create();
        let tempdir = TempDir::new().unwrap();
        let _ = Downloader::new()
            .unwrap()
            .download(&format!("{}/B02.tif", server.url()), Some(tempdir.path()))
            .unwrap_err();
        assert_eq!(std::fs::read_dir(tempdir.path()).unwrap().count(), 0);
    }

    #[test]
    fn download_asset() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/B01.tif")
            .with_body("bytes")
            .create();
        let asset: Asset =
            serde_json::from_value(json!({"href": format!("{}/B01.tif", server.url())})).unwrap();
        let tempdir = TempDir::new().unwrap();
        let path = Downloader::new()
            .unwrap()
            .download_asset(&asset, Some(tempdir.path()))
            .unwrap();
        assert!(path.ends_with("B01.tif"));
    }

    #[test]
    fn download_not_found() {
        let mut server = Server::new();
        let _mock = server.mock("GET", "/missing.tif").with_status(404).create();
        let tempdir = TempDir::new().unwrap();
        let error = Downloader::new()
            .unwrap()
            .download(
                &format!("{}/missing.tif", server.url()),
                Some(tempdir.path()),
            )
            .unwrap_err();
        assert!(matches!(error, Error::Download { status: Some(404), .. }));
        assert!(!tempdir.path().join("missing.tif").exists());
    }

    #[test]
    fn download_without_file_name() {
        let error = Downloader::new()
            .unwrap()
            .download("http://stac.test/", None)
            .unwrap_err();
        assert!(matches!(error, Error::NoFileName(_)));
    }
}
