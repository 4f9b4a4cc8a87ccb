// The verbosity stuff is cribbed from https://github.com/clap-rs/clap-verbosity-flag/blob/c621a6a8a7c0b6df8f1464a985a5d076b4915693/src/lib.rs and updated for tracing

#![deny(unused_crate_dependencies)]

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;
use stac_client::{Client, Filter, GetFilter};
use stac_client_io::HttpTransport;
use stac_client_validate::Validator;
use std::io::Write;
use tracing::metadata::Level;
use tracing_subscriber::{
    fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// stac-client: A command-line client for SpatioTemporal Asset Catalog (STAC) APIs
#[derive(Debug, Parser)]
#[command(name = "stac-client", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// The root url of the STAC API, e.g. `http://brazildatacube.dpi.inpe.br/stac/`.
    #[arg(long = "url", global = true)]
    url: Option<String>,

    /// An access token, sent as the `access_token` query parameter of every request.
    #[arg(long = "access-token", global = true)]
    access_token: Option<String>,

    /// Validate every fetched document against the json-schema of its STAC version.
    #[arg(long = "validate", global = true, default_value_t = false)]
    validate: bool,

    /// Print compact JSON instead of pretty JSON.
    #[arg(short = 'c', long = "compact-json", global = true, default_value_t = false)]
    compact_json: bool,

    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        global = true,
        help = ErrorLevel::verbose_help(),
        long_help = ErrorLevel::verbose_long_help(),
    )]
    verbose: u8,

    #[arg(
        long,
        short = 'q',
        action = clap::ArgAction::Count,
        global = true,
        help = ErrorLevel::quiet_help(),
        long_help = ErrorLevel::quiet_long_help(),
        conflicts_with = "verbose",
    )]
    quiet: u8,
}

/// A stac-client subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists the ids of the service's collections, one per line.
    Catalog,

    /// Prints one collection.
    Collection {
        /// The collection id.
        #[arg(long = "collection-id")]
        collection_id: String,
    },

    /// Prints a page of a collection's items, or a single item.
    Items {
        /// The collection id.
        #[arg(long = "collection-id")]
        collection_id: String,

        /// Print only the item with this id.
        #[arg(long = "item-id")]
        item_id: Option<String>,

        /// The page size to be returned from the server.
        #[arg(long = "limit")]
        limit: Option<String>,

        /// The page number, for services that page numerically.
        #[arg(long = "page")]
        page: Option<String>,

        /// Single date+time, or a range ('/' separator), formatted to [RFC 3339,
        /// section 5.6](https://tools.ietf.org/html/rfc3339#section-5.6).
        ///
        /// Use double dots `..` for open date ranges.
        #[arg(long = "datetime")]
        datetime: Option<String>,

        /// Requested bounding box, as a comma-delimited string.
        #[arg(long = "bbox")]
        bbox: Option<String>,
    },

    /// Searches the service.
    Search {
        /// Comma-delimited list of one or more Collection IDs that each matching Item must be in.
        #[arg(long = "collections")]
        collections: Option<String>,

        /// Comma-delimited list of Item ids to return.
        #[arg(long = "ids")]
        ids: Option<String>,

        /// Searches items by performing intersection between their geometry and provided GeoJSON geometry.
        ///
        /// Searches with a geometry are sent as a POST.
        #[arg(long = "intersects")]
        intersects: Option<String>,

        /// The page size to be returned from the server.
        #[arg(long = "limit")]
        limit: Option<String>,

        /// The token of the next page, for services that page by token.
        #[arg(long = "next")]
        next: Option<String>,

        /// The page number, for services that page numerically.
        #[arg(long = "page")]
        page: Option<String>,

        /// Single date+time, or a range ('/' separator), formatted to [RFC 3339,
        /// section 5.6](https://tools.ietf.org/html/rfc3339#section-5.6).
        ///
        /// Use double dots `..` for open date ranges.
        #[arg(long = "datetime")]
        datetime: Option<String>,

        /// Requested bounding box, as a comma-delimited string.
        #[arg(long = "bbox")]
        bbox: Option<String>,
    },

    /// Prints the conformance classes the service implements.
    Conformance,
}

#[derive(Copy, Clone, Debug, Default)]
struct ErrorLevel;

impl Cli {
    /// Runs this command.
    ///
    /// If `init_tracing_subscriber` is `false`, it is expected that the caller
    /// is setting up the appropriate logging.
    pub fn run(self, init_tracing_subscriber: bool) -> Result<()> {
        if init_tracing_subscriber {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer().with_writer(
                        std::io::stderr.with_max_level(self.log_level().unwrap_or(Level::WARN)),
                    ),
                )
                .init();
        }
        let mut client = self.client()?;
        match self.command {
            Command::Catalog => {
                let mut stdout = std::io::stdout().lock();
                for id in client.collection_ids()? {
                    writeln!(stdout, "{id}")?;
                }
                Ok(())
            }
            Command::Collection { ref collection_id } => {
                let collection = client.collection(collection_id)?;
                self.put(&collection)
            }
            Command::Items {
                ref collection_id,
                ref item_id,
                ref limit,
                ref page,
                ref datetime,
                ref bbox,
            } => {
                let collection = client.collection(collection_id)?;
                if let Some(item_id) = item_id {
                    let item = client.item(&collection, item_id)?.ok_or_else(|| {
                        anyhow!("collection {collection_id} does not link to its items")
                    })?;
                    self.put(&item)
                } else {
                    let get_filter = GetFilter {
                        bbox: bbox.clone(),
                        datetime: datetime.clone(),
                        limit: limit.clone(),
                        page: page.clone(),
                        ..Default::default()
                    };
                    let filter = Filter::try_from(get_filter)?;
                    let item_collection = client.items(&collection, Some(filter))?;
                    self.put(&item_collection)
                }
            }
            Command::Search {
                ref collections,
                ref ids,
                ref intersects,
                ref limit,
                ref next,
                ref page,
                ref datetime,
                ref bbox,
            } => {
                let get_filter = GetFilter {
                    bbox: bbox.clone(),
                    datetime: datetime.clone(),
                    limit: limit.clone(),
                    page: page.clone(),
                    next: next.clone(),
                    collections: collections.clone(),
                    ids: ids.clone(),
                    intersects: intersects.clone(),
                    ..Default::default()
                };
                let filter = Filter::try_from(get_filter)?;
                let item_collection = client.search(filter)?;
                self.put(&item_collection)
            }
            Command::Conformance => {
                let conformance = client.conformance()?;
                self.put(&conformance)
            }
        }
    }

    /// Builds a client from the global arguments.
    pub fn client(&self) -> Result<Client<HttpTransport>> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| anyhow!("the STAC API url is required, pass it with --url"))?;
        let mut client = Client::new(url, HttpTransport::new()?);
        if let Some(access_token) = &self.access_token {
            client = client.with_access_token(access_token);
        }
        if self.validate {
            client = client.with_validator(Validator::new());
        }
        tracing::debug!("created client {client}");
        Ok(client)
    }

    fn put(&self, value: &impl Serialize) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        if self.compact_json {
            serde_json::to_writer(&mut stdout, value)?;
        } else {
            serde_json::to_writer_pretty(&mut stdout, value)?;
        }
        writeln!(stdout)?;
        Ok(())
    }

    /// Returns the log level set by the verbosity flags.
    pub fn log_level(&self) -> Option<Level> {
        level_enum(self.verbosity())
    }

    fn verbosity(&self) -> i8 {
        level_value(ErrorLevel::default()) - (self.quiet as i8) + (self.verbose as i8)
    }
}

impl ErrorLevel {
    fn default() -> Option<Level> {
        Some(Level::ERROR)
    }

    fn verbose_help() -> Option<&'static str> {
        Some("Increase verbosity")
    }

    fn verbose_long_help() -> Option<&'static str> {
        None
    }

    fn quiet_help() -> Option<&'static str> {
        Some("Decrease verbosity")
    }

    fn quiet_long_help() -> Option<&'static str> {
        None
    }
}

fn level_enum(verbosity: i8) -> Option<Level> {
    match verbosity {
        i8::MIN..=-1 => None,
        0 => Some(Level::ERROR),
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        4..=i8::MAX => Some(Level::TRACE),
    }
}

fn level_value(level: Option<Level>) -> i8 {
    match level {
        None => -1,
        Some(Level::ERROR) => 0,
        Some(Level::WARN) => 1,
        Some(Level::INFO) => 2,
        Some(Level::DEBUG) => 3,
        Some(Level::TRACE) => 4,
    }
}

#[cfg(test)]
use {assert_cmd as _, mockito as _, rstest as _};
