//! Heritage Catalog
//!
//! Loads the 3D heritage model catalog from the remote catalog service and
//! exposes it to presentation code as a `{status, items, error}` result.
//!
//! - [`CatalogClient`] performs one POST round trip and decodes the
//!   double-encoded envelope.
//! - [`CatalogQuery`] applies an optional location filter and limit.
//! - [`ModelCatalogLoader`] owns one result per page, loads without blocking,
//!   drops stale completions and never writes after its owner is gone.
//! - [`HeritageDirectory`] and the [`pages`] view-models cover the static
//!   content of the site.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use heritage_catalog::{CatalogClient, CatalogConfig, CatalogQuery, ModelCatalogLoader};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CatalogConfig::load()?;
//! let client = Arc::new(CatalogClient::new(&config)?);
//!
//! let loader = ModelCatalogLoader::new(client, CatalogQuery::all().with_location("hampi"));
//! let result = loader.load_and_wait().await;
//! for model in result.items() {
//!     println!("{} ({})", model.name, model.location);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod content;
pub mod envelope;
pub mod error;
pub mod loader;
pub mod pages;
pub mod query;
pub mod types;

pub use client::CatalogClient;
pub use config::CatalogConfig;
pub use content::{slugify, HeritageDirectory, StateSummary, TempleDetail, TempleSummary};
pub use envelope::{decode_catalog, encode_catalog};
pub use error::{CatalogError, CatalogErrorKind, CatalogResult, ConfigError, ContentError};
pub use loader::{LoadHandle, LoadOutcome, ModelCatalogLoader};
pub use pages::DisplayState;
pub use query::{CatalogQuery, ModelFilter};
pub use types::{CatalogQueryResult, CatalogStatus, HeritageModel, ModelId, Review};
