//! Transcat core: the catalog storage engine.
//!
//! This crate stores localization data in a single SQLite file:
//! - [`schema`] - Table metadata and stored rows
//! - [`sql`] - Statement builders rendered from table metadata
//! - [`storage`] - The connection handle, transactions, and statement counters
//! - [`migration`] - Schema versioning and forward migration
//! - [`catalog`] - Create, query, update, and delete operations
//!
//! # Example
//!
//! ```no_run
//! use transcat_core::{Catalog, CatalogConfig};
//! use transcat_proto::{LocaleResolution, Translation, Uuid};
//!
//! let catalog = Catalog::open(CatalogConfig::new("strings.sqlite"))?;
//! let greeting = catalog
//!     .draft_expression("greeting", "Greeting")
//!     .with_translation(Translation::new(Uuid::nil(), "en".parse()?, "Hello"));
//! catalog.create_expression(&greeting)?;
//!
//! let resolved = catalog.resolve(&LocaleResolution::new("en_GB".parse()?))?;
//! assert_eq!(resolved[0].translations[0].value, "Hello");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod migration;
pub mod schema;
pub mod sql;
pub mod storage;

pub use catalog::{Catalog, CreateOptions};
pub use config::{CatalogConfig, KeyCollision};
pub use error::{Error, Result};
pub use migration::{SchemaManager, CURRENT_SCHEMA_VERSION};
pub use storage::{StatementStats, Store};
