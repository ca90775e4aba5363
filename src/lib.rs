//! Transync - translation provider synchronization
//!
//! Transync keeps the translation catalogues of a project in sync with
//! remote translation services (Loco, Crowdin, Lokalise, POEditor). It pulls
//! remote messages into local files and pushes local messages back, computing
//! the minimal (or forced) set of changes through catalogue diffs.
//!
//! ## Module Structure
//!
//! - `core`: Catalogues, catalogue bags and the diff/merge engine
//! - `provider`: The `Provider` trait, DSN parsing, filtering and the
//!   concrete provider clients
//! - `http`: HTTP transport abstraction used by providers
//! - `format`: Catalogue loaders and dumpers
//! - `store`: Local translation file reader and writer
//! - `sync`: Pull and push orchestration
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `logging`: Diagnostic logging setup

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod http;
pub mod logging;
pub mod provider;
pub mod store;
pub mod sync;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
