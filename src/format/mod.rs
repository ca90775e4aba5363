//! Catalogue codecs.
//!
//! Providers receive raw exports from the vendor and turn them into
//! catalogues through a [`CatalogueLoader`]; uploads are serialized with a
//! [`CatalogueDumper`]. The on-disk store uses the same codecs.

use crate::{core::Catalogue, error::Result};

pub mod json;

pub use json::JsonFormat;

/// Parses serialized messages of one (locale, domain) pair.
pub trait CatalogueLoader {
    /// File extension of the handled format, e.g. `json`.
    fn format(&self) -> &str;

    fn load(&self, content: &str, locale: &str, domain: &str) -> Result<Catalogue>;
}

/// Serializes the messages of one domain of a catalogue.
pub trait CatalogueDumper {
    fn format(&self) -> &str;

    fn dump(&self, catalogue: &Catalogue, domain: &str) -> Result<String>;
}
