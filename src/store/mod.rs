//! Local translation storage.
//!
//! The sync engine only sees the [`CatalogueReader`] and [`CatalogueWriter`]
//! traits. [`FileReader`] and [`FileWriter`] implement them over a
//! translations directory holding one `<domain>.<locale>.<ext>` file per
//! domain and locale.

use std::path::{Path, PathBuf};

use crate::{
    core::{Catalogue, CatalogueBag},
    error::Result,
};

mod files;

pub use files::{FileReader, FileWriter, catalogue_file_name, parse_catalogue_file_name};

/// Loads existing local catalogues.
pub trait CatalogueReader {
    /// Read every catalogue of `locales` found under `paths` into `bag`.
    ///
    /// Paths that do not exist are skipped.
    fn read(&self, paths: &[PathBuf], locales: &[String], bag: &mut CatalogueBag) -> Result<()>;
}

/// Persists one catalogue.
pub trait CatalogueWriter {
    fn write(&self, catalogue: &Catalogue, format: &str, options: &WriteOptions) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Directory the catalogue files are written to.
    pub path: PathBuf,
    /// Requested XLIFF version; ignored by formats that have none.
    pub xliff_version: String,
    /// Replace the stored content of each written domain instead of merging
    /// into it.
    pub overwrite: bool,
}

impl WriteOptions {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            xliff_version: "1.2".to_string(),
            overwrite: false,
        }
    }
}
