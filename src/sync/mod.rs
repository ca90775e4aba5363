//! One-way synchronization between local catalogues and remote providers.
//!
//! - `pull`: remote -> local, additive by default, mirror in force mode
//! - `push`: local -> remote, optionally new-only and/or deleting
//!   remote-only messages
//!
//! Every run is linear and fails on the first error: fetch the source,
//! optionally diff it against the destination, apply, report.

use std::path::PathBuf;

use crate::{
    core::CatalogueBag,
    error::Result,
    provider::TranslationProviders,
    store::{CatalogueReader, CatalogueWriter},
};

mod pull;
mod push;

pub use pull::PullOptions;
pub use push::PushOptions;

/// What one pull or one provider push changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub provider: String,
    /// Locales that received messages.
    pub locales: Vec<String>,
    /// Domains that received messages.
    pub domains: Vec<String>,
    /// Messages written.
    pub messages: usize,
    /// Messages deleted from the remote (push with `delete_missing`).
    pub deleted: usize,
}

impl SyncSummary {
    fn new(provider: &str, written: &CatalogueBag) -> Self {
        Self {
            provider: provider.to_string(),
            locales: written
                .catalogues()
                .iter()
                .filter(|c| !c.is_empty())
                .map(|c| c.locale().to_string())
                .collect(),
            domains: written.domains().into_iter().map(String::from).collect(),
            messages: written.len(),
            deleted: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages == 0 && self.deleted == 0
    }
}

/// Runs pulls and pushes between the configured providers and the local
/// translation directories.
pub struct Synchronizer {
    providers: TranslationProviders,
    reader: Box<dyn CatalogueReader>,
    writer: Box<dyn CatalogueWriter>,
    enabled_locales: Vec<String>,
    trans_paths: Vec<PathBuf>,
}

impl Synchronizer {
    pub fn new(
        providers: TranslationProviders,
        reader: Box<dyn CatalogueReader>,
        writer: Box<dyn CatalogueWriter>,
        enabled_locales: Vec<String>,
        trans_paths: Vec<PathBuf>,
    ) -> Self {
        Self {
            providers,
            reader,
            writer,
            enabled_locales,
            trans_paths,
        }
    }

    pub fn providers(&self) -> &TranslationProviders {
        &self.providers
    }

    /// `requested`, or the enabled locales when nothing was requested.
    fn locales<'a>(&'a self, requested: &'a [String]) -> &'a [String] {
        if requested.is_empty() {
            &self.enabled_locales
        } else {
            requested
        }
    }

    /// Local catalogues of `locales`, restricted to `domains` unless empty.
    ///
    /// Locales without any message are left out.
    fn read_local(&self, locales: &[String], domains: &[String]) -> Result<CatalogueBag> {
        let mut bag = CatalogueBag::new();
        self.reader.read(&self.trans_paths, locales, &mut bag)?;
        bag.retain_domains(domains);
        Ok(bag
            .into_catalogues()
            .into_iter()
            .filter(|catalogue| !catalogue.is_empty())
            .collect())
    }
}
