use tracing::info;

use super::{SyncSummary, Synchronizer};
use crate::{
    core::{CatalogueBag, operation},
    error::{Error, Result},
    format,
    store::WriteOptions,
};

/// Options of one pull run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullOptions {
    /// Name of the configured provider to pull from.
    pub provider: String,
    /// Domains to pull; empty means the provider's domains, then the domains
    /// found locally.
    pub domains: Vec<String>,
    /// Locales to pull; empty means the enabled locales.
    pub locales: Vec<String>,
    /// Mirror the remote content instead of adding missing messages.
    pub force: bool,
    pub output_format: String,
    pub xliff_version: String,
}

impl PullOptions {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            domains: Vec::new(),
            locales: Vec::new(),
            force: false,
            output_format: format::json::FORMAT.to_string(),
            xliff_version: "1.2".to_string(),
        }
    }
}

impl Synchronizer {
    /// Bring remote translations into the local translation directory.
    ///
    /// Without `force` only messages missing locally are written and local
    /// texts are never replaced. With `force` every pulled domain file is
    /// replaced by the remote content.
    pub fn pull(&self, options: &PullOptions) -> Result<SyncSummary> {
        let provider = self.providers.get(&options.provider)?;
        let locales = self.locales(&options.locales).to_vec();

        let mut local = None;
        let domains = if !options.domains.is_empty() {
            options.domains.clone()
        } else if !provider.domains().is_empty() {
            provider.domains().to_vec()
        } else {
            let bag = self.read_local(&locales, &[])?;
            let domains = bag.domains().into_iter().map(String::from).collect();
            local = Some(bag);
            domains
        };

        let remote = provider.read(&domains, &locales)?;

        let written = if options.force {
            operation::target(&remote)
        } else {
            let local = match local {
                Some(mut bag) => {
                    bag.retain_domains(&domains);
                    bag
                }
                None => self.read_local(&locales, &domains)?,
            };
            remote.diff(&local)
        };

        self.write_local(&written, options)?;

        info!(
            provider = options.provider.as_str(),
            force = options.force,
            messages = written.len(),
            "pulled translations"
        );
        Ok(SyncSummary::new(&options.provider, &written))
    }

    fn write_local(&self, bag: &CatalogueBag, options: &PullOptions) -> Result<()> {
        if bag.is_empty() {
            return Ok(());
        }
        let path = self.trans_paths.last().ok_or_else(|| {
            Error::Config("no translations directory to write pulled messages to".to_string())
        })?;

        let write_options = WriteOptions {
            xliff_version: options.xliff_version.clone(),
            overwrite: options.force,
            ..WriteOptions::new(path)
        };
        for catalogue in bag.catalogues() {
            if catalogue.is_empty() {
                continue;
            }
            self.writer
                .write(catalogue, &options.output_format, &write_options)?;
        }
        Ok(())
    }
}
