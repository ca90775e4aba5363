use tracing::{info, warn};

use super::{SyncSummary, Synchronizer};
use crate::{core::CatalogueBag, error::Result, provider::Provider};

/// Options of one push run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOptions {
    /// Providers to push to; empty means every configured provider.
    pub providers: Vec<String>,
    /// Domains to push; empty means each provider's domains, or every local
    /// domain when the provider has none configured.
    pub domains: Vec<String>,
    /// Locales to push; empty means the enabled locales.
    pub locales: Vec<String>,
    /// Only send messages the remote does not have yet.
    pub new_only: bool,
    /// Delete remote messages that no longer exist locally before writing.
    pub delete_missing: bool,
}

impl Synchronizer {
    /// Send local translations to each requested provider, in order.
    ///
    /// The first failing provider aborts the run.
    pub fn push(&self, options: &PushOptions) -> Result<Vec<SyncSummary>> {
        let names: Vec<String> = if options.providers.is_empty() {
            self.providers.names().into_iter().map(String::from).collect()
        } else {
            options.providers.clone()
        };
        let locales = self.locales(&options.locales).to_vec();

        let mut summaries = Vec::with_capacity(names.len());
        for name in &names {
            let provider = self.providers.get(name)?;
            summaries.push(self.push_to(name, provider, &locales, options)?);
        }
        Ok(summaries)
    }

    fn push_to(
        &self,
        name: &str,
        provider: &dyn Provider,
        locales: &[String],
        options: &PushOptions,
    ) -> Result<SyncSummary> {
        let scope: &[String] = if options.domains.is_empty() {
            provider.domains()
        } else {
            &options.domains
        };
        let local = self.read_local(locales, scope)?;
        if local.is_empty() {
            warn!(provider = name, "no local translations to push");
            return Ok(SyncSummary::new(name, &local));
        }

        let domains: Vec<String> = if scope.is_empty() {
            local.domains().into_iter().map(String::from).collect()
        } else {
            scope.to_vec()
        };
        let mut remote = if options.new_only || options.delete_missing {
            provider.read(&domains, locales)?
        } else {
            CatalogueBag::new()
        };

        let mut deleted = 0;
        if options.delete_missing {
            let missing = remote.diff(&local);
            if !missing.is_empty() {
                provider.delete(&missing)?;
                deleted = missing.len();
                // Some providers delete a key in every locale at once.
                if options.new_only {
                    remote = provider.read(&domains, locales)?;
                }
            }
        }

        let to_write = if options.new_only {
            local.diff(&remote)
        } else {
            local
        };
        if !to_write.is_empty() {
            provider.write(&to_write)?;
        }

        info!(
            provider = name,
            messages = to_write.len(),
            deleted,
            "pushed translations"
        );
        Ok(SyncSummary {
            deleted,
            ..SyncSummary::new(name, &to_write)
        })
    }
}
