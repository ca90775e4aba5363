use tracing::debug;

use super::Provider;
use crate::{core::CatalogueBag, error::Result};

/// Restricts the locales and domains a provider reads.
///
/// `read` intersects the requested domains with the domain allow-list (when
/// one is configured) and always intersects the requested locales with the
/// locale allow-list. `write` and `delete` are forwarded untouched: callers
/// scope the bag before handing it over.
pub struct FilteringProvider {
    inner: Box<dyn Provider>,
    locales: Vec<String>,
    domains: Vec<String>,
}

impl FilteringProvider {
    pub fn new(inner: Box<dyn Provider>, locales: Vec<String>, domains: Vec<String>) -> Self {
        Self {
            inner,
            locales,
            domains,
        }
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }
}

/// Items of `allowed` that are also in `requested`, in `allowed` order.
fn intersect(allowed: &[String], requested: &[String]) -> Vec<String> {
    allowed
        .iter()
        .filter(|item| requested.contains(item))
        .cloned()
        .collect()
}

impl Provider for FilteringProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn read(&self, domains: &[String], locales: &[String]) -> Result<CatalogueBag> {
        let domains = if self.domains.is_empty() {
            domains.to_vec()
        } else {
            intersect(&self.domains, domains)
        };
        let locales = intersect(&self.locales, locales);
        debug!(
            provider = self.inner.name(),
            ?domains,
            ?locales,
            "reading filtered translations"
        );

        self.inner.read(&domains, &locales)
    }

    fn write(&self, bag: &CatalogueBag) -> Result<()> {
        self.inner.write(bag)
    }

    fn delete(&self, bag: &CatalogueBag) -> Result<()> {
        self.inner.delete(bag)
    }

    fn domains(&self) -> &[String] {
        &self.domains
    }
}
