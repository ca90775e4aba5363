//! Remote translation providers.
//!
//! Every vendor is reduced to the same [`Provider`] contract over
//! [`CatalogueBag`]s. Vendor-specific concerns (key ids, pagination, request
//! batching, tagging) stay private to each binding.
//!
//! - `dsn`: connection descriptors
//! - `registry`: scheme -> factory table and the named provider collection
//! - `filtering`: locale/domain allow-list decorator
//! - `null`, `loco`, `crowdin`, `lokalise`, `poeditor`: vendor bindings

use std::rc::Rc;

use crate::{
    core::CatalogueBag,
    error::{Error, ProviderError, Result},
    format::{CatalogueDumper, CatalogueLoader},
    http::{HttpTransport, Response},
};

pub mod crowdin;
pub mod dsn;
pub mod filtering;
pub mod loco;
pub mod lokalise;
pub mod null;
pub mod poeditor;
pub mod registry;

pub use dsn::Dsn;
pub use filtering::FilteringProvider;
pub use registry::{ProviderRegistry, TranslationProviders};

/// Uniform read/write/delete contract over a translation vendor.
pub trait Provider {
    /// Identifier of the vendor, e.g. `loco`.
    fn name(&self) -> &str;

    /// Fetch the remote messages of the given domains and locales.
    ///
    /// A (domain, locale) pair the vendor has nothing for is simply absent
    /// from the result.
    fn read(&self, domains: &[String], locales: &[String]) -> Result<CatalogueBag>;

    /// Create messages missing remotely and overwrite the ones present on
    /// both sides. Remote-only messages are left untouched.
    fn write(&self, bag: &CatalogueBag) -> Result<()>;

    /// Remove every key of `bag` from the remote, scoped to its domains and
    /// locales. A missing target is an error.
    fn delete(&self, bag: &CatalogueBag) -> Result<()>;

    /// Domains this provider is restricted to; empty when unrestricted.
    fn domains(&self) -> &[String] {
        &[]
    }
}

/// Collaborators shared by every provider built from one configuration.
#[derive(Clone)]
pub struct ProviderContext {
    pub transport: Rc<dyn HttpTransport>,
    pub loader: Rc<dyn CatalogueLoader>,
    pub dumper: Rc<dyn CatalogueDumper>,
    pub default_locale: String,
}

/// Builds providers for a closed set of DSN schemes.
pub trait ProviderFactory {
    fn schemes(&self) -> &'static [&'static str];

    fn create(&self, dsn: &Dsn, context: &ProviderContext) -> Result<Box<dyn Provider>>;

    fn supports(&self, dsn: &Dsn) -> bool {
        self.schemes().contains(&dsn.scheme())
    }
}

/// Error for a factory handed a DSN it does not build.
pub(crate) fn unsupported_scheme(dsn: &Dsn, provider: &str, supported: &[&str]) -> Error {
    Error::UnsupportedScheme {
        scheme: dsn.scheme().to_string(),
        provider: Some(provider.to_string()),
        supported: supported.iter().map(|s| s.to_string()).collect(),
    }
}

/// Fail with a provider error unless the response has the expected status.
pub(crate) fn ensure_status(
    response: Response,
    expected: u16,
    message: impl FnOnce(&Response) -> String,
) -> Result<Response> {
    if response.status == expected {
        Ok(response)
    } else {
        Err(ProviderError::new(message(&response), &response).into())
    }
}

/// Fetch pages of `limit` items until a page comes back empty.
///
/// The number of pages is never assumed up front.
pub(crate) fn paginate<T>(
    limit: usize,
    mut fetch: impl FnMut(usize, usize) -> Result<Vec<T>>,
) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut offset = 0;
    loop {
        let page = fetch(limit, offset)?;
        if page.is_empty() {
            return Ok(items);
        }
        items.extend(page);
        offset += limit;
    }
}

/// Percent-encode one URL path segment.
pub(crate) fn path_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
