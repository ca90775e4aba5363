use super::{Dsn, Provider, ProviderContext, ProviderFactory, unsupported_scheme};
use crate::{core::CatalogueBag, error::Result};

pub const SCHEME: &str = "null";

/// Provider that holds nothing and accepts everything.
#[derive(Debug, Default)]
pub struct NullProvider;

impl Provider for NullProvider {
    fn name(&self) -> &str {
        SCHEME
    }

    fn read(&self, _domains: &[String], _locales: &[String]) -> Result<CatalogueBag> {
        Ok(CatalogueBag::new())
    }

    fn write(&self, _bag: &CatalogueBag) -> Result<()> {
        Ok(())
    }

    fn delete(&self, _bag: &CatalogueBag) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NullProviderFactory;

impl ProviderFactory for NullProviderFactory {
    fn schemes(&self) -> &'static [&'static str] {
        &[SCHEME]
    }

    fn create(&self, dsn: &Dsn, _context: &ProviderContext) -> Result<Box<dyn Provider>> {
        if !self.supports(dsn) {
            return Err(unsupported_scheme(dsn, SCHEME, self.schemes()));
        }
        Ok(Box::new(NullProvider))
    }
}
