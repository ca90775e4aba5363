use std::collections::BTreeSet;

use tracing::debug;

use super::{
    Dsn, FilteringProvider, Provider, ProviderContext, ProviderFactory,
    crowdin::CrowdinProviderFactory, loco::LocoProviderFactory,
    lokalise::LokaliseProviderFactory, null::NullProviderFactory,
    poeditor::PoEditorProviderFactory,
};
use crate::{
    config::Config,
    error::{Error, Result},
};

/// Scheme -> factory table, fixed at construction.
pub struct ProviderRegistry {
    factories: Vec<Box<dyn ProviderFactory>>,
}

impl ProviderRegistry {
    /// Fails when two factories claim the same scheme.
    pub fn new(factories: Vec<Box<dyn ProviderFactory>>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for scheme in factories.iter().flat_map(|f| f.schemes()) {
            if !seen.insert(*scheme) {
                return Err(Error::Config(format!(
                    "scheme \"{}\" is registered by more than one provider factory",
                    scheme
                )));
            }
        }
        Ok(Self { factories })
    }

    /// Registry of every vendor shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            factories: vec![
                Box::new(NullProviderFactory),
                Box::new(LocoProviderFactory),
                Box::new(CrowdinProviderFactory),
                Box::new(LokaliseProviderFactory),
                Box::new(PoEditorProviderFactory),
            ],
        }
    }

    pub fn schemes(&self) -> Vec<&'static str> {
        self.factories
            .iter()
            .flat_map(|f| f.schemes().iter().copied())
            .collect()
    }

    pub fn create(&self, dsn: &Dsn, context: &ProviderContext) -> Result<Box<dyn Provider>> {
        let factory = self
            .factories
            .iter()
            .find(|f| f.supports(dsn))
            .ok_or_else(|| Error::UnsupportedScheme {
                scheme: dsn.scheme().to_string(),
                provider: None,
                supported: self.schemes().into_iter().map(String::from).collect(),
            })?;
        debug!(dsn = %dsn.redacted(), "creating provider");
        factory.create(dsn, context)
    }
}

/// Named providers of one configuration, in configuration order.
#[derive(Default)]
pub struct TranslationProviders {
    providers: Vec<(String, Box<dyn Provider>)>,
}

impl TranslationProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every configured provider, each wrapped in a
    /// [`FilteringProvider`] over its allow-lists.
    pub fn from_config(
        config: &Config,
        registry: &ProviderRegistry,
        context: &ProviderContext,
    ) -> Result<Self> {
        let mut providers = Self::new();
        for (name, provider_config) in &config.providers {
            let dsn = Dsn::parse(&provider_config.dsn)?;
            let provider = registry.create(&dsn, context)?;
            providers.insert(
                name.clone(),
                Box::new(FilteringProvider::new(
                    provider,
                    config.provider_locales(provider_config).to_vec(),
                    provider_config.domains.clone(),
                )),
            );
        }
        Ok(providers)
    }

    /// Add or replace the provider registered under `name`.
    pub fn insert(&mut self, name: impl Into<String>, provider: Box<dyn Provider>) {
        let name = name.into();
        match self.providers.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = provider,
            None => self.providers.push((name, provider)),
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn Provider> {
        self.providers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, provider)| provider.as_ref())
            .ok_or_else(|| Error::UnknownProvider {
                name: name.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
