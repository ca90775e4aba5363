//! Shared fixtures for unit tests.

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use crate::{
    core::{Catalogue, CatalogueBag},
    error::Result,
    format::JsonFormat,
    http::{Response, mock::MockTransport},
    provider::{Provider, ProviderContext},
    store::{CatalogueReader, CatalogueWriter, WriteOptions},
};

/// A provider context over an empty mock transport, default locale `en`.
pub fn context() -> (ProviderContext, Rc<MockTransport>) {
    context_with([])
}

pub fn context_with(
    responses: impl IntoIterator<Item = Response>,
) -> (ProviderContext, Rc<MockTransport>) {
    let transport = Rc::new(MockTransport::with_responses(responses));
    let ctx = ProviderContext {
        transport: transport.clone(),
        loader: Rc::new(JsonFormat),
        dumper: Rc::new(JsonFormat),
        default_locale: "en".to_string(),
    };
    (ctx, transport)
}

/// Bag from (locale, domain, key, text) rows.
pub fn bag(rows: &[(&str, &str, &str, &str)]) -> CatalogueBag {
    let mut bag = CatalogueBag::new();
    for (locale, domain, key, text) in rows {
        bag.add_catalogue(Catalogue::with_messages(*locale, domain, [(*key, *text)]));
    }
    bag
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Replace the messages of every domain of `catalogue` in `bag`.
fn replace_domains(bag: &mut CatalogueBag, catalogue: &Catalogue) {
    if let Some(existing) = bag.catalogue_mut(catalogue.locale()) {
        for domain in catalogue.domains() {
            let keys: Vec<String> = existing.all_in(domain).keys().cloned().collect();
            for key in keys {
                existing.remove(&key, domain);
            }
        }
    }
    bag.add_catalogue(catalogue.clone());
}

/// One recorded [`CatalogueWriter::write`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteCall {
    pub catalogue: Catalogue,
    pub format: String,
    pub options: WriteOptions,
}

#[derive(Default)]
struct StoreState {
    bag: CatalogueBag,
    reads: Vec<(Vec<PathBuf>, Vec<String>)>,
    writes: Vec<WriteCall>,
}

/// In-memory local store; clones share the same content.
#[derive(Clone, Default)]
pub struct MemoryStore(Rc<RefCell<StoreState>>);

impl MemoryStore {
    pub fn new(bag: CatalogueBag) -> Self {
        let store = Self::default();
        store.0.borrow_mut().bag = bag;
        store
    }

    pub fn bag(&self) -> CatalogueBag {
        self.0.borrow().bag.clone()
    }

    pub fn reads(&self) -> Vec<(Vec<PathBuf>, Vec<String>)> {
        self.0.borrow().reads.clone()
    }

    pub fn writes(&self) -> Vec<WriteCall> {
        self.0.borrow().writes.clone()
    }
}

impl CatalogueReader for MemoryStore {
    fn read(&self, paths: &[PathBuf], locales: &[String], bag: &mut CatalogueBag) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.reads.push((paths.to_vec(), locales.to_vec()));
        for locale in locales {
            let catalogue = state
                .bag
                .catalogue(locale)
                .cloned()
                .unwrap_or_else(|| Catalogue::new(locale.as_str()));
            bag.add_catalogue(catalogue);
        }
        Ok(())
    }
}

impl CatalogueWriter for MemoryStore {
    fn write(&self, catalogue: &Catalogue, format: &str, options: &WriteOptions) -> Result<()> {
        let mut state = self.0.borrow_mut();
        if options.overwrite {
            replace_domains(&mut state.bag, catalogue);
        } else {
            state.bag.add_catalogue(catalogue.clone());
        }
        state.writes.push(WriteCall {
            catalogue: catalogue.clone(),
            format: format.to_string(),
            options: options.clone(),
        });
        Ok(())
    }
}

#[derive(Default)]
struct RemoteState {
    bag: CatalogueBag,
    reads: Vec<(Vec<String>, Vec<String>)>,
    writes: Vec<CatalogueBag>,
    deletes: Vec<CatalogueBag>,
    key_wide_deletes: bool,
}

/// Provider over an in-memory remote bag; clones share the same remote.
#[derive(Clone, Default)]
pub struct MemoryProvider(Rc<RefCell<RemoteState>>);

impl MemoryProvider {
    pub fn new(bag: CatalogueBag) -> Self {
        let provider = Self::default();
        provider.0.borrow_mut().bag = bag;
        provider
    }

    /// Deleting a key removes it from every locale, like Loco assets.
    pub fn with_key_wide_deletes(self) -> Self {
        self.0.borrow_mut().key_wide_deletes = true;
        self
    }

    pub fn bag(&self) -> CatalogueBag {
        self.0.borrow().bag.clone()
    }

    pub fn reads(&self) -> Vec<(Vec<String>, Vec<String>)> {
        self.0.borrow().reads.clone()
    }

    pub fn writes(&self) -> Vec<CatalogueBag> {
        self.0.borrow().writes.clone()
    }

    pub fn deletes(&self) -> Vec<CatalogueBag> {
        self.0.borrow().deletes.clone()
    }
}

impl Provider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn read(&self, domains: &[String], locales: &[String]) -> Result<CatalogueBag> {
        let mut state = self.0.borrow_mut();
        state.reads.push((domains.to_vec(), locales.to_vec()));

        let mut result: CatalogueBag = state
            .bag
            .catalogues()
            .iter()
            .filter(|c| locales.iter().any(|l| l == c.locale()))
            .cloned()
            .collect();
        if domains.is_empty() {
            return Ok(CatalogueBag::new());
        }
        result.retain_domains(domains);
        Ok(result)
    }

    fn write(&self, bag: &CatalogueBag) -> Result<()> {
        let mut state = self.0.borrow_mut();
        for catalogue in bag.catalogues() {
            state.bag.add_catalogue(catalogue.clone());
        }
        state.writes.push(bag.clone());
        Ok(())
    }

    fn delete(&self, bag: &CatalogueBag) -> Result<()> {
        let mut state = self.0.borrow_mut();
        let key_wide = state.key_wide_deletes;
        let remote_locales: Vec<String> =
            state.bag.locales().into_iter().map(String::from).collect();
        for (locale, domains) in bag.all() {
            let targets: Vec<&str> = if key_wide {
                remote_locales.iter().map(String::as_str).collect()
            } else {
                vec![locale]
            };
            for target in targets {
                if let Some(remote) = state.bag.catalogue_mut(target) {
                    for (domain, messages) in domains {
                        for key in messages.keys() {
                            remote.remove(key, domain);
                        }
                    }
                }
            }
        }
        state.deletes.push(bag.clone());
        Ok(())
    }
}
