//! Lokalise binding.
//!
//! In Lokalise, filenames are domains, keys are message keys and
//! translations are the translated messages.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::{Dsn, Provider, ProviderContext, ProviderFactory, ensure_status, unsupported_scheme};
use crate::{
    core::CatalogueBag,
    error::Result,
    http::{Method, RequestOptions, status},
};

pub const SCHEME: &str = "lokalise";
const HOST: &str = "api.lokalise.com/api2";
/// Keys per create request, as recommended by the Lokalise API.
const CHUNK_SIZE: usize = 500;
const NO_KEYS_FOUND: &str = "No keys found with specified filenames.";

#[derive(Debug, Deserialize)]
struct ExportedFile {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Export {
    files: BTreeMap<String, BTreeMap<String, ExportedFile>>,
}

#[derive(Debug, Deserialize)]
struct KeyItem {
    key_id: u64,
}

#[derive(Debug, Deserialize)]
struct Keys {
    keys: Vec<KeyItem>,
}

pub struct LokaliseProvider {
    endpoint: String,
    project_id: String,
    api_key: String,
    context: ProviderContext,
}

impl LokaliseProvider {
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
        context: ProviderContext,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            api_key: api_key.into(),
            context,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn options(&self) -> RequestOptions {
        RequestOptions::new().headers([
            ("X-Api-Token", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ])
    }

    fn url(&self, path: &str) -> String {
        format!("{}/projects/{}/{}", self.endpoint, self.project_id, path)
    }

    fn filename(&self, domain: &str) -> String {
        format!("{}.{}", domain, self.context.loader.format())
    }

    fn domain_of<'a>(&self, filename: &'a str) -> &'a str {
        filename
            .strip_suffix(self.context.loader.format())
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(filename)
    }

    fn export_files(
        &self,
        domains: &[String],
        locales: &[String],
    ) -> Result<BTreeMap<String, BTreeMap<String, ExportedFile>>> {
        let filenames: Vec<String> = domains.iter().map(|d| self.filename(d)).collect();
        let response = self.context.transport.request(
            Method::Post,
            &self.url("files/export"),
            self.options().json(json!({
                "format": self.context.loader.format(),
                "original_filenames": true,
                "directory_prefix": "%LANG_ISO%",
                "filter_langs": locales,
                "filter_filenames": filenames,
            })),
        )?;

        if response.status == status::NOT_ACCEPTABLE {
            let message = serde_json::from_str::<Value>(&response.body)
                .ok()
                .and_then(|body| body["error"]["message"].as_str().map(str::to_string));
            if message.as_deref() == Some(NO_KEYS_FOUND) {
                return Ok(BTreeMap::new());
            }
        }

        let response = ensure_status(response, status::OK, |r| {
            format!("Unable to export translations from Lokalise: \"{}\".", r.body)
        })?;
        let export: Export = response.json("Lokalise export")?;
        Ok(export.files)
    }

    fn key_ids(&self, keys: &[&str], domain: &str) -> Result<Vec<u64>> {
        let response = self.context.transport.request(
            Method::Get,
            &self.url("keys"),
            self.options()
                .query("filter_keys", keys.join(","))
                .query("filter_filenames", self.filename(domain)),
        )?;
        let response = ensure_status(response, status::OK, |r| {
            format!("Unable to get keys ids from Lokalise: \"{}\".", r.body)
        })?;
        let keys: Keys = response.json("Lokalise keys")?;
        Ok(keys.keys.into_iter().map(|key| key.key_id).collect())
    }
}

impl Provider for LokaliseProvider {
    fn name(&self) -> &str {
        SCHEME
    }

    fn read(&self, domains: &[String], locales: &[String]) -> Result<CatalogueBag> {
        let mut bag = CatalogueBag::new();

        for (locale, files) in self.export_files(domains, locales)? {
            for (filename, file) in files {
                let domain = self.domain_of(&filename);
                if !domains.iter().any(|d| d == domain) {
                    info!(
                        filename = filename.as_str(),
                        "translations fetched from Lokalise do not match any requested domain"
                    );
                    continue;
                }
                bag.add_catalogue(self.context.loader.load(&file.content, &locale, domain)?);
            }
        }

        Ok(bag)
    }

    fn write(&self, bag: &CatalogueBag) -> Result<()> {
        let Some(source) = bag
            .catalogue(&self.context.default_locale)
            .or_else(|| bag.catalogues().first())
        else {
            return Ok(());
        };

        let mut keys = Vec::new();
        for domain in bag.domains() {
            for key in source.all_in(domain).keys() {
                let translations: Vec<Value> = bag
                    .catalogues()
                    .iter()
                    .filter(|catalogue| catalogue.has(key, domain))
                    .map(|catalogue| {
                        json!({
                            "language_iso": catalogue.locale(),
                            "translation": catalogue.get(key, domain),
                        })
                    })
                    .collect();

                keys.push(json!({
                    "key_name": key,
                    "platforms": ["web"],
                    // Every platform needs a filename when per-platform key
                    // names are enabled.
                    "filenames": {
                        "web": self.filename(domain),
                        "ios": null,
                        "android": null,
                        "other": null,
                    },
                    "translations": translations,
                }));
            }
        }

        for chunk in keys.chunks(CHUNK_SIZE) {
            let response = self.context.transport.request(
                Method::Post,
                &self.url("keys"),
                self.options().json(json!({ "keys": chunk })),
            )?;
            ensure_status(response, status::OK, |r| {
                format!(
                    "Unable to add keys and translations to Lokalise: \"{}\".",
                    r.body
                )
            })?;
        }

        info!(provider = SCHEME, keys = keys.len(), "wrote keys to Lokalise");
        Ok(())
    }

    fn delete(&self, bag: &CatalogueBag) -> Result<()> {
        let Some(source) = bag
            .catalogue(&self.context.default_locale)
            .or_else(|| bag.catalogues().first())
        else {
            return Ok(());
        };

        let mut ids = Vec::new();
        for (domain, messages) in source.all() {
            let keys: Vec<&str> = messages.keys().map(String::as_str).collect();
            if !keys.is_empty() {
                ids.extend(self.key_ids(&keys, domain)?);
            }
        }

        let response = self.context.transport.request(
            Method::Delete,
            &self.url("keys"),
            self.options().json(json!({ "keys": ids })),
        )?;
        ensure_status(response, status::OK, |r| {
            format!("Unable to delete keys from Lokalise: \"{}\".", r.body)
        })?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct LokaliseProviderFactory;

impl ProviderFactory for LokaliseProviderFactory {
    fn schemes(&self) -> &'static [&'static str] {
        &[SCHEME]
    }

    fn create(&self, dsn: &Dsn, context: &ProviderContext) -> Result<Box<dyn Provider>> {
        if !self.supports(dsn) {
            return Err(unsupported_scheme(dsn, SCHEME, self.schemes()));
        }
        let project_id = dsn.required_user()?;
        let api_key = dsn.required_password()?;
        Ok(Box::new(LokaliseProvider::new(
            dsn.endpoint(HOST),
            project_id,
            api_key,
            context.clone(),
        )))
    }
}
