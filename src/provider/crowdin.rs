//! Crowdin binding.
//!
//! In Crowdin, files are domains, string identifiers are message keys and
//! translations are the translated messages. The default locale owns the
//! source files; every other locale uploads translations against them.

use std::{cell::RefCell, collections::HashMap};

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::{
    Dsn, Provider, ProviderContext, ProviderFactory, ensure_status, paginate, path_segment,
    unsupported_scheme,
};
use crate::{
    core::{Catalogue, CatalogueBag},
    error::{ProviderError, Result},
    http::{Method, RequestOptions, Response, status},
};

pub const SCHEME: &str = "crowdin";
const HOST: &str = "api.crowdin.com/api/v2";
const DOMAIN_OPTION: &str = "domain";
const PAGE_LIMIT: usize = 500;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct FileData {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct StringData {
    id: u64,
    identifier: String,
}

#[derive(Debug, Deserialize)]
struct IdData {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct UrlData {
    url: String,
}

pub struct CrowdinProvider {
    endpoint: String,
    project_id: String,
    api_token: String,
    context: ProviderContext,
    files: RefCell<HashMap<String, u64>>,
}

impl CrowdinProvider {
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        api_token: impl Into<String>,
        context: ProviderContext,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            api_token: api_token.into(),
            context,
            files: RefCell::new(HashMap::new()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn options(&self) -> RequestOptions {
        RequestOptions::new().header("Authorization", format!("Bearer {}", self.api_token))
    }

    fn project_url(&self, path: &str) -> String {
        format!("{}/projects/{}/{}", self.endpoint, self.project_id, path)
    }

    fn file_name(&self, domain: &str) -> String {
        format!("{}.{}", domain, self.context.dumper.format())
    }

    fn send(&self, method: Method, url: &str, options: RequestOptions) -> Result<Response> {
        self.context.transport.request(method, url, options)
    }

    /// Id of the file backing `domain`, listing the project files on a cache
    /// miss.
    fn file_id(&self, domain: &str) -> Result<Option<u64>> {
        if let Some(id) = self.files.borrow().get(domain) {
            return Ok(Some(*id));
        }

        let files = paginate(PAGE_LIMIT, |limit, offset| {
            let response = self.send(
                Method::Get,
                &self.project_url("files"),
                self.options().query("limit", limit).query("offset", offset),
            )?;
            let response = ensure_status(response, status::OK, |_| {
                "Unable to list Crowdin files.".to_string()
            })?;
            let page: Envelope<Vec<Envelope<FileData>>> = response.json("Crowdin files")?;
            Ok(page.data)
        })?;

        let wanted = self.file_name(domain);
        let found = files
            .into_iter()
            .find(|file| file.data.name == wanted)
            .map(|file| file.data.id);
        if let Some(id) = found {
            self.files.borrow_mut().insert(domain.to_string(), id);
        }
        Ok(found)
    }

    fn add_storage(&self, domain: &str, content: String) -> Result<u64> {
        let response = self.send(
            Method::Post,
            &format!("{}/storages", self.endpoint),
            self.options()
                .header("Crowdin-API-FileName", path_segment(&self.file_name(domain)))
                .header("Content-Type", "application/octet-stream")
                .text(content),
        )?;
        let response = ensure_status(response, status::CREATED, |_| {
            format!("Unable to add a Storage in Crowdin for domain \"{}\".", domain)
        })?;
        let storage: Envelope<IdData> = response.json("Crowdin storage")?;
        Ok(storage.data.id)
    }

    fn add_file(&self, domain: &str, content: String) -> Result<()> {
        let storage_id = self.add_storage(domain, content)?;
        let response = self.send(
            Method::Post,
            &self.project_url("files"),
            self.options()
                .json(json!({ "storageId": storage_id, "name": self.file_name(domain) })),
        )?;
        let response = ensure_status(response, status::CREATED, |r| {
            format!(
                "Unable to add a File in Crowdin for domain \"{}\": \"{}\".",
                domain, r.body
            )
        })?;

        let file: Envelope<IdData> = response.json("Crowdin file")?;
        self.files
            .borrow_mut()
            .insert(domain.to_string(), file.data.id);
        debug!(domain, file_id = file.data.id, "added Crowdin file");
        Ok(())
    }

    fn update_file(&self, file_id: u64, domain: &str, content: String) -> Result<()> {
        let storage_id = self.add_storage(domain, content)?;
        let response = self.send(
            Method::Put,
            &self.project_url(&format!("files/{}", file_id)),
            self.options().json(json!({ "storageId": storage_id })),
        )?;
        ensure_status(response, status::OK, |_| {
            format!(
                "Unable to update file in Crowdin for file ID \"{}\" and domain \"{}\".",
                file_id, domain
            )
        })?;
        Ok(())
    }

    fn upload_translations(
        &self,
        file_id: u64,
        domain: &str,
        content: String,
        locale: &str,
    ) -> Result<()> {
        let storage_id = self.add_storage(domain, content)?;
        let response = self.send(
            Method::Post,
            &self.project_url(&format!("translations/{}", path_segment(locale))),
            self.options()
                .json(json!({ "storageId": storage_id, "fileId": file_id })),
        )?;
        ensure_status(response, status::OK, |_| {
            format!(
                "Unable to upload translations to Crowdin for domain \"{}\" and locale \"{}\".",
                domain, locale
            )
        })?;
        Ok(())
    }

    /// Follow a `{"data": {"url": ...}}` response to the file content.
    fn download(&self, response: Response, failure: impl Fn() -> String) -> Result<String> {
        let link: Envelope<UrlData> = response.json("Crowdin download link")?;
        let response = self.send(Method::Get, &link.data.url, RequestOptions::new())?;
        let response = ensure_status(response, status::OK, |_| failure())?;
        Ok(response.body)
    }

    fn export_translations(&self, locale: &str, file_id: u64) -> Result<String> {
        let response = self.send(
            Method::Post,
            &self.project_url("translations/exports"),
            self.options()
                .json(json!({ "targetLanguageId": locale, "fileIds": [file_id] })),
        )?;
        if response.status == status::NO_CONTENT {
            return Err(ProviderError::new(
                format!("No content in exported file {}.", file_id),
                &response,
            )
            .into());
        }
        let response = ensure_status(response, status::OK, |_| {
            format!(
                "Unable to export file {} translations for language {}.",
                file_id, locale
            )
        })?;
        self.download(response, || {
            format!(
                "Unable to download file {} translations content for language {}.",
                file_id, locale
            )
        })
    }

    fn download_source_file(&self, file_id: u64) -> Result<String> {
        let response = self.send(
            Method::Get,
            &self.project_url(&format!("files/{}/download", file_id)),
            self.options(),
        )?;
        let response = ensure_status(response, status::OK, |_| {
            format!("Unable to download source file {}.", file_id)
        })?;
        self.download(response, || {
            format!("Unable to download source file {} content.", file_id)
        })
    }

    /// String identifier -> string id for every string of a file.
    fn map_strings(&self, file_id: u64) -> Result<HashMap<String, u64>> {
        let strings = paginate(PAGE_LIMIT, |limit, offset| {
            let response = self.send(
                Method::Get,
                &self.project_url("strings"),
                self.options()
                    .query("fileId", file_id)
                    .query("limit", limit)
                    .query("offset", offset),
            )?;
            let response = ensure_status(response, status::OK, |r| {
                format!(
                    "Unable to list strings for file {} in project {}. Message: {}.",
                    file_id, self.project_id, r.body
                )
            })?;
            let page: Envelope<Vec<Envelope<StringData>>> = response.json("Crowdin strings")?;
            Ok(page.data)
        })?;

        Ok(strings
            .into_iter()
            .map(|string| (string.data.identifier, string.data.id))
            .collect())
    }

    fn delete_string(&self, string_id: u64) -> Result<()> {
        let response = self.send(
            Method::Delete,
            &self.project_url(&format!("strings/{}", string_id)),
            self.options(),
        )?;
        if response.status == status::NOT_FOUND {
            return Err(ProviderError::new(
                format!(
                    "String ID {} Not Found for the project {}.",
                    string_id, self.project_id
                ),
                &response,
            )
            .into());
        }
        ensure_status(response, status::NO_CONTENT, |r| {
            format!(
                "Unable to delete string {} in project {}. Message: {}.",
                string_id, self.project_id, r.body
            )
        })?;
        Ok(())
    }

    /// Catalogues with the default locale first, so source files exist
    /// before translations are uploaded against them.
    fn ordered<'a>(&self, bag: &'a CatalogueBag) -> Vec<&'a Catalogue> {
        let mut catalogues: Vec<&Catalogue> = bag.catalogues().iter().collect();
        catalogues.sort_by_key(|catalogue| catalogue.locale() != self.context.default_locale);
        catalogues
    }
}

impl Provider for CrowdinProvider {
    fn name(&self) -> &str {
        SCHEME
    }

    fn read(&self, domains: &[String], locales: &[String]) -> Result<CatalogueBag> {
        let mut bag = CatalogueBag::new();

        for domain in domains {
            let Some(file_id) = self.file_id(domain)? else {
                debug!(domain, "no Crowdin file for domain");
                continue;
            };

            for locale in locales {
                let content = if *locale == self.context.default_locale {
                    self.download_source_file(file_id)?
                } else {
                    self.export_translations(locale, file_id)?
                };
                bag.add_catalogue(self.context.loader.load(&content, locale, domain)?);
            }
        }

        Ok(bag)
    }

    fn write(&self, bag: &CatalogueBag) -> Result<()> {
        let catalogues = self.ordered(bag);

        for domain in bag.domains() {
            for catalogue in &catalogues {
                if catalogue.all_in(domain).is_empty() {
                    continue;
                }
                let content = self.context.dumper.dump(catalogue, domain)?;
                let file_id = self.file_id(domain)?;

                if catalogue.locale() == self.context.default_locale {
                    match file_id {
                        Some(file_id) => self.update_file(file_id, domain, content)?,
                        None => self.add_file(domain, content)?,
                    }
                } else if let Some(file_id) = file_id {
                    self.upload_translations(file_id, domain, content, catalogue.locale())?;
                } else {
                    info!(
                        domain,
                        locale = catalogue.locale(),
                        "skipping translations without a Crowdin source file"
                    );
                }
            }
        }

        Ok(())
    }

    fn delete(&self, bag: &CatalogueBag) -> Result<()> {
        let Some(catalogue) = bag.catalogue(&self.context.default_locale) else {
            return Ok(());
        };

        for (domain, messages) in catalogue.all() {
            let Some(file_id) = self.file_id(domain)? else {
                continue;
            };
            let strings = self.map_strings(file_id)?;

            for key in messages.keys() {
                if let Some(string_id) = strings.get(key) {
                    self.delete_string(*string_id)?;
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CrowdinProviderFactory;

impl ProviderFactory for CrowdinProviderFactory {
    fn schemes(&self) -> &'static [&'static str] {
        &[SCHEME]
    }

    fn create(&self, dsn: &Dsn, context: &ProviderContext) -> Result<Box<dyn Provider>> {
        if !self.supports(dsn) {
            return Err(unsupported_scheme(dsn, SCHEME, self.schemes()));
        }
        let project_id = dsn.required_user()?;
        let api_token = dsn.required_password()?;
        let host = match dsn.option(DOMAIN_OPTION) {
            Some(organization) => format!("{}.{}", organization, HOST),
            None => HOST.to_string(),
        };

        Ok(Box::new(CrowdinProvider::new(
            dsn.endpoint(&host),
            project_id,
            api_token,
            context.clone(),
        )))
    }
}
