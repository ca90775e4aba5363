//! Loco (localise.biz) binding.
//!
//! In Loco, tags are domains, assets are message keys and translations are
//! the translated messages.

use std::collections::BTreeSet;

use tracing::info;

use super::{
    Dsn, Provider, ProviderContext, ProviderFactory, ensure_status, path_segment,
    unsupported_scheme,
};
use crate::{
    core::CatalogueBag,
    error::Result,
    http::{Method, RequestOptions, status},
};

pub const SCHEME: &str = "loco";
const HOST: &str = "localise.biz/api";

pub struct LocoProvider {
    endpoint: String,
    api_key: String,
    context: ProviderContext,
}

impl LocoProvider {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        context: ProviderContext,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            context,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn options(&self) -> RequestOptions {
        RequestOptions::new().header("Authorization", format!("Loco {}", self.api_key))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    fn create_asset(&self, id: &str) -> Result<()> {
        let response = self.context.transport.request(
            Method::Post,
            &self.url("assets"),
            self.options().form([
                ("name", id),
                ("id", id),
                ("type", "text"),
                ("default", "untranslated"),
            ]),
        )?;

        if response.status == status::CONFLICT {
            info!(id, "translation key already exists in Loco");
            return Ok(());
        }
        ensure_status(response, status::CREATED, |r| {
            format!(
                "Unable to add new translation key ({}) to Loco: \"{}\".",
                id, r.body
            )
        })?;
        Ok(())
    }

    fn translate_asset(&self, id: &str, message: &str, locale: &str) -> Result<()> {
        let response = self.context.transport.request(
            Method::Post,
            &self.url(&format!(
                "translations/{}/{}",
                path_segment(id),
                path_segment(locale)
            )),
            self.options().text(message),
        )?;
        ensure_status(response, status::OK, |r| {
            format!(
                "Unable to add translation message \"{}\" (for key: \"{}\" in locale \"{}\") to Loco: \"{}\".",
                message, id, locale, r.body
            )
        })?;
        Ok(())
    }

    fn tag_assets(&self, ids: &[&str], tag: &str, known_tags: &mut Vec<String>) -> Result<()> {
        if !known_tags.iter().any(|known| known == tag) {
            self.create_tag(tag)?;
            known_tags.push(tag.to_string());
        }

        let ids = ids.join(",");
        let response = self.context.transport.request(
            Method::Post,
            &self.url(&format!("tags/{}.json", path_segment(tag))),
            self.options().text(ids.as_str()),
        )?;
        ensure_status(response, status::OK, |r| {
            format!(
                "Unable to add tag ({}) on translation keys ({}) to Loco: \"{}\".",
                tag, ids, r.body
            )
        })?;
        Ok(())
    }

    fn create_tag(&self, tag: &str) -> Result<()> {
        let response = self.context.transport.request(
            Method::Post,
            &self.url("tags.json"),
            self.options().form([("name", tag)]),
        )?;
        ensure_status(response, status::CREATED, |r| {
            format!("Unable to create tag ({}) on Loco: \"{}\".", tag, r.body)
        })?;
        Ok(())
    }

    fn tags(&self) -> Result<Vec<String>> {
        let response =
            self.context
                .transport
                .request(Method::Get, &self.url("tags.json"), self.options())?;
        let response = ensure_status(response, status::OK, |r| {
            format!("Unable to get tags on Loco: \"{}\".", r.body)
        })?;
        if response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        response.json("Loco tags")
    }

    fn delete_asset(&self, id: &str) -> Result<()> {
        let response = self.context.transport.request(
            Method::Delete,
            &self.url(&format!("assets/{}.json", path_segment(id))),
            self.options(),
        )?;
        ensure_status(response, status::OK, |r| {
            format!(
                "Unable to delete translation key ({}) from Loco: \"{}\".",
                id, r.body
            )
        })?;
        Ok(())
    }
}

impl Provider for LocoProvider {
    fn name(&self) -> &str {
        SCHEME
    }

    fn read(&self, domains: &[String], locales: &[String]) -> Result<CatalogueBag> {
        let mut bag = CatalogueBag::new();
        let format = self.context.loader.format().to_string();

        for locale in locales {
            // One export per tag keeps each domain's messages apart.
            for domain in domains {
                let response = self.context.transport.request(
                    Method::Get,
                    &self.url(&format!(
                        "export/locale/{}.{}",
                        path_segment(locale),
                        format
                    )),
                    self.options().query("filter", domain),
                )?;
                let response = ensure_status(response, status::OK, |r| {
                    format!("Unable to read the Loco response: \"{}\".", r.body)
                })?;

                bag.add_catalogue(self.context.loader.load(&response.body, locale, domain)?);
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

        let mut known_tags = self.tags()?;
        for (domain, messages) in source.all() {
            let ids: Vec<&str> = messages.keys().map(String::as_str).collect();
            for id in &ids {
                self.create_asset(id)?;
            }
            if !ids.is_empty() {
                self.tag_assets(&ids, domain, &mut known_tags)?;
            }
        }

        for catalogue in bag.catalogues() {
            for messages in catalogue.all().values() {
                for (id, message) in messages {
                    self.translate_asset(id, message, catalogue.locale())?;
                }
            }
        }

        info!(
            provider = SCHEME,
            messages = bag.len(),
            "wrote translations to Loco"
        );
        Ok(())
    }

    fn delete(&self, bag: &CatalogueBag) -> Result<()> {
        let mut deleted = BTreeSet::new();
        for (_, domains) in bag.all() {
            for messages in domains.values() {
                for id in messages.keys() {
                    if deleted.insert(id.as_str()) {
                        self.delete_asset(id)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct LocoProviderFactory;

impl ProviderFactory for LocoProviderFactory {
    fn schemes(&self) -> &'static [&'static str] {
        &[SCHEME]
    }

    fn create(&self, dsn: &Dsn, context: &ProviderContext) -> Result<Box<dyn Provider>> {
        if !self.supports(dsn) {
            return Err(unsupported_scheme(dsn, SCHEME, self.schemes()));
        }
        let api_key = dsn.required_user()?;
        Ok(Box::new(LocoProvider::new(
            dsn.endpoint(HOST),
            api_key,
            context.clone(),
        )))
    }
}
