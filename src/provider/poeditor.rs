//! POEditor binding.
//!
//! In POEditor, terms are message keys, translations are the translated
//! messages and tags are domains. Every call is a form POST carrying the
//! API token and the project id.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::{Dsn, Provider, ProviderContext, ProviderFactory, ensure_status, unsupported_scheme};
use crate::{
    core::CatalogueBag,
    error::Result,
    format,
    http::{Method, RequestOptions, Response, status},
};

pub const SCHEME: &str = "poeditor";
const HOST: &str = "api.poeditor.com/v2";

#[derive(Debug, Deserialize)]
struct ExportResult {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ExportResponse {
    result: ExportResult,
}

pub struct PoEditorProvider {
    endpoint: String,
    project_id: String,
    api_key: String,
    context: ProviderContext,
}

impl PoEditorProvider {
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

    /// POST `fields` to `path`, prefixed with the credentials.
    fn post(&self, path: &str, fields: Vec<(&str, String)>) -> Result<Response> {
        let mut form = vec![
            ("api_token", self.api_key.clone()),
            ("id", self.project_id.clone()),
        ];
        form.extend(fields);
        self.context.transport.request(
            Method::Post,
            &format!("{}/{}", self.endpoint, path),
            RequestOptions::new().form(form),
        )
    }

    /// POEditor export type for the loader's format.
    fn export_type(&self) -> &str {
        match self.context.loader.format() {
            format::json::FORMAT => "key_value_json",
            "xlf" | "xliff" => "xlf",
            other => other,
        }
    }

    fn export(&self, locale: &str, domain: &str) -> Result<String> {
        let response = self.post(
            "projects/export",
            vec![
                ("language", locale.to_string()),
                ("type", self.export_type().to_string()),
                ("filters", json!(["translated"]).to_string()),
                ("tags", json!([domain]).to_string()),
            ],
        )?;
        let response = ensure_status(response, status::OK, |r| {
            format!("Unable to read the POEditor response: {}", r.body)
        })?;
        let export: ExportResponse = response.json("POEditor export")?;

        let response = self.context.transport.request(
            Method::Get,
            &export.result.url,
            RequestOptions::new(),
        )?;
        let response = ensure_status(response, status::OK, |r| {
            format!("Unable to download the POEditor export: {}", r.body)
        })?;
        Ok(response.body)
    }
}

impl Provider for PoEditorProvider {
    fn name(&self) -> &str {
        SCHEME
    }

    fn read(&self, domains: &[String], locales: &[String]) -> Result<CatalogueBag> {
        let mut bag = CatalogueBag::new();

        for locale in locales {
            for domain in domains {
                let content = self.export(locale, domain)?;
                bag.add_catalogue(self.context.loader.load(&content, locale, domain)?);
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

        let terms: Vec<Value> = source
            .all()
            .iter()
            .flat_map(|(domain, messages)| {
                messages
                    .keys()
                    .map(move |id| json!({ "term": id, "reference": id, "tags": [domain] }))
            })
            .collect();
        let response = self.post("terms/add", vec![("data", Value::from(terms).to_string())])?;
        ensure_status(response, status::OK, |r| {
            format!(
                "Unable to add new translation keys to POEditor: \"{}\".",
                r.body
            )
        })?;

        for catalogue in bag.catalogues() {
            let translations: Vec<Value> = catalogue
                .all()
                .values()
                .flat_map(|messages| {
                    messages.iter().map(|(id, message)| {
                        json!({ "term": id, "translation": { "content": message } })
                    })
                })
                .collect();
            if translations.is_empty() {
                continue;
            }

            // `languages/update` overwrites existing translations where
            // `translations/add` would skip them.
            let response = self.post(
                "languages/update",
                vec![
                    ("language", catalogue.locale().to_string()),
                    ("data", Value::from(translations).to_string()),
                ],
            )?;
            ensure_status(response, status::OK, |r| {
                format!(
                    "Unable to add translation messages to POEditor: \"{}\".",
                    r.body
                )
            })?;
        }

        info!(provider = SCHEME, messages = bag.len(), "wrote translations to POEditor");
        Ok(())
    }

    fn delete(&self, bag: &CatalogueBag) -> Result<()> {
        let mut terms = BTreeSet::new();
        for (_, domains) in bag.all() {
            for messages in domains.values() {
                terms.extend(messages.keys().map(String::as_str));
            }
        }
        if terms.is_empty() {
            return Ok(());
        }

        let data: Vec<Value> = terms.iter().map(|term| json!({ "term": term })).collect();
        let response = self.post("terms/delete", vec![("data", Value::from(data).to_string())])?;
        ensure_status(response, status::OK, |r| {
            format!(
                "Unable to delete translation keys on POEditor: \"{}\".",
                r.body
            )
        })?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct PoEditorProviderFactory;

impl ProviderFactory for PoEditorProviderFactory {
    fn schemes(&self) -> &'static [&'static str] {
        &[SCHEME]
    }

    fn create(&self, dsn: &Dsn, context: &ProviderContext) -> Result<Box<dyn Provider>> {
        if !self.supports(dsn) {
            return Err(unsupported_scheme(dsn, SCHEME, self.schemes()));
        }
        let project_id = dsn.required_user()?;
        let api_key = dsn.required_password()?;
        Ok(Box::new(PoEditorProvider::new(
            dsn.endpoint(HOST),
            project_id,
            api_key,
            context.clone(),
        )))
    }
}
