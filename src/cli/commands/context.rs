use std::{env, path::PathBuf, rc::Rc, time::Duration};

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, ConfigLoadResult, load_config},
    format::JsonFormat,
    http::ReqwestTransport,
    provider::{ProviderContext, ProviderRegistry, TranslationProviders},
    store::{FileReader, FileWriter},
    sync::Synchronizer,
};

/// Everything a sync command needs, resolved from the config file and the
/// command line.
pub struct SyncContext {
    pub config: Config,
    pub translations_dir: PathBuf,
    pub synchronizer: Synchronizer,
}

impl SyncContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to resolve the working directory")?;
        let ConfigLoadResult {
            config,
            root,
            from_file,
        } = load_config(&cwd)?;
        if !from_file {
            debug!("no {} found, using default configuration", CONFIG_FILE_NAME);
        }

        let translations_dir = match &common.translations_dir {
            Some(dir) => cwd.join(dir),
            None => root.join(&config.translations_dir),
        };

        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))
            .context("Failed to create the HTTP client")?;
        let provider_context = ProviderContext {
            transport: Rc::new(transport),
            loader: Rc::new(JsonFormat),
            dumper: Rc::new(JsonFormat),
            default_locale: config.default_locale.clone(),
        };
        let providers = TranslationProviders::from_config(
            &config,
            &ProviderRegistry::builtin(),
            &provider_context,
        )
        .context("Failed to set up translation providers")?;

        let synchronizer = Synchronizer::new(
            providers,
            Box::new(FileReader::new(JsonFormat)),
            Box::new(FileWriter::new(JsonFormat)),
            config.enabled_locales.clone(),
            vec![translations_dir.clone()],
        );

        Ok(Self {
            config,
            translations_dir,
            synchronizer,
        })
    }
}
