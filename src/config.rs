use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::{format, provider::Dsn};

pub const CONFIG_FILE_NAME: &str = ".transyncrc.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_enabled_locales")]
    pub enabled_locales: Vec<String>,
    #[serde(default = "default_translations_dir", alias = "translationsPath")]
    pub translations_dir: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
    #[serde(default = "default_xliff_version")]
    pub xliff_version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

/// One named remote, e.g. `"loco": { "dsn": "loco://KEY@default" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub dsn: String,
    /// Domain allow-list; empty means every domain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
    /// Locale allow-list; empty means the enabled locales.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locales: Vec<String>,
}

impl ProviderConfig {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            domains: Vec::new(),
            locales: Vec::new(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_enabled_locales() -> Vec<String> {
    vec![default_locale()]
}

fn default_translations_dir() -> String {
    "./translations".to_string()
}

fn default_output_format() -> String {
    format::json::FORMAT.to_string()
}

fn default_xliff_version() -> String {
    "1.2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            enabled_locales: default_enabled_locales(),
            translations_dir: default_translations_dir(),
            output_format: default_output_format(),
            xliff_version: default_xliff_version(),
            timeout_secs: default_timeout_secs(),
            providers: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if no locale is enabled, the output format has no
    /// codec, or a provider DSN does not parse.
    pub fn validate(&self) -> Result<()> {
        if self.default_locale.trim().is_empty() {
            bail!("'defaultLocale' must not be empty");
        }
        if self.enabled_locales.is_empty() {
            bail!("'enabledLocales' must list at least one locale");
        }
        if self.output_format != format::json::FORMAT {
            bail!(
                "Unsupported 'outputFormat': \"{}\" (supported: {})",
                self.output_format,
                format::json::FORMAT
            );
        }

        for (name, provider) in &self.providers {
            Dsn::parse(&provider.dsn)
                .with_context(|| format!("Invalid DSN for provider '{}'", name))?;
        }

        Ok(())
    }

    /// Locale allow-list of a provider, falling back to the enabled locales.
    pub fn provider_locales<'a>(&'a self, provider: &'a ProviderConfig) -> &'a [String] {
        if provider.locales.is_empty() {
            &self.enabled_locales
        } else {
            &provider.locales
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against.
    pub root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.enabled_locales, vec!["en"]);
        assert_eq!(config.output_format, "json");
        assert!(config.providers.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "defaultLocale": "fr",
              "enabledLocales": ["fr", "en"],
              "providers": {
                  "loco": { "dsn": "loco://KEY@default", "domains": ["messages"] }
              }
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_locale, "fr");
        assert_eq!(config.enabled_locales, vec!["fr", "en"]);
        assert_eq!(config.providers["loco"].domains, vec!["messages"]);
        assert!(config.providers["loco"].locales.is_empty());
        assert_eq!(config.translations_dir, default_translations_dir());
    }

    #[test]
    fn test_provider_locales_fall_back_to_enabled_locales() {
        let config = Config {
            enabled_locales: vec!["en".to_string(), "fr".to_string()],
            ..Default::default()
        };
        let mut provider = ProviderConfig::new("null://default");
        assert_eq!(config.provider_locales(&provider), ["en", "fr"]);

        provider.locales = vec!["nl".to_string()];
        assert_eq!(config.provider_locales(&provider), ["nl"]);
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("app").join("translations");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("nested");
        fs::create_dir(&sub_dir).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "enabledLocales": ["en", "de"] }"#,
        )
        .unwrap();

        let result = load_config(&sub_dir).unwrap();
        assert!(result.from_file);
        assert_eq!(result.root, dir.path());
        assert_eq!(result.config.enabled_locales, vec!["en", "de"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config, Config::default());
    }

    #[test]
    fn test_validate_rejects_empty_locales() {
        let config = Config {
            enabled_locales: Vec::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("enabledLocales"));
    }

    #[test]
    fn test_validate_rejects_unknown_output_format() {
        let config = Config {
            output_format: "yaml".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("yaml"));
    }

    #[test]
    fn test_validate_rejects_invalid_dsn() {
        let mut config = Config::default();
        config
            .providers
            .insert("broken".to_string(), ProviderConfig::new("not a dsn"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_load_config_with_invalid_dsn_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "providers": { "loco": { "dsn": "::" } } }"#,
        )
        .unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_translations_path_alias() {
        let json = r#"{ "translationsPath": "./i18n" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.translations_dir, "./i18n");
    }

    #[test]
    fn test_serialization_skips_empty_allow_lists() {
        let mut config = Config::default();
        config
            .providers
            .insert("null".to_string(), ProviderConfig::new("null://default"));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("translationsDir"));
        assert!(json.contains(r#""null":{"dsn":"null://default"}"#));
    }
}
