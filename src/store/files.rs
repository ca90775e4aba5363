use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{CatalogueReader, CatalogueWriter, WriteOptions};
use crate::{
    core::{Catalogue, CatalogueBag},
    error::{Error, Result},
    format::{CatalogueDumper, CatalogueLoader},
};

/// `messages`, `en`, `json` -> `messages.en.json`
pub fn catalogue_file_name(domain: &str, locale: &str, format: &str) -> String {
    format!("{}.{}.{}", domain, locale, format)
}

/// Splits `messages+intl-icu.en.json` into (`messages+intl-icu`, `en`).
///
/// Returns `None` when the extension is not `format` or the name has no
/// locale part.
pub fn parse_catalogue_file_name<'a>(file_name: &'a str, format: &str) -> Option<(&'a str, &'a str)> {
    let stem = file_name.strip_suffix(format)?.strip_suffix('.')?;
    let (domain, locale) = stem.rsplit_once('.')?;
    if domain.is_empty() || locale.is_empty() {
        return None;
    }
    Some((domain, locale))
}

/// Reads `<domain>.<locale>.<ext>` files from translation directories.
#[derive(Debug, Clone, Default)]
pub struct FileReader<F> {
    format: F,
}

impl<F: CatalogueLoader> FileReader<F> {
    pub fn new(format: F) -> Self {
        Self { format }
    }

    fn read_file(&self, path: &Path, locale: &str, domain: &str) -> Result<Catalogue> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.format.load(&content, locale, domain)
    }
}

impl<F: CatalogueLoader> CatalogueReader for FileReader<F> {
    fn read(&self, paths: &[PathBuf], locales: &[String], bag: &mut CatalogueBag) -> Result<()> {
        for locale in locales {
            // Locales without files still get a (possibly empty) catalogue.
            let mut catalogue = Catalogue::new(locale.as_str());

            for dir in paths {
                if !dir.is_dir() {
                    debug!(path = %dir.display(), "skipping missing translations directory");
                    continue;
                }

                let entries = WalkDir::new(dir)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|entry| match entry {
                        Ok(entry) => Some(entry),
                        Err(err) => {
                            warn!(error = %err, "unreadable entry in translations directory");
                            None
                        }
                    })
                    .filter(|entry| entry.file_type().is_file());

                for entry in entries {
                    let Some(file_name) = entry.file_name().to_str() else {
                        continue;
                    };
                    let Some((domain, file_locale)) =
                        parse_catalogue_file_name(file_name, self.format.format())
                    else {
                        continue;
                    };
                    if file_locale != locale {
                        continue;
                    }
                    catalogue.merge(self.read_file(entry.path(), locale, domain)?);
                }
            }

            bag.add_catalogue(catalogue);
        }
        Ok(())
    }
}

/// Writes one `<domain>.<locale>.<ext>` file per domain of a catalogue.
///
/// Files are replaced atomically: content goes to a temporary file in the
/// target directory which is then persisted over the destination.
#[derive(Debug, Clone, Default)]
pub struct FileWriter<F> {
    format: F,
}

impl<F: CatalogueLoader + CatalogueDumper> FileWriter<F> {
    pub fn new(format: F) -> Self {
        Self { format }
    }

    fn write_domain(&self, catalogue: &Catalogue, domain: &str, options: &WriteOptions) -> Result<()> {
        let format = CatalogueDumper::format(&self.format);
        let target = options
            .path
            .join(catalogue_file_name(domain, catalogue.locale(), format));

        let mut content = Catalogue::new(catalogue.locale());
        if !options.overwrite && target.exists() {
            let existing = fs::read_to_string(&target).map_err(|e| Error::io(&target, e))?;
            content.merge(self.format.load(&existing, catalogue.locale(), domain)?);
        }
        content.add(catalogue.all_in(domain).clone(), domain);

        let serialized = self.format.dump(&content, domain)?;
        persist(&options.path, &target, serialized.as_bytes())?;

        debug!(
            file = %target.display(),
            messages = catalogue.all_in(domain).len(),
            overwrite = options.overwrite,
            "wrote catalogue file"
        );
        Ok(())
    }
}

impl<F: CatalogueLoader + CatalogueDumper> CatalogueWriter for FileWriter<F> {
    fn write(&self, catalogue: &Catalogue, format: &str, options: &WriteOptions) -> Result<()> {
        let supported = CatalogueDumper::format(&self.format);
        if format != supported {
            return Err(Error::format(
                format,
                format!("output format is not supported; expected \"{}\"", supported),
            ));
        }

        fs::create_dir_all(&options.path).map_err(|e| Error::io(&options.path, e))?;
        for domain in catalogue.domains() {
            self.write_domain(catalogue, domain, options)?;
        }
        Ok(())
    }
}

fn persist(dir: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    file.write_all(content).map_err(|e| Error::io(file.path(), e))?;
    file.persist(target).map_err(|e| Error::io(target, e.error))?;
    Ok(())
}
