use serde_json::{Map, Value};

use super::{CatalogueDumper, CatalogueLoader};
use crate::{
    core::Catalogue,
    error::{Error, Result},
};

pub const FORMAT: &str = "json";

/// JSON messages: one object per domain, keys are message ids.
///
/// Nested objects are flattened into dotted keys on load, so
/// `{"Common": {"save": "Save"}}` yields `Common.save`, and numbers and
/// booleans load as their text. Dumps are always flat with sorted keys, so a
/// nested file that transync writes back comes out flat.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl CatalogueLoader for JsonFormat {
    fn format(&self) -> &str {
        FORMAT
    }

    fn load(&self, content: &str, locale: &str, domain: &str) -> Result<Catalogue> {
        let mut catalogue = Catalogue::new(locale);
        if content.trim().is_empty() {
            return Ok(catalogue);
        }

        let value: Value = serde_json::from_str(content).map_err(|e| Error::format(FORMAT, e))?;
        match value {
            Value::Object(_) => {
                let mut messages = Vec::new();
                flatten_json(&value, String::new(), &mut messages);
                catalogue.add(messages, domain);
                Ok(catalogue)
            }
            _ => Err(Error::format(FORMAT, "root must be an object")),
        }
    }
}

impl CatalogueDumper for JsonFormat {
    fn format(&self) -> &str {
        FORMAT
    }

    fn dump(&self, catalogue: &Catalogue, domain: &str) -> Result<String> {
        let map: Map<String, Value> = catalogue
            .all_in(domain)
            .iter()
            .map(|(key, text)| (key.clone(), Value::String(text.clone())))
            .collect();
        let content =
            serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| Error::format(FORMAT, e))?;
        Ok(format!("{}\n", content))
    }
}

fn flatten_json(value: &Value, prefix: String, result: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_json(val, new_prefix, result);
            }
        }
        Value::Array(arr) => {
            for (index, val) in arr.iter().enumerate() {
                let new_prefix = if prefix.is_empty() {
                    index.to_string()
                } else {
                    format!("{}.{}", prefix, index)
                };
                flatten_json(val, new_prefix, result);
            }
        }
        Value::String(s) => result.push((prefix, s.clone())),
        Value::Number(n) => result.push((prefix, n.to_string())),
        Value::Bool(b) => result.push((prefix, b.to_string())),
        // null carries no message
        Value::Null => {}
    }
}
