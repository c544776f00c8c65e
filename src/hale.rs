//! HALE, a superset of HAL that describes how to call a link (`method`,
//! `data`, `render`, `enctype`) and lets links share fragments kept in a
//! `_meta` container through `_ref` lists.

use crate::document::{kind_of, LinkField};
use crate::error::DeserializeError;
use crate::format::{Format, EMBEDDED_KEY, LINKS_KEY};
use serde_json::{Map, Value};

pub const HALE_SYMBOL: &str = "hale";
pub const HALE_MEDIA_TYPES: &[&str] = &["application/vnd.hale+json"];

pub const META_KEY: &str = "_meta";
pub const REF_KEY: &str = "_ref";

pub const HALE_LINK_FIELDS: &[LinkField] = &[
    LinkField::Href,
    LinkField::Templated,
    LinkField::Type,
    LinkField::Deprecation,
    LinkField::Name,
    LinkField::Profile,
    LinkField::Title,
    LinkField::Hreflang,
    LinkField::Method,
    LinkField::Data,
    LinkField::Render,
    LinkField::Enctype,
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hale;

impl Format for Hale {
    fn symbol(&self) -> &'static str {
        HALE_SYMBOL
    }

    fn media_types(&self) -> &'static [&'static str] {
        HALE_MEDIA_TYPES
    }

    fn reserved_keys(&self) -> &'static [&'static str] {
        &[LINKS_KEY, EMBEDDED_KEY, META_KEY]
    }

    fn link_fields(&self) -> &'static [LinkField] {
        HALE_LINK_FIELDS
    }

    /// Merges the `_meta` fragments named in `_ref` into the link. Keys the
    /// link already has win, and earlier references win over later ones.
    fn prepare_link(
        &self,
        relation: &str,
        mut link: Map<String, Value>,
        media: &Map<String, Value>,
    ) -> Result<Map<String, Value>, DeserializeError> {
        let Some(refs) = link.remove(REF_KEY) else {
            return Ok(link);
        };
        let names = match refs {
            Value::String(name) => vec![Value::String(name)],
            Value::Array(names) => names,
            other => {
                return Err(invalid_ref(
                    relation,
                    format!("`_ref` must be a list of names, found {}", kind_of(&other)),
                ))
            }
        };

        let empty = Map::new();
        let meta = match media.get(META_KEY) {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(meta)) => meta,
            Some(other) => {
                return Err(DeserializeError::InvalidDocument {
                    context: format!("`{META_KEY}`"),
                    found: kind_of(other).to_string(),
                })
            }
        };

        for name in &names {
            let Value::String(name) = name else {
                return Err(invalid_ref(
                    relation,
                    format!("`_ref` entries must be strings, found {}", kind_of(name)),
                ));
            };
            match meta.get(name) {
                Some(Value::Object(fragment)) => {
                    for (key, value) in fragment {
                        link.entry(key.clone()).or_insert_with(|| value.clone());
                    }
                }
                Some(other) => {
                    return Err(invalid_ref(
                        relation,
                        format!("`_meta.{name}` must be an object, found {}", kind_of(other)),
                    ))
                }
                None => {
                    return Err(invalid_ref(
                        relation,
                        format!("`_ref` names unknown `_meta` entry `{name}`"),
                    ))
                }
            }
        }
        Ok(link)
    }
}

fn invalid_ref(relation: &str, reason: String) -> DeserializeError {
    DeserializeError::InvalidLink {
        relation: relation.to_string(),
        reason,
    }
}
