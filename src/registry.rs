use crate::deserializer::{Deserializer, MediaInput};
use crate::document::CanonicalDocument;
use crate::error::{RegistryError, RepresentorError};
use crate::format::Format;
use crate::hal::Hal;
use crate::hale::Hale;
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Catalogue of formats, keyed by symbol and by every media type they claim.
///
/// The registry is a plain value: build it once at startup and hand it to
/// whoever needs to dispatch on a `Content-Type`. Hosts that register while
/// other threads look up should put it behind an `RwLock`.
#[derive(Debug, Default, Clone)]
pub struct FormatRegistry {
    formats: BTreeMap<String, Arc<dyn Format>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that knows HAL and HALE.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for format in [Arc::new(Hal) as Arc<dyn Format>, Arc::new(Hale)] {
            registry.insert(format);
        }
        registry
    }

    /// Adds formats to the catalogue.
    ///
    /// Re-registering a format under the same symbol replaces it, dropping
    /// every key the previous format held. A key already claimed by a format
    /// with a different symbol is a conflict.
    ///
    /// # Errors
    /// Returns `RegistryError::Conflict` on the first clashing key; the
    /// registry is left unchanged in that case.
    pub fn register<I>(&mut self, formats: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn Format>>,
    {
        let formats: Vec<_> = formats.into_iter().collect();
        let mut claimed: BTreeMap<String, &'static str> = BTreeMap::new();

        for format in &formats {
            for key in keys_of(format.as_ref()) {
                let existing = claimed
                    .get(&key)
                    .copied()
                    .or_else(|| self.formats.get(&key).map(|f| f.symbol()));
                if let Some(existing) = existing {
                    if existing != format.symbol() {
                        return Err(RegistryError::Conflict {
                            key,
                            existing: existing.to_string(),
                            incoming: format.symbol().to_string(),
                        });
                    }
                }
                claimed.insert(key, format.symbol());
            }
        }

        for format in formats {
            self.insert(format);
        }
        Ok(())
    }

    /// The current catalogue, one entry per symbol or media type.
    pub fn registered(&self) -> &BTreeMap<String, Arc<dyn Format>> {
        &self.formats
    }

    /// Resolves a symbol or media type. Media type parameters and case are
    /// ignored, so a raw `Content-Type` header value can be passed as is.
    ///
    /// # Errors
    /// Returns `RegistryError::NotRegistered` if nothing claims `key`.
    pub fn lookup(&self, key: &str) -> Result<&dyn Format, RegistryError> {
        self.formats
            .get(&normalize_media_type(key))
            .map(|format| format.as_ref())
            .ok_or_else(|| RegistryError::NotRegistered {
                key: key.to_string(),
            })
    }

    /// Looks up the format for `media_type` and builds a deserializer for `input`.
    ///
    /// # Errors
    /// Fails if the media type is unknown or the input cannot be parsed.
    pub fn deserializer_for(
        &self,
        media_type: &str,
        input: impl Into<MediaInput>,
    ) -> Result<Deserializer<'_>, RepresentorError> {
        let format = self.lookup(media_type)?;
        Ok(Deserializer::new(format, input)?)
    }

    /// Writes `document` in the format registered for `media_type`.
    ///
    /// # Errors
    /// Fails if the media type is unknown or the document cannot be converted.
    pub fn serialize(
        &self,
        media_type: &str,
        document: &CanonicalDocument,
    ) -> Result<Value, RepresentorError> {
        let format = self.lookup(media_type)?;
        Ok(format.serialize(document)?)
    }

    fn insert(&mut self, format: Arc<dyn Format>) {
        debug!(
            "Registering format `{}` for {:?}",
            format.symbol(),
            format.media_types()
        );
        let symbol = format.symbol();
        self.formats.retain(|_, existing| existing.symbol() != symbol);
        for key in keys_of(format.as_ref()) {
            self.formats.insert(key, Arc::clone(&format));
        }
    }
}

fn keys_of(format: &dyn Format) -> Vec<String> {
    std::iter::once(format.symbol())
        .chain(format.media_types().iter().copied())
        .map(normalize_media_type)
        .collect()
}

/// `Application/HAL+JSON; charset=utf-8` → `application/hal+json`.
pub fn normalize_media_type(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
