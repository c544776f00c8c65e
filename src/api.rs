use crate::deserializer::MediaInput;
use crate::document::{CanonicalDocument, Embedded, Transition};
use crate::error::RepresentorError;
use crate::registry::FormatRegistry;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A deserialized hypermedia document, whatever wire format it came from.
/// Thin wrapper around [`CanonicalDocument`] with serialization helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct Representor {
    document: CanonicalDocument,
}

impl Serialize for Representor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.document.serialize(serializer)
    }
}

impl From<CanonicalDocument> for Representor {
    fn from(document: CanonicalDocument) -> Self {
        Self::new(document)
    }
}

impl Representor {
    pub fn new(document: CanonicalDocument) -> Self {
        Self { document }
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.document.attributes
    }

    /// Transitions under `relation`, empty if there are none.
    pub fn transitions(&self, relation: &str) -> &[Transition] {
        self.document
            .transitions
            .get(relation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn embedded(&self, relation: &str) -> Option<&Embedded> {
        self.document.embedded.get(relation)
    }

    pub fn canonical(&self) -> &CanonicalDocument {
        &self.document
    }

    pub fn into_canonical(self) -> CanonicalDocument {
        self.document
    }

    /// Serializes the canonical structure into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Serializes the canonical structure into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self)
    }
}

/// Deserializes `input` declared as `media_type` using the HAL and HALE
/// formats.
///
/// This is the one-call entry point; build a [`FormatRegistry`] yourself to
/// register other formats or to reuse it across calls.
///
/// # Errors
///
/// Returns a `RepresentorError` if no format claims `media_type`, if the
/// input is not JSON, or if the document is not valid in that format.
pub fn deserialize(input: impl Into<MediaInput>, media_type: &str) -> Result<Representor, RepresentorError> {
    let registry = FormatRegistry::with_defaults();
    let deserializer = registry.deserializer_for(media_type, input)?;
    Ok(deserializer.to_document()?)
}
