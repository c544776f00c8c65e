use crate::document::{CanonicalDocument, LinkField};
use crate::error::DeserializeError;
use crate::serialization::to_value;
use serde_json::{Map, Value};
use std::fmt::Debug;

pub const LINKS_KEY: &str = "_links";
pub const EMBEDDED_KEY: &str = "_embedded";
/// Relation name under `_links` that declares CURIEs. Always rejected.
pub const CURIES_KEY: &str = "curies";

/// A hypermedia wire format.
///
/// Implementations only describe how they differ from plain HAL: which
/// top-level keys are structural, which link fields survive, and how a raw
/// link object is prepared before those fields are picked out. The walk over
/// attributes, links and embedded resources lives in
/// [`Deserializer`](crate::deserializer::Deserializer) and is shared by all
/// formats.
pub trait Format: Debug + Send + Sync {
    /// Short identifier, e.g. `hal`.
    fn symbol(&self) -> &'static str;

    /// Media types this format claims.
    fn media_types(&self) -> &'static [&'static str];

    /// Top-level keys that are never treated as attributes.
    fn reserved_keys(&self) -> &'static [&'static str] {
        &[LINKS_KEY, EMBEDDED_KEY]
    }

    /// Link fields kept in a transition; anything else is dropped.
    fn link_fields(&self) -> &'static [LinkField];

    /// Runs on every raw link object before the field whitelist is applied.
    /// `media` is the document the link belongs to.
    ///
    /// # Errors
    /// Formats may reject a link they cannot make sense of.
    fn prepare_link(
        &self,
        _relation: &str,
        link: Map<String, Value>,
        _media: &Map<String, Value>,
    ) -> Result<Map<String, Value>, DeserializeError> {
        Ok(link)
    }

    /// Writes a canonical document back out in this format. Link fields the
    /// format does not recognize are left out.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if a transition cannot be converted.
    fn serialize(&self, document: &CanonicalDocument) -> Result<Value, serde_json::Error> {
        to_value(self, document)
    }

    fn is_reserved(&self, key: &str) -> bool {
        self.reserved_keys().contains(&key)
    }

    fn recognizes(&self, key: &str) -> bool {
        LinkField::from_key(key).is_some_and(|field| self.link_fields().contains(&field))
    }
}
