use crate::document::{CanonicalDocument, Embedded, LinkProperties, Transition};
use crate::error::DeserializeError;
use serde_json::Value;

/// Accumulates the pieces of one canonical document.
///
/// A builder is single-use: [`DocumentBuilder::into_canonical`] consumes it,
/// so every embedded document gets a builder of its own.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: CanonicalDocument,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a property. Duplicate names are not an error, the last value wins.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.document.attributes.insert(name.into(), value);
        self
    }

    /// Records a single transition under `relation`.
    ///
    /// # Errors
    /// Returns `DeserializeError::MissingHref` if `href` is empty.
    pub fn add_transition(
        &mut self,
        relation: &str,
        href: impl Into<String>,
        properties: LinkProperties,
    ) -> Result<&mut Self, DeserializeError> {
        let href = href.into();
        if href.is_empty() {
            return Err(missing_href(relation));
        }
        self.document
            .transitions
            .entry(relation.to_string())
            .or_default()
            .push(Transition { href, properties });
        Ok(self)
    }

    /// Records several transitions under one relation, keeping their order.
    /// An empty list records nothing, so every recorded relation holds at
    /// least one transition.
    ///
    /// # Errors
    /// Returns `DeserializeError::MissingHref` if any member has an empty
    /// `href`. Nothing is recorded in that case.
    pub fn add_transition_array(
        &mut self,
        relation: &str,
        transitions: Vec<Transition>,
    ) -> Result<&mut Self, DeserializeError> {
        if transitions.iter().any(|t| t.href.is_empty()) {
            return Err(missing_href(relation));
        }
        if transitions.is_empty() {
            return Ok(self);
        }
        self.document
            .transitions
            .entry(relation.to_string())
            .or_default()
            .extend(transitions);
        Ok(self)
    }

    pub fn add_embedded(&mut self, relation: impl Into<String>, embedded: Embedded) -> &mut Self {
        self.document.embedded.insert(relation.into(), embedded);
        self
    }

    #[must_use]
    pub fn into_canonical(self) -> CanonicalDocument {
        self.document
    }
}

fn missing_href(relation: &str) -> DeserializeError {
    DeserializeError::MissingHref {
        relation: relation.to_string(),
    }
}
