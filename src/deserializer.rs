use crate::api::Representor;
use crate::builder::DocumentBuilder;
use crate::document::{kind_of, CanonicalDocument, Embedded, LinkField, LinkProperties, Transition};
use crate::error::DeserializeError;
use crate::format::{Format, CURIES_KEY, EMBEDDED_KEY, LINKS_KEY};
use crate::utils::byte_offset;
use log::{debug, trace};
use miette::NamedSource;
use serde_json::{Map, Value};

/// Embedding levels accepted unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Raw input handed to a deserializer: either serialized text or an
/// already decoded JSON tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaInput {
    Text(String),
    Value(Value),
}

impl From<&str> for MediaInput {
    fn from(text: &str) -> Self {
        MediaInput::Text(text.to_string())
    }
}

impl From<String> for MediaInput {
    fn from(text: String) -> Self {
        MediaInput::Text(text)
    }
}

impl From<Value> for MediaInput {
    fn from(value: Value) -> Self {
        MediaInput::Value(value)
    }
}

/// Reads one hypermedia document in the given format.
///
/// Embedded resources are read by the same deserializer with the same
/// format, one level deeper each time.
#[derive(Debug)]
pub struct Deserializer<'f> {
    format: &'f dyn Format,
    media: Map<String, Value>,
    max_depth: usize,
}

impl<'f> Deserializer<'f> {
    /// Builds a deserializer, parsing `input` first if it is text.
    ///
    /// # Errors
    /// Returns `DeserializeError::Parse` if the text is not JSON, and
    /// `DeserializeError::InvalidDocument` if the root is not an object.
    pub fn new(format: &'f dyn Format, input: impl Into<MediaInput>) -> Result<Self, DeserializeError> {
        let value = match input.into() {
            MediaInput::Text(text) => parse(format, text)?,
            MediaInput::Value(value) => value,
        };
        let media = match value {
            Value::Object(media) => media,
            other => {
                return Err(DeserializeError::InvalidDocument {
                    context: "the document root".to_string(),
                    found: kind_of(&other).to_string(),
                })
            }
        };
        Ok(Self {
            format,
            media,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn format(&self) -> &'f dyn Format {
        self.format
    }

    /// Produces the canonical document.
    ///
    /// # Errors
    /// Fails on CURIE declarations, links without `href`, malformed links or
    /// containers, and nesting deeper than the configured limit. A failure
    /// anywhere in an embedded resource fails the whole document.
    pub fn to_canonical(&self) -> Result<CanonicalDocument, DeserializeError> {
        debug!("Deserializing {} document", self.format.symbol());
        self.build(&self.media, 0)
    }

    /// # Errors
    /// Same as [`Deserializer::to_canonical`].
    pub fn to_document(&self) -> Result<Representor, DeserializeError> {
        self.to_canonical().map(Representor::new)
    }

    fn build(&self, media: &Map<String, Value>, depth: usize) -> Result<CanonicalDocument, DeserializeError> {
        if depth > self.max_depth {
            return Err(DeserializeError::DepthExceeded {
                max: self.max_depth,
            });
        }
        let mut builder = DocumentBuilder::new();
        self.deserialize_properties(&mut builder, media);
        self.deserialize_links(&mut builder, media)?;
        self.deserialize_embedded(&mut builder, media, depth)?;
        Ok(builder.into_canonical())
    }

    fn deserialize_properties(&self, builder: &mut DocumentBuilder, media: &Map<String, Value>) {
        for (key, value) in media {
            if !self.format.is_reserved(key) {
                builder.add_attribute(key.clone(), value.clone());
            }
        }
    }

    fn deserialize_links(
        &self,
        builder: &mut DocumentBuilder,
        media: &Map<String, Value>,
    ) -> Result<(), DeserializeError> {
        let Some(links) = container(media, LINKS_KEY)? else {
            return Ok(());
        };
        if links.contains_key(CURIES_KEY) {
            return Err(DeserializeError::UnsupportedCuries);
        }

        for (relation, value) in links {
            match value {
                Value::Array(members) => {
                    let transitions = members
                        .iter()
                        .map(|member| -> Result<Transition, DeserializeError> {
                            let (href, properties) = self.read_link(relation, member, media)?;
                            Ok(Transition { href, properties })
                        })
                        .collect::<Result<Vec<_>, DeserializeError>>()?;
                    builder.add_transition_array(relation, transitions)?;
                }
                single => {
                    let (href, properties) = self.read_link(relation, single, media)?;
                    builder.add_transition(relation, href, properties)?;
                }
            }
        }
        Ok(())
    }

    /// Splits one raw link object into its `href` and the remaining
    /// recognized properties.
    fn read_link(
        &self,
        relation: &str,
        value: &Value,
        media: &Map<String, Value>,
    ) -> Result<(String, LinkProperties), DeserializeError> {
        let Value::Object(link) = value else {
            return Err(invalid_link(
                relation,
                format!("expected a link object, found {}", kind_of(value)),
            ));
        };

        let mut link = self.format.prepare_link(relation, link.clone(), media)?;
        link.retain(|key, _| {
            let keep = self.format.recognizes(key);
            if !keep {
                trace!("Dropping unrecognized link field `{key}` under `{relation}`");
            }
            keep
        });

        let href = match link.remove(LinkField::Href.key()) {
            Some(Value::String(href)) => href,
            None | Some(Value::Null) => {
                return Err(DeserializeError::MissingHref {
                    relation: relation.to_string(),
                })
            }
            Some(other) => {
                return Err(invalid_link(
                    relation,
                    format!("`href` must be a string, found {}", kind_of(&other)),
                ))
            }
        };
        Ok((href, LinkProperties::take_from(&mut link)))
    }

    fn deserialize_embedded(
        &self,
        builder: &mut DocumentBuilder,
        media: &Map<String, Value>,
        depth: usize,
    ) -> Result<(), DeserializeError> {
        let Some(embedded) = container(media, EMBEDDED_KEY)? else {
            return Ok(());
        };

        for (relation, value) in embedded {
            let entry = match value {
                Value::Array(members) => Embedded::Many(
                    members
                        .iter()
                        .map(|member| self.embedded_document(relation, member, depth))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                single => Embedded::Single(Box::new(self.embedded_document(relation, single, depth)?)),
            };
            builder.add_embedded(relation.clone(), entry);
        }
        Ok(())
    }

    fn embedded_document(
        &self,
        relation: &str,
        value: &Value,
        depth: usize,
    ) -> Result<CanonicalDocument, DeserializeError> {
        match value {
            Value::Object(media) => self.build(media, depth + 1),
            other => Err(DeserializeError::InvalidDocument {
                context: format!("embedded resource `{relation}`"),
                found: kind_of(other).to_string(),
            }),
        }
    }
}

fn parse(format: &dyn Format, text: String) -> Result<Value, DeserializeError> {
    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(e) => {
            let offset = byte_offset(&text, e.line(), e.column());
            let len = usize::from(offset < text.len());
            Err(DeserializeError::Parse {
                message: e.to_string(),
                span: (offset, len).into(),
                src: NamedSource::new(format!("{} input", format.symbol()), text),
            })
        }
    }
}

/// Looks up a structural container, treating absence or `null` as empty.
fn container<'m>(
    media: &'m Map<String, Value>,
    key: &str,
) -> Result<Option<&'m Map<String, Value>>, DeserializeError> {
    match media.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(DeserializeError::InvalidDocument {
            context: format!("`{key}`"),
            found: kind_of(other).to_string(),
        }),
    }
}

fn invalid_link(relation: &str, reason: String) -> DeserializeError {
    DeserializeError::InvalidLink {
        relation: relation.to_string(),
        reason,
    }
}
