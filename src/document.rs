use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The format-agnostic shape every deserializer converges to.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalDocument {
    pub attributes: Map<String, Value>,
    pub transitions: BTreeMap<String, Vec<Transition>>,
    pub embedded: BTreeMap<String, Embedded>,
}

impl CanonicalDocument {
    /// Number of embedded levels below this document.
    #[must_use]
    pub fn embedded_depth(&self) -> usize {
        self.embedded
            .values()
            .flat_map(Embedded::documents)
            .map(|doc| doc.embedded_depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// One or several documents embedded under a single relation.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
// `Many` is listed first so an array is never read positionally as a struct.
#[serde(untagged)]
pub enum Embedded {
    Many(Vec<CanonicalDocument>),
    Single(Box<CanonicalDocument>),
}

impl Embedded {
    pub fn documents(&self) -> &[CanonicalDocument] {
        match self {
            Embedded::Single(doc) => std::slice::from_ref(doc.as_ref()),
            Embedded::Many(docs) => docs,
        }
    }
}

/// A link to another resource state.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub href: String,
    #[serde(flatten)]
    pub properties: LinkProperties,
}

/// Everything a transition may carry besides its `href`.
///
/// Values are kept exactly as they appeared in the link object, whatever
/// their JSON type; the accessors return `None` when a value is absent or
/// not of the expected type. The HAL fields come first; `method`, `enctype`,
/// `render` and `data` are only ever populated by HALE.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct LinkProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enctype: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl LinkProperties {
    /// Moves every recognized field out of a link object. `href` and any
    /// other key are left behind.
    pub(crate) fn take_from(link: &mut Map<String, Value>) -> Self {
        let mut take = |field: LinkField| link.remove(field.key());
        Self {
            templated: take(LinkField::Templated),
            media_type: take(LinkField::Type),
            deprecation: take(LinkField::Deprecation),
            name: take(LinkField::Name),
            profile: take(LinkField::Profile),
            title: take(LinkField::Title),
            hreflang: take(LinkField::Hreflang),
            method: take(LinkField::Method),
            enctype: take(LinkField::Enctype),
            render: take(LinkField::Render),
            data: take(LinkField::Data),
        }
    }

    pub fn templated(&self) -> Option<bool> {
        self.templated.as_ref().and_then(Value::as_bool)
    }

    pub fn media_type(&self) -> Option<&str> {
        as_str(&self.media_type)
    }

    pub fn deprecation(&self) -> Option<&str> {
        as_str(&self.deprecation)
    }

    pub fn name(&self) -> Option<&str> {
        as_str(&self.name)
    }

    pub fn profile(&self) -> Option<&str> {
        as_str(&self.profile)
    }

    pub fn title(&self) -> Option<&str> {
        as_str(&self.title)
    }

    pub fn hreflang(&self) -> Option<&str> {
        as_str(&self.hreflang)
    }

    pub fn method(&self) -> Option<&str> {
        as_str(&self.method)
    }

    pub fn enctype(&self) -> Option<&str> {
        as_str(&self.enctype)
    }

    pub fn render(&self) -> Option<&str> {
        as_str(&self.render)
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

fn as_str(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

/// Link fields recognized by at least one format.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum LinkField {
    Href,
    Templated,
    Type,
    Deprecation,
    Name,
    Profile,
    Title,
    Hreflang,
    Method,
    Data,
    Render,
    Enctype,
}

impl LinkField {
    pub fn key(self) -> &'static str {
        match self {
            LinkField::Href => "href",
            LinkField::Templated => "templated",
            LinkField::Type => "type",
            LinkField::Deprecation => "deprecation",
            LinkField::Name => "name",
            LinkField::Profile => "profile",
            LinkField::Title => "title",
            LinkField::Hreflang => "hreflang",
            LinkField::Method => "method",
            LinkField::Data => "data",
            LinkField::Render => "render",
            LinkField::Enctype => "enctype",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "href" => LinkField::Href,
            "templated" => LinkField::Templated,
            "type" => LinkField::Type,
            "deprecation" => LinkField::Deprecation,
            "name" => LinkField::Name,
            "profile" => LinkField::Profile,
            "title" => LinkField::Title,
            "hreflang" => LinkField::Hreflang,
            "method" => LinkField::Method,
            "data" => LinkField::Data,
            "render" => LinkField::Render,
            "enctype" => LinkField::Enctype,
            _ => return None,
        })
    }
}

/// Describes the JSON kind of a value for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
