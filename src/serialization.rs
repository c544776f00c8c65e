use crate::document::{CanonicalDocument, Embedded, Transition};
use crate::format::{Format, EMBEDDED_KEY, LINKS_KEY};
use serde_json::{Map, Value};

/// Turns a canonical document back into a HAL-shaped JSON value.
///
/// A relation with one transition is written as a bare link object, and an
/// `Embedded::Single` as a bare resource, so reading the output back yields
/// the same canonical document. Link fields outside `format`'s whitelist
/// are not written.
pub(crate) fn to_value<F>(format: &F, document: &CanonicalDocument) -> Result<Value, serde_json::Error>
where
    F: Format + ?Sized,
{
    let mut media = document.attributes.clone();

    if !document.transitions.is_empty() {
        let mut links = Map::new();
        for (relation, transitions) in &document.transitions {
            links.insert(relation.clone(), transitions_to_value(format, transitions)?);
        }
        media.insert(LINKS_KEY.to_string(), Value::Object(links));
    }

    if !document.embedded.is_empty() {
        let mut embedded = Map::new();
        for (relation, entry) in &document.embedded {
            let value = match entry {
                Embedded::Single(doc) => to_value(format, doc)?,
                Embedded::Many(docs) => Value::Array(
                    docs.iter().map(|doc| to_value(format, doc)).collect::<Result<Vec<_>, _>>()?,
                ),
            };
            embedded.insert(relation.clone(), value);
        }
        media.insert(EMBEDDED_KEY.to_string(), Value::Object(embedded));
    }

    Ok(Value::Object(media))
}

fn transitions_to_value<F>(format: &F, transitions: &[Transition]) -> Result<Value, serde_json::Error>
where
    F: Format + ?Sized,
{
    let mut links = transitions
        .iter()
        .map(|transition| transition_to_value(format, transition))
        .collect::<Result<Vec<_>, _>>()?;
    if links.len() == 1 {
        return Ok(links.remove(0));
    }
    Ok(Value::Array(links))
}

fn transition_to_value<F>(format: &F, transition: &Transition) -> Result<Value, serde_json::Error>
where
    F: Format + ?Sized,
{
    let mut link = serde_json::to_value(transition)?;
    if let Value::Object(fields) = &mut link {
        fields.retain(|key, _| format.recognizes(key));
    }
    Ok(link)
}
