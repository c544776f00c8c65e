use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum RepresentorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Deserialize(#[from] DeserializeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to serialize document: {0}")]
    #[diagnostic(code(serializer::json))]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum DeserializeError {
    #[error("Input is not valid JSON: {message}")]
    #[diagnostic(
        code(deserializer::parse),
        help("The raw input could not be decoded into a JSON tree.")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("Expected a JSON object for {context}, but found {found}")]
    #[diagnostic(
        code(deserializer::invalid_document),
        help("Documents, `_links` and `_embedded` containers must be JSON objects.")
    )]
    InvalidDocument { context: String, found: String },

    #[error("CURIE declarations are not supported")]
    #[diagnostic(
        code(deserializer::curies_unsupported),
        help("Remove the `curies` entry from `_links` and use full relation names.")
    )]
    UnsupportedCuries,

    #[error("Link under relation `{relation}` is missing `href`")]
    #[diagnostic(
        code(deserializer::missing_href),
        help("Every link object must carry a non-empty `href`.")
    )]
    MissingHref { relation: String },

    #[error("Malformed link under relation `{relation}`: {reason}")]
    #[diagnostic(code(deserializer::invalid_link))]
    InvalidLink { relation: String, reason: String },

    #[error("Embedded resources nest deeper than {max} levels")]
    #[diagnostic(
        code(deserializer::depth_exceeded),
        help("Raise the limit with `Deserializer::with_max_depth` if this nesting is expected.")
    )]
    DepthExceeded { max: usize },
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No format registered for `{key}`")]
    #[diagnostic(
        code(registry::not_registered),
        help("Register a format claiming this media type or symbol first.")
    )]
    NotRegistered { key: String },

    #[error("`{key}` is already claimed by format `{existing}`, cannot register `{incoming}`")]
    #[diagnostic(code(registry::conflict))]
    Conflict {
        key: String,
        existing: String,
        incoming: String,
    },
}
