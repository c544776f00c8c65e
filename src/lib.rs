pub mod api;
pub mod builder;
pub mod deserializer;
pub mod document;
pub mod error;
pub mod format;
pub mod hal;
pub mod hale;
pub mod registry;
pub mod utils;
mod serialization;

pub use api::{deserialize, Representor};
pub use deserializer::{Deserializer, MediaInput};
pub use document::{CanonicalDocument, Embedded, LinkProperties, Transition};
pub use error::{DeserializeError, RegistryError, RepresentorError};
pub use format::Format;
pub use registry::FormatRegistry;
