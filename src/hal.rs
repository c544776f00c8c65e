//! HAL, as described in <http://stateless.co/hal_specification.html>.

use crate::document::LinkField;
use crate::format::Format;

pub const HAL_SYMBOL: &str = "hal";
pub const HAL_MEDIA_TYPES: &[&str] = &["application/hal+json", "application/json"];

pub const HAL_LINK_FIELDS: &[LinkField] = &[
    LinkField::Href,
    LinkField::Templated,
    LinkField::Type,
    LinkField::Deprecation,
    LinkField::Name,
    LinkField::Profile,
    LinkField::Title,
    LinkField::Hreflang,
];

/// Plain HAL: `_links` and `_embedded`, nothing else is structural.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hal;

impl Format for Hal {
    fn symbol(&self) -> &'static str {
        HAL_SYMBOL
    }

    fn media_types(&self) -> &'static [&'static str] {
        HAL_MEDIA_TYPES
    }

    fn link_fields(&self) -> &'static [LinkField] {
        HAL_LINK_FIELDS
    }
}
