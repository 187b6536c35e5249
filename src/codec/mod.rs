//! Reading and writing the XML wire format.
//!
//! A document is serialized as a `<webapp>` root (legacy `<uispec>`/`<app>`
//! roots are accepted on read) holding the `entities`/`layouts`/`components`/
//! `pages` sections plus `navigation` and `config`. Fragment files carry a
//! `<spec type="...">` envelope, with a bare root of the expected tag
//! accepted as a fallback.
//!
//! Two vocabularies steer element parsing. Tags in [`SKIP_ELEMENTS`] are
//! structured metadata (field lists, query definitions, theme blocks) and
//! never become element-tree children; they are consumed by the typed item
//! parsers instead. Any other tag becomes a [`NodeKind`](crate::document::NodeKind),
//! with unknown tags preserved as `Custom` and logged so authored content is
//! never silently dropped.

use std::collections::HashSet;

use once_cell::sync::Lazy;

mod ser;
mod xml;

pub use ser::serialize_document;
pub use xml::{parse_document, parse_fragment, Fragment};

/// Tags that are item/metadata structure rather than element-tree content.
pub static SKIP_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "props",
        "prop",
        "field",
        "actions",
        "action",
        "data",
        "query",
        "localState",
        "state",
        "params",
        "param",
        "states",
        "modals",
        "guards",
        "guard",
        "flows",
        "flow",
        "colors",
        "spacing",
        "borderRadius",
        "shadows",
        "i18n",
        "locale",
        "assets",
        "images",
        "llm",
        "theme",
        "join",
    ])
});

/// Namespaced attributes and the property keys they map onto. The XML side
/// uses a `prompt:` prefix; the model side uses camel-cased keys.
const NAMESPACED_ATTRS: [(&str, &str); 3] = [
    ("prompt:context", "promptContext"),
    ("prompt:constraints", "promptConstraints"),
    ("prompt:override", "promptOverride"),
];

pub(crate) fn attr_to_prop(attr: &str) -> &str {
    NAMESPACED_ATTRS
        .iter()
        .find(|(a, _)| *a == attr)
        .map(|(_, p)| *p)
        .unwrap_or(attr)
}

pub(crate) fn prop_to_attr(prop: &str) -> &str {
    NAMESPACED_ATTRS
        .iter()
        .find(|(_, p)| *p == prop)
        .map(|(a, _)| *a)
        .unwrap_or(prop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_attrs_map_both_ways() {
        assert_eq!(attr_to_prop("prompt:context"), "promptContext");
        assert_eq!(prop_to_attr("promptContext"), "prompt:context");
        assert_eq!(attr_to_prop("label"), "label");
        assert_eq!(prop_to_attr("label"), "label");
    }

    #[test]
    fn test_skip_elements_cover_metadata_tags() {
        for tag in ["field", "query", "guard", "theme", "localState"] {
            assert!(SKIP_ELEMENTS.contains(tag));
        }
        assert!(!SKIP_ELEMENTS.contains("row"));
        assert!(!SKIP_ELEMENTS.contains("slot"));
    }
}
