//! Event-based XML reading.
//!
//! Reading happens in two stages. [`read_root`] folds the quick-xml event
//! stream into a [`RawElement`] tree that preserves document order, then the
//! typed parsers walk that tree into the document model. Every node minted
//! here gets a fresh identity from the session's [`IdAllocator`].

use quick_xml::{events::Event, Reader};

use crate::{
    codec::{attr_to_prop, SKIP_ELEMENTS},
    document::{
        ActionDef, Assets, Component, Config, Document, Entity, Field, FieldType, Flow, Guard,
        I18n, Layout, LocalState, Locale, Navigation, Node, NodeKind, Page, PageState, Param,
        PropDef, PromptTemplate, Query, Role, Section, Slot, Theme,
    },
    error::UispecError,
    ident::IdAllocator,
};

/// An XML element with children in document order. Intermediate form between
/// the event stream and the typed model.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<RawElement>,
    pub text: Option<String>,
}

impl RawElement {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn attr_owned(&self, name: &str) -> Option<String> {
        self.attr(name).map(str::to_string)
    }

    fn flag(&self, name: &str) -> bool {
        self.attr(name) == Some("true")
    }

    fn number<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.attr(name).and_then(|v| v.parse().ok())
    }

    fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a RawElement> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    fn first_child(&self, tag: &str) -> Option<&RawElement> {
        self.children.iter().find(|c| c.tag == tag)
    }
}

/// Parse `text` into its root element.
pub(crate) fn read_root(text: &str) -> Result<RawElement, UispecError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<RawElement> = Vec::new();
    let mut root: Option<RawElement> = None;
    loop {
        let event = reader
            .read_event()
            .map_err(|e| UispecError::Codec(format!("{e}")))?;
        match event {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                adopt(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| UispecError::Codec("unbalanced closing tag".to_string()))?;
                adopt(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                let value = t
                    .unescape()
                    .map_err(|e| UispecError::Codec(format!("{e}")))?;
                if !value.is_empty() {
                    append_text(&mut stack, &value);
                }
            }
            Event::CData(c) => {
                let bytes = c.into_inner().into_owned();
                let value = String::from_utf8(bytes)
                    .map_err(|e| UispecError::Codec(format!("invalid UTF-8 in CDATA: {e}")))?;
                append_text(&mut stack, &value);
            }
            Event::Eof => break,
            // Declarations, comments, PIs and doctypes carry no model content.
            _ => {}
        }
    }
    if !stack.is_empty() {
        return Err(UispecError::Codec("unclosed element at end of input".to_string()));
    }
    root.ok_or_else(|| UispecError::Codec("document has no root element".to_string()))
}

fn element_from_start(
    start: &quick_xml::events::BytesStart<'_>,
) -> Result<RawElement, UispecError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| UispecError::Codec(format!("{e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| UispecError::Codec(format!("{e}")))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(RawElement {
        tag,
        attrs,
        children: Vec::new(),
        text: None,
    })
}

fn adopt(
    stack: &mut [RawElement],
    root: &mut Option<RawElement>,
    element: RawElement,
) -> Result<(), UispecError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_some() {
                return Err(UispecError::Codec(
                    "multiple root elements".to_string(),
                ));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn append_text(stack: &mut [RawElement], value: &str) {
    if let Some(top) = stack.last_mut() {
        match &mut top.text {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(value);
            }
            None => top.text = Some(value.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Document parsing

/// Parse a full document. The root must be `webapp` (or a legacy `uispec`/
/// `app` root). Section and item `src` attributes are retained unresolved;
/// resolution is a separate pass.
pub fn parse_document(text: &str, ids: &mut IdAllocator) -> Result<Document, UispecError> {
    let root = read_root(text)?;
    if !matches!(root.tag.as_str(), "webapp" | "uispec" | "app") {
        return Err(UispecError::Codec(format!(
            "expected <webapp> root, found <{}>",
            root.tag
        )));
    }
    Ok(Document {
        name: root.attr_owned("name").unwrap_or_else(|| "Untitled".to_string()),
        version: root
            .attr_owned("version")
            .unwrap_or_else(|| "1.0.0".to_string()),
        design_system: root.attr_owned("designSystem"),
        entities: parse_section(root.first_child("entities"), "entity", ids, parse_entity),
        layouts: parse_section(root.first_child("layouts"), "layout", ids, parse_layout),
        components: parse_section(
            root.first_child("components"),
            "component",
            ids,
            parse_component,
        ),
        pages: parse_section(root.first_child("pages"), "page", ids, parse_page),
        navigation: root
            .first_child("navigation")
            .map(|nav| parse_navigation(nav, ids)),
        config: root.first_child("config").map(|cfg| parse_config(cfg, ids)),
    })
}

fn parse_section<T>(
    container: Option<&RawElement>,
    item_tag: &str,
    ids: &mut IdAllocator,
    parse: fn(&RawElement, &mut IdAllocator) -> T,
) -> Section<T> {
    match container {
        None => Section::default(),
        Some(el) => Section {
            source: el.attr_owned("src"),
            items: el
                .children_named(item_tag)
                .map(|item| parse(item, ids))
                .collect(),
        },
    }
}

// ---------------------------------------------------------------------------
// Fragments

/// The content of one external fragment file, classified by section.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Entities(Vec<Entity>),
    Layouts(Vec<Layout>),
    Components(Vec<Component>),
    Pages(Vec<Page>),
}

impl Fragment {
    /// The plural section tag this fragment belongs to.
    pub fn section_tag(&self) -> &'static str {
        match self {
            Fragment::Entities(_) => "entities",
            Fragment::Layouts(_) => "layouts",
            Fragment::Components(_) => "components",
            Fragment::Pages(_) => "pages",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Fragment::Entities(items) => items.len(),
            Fragment::Layouts(items) => items.len(),
            Fragment::Components(items) => items.len(),
            Fragment::Pages(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse one external fragment file. Accepts a `<spec type="...">` envelope
/// (singular or plural type), a bare item root (`<entity>`, `<page>`, ...),
/// or a bare section root (`<entities>`, ...).
pub fn parse_fragment(text: &str, ids: &mut IdAllocator) -> Result<Fragment, UispecError> {
    let root = read_root(text)?;
    if root.tag == "spec" {
        return match root.attr("type") {
            Some(kind) => fragment_for_type(kind, &root, ids),
            // No type attribute: classify by the items actually present.
            None => classify_container(&root, ids),
        };
    }
    match root.tag.as_str() {
        "entity" => Ok(Fragment::Entities(vec![parse_entity(&root, ids)])),
        "layout" => Ok(Fragment::Layouts(vec![parse_layout(&root, ids)])),
        "component" => Ok(Fragment::Components(vec![parse_component(&root, ids)])),
        "page" => Ok(Fragment::Pages(vec![parse_page(&root, ids)])),
        "entities" | "layouts" | "components" | "pages" => classify_container(&root, ids),
        other => Err(UispecError::Codec(format!(
            "fragment root <{other}> is not a recognized item or section"
        ))),
    }
}

fn fragment_for_type(
    kind: &str,
    root: &RawElement,
    ids: &mut IdAllocator,
) -> Result<Fragment, UispecError> {
    match kind {
        "entity" | "entities" => Ok(Fragment::Entities(
            root.children_named("entity")
                .map(|e| parse_entity(e, ids))
                .collect(),
        )),
        "layout" | "layouts" => Ok(Fragment::Layouts(
            root.children_named("layout")
                .map(|l| parse_layout(l, ids))
                .collect(),
        )),
        "component" | "components" => Ok(Fragment::Components(
            root.children_named("component")
                .map(|c| parse_component(c, ids))
                .collect(),
        )),
        "page" | "pages" => Ok(Fragment::Pages(
            root.children_named("page")
                .map(|p| parse_page(p, ids))
                .collect(),
        )),
        other => Err(UispecError::Codec(format!(
            "unrecognized spec type `{other}`"
        ))),
    }
}

fn classify_container(root: &RawElement, ids: &mut IdAllocator) -> Result<Fragment, UispecError> {
    for tag in ["entity", "layout", "component", "page"] {
        if root.first_child(tag).is_some() {
            return fragment_for_type(tag, root, ids);
        }
    }
    Err(UispecError::Codec(
        "fragment contains no recognized items".to_string(),
    ))
}

// ---------------------------------------------------------------------------
// Item parsers

fn parse_entity(el: &RawElement, ids: &mut IdAllocator) -> Entity {
    Entity {
        id: ids.next_id(),
        name: el.attr_owned("name").unwrap_or_else(|| "Unnamed".to_string()),
        fields: el
            .children_named("field")
            .map(|f| parse_field(f, ids))
            .collect(),
        src: el.attr_owned("src"),
    }
}

fn parse_field(el: &RawElement, ids: &mut IdAllocator) -> Field {
    Field {
        id: ids.next_id(),
        name: el.attr_owned("name").unwrap_or_else(|| "unnamed".to_string()),
        field_type: el
            .attr("type")
            .map(FieldType::from_tag)
            .unwrap_or_default(),
        required: el.flag("required"),
        unique: el.flag("unique"),
        default: el.attr_owned("default"),
        reference: el.attr_owned("ref"),
        values: el.attr_owned("values"),
        cardinality: el.attr_owned("cardinality"),
        min_length: el.number("minLength"),
        max_length: el.number("maxLength"),
        min: el.number("min"),
        max: el.number("max"),
        pattern: el.attr_owned("pattern"),
    }
}

fn parse_layout(el: &RawElement, ids: &mut IdAllocator) -> Layout {
    Layout {
        id: ids.next_id(),
        name: el.attr_owned("name").unwrap_or_else(|| "Unnamed".to_string()),
        slots: collect_slots(el, ids),
        children: parse_children(el, ids),
        src: el.attr_owned("src"),
    }
}

/// Slot definitions may sit directly under the layout or inside nested
/// `container` elements.
fn collect_slots(el: &RawElement, ids: &mut IdAllocator) -> Vec<Slot> {
    let mut slots: Vec<Slot> = el
        .children_named("slot")
        .map(|s| parse_slot(s, ids))
        .collect();
    for container in el.children_named("container") {
        slots.extend(collect_slots(container, ids));
    }
    slots
}

fn parse_slot(el: &RawElement, ids: &mut IdAllocator) -> Slot {
    Slot {
        id: ids.next_id(),
        name: el.attr_owned("name").unwrap_or_else(|| "default".to_string()),
        position: el.attr_owned("position"),
        sticky: el.flag("sticky"),
        width: el.attr_owned("width"),
        height: el.attr_owned("height"),
        grow: el.flag("grow"),
        scroll: el.flag("scroll"),
        collapsible: el.flag("collapsible"),
        required: el.flag("required"),
        role: el.attr("role").and_then(Role::parse),
    }
}

fn parse_component(el: &RawElement, ids: &mut IdAllocator) -> Component {
    // Props/actions accept both the wrapped (`<props><prop/></props>`) and
    // flat (`<prop/>` directly under the component) shapes.
    let props: Vec<PropDef> = match el.first_child("props") {
        Some(wrapper) => wrapper.children_named("prop").collect::<Vec<_>>(),
        None => el.children_named("prop").collect(),
    }
    .into_iter()
    .map(|p| PropDef {
        id: ids.next_id(),
        name: p.attr_owned("name").unwrap_or_else(|| "unnamed".to_string()),
        prop_type: p.attr_owned("type").unwrap_or_else(|| "string".to_string()),
        required: p.flag("required"),
        default: p.attr_owned("default"),
        values: p.attr_owned("values"),
    })
    .collect();
    let actions: Vec<ActionDef> = match el.first_child("actions") {
        Some(wrapper) => wrapper.children_named("action").collect::<Vec<_>>(),
        None => el.children_named("action").collect(),
    }
    .into_iter()
    .map(|a| ActionDef {
        id: ids.next_id(),
        name: a.attr_owned("name").unwrap_or_else(|| "unnamed".to_string()),
        params: a.attr_owned("params"),
    })
    .collect();
    Component {
        id: ids.next_id(),
        name: el.attr_owned("name").unwrap_or_else(|| "Unnamed".to_string()),
        props,
        actions,
        children: parse_children(el, ids),
        src: el.attr_owned("src"),
    }
}

fn parse_page(el: &RawElement, ids: &mut IdAllocator) -> Page {
    let params = el
        .first_child("params")
        .map(|wrapper| {
            wrapper
                .children_named("param")
                .map(|p| Param {
                    name: p.attr_owned("name").unwrap_or_else(|| "unnamed".to_string()),
                    param_type: p.attr_owned("type").unwrap_or_else(|| "string".to_string()),
                })
                .collect()
        })
        .unwrap_or_default();
    let queries = el
        .first_child("data")
        .map(|wrapper| {
            wrapper
                .children_named("query")
                .map(|q| Query {
                    name: q.attr_owned("name").unwrap_or_else(|| "unnamed".to_string()),
                    query_type: q.attr_owned("type"),
                    source: q.attr_owned("source"),
                    filter: q.attr_owned("filter"),
                    include: q.attr_owned("include"),
                    limit: q.number("limit"),
                    order_by: q.attr_owned("orderBy"),
                    paginated: q.flag("paginated"),
                    page_size: q.number("pageSize"),
                })
                .collect()
        })
        .unwrap_or_default();
    let local_state = el
        .first_child("localState")
        .map(|wrapper| {
            wrapper
                .children_named("state")
                .map(|s| LocalState {
                    name: s.attr_owned("name").unwrap_or_else(|| "unnamed".to_string()),
                    state_type: s.attr_owned("type"),
                    default: s.attr_owned("default"),
                })
                .collect()
        })
        .unwrap_or_default();
    let states = el
        .first_child("states")
        .map(|wrapper| {
            wrapper
                .children_named("state")
                .map(|s| PageState {
                    id: ids.next_id(),
                    name: s.attr_owned("name").unwrap_or_else(|| "unnamed".to_string()),
                    children: parse_children(s, ids),
                })
                .collect()
        })
        .unwrap_or_default();
    Page {
        id: ids.next_id(),
        name: el.attr_owned("name").unwrap_or_else(|| "Unnamed".to_string()),
        route: el.attr_owned("route").unwrap_or_else(|| "/".to_string()),
        layout: el.attr_owned("layout"),
        title: el.attr_owned("title"),
        params,
        queries,
        local_state,
        states,
        children: parse_children(el, ids),
        src: el.attr_owned("src"),
    }
}

fn parse_navigation(el: &RawElement, ids: &mut IdAllocator) -> Navigation {
    let guards = el
        .first_child("guards")
        .map(|wrapper| {
            wrapper
                .children_named("guard")
                .map(|g| Guard {
                    name: g.attr_owned("name").unwrap_or_else(|| "unnamed".to_string()),
                    redirect: g.attr_owned("redirect").unwrap_or_else(|| "/".to_string()),
                    message: g.attr_owned("message"),
                    role: g.attr_owned("role"),
                    condition: g.attr_owned("condition"),
                })
                .collect()
        })
        .unwrap_or_default();
    let flows = el
        .first_child("flows")
        .map(|wrapper| {
            wrapper
                .children_named("flow")
                .map(|f| Flow {
                    id: ids.next_id(),
                    name: f.attr_owned("name").unwrap_or_else(|| "unnamed".to_string()),
                    children: parse_children(f, ids),
                })
                .collect()
        })
        .unwrap_or_default();
    Navigation {
        id: ids.next_id(),
        guards,
        flows,
    }
}

fn parse_config(el: &RawElement, ids: &mut IdAllocator) -> Config {
    let theme = el.first_child("theme").map(|t| Theme {
        colors: t
            .first_child("colors")
            .map(|colors| {
                // Colors appear as attributes or as named child elements with
                // text payloads; both shapes feed the same map.
                let mut map = std::collections::BTreeMap::new();
                for (key, value) in &colors.attrs {
                    map.insert(key.clone(), value.clone());
                }
                for child in &colors.children {
                    if let Some(text) = &child.text {
                        map.insert(child.tag.clone(), text.clone());
                    }
                }
                map
            })
            .unwrap_or_default(),
        mode: t.attr_owned("mode"),
    });
    let i18n = el.first_child("i18n").map(|i| I18n {
        default_locale: i.attr_owned("default"),
        locales: i
            .children_named("locale")
            .map(|l| Locale {
                name: l.attr_owned("name").unwrap_or_else(|| "en".to_string()),
                src: l.attr_owned("src"),
            })
            .collect(),
    });
    let assets = el.first_child("assets").map(|a| Assets {
        images: a
            .first_child("images")
            .map(|images| {
                images
                    .children
                    .iter()
                    .filter_map(|img| img.attr("src").map(|src| (img.tag.clone(), src.to_string())))
                    .collect()
            })
            .unwrap_or_default(),
    });
    let prompts = el
        .first_child("llm")
        .map(|llm| {
            llm.children_named("prompt")
                .map(|p| PromptTemplate {
                    prompt_type: p.attr_owned("type"),
                    content: p.text.clone().unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();
    Config {
        id: ids.next_id(),
        theme,
        i18n,
        assets,
        prompts,
    }
}

// ---------------------------------------------------------------------------
// Element trees

/// Parse the element-tree children of an item, skipping metadata tags.
/// Unknown tags are preserved as custom nodes rather than dropped.
fn parse_children(parent: &RawElement, ids: &mut IdAllocator) -> Vec<Node> {
    let mut children = Vec::new();
    for child in &parent.children {
        if SKIP_ELEMENTS.contains(child.tag.as_str()) {
            continue;
        }
        let kind = NodeKind::from_tag(&child.tag);
        if matches!(kind, NodeKind::Custom(_)) {
            tracing::warn!(tag = %child.tag, "unrecognized element tag kept as custom node");
        }
        children.push(parse_node(child, kind, ids));
    }
    children
}

fn parse_node(el: &RawElement, kind: NodeKind, ids: &mut IdAllocator) -> Node {
    let mut node = Node::new(kind, ids);
    for (key, value) in &el.attrs {
        if key == "role" {
            node.role = Role::parse(value);
            if node.role.is_none() {
                tracing::warn!(value = %value, "ignoring unrecognized role attribute");
            }
            continue;
        }
        node.properties
            .insert(attr_to_prop(key).to_string(), value.clone());
    }
    node.text = el.text.clone();
    node.children = parse_children(el, ids);
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_root_preserves_document_order() {
        let root = read_root(r#"<row><text a="1"/><button/><text a="2"/></row>"#).unwrap();
        let tags: Vec<&str> = root.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["text", "button", "text"]);
        assert_eq!(root.children[0].attr("a"), Some("1"));
        assert_eq!(root.children[2].attr("a"), Some("2"));
    }

    #[test]
    fn test_read_root_rejects_malformed_input() {
        assert!(read_root("<row><text></row>").is_err());
        assert!(read_root("").is_err());
        assert!(read_root("<a/><b/>").is_err());
    }

    #[test]
    fn test_parse_document_sections_and_legacy_roots() {
        let text = r#"
            <webapp name="Shop" version="2.0.0" designSystem="tailwind">
              <entities>
                <entity name="Product">
                  <field name="title" type="string" required="true"/>
                  <field name="price" type="number" min="0"/>
                </entity>
              </entities>
              <pages>
                <page name="Home" route="/">
                  <params><param name="ref" type="string"/></params>
                  <data><query name="products" source="@entity.Product" limit="20"/></data>
                  <heading level="1">Welcome</heading>
                </page>
              </pages>
            </webapp>"#;
        let mut ids = IdAllocator::seeded("codec");
        let doc = parse_document(text, &mut ids).unwrap();
        assert_eq!(doc.name, "Shop");
        assert_eq!(doc.design_system.as_deref(), Some("tailwind"));
        let product = &doc.entities.items[0];
        assert_eq!(product.fields[0].field_type, FieldType::String);
        assert!(product.fields[0].required);
        assert_eq!(product.fields[1].min, Some(0.0));
        let home = &doc.pages.items[0];
        assert_eq!(home.params[0].name, "ref");
        assert_eq!(home.queries[0].limit, Some(20));
        // Metadata wrappers never leak into the element tree.
        assert_eq!(home.children.len(), 1);
        assert_eq!(home.children[0].kind, NodeKind::Heading);
        assert_eq!(home.children[0].text.as_deref(), Some("Welcome"));
        assert_eq!(home.children[0].property("level"), Some("1"));

        assert!(parse_document("<uispec name=\"x\"/>", &mut ids).is_ok());
        assert!(parse_document("<bogus/>", &mut ids).is_err());
    }

    #[test]
    fn test_parse_document_retains_unresolved_sources() {
        let text = r#"<webapp name="x"><entities src="./entities"/><pages src="pages.xml"/></webapp>"#;
        let mut ids = IdAllocator::seeded("codec");
        let doc = parse_document(text, &mut ids).unwrap();
        assert_eq!(doc.entities.source.as_deref(), Some("./entities"));
        assert_eq!(doc.pages.source.as_deref(), Some("pages.xml"));
        assert!(doc.entities.items.is_empty());
    }

    #[test]
    fn test_unknown_tag_becomes_custom_node() {
        let text = r#"<webapp name="x"><pages><page name="p" route="/"><holo-panel depth="3"/></page></pages></webapp>"#;
        let mut ids = IdAllocator::seeded("codec");
        let doc = parse_document(text, &mut ids).unwrap();
        let node = &doc.pages.items[0].children[0];
        assert_eq!(node.kind, NodeKind::Custom("holo-panel".to_string()));
        assert_eq!(node.property("depth"), Some("3"));
    }

    #[test]
    fn test_namespaced_attrs_and_role_mapping() {
        let text = r#"<webapp name="x"><pages><page name="p" route="/">
            <slot name="main" role="content" prompt:context="true"/>
        </page></pages></webapp>"#;
        let mut ids = IdAllocator::seeded("codec");
        let doc = parse_document(text, &mut ids).unwrap();
        let slot = &doc.pages.items[0].children[0];
        assert_eq!(slot.role, Some(Role::Content));
        assert_eq!(slot.property("promptContext"), Some("true"));
        assert!(slot.property("role").is_none());
    }

    #[test]
    fn test_fragment_envelope_and_bare_root() {
        let mut ids = IdAllocator::seeded("codec");
        let enveloped = r#"<spec type="entities">
            <entity name="User"><field name="id" type="uuid"/></entity>
            <entity name="Team"/>
        </spec>"#;
        match parse_fragment(enveloped, &mut ids).unwrap() {
            Fragment::Entities(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].name, "User");
            }
            other => panic!("unexpected fragment {other:?}"),
        }

        let bare = r#"<entity name="Solo"><field name="id" type="uuid"/></entity>"#;
        match parse_fragment(bare, &mut ids).unwrap() {
            Fragment::Entities(items) => assert_eq!(items[0].name, "Solo"),
            other => panic!("unexpected fragment {other:?}"),
        }

        assert!(parse_fragment("<spec type=\"widgets\"/>", &mut ids).is_err());
    }

    #[test]
    fn test_layout_slots_collected_from_containers() {
        let mut ids = IdAllocator::seeded("codec");
        let text = r#"<spec type="layout"><layout name="Main">
            <slot name="header" position="top" role="chrome"/>
            <container direction="row">
              <slot name="sidebar" width="240px" role="chrome"/>
              <slot name="content" grow="true" scroll="true" role="content"/>
            </container>
        </layout></spec>"#;
        match parse_fragment(text, &mut ids).unwrap() {
            Fragment::Layouts(items) => {
                let layout = &items[0];
                let names: Vec<&str> = layout.slots.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["header", "sidebar", "content"]);
                assert_eq!(layout.slots[0].role, Some(Role::Chrome));
                assert!(layout.slots[2].grow);
                // Slot elements also appear in the element tree.
                assert_eq!(layout.children[0].kind, NodeKind::Slot);
            }
            other => panic!("unexpected fragment {other:?}"),
        }
    }
}
