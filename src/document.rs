//! The document model: a forest of typed nodes grouped into named sections.
//!
//! A [`Document`] holds five top-level sections (`entities`, `layouts`,
//! `components`, `pages`, plus `navigation`/`config` metadata). Element trees
//! inside layouts, components, pages, page states and navigation flows are
//! built from [`Node`], the universal unit of the model.
//!
//! Invariants maintained by every operation in this crate:
//!
//! 1. Identity uniqueness: no two nodes in a document instance share an id.
//! 2. Acyclicity: the parent/children relation is a forest.
//! 3. Single ownership: a node appears in exactly one `children` list.
//! 4. Order preservation: `children` is an ordered sequence.
//! 5. Role consistency: an explicit [`Role`] always wins; a `slot` node
//!    without one inherits the role of the layout slot it targets (see
//!    [`effective_role`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ident::{IdAllocator, NodeId};

/// Classification of a region for editing behavior. `Content` regions are
/// freely editable; `Chrome` regions are structural layout scaffolding
/// treated as read-only by editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Content,
    Chrome,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Content => "content",
            Role::Chrome => "chrome",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "content" => Some(Role::Content),
            "chrome" => Some(Role::Chrome),
            _ => None,
        }
    }
}

/// The element vocabulary. Well-known kinds are closed variants so matches
/// stay exhaustive; tags outside the vocabulary are preserved as
/// [`NodeKind::Custom`] rather than dropped, so authored content survives a
/// round-trip even when this crate does not understand it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum NodeKind {
    // Layout containers
    Row,
    Column,
    Stack,
    Grid,
    Card,
    Section,
    Container,
    Tabs,
    Tab,
    // Basic elements
    Text,
    Heading,
    Button,
    Link,
    Image,
    Icon,
    Divider,
    Spacer,
    Badge,
    Tag,
    // Form elements
    Form,
    Input,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Switch,
    Datepicker,
    Filepicker,
    Search,
    // Data elements
    List,
    Table,
    THead,
    TBody,
    Tr,
    Td,
    Th,
    Chart,
    Stat,
    Pagination,
    // Interactive elements
    Modal,
    Drawer,
    Tooltip,
    Popover,
    Dropdown,
    Menu,
    MenuItem,
    Trigger,
    Alert,
    Overlay,
    Spinner,
    // Navigation
    Nav,
    NavItem,
    // References and placeholders
    Component,
    Use,
    Slot,
    // Logic/structure
    If,
    Else,
    Each,
    For,
    Sortable,
    DropZone,
    Draggable,
    // Special
    Prompt,
    Suffix,
    Prefix,
    Template,
    OptionItem,
    /// Forward-compatible passthrough for tags outside the vocabulary.
    Custom(String),
}

impl NodeKind {
    /// Map a source tag onto the vocabulary. Unknown tags become
    /// [`NodeKind::Custom`].
    pub fn from_tag(tag: &str) -> NodeKind {
        match tag {
            "row" => NodeKind::Row,
            "column" => NodeKind::Column,
            "stack" => NodeKind::Stack,
            "grid" => NodeKind::Grid,
            "card" => NodeKind::Card,
            "section" => NodeKind::Section,
            "container" => NodeKind::Container,
            "tabs" => NodeKind::Tabs,
            "tab" => NodeKind::Tab,
            "text" => NodeKind::Text,
            "heading" => NodeKind::Heading,
            "button" => NodeKind::Button,
            "link" => NodeKind::Link,
            "image" => NodeKind::Image,
            "icon" => NodeKind::Icon,
            "divider" => NodeKind::Divider,
            "spacer" => NodeKind::Spacer,
            "badge" => NodeKind::Badge,
            "tag" => NodeKind::Tag,
            "form" => NodeKind::Form,
            "input" => NodeKind::Input,
            "textarea" => NodeKind::Textarea,
            "select" => NodeKind::Select,
            "checkbox" => NodeKind::Checkbox,
            "radio" => NodeKind::Radio,
            "switch" => NodeKind::Switch,
            "datepicker" => NodeKind::Datepicker,
            "filepicker" => NodeKind::Filepicker,
            "search" => NodeKind::Search,
            "list" => NodeKind::List,
            "table" => NodeKind::Table,
            "thead" => NodeKind::THead,
            "tbody" => NodeKind::TBody,
            "tr" => NodeKind::Tr,
            "td" => NodeKind::Td,
            "th" => NodeKind::Th,
            "chart" => NodeKind::Chart,
            "stat" => NodeKind::Stat,
            "pagination" => NodeKind::Pagination,
            "modal" => NodeKind::Modal,
            "drawer" => NodeKind::Drawer,
            "tooltip" => NodeKind::Tooltip,
            "popover" => NodeKind::Popover,
            "dropdown" => NodeKind::Dropdown,
            "menu" => NodeKind::Menu,
            "menuItem" => NodeKind::MenuItem,
            "trigger" => NodeKind::Trigger,
            "alert" => NodeKind::Alert,
            "overlay" => NodeKind::Overlay,
            "spinner" => NodeKind::Spinner,
            "nav" => NodeKind::Nav,
            "navItem" => NodeKind::NavItem,
            "component" => NodeKind::Component,
            "use" => NodeKind::Use,
            "slot" => NodeKind::Slot,
            "if" => NodeKind::If,
            "else" => NodeKind::Else,
            "each" => NodeKind::Each,
            "for" => NodeKind::For,
            "sortable" => NodeKind::Sortable,
            "dropZone" => NodeKind::DropZone,
            "draggable" => NodeKind::Draggable,
            "prompt" => NodeKind::Prompt,
            "suffix" => NodeKind::Suffix,
            "prefix" => NodeKind::Prefix,
            "template" => NodeKind::Template,
            "option" => NodeKind::OptionItem,
            other => NodeKind::Custom(other.to_string()),
        }
    }

    /// The source tag this kind serializes to.
    pub fn as_tag(&self) -> &str {
        match self {
            NodeKind::Row => "row",
            NodeKind::Column => "column",
            NodeKind::Stack => "stack",
            NodeKind::Grid => "grid",
            NodeKind::Card => "card",
            NodeKind::Section => "section",
            NodeKind::Container => "container",
            NodeKind::Tabs => "tabs",
            NodeKind::Tab => "tab",
            NodeKind::Text => "text",
            NodeKind::Heading => "heading",
            NodeKind::Button => "button",
            NodeKind::Link => "link",
            NodeKind::Image => "image",
            NodeKind::Icon => "icon",
            NodeKind::Divider => "divider",
            NodeKind::Spacer => "spacer",
            NodeKind::Badge => "badge",
            NodeKind::Tag => "tag",
            NodeKind::Form => "form",
            NodeKind::Input => "input",
            NodeKind::Textarea => "textarea",
            NodeKind::Select => "select",
            NodeKind::Checkbox => "checkbox",
            NodeKind::Radio => "radio",
            NodeKind::Switch => "switch",
            NodeKind::Datepicker => "datepicker",
            NodeKind::Filepicker => "filepicker",
            NodeKind::Search => "search",
            NodeKind::List => "list",
            NodeKind::Table => "table",
            NodeKind::THead => "thead",
            NodeKind::TBody => "tbody",
            NodeKind::Tr => "tr",
            NodeKind::Td => "td",
            NodeKind::Th => "th",
            NodeKind::Chart => "chart",
            NodeKind::Stat => "stat",
            NodeKind::Pagination => "pagination",
            NodeKind::Modal => "modal",
            NodeKind::Drawer => "drawer",
            NodeKind::Tooltip => "tooltip",
            NodeKind::Popover => "popover",
            NodeKind::Dropdown => "dropdown",
            NodeKind::Menu => "menu",
            NodeKind::MenuItem => "menuItem",
            NodeKind::Trigger => "trigger",
            NodeKind::Alert => "alert",
            NodeKind::Overlay => "overlay",
            NodeKind::Spinner => "spinner",
            NodeKind::Nav => "nav",
            NodeKind::NavItem => "navItem",
            NodeKind::Component => "component",
            NodeKind::Use => "use",
            NodeKind::Slot => "slot",
            NodeKind::If => "if",
            NodeKind::Else => "else",
            NodeKind::Each => "each",
            NodeKind::For => "for",
            NodeKind::Sortable => "sortable",
            NodeKind::DropZone => "dropZone",
            NodeKind::Draggable => "draggable",
            NodeKind::Prompt => "prompt",
            NodeKind::Suffix => "suffix",
            NodeKind::Prefix => "prefix",
            NodeKind::Template => "template",
            NodeKind::OptionItem => "option",
            NodeKind::Custom(tag) => tag,
        }
    }

    /// Whether this kind may hold children. Drives the `inside` insertion
    /// contract and drop-target classification. Custom kinds are permissive
    /// so unknown containers keep their subtrees.
    pub fn accepts_children(&self) -> bool {
        matches!(
            self,
            NodeKind::Row
                | NodeKind::Column
                | NodeKind::Stack
                | NodeKind::Grid
                | NodeKind::Card
                | NodeKind::Section
                | NodeKind::Container
                | NodeKind::Tabs
                | NodeKind::Tab
                | NodeKind::Form
                | NodeKind::List
                | NodeKind::Table
                | NodeKind::THead
                | NodeKind::TBody
                | NodeKind::Tr
                | NodeKind::Td
                | NodeKind::Th
                | NodeKind::Modal
                | NodeKind::Drawer
                | NodeKind::Popover
                | NodeKind::Dropdown
                | NodeKind::Menu
                | NodeKind::Nav
                | NodeKind::Slot
                | NodeKind::If
                | NodeKind::Else
                | NodeKind::Each
                | NodeKind::For
                | NodeKind::Sortable
                | NodeKind::DropZone
                | NodeKind::Draggable
                | NodeKind::Template
                | NodeKind::Custom(_)
        )
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        NodeKind::from_tag(&tag)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_tag().to_string()
    }
}

/// The universal unit of the element tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Attribute payload. Key order carries no meaning.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Ordered; rendering/execution order.
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Inline text payload, alongside or instead of children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Provenance: the file this node's content was loaded from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

impl Node {
    pub fn new(kind: NodeKind, ids: &mut IdAllocator) -> Node {
        Node {
            id: ids.next_id(),
            kind,
            properties: BTreeMap::new(),
            children: Vec::new(),
            role: None,
            text: None,
            source_path: None,
        }
    }

    /// Deep-clone this subtree, assigning a brand-new identity to every node
    /// in the clone.
    pub fn clone_with_ids(&self, ids: &mut IdAllocator) -> Node {
        Node {
            id: ids.next_id(),
            kind: self.kind.clone(),
            properties: self.properties.clone(),
            children: self
                .children
                .iter()
                .map(|child| child.clone_with_ids(ids))
                .collect(),
            role: self.role,
            text: self.text.clone(),
            source_path: self.source_path.clone(),
        }
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// One named collection within a [`Document`]. `source` carries a
/// section-level `src` pointer that has not been resolved yet; after
/// resolution the loaded items replace any inline content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub items: Vec<T>,
}

// Derived `Default` would demand `T: Default`; an empty section needs no
// such bound.
impl<T> Default for Section<T> {
    fn default() -> Self {
        Section {
            source: None,
            items: Vec::new(),
        }
    }
}

impl<T> Section<T> {
    pub fn inline(items: Vec<T>) -> Self {
        Section {
            source: None,
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.source.is_none()
    }
}

/// The full set of top-level sections composing one specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_system: Option<String>,
    pub entities: Section<Entity>,
    pub layouts: Section<Layout>,
    pub components: Section<Component>,
    pub pages: Section<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
}

impl Document {
    pub fn empty(name: impl Into<String>) -> Document {
        Document {
            name: name.into(),
            version: "1.0.0".to_string(),
            design_system: None,
            entities: Section::default(),
            layouts: Section::default(),
            components: Section::default(),
            pages: Section::default(),
            navigation: None,
            config: None,
        }
    }

    pub fn layout_named(&self, name: &str) -> Option<&Layout> {
        self.layouts.items.iter().find(|l| l.name == name)
    }
}

// ---------------------------------------------------------------------------
// Entities

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    pub id: NodeId,
    pub name: String,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FieldType {
    String,
    Text,
    Number,
    Boolean,
    Date,
    Datetime,
    Email,
    Url,
    Uuid,
    Json,
    Array,
    Custom(String),
}

impl FieldType {
    pub fn from_tag(tag: &str) -> FieldType {
        match tag {
            "string" => FieldType::String,
            "text" => FieldType::Text,
            "number" => FieldType::Number,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "datetime" => FieldType::Datetime,
            "email" => FieldType::Email,
            "url" => FieldType::Url,
            "uuid" => FieldType::Uuid,
            "json" => FieldType::Json,
            "array" => FieldType::Array,
            other => FieldType::Custom(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Email => "email",
            FieldType::Url => "url",
            FieldType::Uuid => "uuid",
            FieldType::Json => "json",
            FieldType::Array => "array",
            FieldType::Custom(tag) => tag,
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::String
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from_tag(&tag)
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.as_tag().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: NodeId,
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Reference target, e.g. `@entity.User`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Comma-separated enumeration of allowed values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
    /// `one` or `many`, for reference fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType, ids: &mut IdAllocator) -> Field {
        Field {
            id: ids.next_id(),
            name: name.into(),
            field_type,
            required: false,
            unique: false,
            default: None,
            reference: None,
            values: None,
            cardinality: None,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            pattern: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Layouts

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub id: NodeId,
    pub name: String,
    pub slots: Vec<Slot>,
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl Layout {
    /// Find the role of the slot a reference resolves to. Slot references
    /// come in several shapes (`@layout.Main.sidebar`, `@layout.sidebar`,
    /// `sidebar`); the last dot-segment names the slot, matched
    /// case-insensitively.
    pub fn slot_role(&self, slot_ref: &str) -> Option<Role> {
        let slot_name = slot_ref
            .rsplit('.')
            .next()
            .unwrap_or(slot_ref)
            .to_lowercase();
        self.slots
            .iter()
            .find(|s| s.name.to_lowercase() == slot_name)
            .and_then(|s| s.role)
    }

    fn default_slot_role(&self) -> Option<Role> {
        self.slots
            .iter()
            .find(|s| s.name == "content" || s.name == "default")
            .and_then(|s| s.role)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: NodeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default)]
    pub sticky: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default)]
    pub grow: bool,
    #[serde(default)]
    pub scroll: bool,
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

// ---------------------------------------------------------------------------
// Components

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Component {
    pub id: NodeId,
    pub name: String,
    pub props: Vec<PropDef>,
    pub actions: Vec<ActionDef>,
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDef {
    pub id: NodeId,
    pub name: String,
    pub prop_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDef {
    pub id: NodeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

// ---------------------------------------------------------------------------
// Pages

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    pub id: NodeId,
    pub name: String,
    pub route: String,
    /// Layout reference, e.g. `@layout.Main`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub queries: Vec<Query>,
    #[serde(default)]
    pub local_state: Vec<LocalState>,
    #[serde(default)]
    pub states: Vec<PageState>,
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub param_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(default)]
    pub paginated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalState {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A named page state (loading, error, empty, ...) with its own element tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    pub id: NodeId,
    pub name: String,
    pub children: Vec<Node>,
}

// ---------------------------------------------------------------------------
// Navigation

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    pub id: NodeId,
    pub guards: Vec<Guard>,
    pub flows: Vec<Flow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guard {
    pub name: String,
    pub redirect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub id: NodeId,
    pub name: String,
    pub children: Vec<Node>,
}

// ---------------------------------------------------------------------------
// Config

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i18n: Option<I18n>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Assets>,
    /// Guidance prompts attached to the document as a whole.
    #[serde(default)]
    pub prompts: Vec<PromptTemplate>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct I18n {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    #[serde(default)]
    pub locales: Vec<Locale>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locale {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Assets {
    /// Asset name to source path.
    #[serde(default)]
    pub images: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_type: Option<String>,
    pub content: String,
}

// ---------------------------------------------------------------------------

/// Resolve the role a node is edited under. An explicit role always wins.
/// `slot` nodes without one inherit from the layout slot they target (via
/// `target`/`name` property, or a `role` property on the slot node itself);
/// when no specific slot matches, the layout's `content`/`default` slot
/// provides the fallback.
pub fn effective_role(node: &Node, layout: Option<&Layout>) -> Option<Role> {
    if let Some(role) = node.role {
        return Some(role);
    }
    if node.kind != NodeKind::Slot {
        return None;
    }
    if let Some(role) = node.property("role").and_then(Role::parse) {
        return Some(role);
    }
    let layout = layout?;
    if let Some(slot_ref) = node.property("target").or_else(|| node.property("name")) {
        if let Some(role) = layout.slot_role(slot_ref) {
            return Some(role);
        }
    }
    layout.default_slot_role()
}
