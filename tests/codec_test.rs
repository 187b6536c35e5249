use test_log::test;

use uispec_core::{
    assembler::DocumentAssembler,
    document::{NodeKind, Role},
};

const STOREFRONT: &str = r##"
<webapp name="Storefront" version="1.2.0" designSystem="tailwind">
  <entities>
    <entity name="Product">
      <field name="id" type="uuid" required="true" unique="true"/>
      <field name="title" type="string" required="true" minLength="1" maxLength="120"/>
      <field name="price" type="number" min="0"/>
      <field name="status" type="string" values="draft,active,archived" default="draft"/>
      <field name="vendor" type="string" ref="@entity.Vendor" cardinality="one"/>
    </entity>
    <entity name="Vendor">
      <field name="id" type="uuid" required="true"/>
      <field name="email" type="email"/>
    </entity>
  </entities>
  <layouts>
    <layout name="Main">
      <slot name="header" position="top" sticky="true" height="64px" role="chrome"/>
      <container direction="row">
        <slot name="sidebar" width="240px" collapsible="true" role="chrome"/>
        <slot name="content" grow="true" scroll="true" role="content"/>
      </container>
    </layout>
  </layouts>
  <components>
    <component name="ProductCard">
      <props>
        <prop name="product" type="@entity.Product" required="true"/>
        <prop name="compact" type="boolean" default="false"/>
      </props>
      <actions>
        <action name="onSelect" params="product"/>
      </actions>
      <card>
        <image src="{product.image}"/>
        <text weight="bold">{product.title}</text>
      </card>
    </component>
  </components>
  <pages>
    <page name="Catalog" route="/products" layout="@layout.Main" title="Products">
      <params>
        <param name="category" type="string"/>
      </params>
      <data>
        <query name="products" source="@entity.Product" filter="status = 'active'"
               orderBy="title" paginated="true" pageSize="24"/>
      </data>
      <localState>
        <state name="view" type="string" default="grid"/>
      </localState>
      <states>
        <state name="loading"><spinner size="lg"/></state>
        <state name="empty"><text>No products yet</text></state>
      </states>
      <slot target="content">
        <grid columns="3">
          <each item="product" in="products">
            <use component="ProductCard" product="{product}"/>
          </each>
        </grid>
      </slot>
    </page>
  </pages>
  <navigation>
    <guards>
      <guard name="auth" redirect="/login" message="Sign in first"/>
    </guards>
    <flows>
      <flow name="checkout"><text>Cart to confirmation</text></flow>
    </flows>
  </navigation>
  <config>
    <theme mode="light">
      <colors primary="#0f172a" accent="#f59e0b"/>
    </theme>
    <i18n default="en">
      <locale name="en"/>
      <locale name="de" src="./locales/de.xml"/>
    </i18n>
    <llm>
      <prompt type="style">Prefer dense tables over cards.</prompt>
    </llm>
  </config>
</webapp>
"##;

/// Serialization carries no identities, so structural equivalence modulo
/// identity is exactly serialized-form equality.
#[test]
fn test_round_trip_is_structurally_stable() {
    let mut assembler = DocumentAssembler::new();
    let first = assembler.parse(STOREFRONT).unwrap();
    let once = assembler.serialize(&first).unwrap();
    let second = assembler.parse(&once).unwrap();
    let twice = assembler.serialize(&second).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_parse_populates_every_section() {
    let mut assembler = DocumentAssembler::seeded("codec-test");
    let doc = assembler.parse(STOREFRONT).unwrap();

    assert_eq!(doc.name, "Storefront");
    assert_eq!(doc.version, "1.2.0");
    assert_eq!(doc.design_system.as_deref(), Some("tailwind"));

    let product = &doc.entities.items[0];
    assert_eq!(product.fields.len(), 5);
    assert_eq!(product.fields[1].max_length, Some(120));
    assert_eq!(product.fields[4].reference.as_deref(), Some("@entity.Vendor"));

    let layout = doc.layout_named("Main").unwrap();
    assert_eq!(layout.slots.len(), 3);
    assert_eq!(layout.slot_role("@layout.Main.sidebar"), Some(Role::Chrome));

    let card = &doc.components.items[0];
    assert_eq!(card.props[0].prop_type, "@entity.Product");
    assert_eq!(card.actions[0].params.as_deref(), Some("product"));
    assert_eq!(card.children[0].kind, NodeKind::Card);

    let catalog = &doc.pages.items[0];
    assert_eq!(catalog.route, "/products");
    assert!(catalog.queries[0].paginated);
    assert_eq!(catalog.states[1].children[0].text.as_deref(), Some("No products yet"));
    // The page's element tree holds only the slot subtree; metadata wrappers
    // are consumed by the item parsers.
    assert_eq!(catalog.children.len(), 1);
    assert_eq!(catalog.children[0].kind, NodeKind::Slot);

    let nav = doc.navigation.as_ref().unwrap();
    assert_eq!(nav.guards[0].redirect, "/login");
    assert_eq!(nav.flows[0].name, "checkout");

    let config = doc.config.as_ref().unwrap();
    let theme = config.theme.as_ref().unwrap();
    assert_eq!(theme.colors.get("primary").map(String::as_str), Some("#0f172a"));
    assert_eq!(config.i18n.as_ref().unwrap().locales.len(), 2);
    assert_eq!(config.prompts[0].prompt_type.as_deref(), Some("style"));
}

#[test]
fn test_identities_are_fresh_per_parse() {
    let mut assembler = DocumentAssembler::new();
    let first = assembler.parse(STOREFRONT).unwrap();
    let second = assembler.parse(STOREFRONT).unwrap();
    assert_ne!(first.pages.items[0].id, second.pages.items[0].id);
    assert_ne!(
        first.pages.items[0].children[0].id,
        second.pages.items[0].children[0].id
    );
    // Same structure regardless.
    assert_eq!(
        assembler.serialize(&first).unwrap(),
        assembler.serialize(&second).unwrap()
    );
}

#[test]
fn test_custom_tags_round_trip() {
    let text = r#"<webapp name="x" version="1.0.0"><pages><page name="p" route="/">
        <holo-panel depth="3"><text>inside</text></holo-panel>
    </page></pages></webapp>"#;
    let mut assembler = DocumentAssembler::new();
    let doc = assembler.parse(text).unwrap();
    let custom = &doc.pages.items[0].children[0];
    assert_eq!(custom.kind, NodeKind::Custom("holo-panel".to_string()));
    assert_eq!(custom.children[0].text.as_deref(), Some("inside"));

    let out = assembler.serialize(&doc).unwrap();
    assert!(out.contains("<holo-panel depth=\"3\">"));
    let reparsed = assembler.parse(&out).unwrap();
    assert_eq!(assembler.serialize(&reparsed).unwrap(), out);
}

#[test]
fn test_serialized_text_payloads_escape() {
    let text = r#"<webapp name="x" version="1.0.0"><pages><page name="p" route="/">
        <text>a &amp; b &lt; c</text>
    </page></pages></webapp>"#;
    let mut assembler = DocumentAssembler::new();
    let doc = assembler.parse(text).unwrap();
    assert_eq!(
        doc.pages.items[0].children[0].text.as_deref(),
        Some("a & b < c")
    );
    let out = assembler.serialize(&doc).unwrap();
    let reparsed = assembler.parse(&out).unwrap();
    assert_eq!(
        reparsed.pages.items[0].children[0].text.as_deref(),
        Some("a & b < c")
    );
}
