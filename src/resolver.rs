//! Multi-file reference resolution.
//!
//! A document may pull section content from outside itself in three ways:
//! a section-level `src` pointing at a single `.xml` file, a section-level
//! `src` pointing at a directory of `*.spec.xml` files, or an item-level
//! `src` on a placeholder item. [`ReferenceResolver`] applies all three
//! against an injected [`FileLoader`], so the same pass runs over a real
//! filesystem or an in-memory corpus.
//!
//! Resolution is best-effort and never aborts assembly. A missing file or
//! directory yields an empty result for that reference; a malformed fragment
//! is skipped; both are logged at `warn`. Sibling references are unaffected
//! either way. A visited-path set guards against reference cycles: loading
//! the same path twice within one pass is treated as malformed.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;

use crate::{
    codec::{parse_fragment, Fragment},
    document::{Component, Document, Entity, Layout, Node, Page, Section},
    error::UispecError,
    ident::IdAllocator,
};

/// Source of external file content. Paths are relative to the document being
/// resolved; interpretation of the base is the loader's concern.
#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Load a file as UTF-8 text.
    async fn load(&self, path: &str) -> Result<String, UispecError>;
    /// List the file names (not paths) directly inside a directory.
    async fn list_dir(&self, path: &str) -> Result<Vec<String>, UispecError>;
}

/// In-memory loader backed by a path map. The workhorse for tests and for
/// hosts that hold file content themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: BTreeMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files
            .insert(normalize(&path.into()).to_string(), content.into());
    }
}

#[async_trait]
impl FileLoader for MemoryLoader {
    async fn load(&self, path: &str) -> Result<String, UispecError> {
        self.files
            .get(normalize(path))
            .cloned()
            .ok_or_else(|| UispecError::NotFound(path.to_string()))
    }

    async fn list_dir(&self, path: &str) -> Result<Vec<String>, UispecError> {
        let prefix = format!("{}/", normalize(path).trim_end_matches('/'));
        let names: Vec<String> = self
            .files
            .keys()
            .filter_map(|key| key.strip_prefix(prefix.as_str()))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            return Err(UispecError::NotFound(path.to_string()));
        }
        Ok(names)
    }
}

/// Loader over a real directory tree via tokio's filesystem.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FsLoader {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        FsLoader { root: root.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl FileLoader for FsLoader {
    async fn load(&self, path: &str) -> Result<String, UispecError> {
        Ok(tokio::fs::read_to_string(self.root.join(normalize(path))).await?)
    }

    async fn list_dir(&self, path: &str) -> Result<Vec<String>, UispecError> {
        let mut entries = tokio::fs::read_dir(self.root.join(normalize(path))).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}

fn normalize(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

// ---------------------------------------------------------------------------
// Section items

/// One resolvable item kind. Ties a section to its fragment variant and
/// exposes the fields resolution needs.
pub trait SectionItem: Sized {
    /// The plural section tag.
    const SECTION: &'static str;

    fn items_from(fragment: Fragment) -> Option<Vec<Self>>;
    fn name(&self) -> &str;
    fn src(&self) -> Option<&str>;
    /// Record where this item's content was loaded from, on the item and on
    /// the roots of its element tree.
    fn set_source(&mut self, src: &str);
    /// A placeholder carries a `src` pointer and no content of its own.
    fn is_placeholder(&self) -> bool;
}

fn stamp_roots(children: &mut [Node], src: &str) {
    for child in children {
        child.source_path = Some(src.to_string());
    }
}

impl SectionItem for Entity {
    const SECTION: &'static str = "entities";

    fn items_from(fragment: Fragment) -> Option<Vec<Self>> {
        match fragment {
            Fragment::Entities(items) => Some(items),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    fn set_source(&mut self, src: &str) {
        self.src = Some(src.to_string());
    }

    fn is_placeholder(&self) -> bool {
        self.src.is_some() && self.fields.is_empty()
    }
}

impl SectionItem for Layout {
    const SECTION: &'static str = "layouts";

    fn items_from(fragment: Fragment) -> Option<Vec<Self>> {
        match fragment {
            Fragment::Layouts(items) => Some(items),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    fn set_source(&mut self, src: &str) {
        self.src = Some(src.to_string());
        stamp_roots(&mut self.children, src);
    }

    fn is_placeholder(&self) -> bool {
        self.src.is_some() && self.slots.is_empty() && self.children.is_empty()
    }
}

impl SectionItem for Component {
    const SECTION: &'static str = "components";

    fn items_from(fragment: Fragment) -> Option<Vec<Self>> {
        match fragment {
            Fragment::Components(items) => Some(items),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    fn set_source(&mut self, src: &str) {
        self.src = Some(src.to_string());
        stamp_roots(&mut self.children, src);
    }

    fn is_placeholder(&self) -> bool {
        self.src.is_some()
            && self.props.is_empty()
            && self.actions.is_empty()
            && self.children.is_empty()
    }
}

impl SectionItem for Page {
    const SECTION: &'static str = "pages";

    fn items_from(fragment: Fragment) -> Option<Vec<Self>> {
        match fragment {
            Fragment::Pages(items) => Some(items),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    fn set_source(&mut self, src: &str) {
        self.src = Some(src.to_string());
        stamp_roots(&mut self.children, src);
    }

    fn is_placeholder(&self) -> bool {
        self.src.is_some() && self.children.is_empty() && self.states.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Resolution

/// One resolution pass over a document. Holds the visited-path set for the
/// cycle guard, so a resolver instance is good for a single document.
pub struct ReferenceResolver<'a> {
    loader: &'a dyn FileLoader,
    ids: &'a mut IdAllocator,
    visited: HashSet<String>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(loader: &'a dyn FileLoader, ids: &'a mut IdAllocator) -> Self {
        ReferenceResolver {
            loader,
            ids,
            visited: HashSet::new(),
        }
    }

    /// Resolve every external reference in the document, in place.
    /// Best-effort; failed references degrade to empty results.
    pub async fn resolve(&mut self, doc: &mut Document) {
        self.resolve_section(&mut doc.entities).await;
        self.resolve_section(&mut doc.layouts).await;
        self.resolve_section(&mut doc.components).await;
        self.resolve_section(&mut doc.pages).await;
    }

    async fn resolve_section<T: SectionItem>(&mut self, section: &mut Section<T>) {
        if let Some(src) = section.source.clone() {
            // A section-level source replaces inline content wholesale, and
            // loaded items are final. They carry `src` provenance, so they
            // must not re-enter the placeholder pass: a legitimately
            // content-light item (an entity with no fields yet) would
            // otherwise look like a placeholder pointing at the
            // already-visited file and be dropped by the cycle guard.
            let items = if src.ends_with(".xml") {
                self.load_section_file(&src).await
            } else {
                self.load_section_dir(&src).await
            };
            section.items = dedupe_by_name(items);
            return;
        }

        let items = std::mem::take(&mut section.items);
        let mut resolved = Vec::with_capacity(items.len());
        let mut loaded_any = false;
        for item in items {
            if !item.is_placeholder() {
                resolved.push(item);
                continue;
            }
            let src = item.src().unwrap_or_default().to_string();
            match self.load_fragment::<T>(&src).await {
                Some(mut loaded) if !loaded.is_empty() => {
                    let mut first = loaded.remove(0);
                    first.set_source(&src);
                    loaded_any = true;
                    resolved.push(first);
                }
                _ => {
                    tracing::warn!(
                        section = T::SECTION,
                        src = %src,
                        "dropping unresolvable placeholder item"
                    );
                }
            }
        }
        // The collision policy covers externally-resolved content only;
        // purely inline sections pass through as authored.
        section.items = if loaded_any {
            dedupe_by_name(resolved)
        } else {
            resolved
        };
    }

    /// Rule 1: a single file holding the whole section.
    async fn load_section_file<T: SectionItem>(&mut self, src: &str) -> Vec<T> {
        match self.load_fragment::<T>(src).await {
            Some(mut items) => {
                for item in &mut items {
                    item.set_source(src);
                }
                items
            }
            None => Vec::new(),
        }
    }

    /// Rule 2: a directory of `*.spec.xml` files, one item each, composed in
    /// lexicographic filename order.
    async fn load_section_dir<T: SectionItem>(&mut self, src: &str) -> Vec<T> {
        let mut names = match self.loader.list_dir(src).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(section = T::SECTION, src = %src, error = %e, "directory not found");
                return Vec::new();
            }
        };
        names.sort();
        let mut items = Vec::new();
        for name in names {
            if !name.ends_with(".spec.xml") {
                continue;
            }
            let path = format!("{}/{}", src.trim_end_matches('/'), name);
            if let Some(mut loaded) = self.load_fragment::<T>(&path).await {
                for item in &mut loaded {
                    item.set_source(&path);
                }
                items.extend(loaded);
            }
        }
        items
    }

    /// Load and parse one fragment file, enforcing the section match and the
    /// cycle guard. `None` covers every failure mode.
    async fn load_fragment<T: SectionItem>(&mut self, path: &str) -> Option<Vec<T>> {
        if path.is_empty() {
            return None;
        }
        if !self.visited.insert(normalize(path).to_string()) {
            tracing::warn!(path = %path, "reference cycle: path already resolved in this pass");
            return None;
        }
        let text = match self.loader.load(path).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "external file not found");
                return None;
            }
        };
        let fragment = match parse_fragment(&text, self.ids) {
            Ok(fragment) => fragment,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "malformed fragment skipped");
                return None;
            }
        };
        let found = fragment.section_tag();
        match T::items_from(fragment) {
            Some(items) => Some(items),
            None => {
                tracing::warn!(
                    path = %path,
                    expected = T::SECTION,
                    found,
                    "fragment does not hold the expected section"
                );
                None
            }
        }
    }
}

/// Last-resolved item wins a name collision; earlier ones are dropped with a
/// warning.
fn dedupe_by_name<T: SectionItem>(items: Vec<T>) -> Vec<T> {
    let mut last_index: BTreeMap<String, usize> = BTreeMap::new();
    for (index, item) in items.iter().enumerate() {
        if let Some(previous) = last_index.insert(item.name().to_string(), index) {
            tracing::warn!(
                section = T::SECTION,
                name = item.name(),
                "name collision: item at position {previous} shadowed by a later one"
            );
        }
    }
    items
        .into_iter()
        .enumerate()
        .filter(|(index, item)| last_index.get(item.name()) == Some(index))
        .map(|(_, item)| item)
        .collect()
}
