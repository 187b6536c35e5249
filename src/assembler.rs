//! The session facade: parse, resolve, serialize.
//!
//! [`DocumentAssembler`] owns the identity allocator for one session, so
//! every node minted while parsing or resolving draws from the same stream.
//! With a seeded allocator and a deterministic loader, assembly output is
//! reproducible run to run.

use crate::{
    codec,
    document::Document,
    error::UispecError,
    ident::IdAllocator,
    resolver::{FileLoader, ReferenceResolver},
};

pub struct DocumentAssembler {
    ids: IdAllocator,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        DocumentAssembler {
            ids: IdAllocator::random(),
        }
    }

    /// Assembler whose identity stream is derived from `seed`.
    pub fn seeded(seed: &str) -> Self {
        DocumentAssembler {
            ids: IdAllocator::seeded(seed),
        }
    }

    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    /// Parse a document, leaving external references unresolved.
    pub fn parse(&mut self, text: &str) -> Result<Document, UispecError> {
        codec::parse_document(text, &mut self.ids)
    }

    /// Resolve every external reference in place. Best-effort: failures
    /// degrade to empty results and are logged, never returned.
    pub async fn resolve(&mut self, doc: &mut Document, loader: &dyn FileLoader) {
        ReferenceResolver::new(loader, &mut self.ids)
            .resolve(doc)
            .await;
    }

    /// Parse then resolve in one step.
    pub async fn assemble(
        &mut self,
        text: &str,
        loader: &dyn FileLoader,
    ) -> Result<Document, UispecError> {
        let mut doc = self.parse(text)?;
        self.resolve(&mut doc, loader).await;
        Ok(doc)
    }

    pub fn serialize(&self, doc: &Document) -> Result<String, UispecError> {
        codec::serialize_document(doc)
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        DocumentAssembler::new()
    }
}
