//! Core engine for declarative UI specification documents.
//!
//! A specification describes an application as typed sections (entities,
//! layouts, components, pages) whose content is a forest of typed element
//! nodes. This crate provides the document model and the operations a host
//! editor or compiler builds on:
//!
//! - [`document`]: the typed model and its invariants (unique identity,
//!   acyclic single-ownership trees, ordered children, role inheritance).
//! - [`codec`]: the XML wire format, reading and writing.
//! - [`store`]: read-only lookup and traversal over element forests.
//! - [`editor`]: structural mutation (insert, remove, move, duplicate,
//!   reorder) with pre-validated, atomic operations.
//! - [`resolver`]: multi-file composition over an injected [`resolver::FileLoader`],
//!   so one logical document can be assembled from section files, item files
//!   and directories of fragments.
//! - [`assembler`]: the session facade tying parse, resolution and
//!   serialization to one identity allocator.
//! - [`droptarget`]: geometry-based drop-target resolution for hosts that
//!   implement drag interactions.
//!
//! I/O is asynchronous and injected; the crate itself never touches the
//! filesystem outside [`resolver::FsLoader`]. Recoverable resolution
//! failures are logged via `tracing` and degrade to empty results rather
//! than aborting assembly.

pub mod assembler;
pub mod codec;
pub mod document;
pub mod droptarget;
pub mod editor;
pub mod error;
pub mod ident;
pub mod resolver;
pub mod store;

pub use error::*;
