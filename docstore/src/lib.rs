//! # Docstore - Embedded Schema-less Document Store
//!
//! Docstore is a lightweight, embedded, schema-less document store written in
//! Rust. It keeps named collections of generic documents, converts typed
//! records to and from those documents, and persists the whole store to a
//! single file with crash-safe semantics.
//!
//! ## Key Features
//!
//! - **Embedded**: No separate server process required
//! - **Schema-less**: Documents carry their own field types; collections
//!   impose only a string primary key
//! - **Typed Conversion**: The [`Convertible`]/[`Entity`] traits and their
//!   derive macro map plain structs to documents and back, preserving
//!   numeric width and reporting failures with full field paths
//! - **Events**: Listeners observe collection and store mutations
//! - **Crash-safe Persistence**: The store serializes to a self-describing
//!   byte blob and writes it via temp-file-and-rename, so a destination file
//!   is never seen half-written
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docstore::{doc, CollectionConfig, Store};
//!
//! # fn main() -> Result<(), docstore::StoreError> {
//! let mut store = Store::new();
//!
//! let users = store.create_collection("users", CollectionConfig::new("id"))?;
//! users.put(doc! { id: "u1", name: "Alice", age: 30i64 })?;
//!
//! store.dump_to_file("data/store.db")?;
//! let restored = Store::from_file("data/store.db")?;
//! assert_eq!(restored, store);
//! # Ok(())
//! # }
//! ```
//!
//! Typed records use the derive macro from the companion `docstore_derive`
//! crate:
//!
//! ```rust,ignore
//! use docstore::{marshal, unmarshal, Entity};
//! use docstore_derive::Convertible;
//!
//! #[derive(Convertible, Default, Debug, PartialEq)]
//! struct User {
//!     id: String,
//!     name: String,
//!     age: i64,
//! }
//!
//! let user = User { id: "u1".into(), name: "Alice".into(), age: 30 };
//! let document = marshal(&user)?;
//! let back: User = unmarshal(&document)?;
//! assert_eq!(back, user);
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, collections, and collection events
//! - [`common`] - The field value model and the conversion engine
//! - [`errors`] - Error types and result definitions
//! - [`store`] - The store, store events, and persistence

pub mod collection;
pub mod common;
pub mod errors;
pub mod store;

pub use collection::{
    normalize, Collection, CollectionConfig, CollectionEventInfo, CollectionEventListener,
    CollectionEvents, Document,
};
pub use common::{
    atomic, marshal, unmarshal, unmarshal_into, Atomic, Convertible, Entity, FieldType,
    FieldValue, Number, ReadExecutor,
};
pub use errors::{ErrorKind, StoreError, StoreResult};
pub use store::{Store, StoreEventInfo, StoreEventListener, StoreEvents};
