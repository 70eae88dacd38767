//! Collections and documents for schemaless data storage.
//!
//! # Documents
//!
//! A [`Document`] is a map from field names to type-tagged
//! [`FieldValue`](crate::common::FieldValue)s. Documents own their fields
//! and, transitively, any nested documents inside object or array fields.
//!
//! ```rust,ignore
//! use docstore::collection::Document;
//!
//! let mut doc = Document::new();
//! doc.put("name", "Alice")?;
//! doc.put("age", 30i64)?;
//! ```
//!
//! # Collections
//!
//! A [`Collection`] keeps documents keyed by a configured primary-key field,
//! which must be present and string-typed in every accepted document.
//!
//! ```rust,ignore
//! use docstore::collection::{Collection, CollectionConfig};
//!
//! let mut users = Collection::new("users", CollectionConfig::new("id"))?;
//! users.put(doc! { id: "u1", name: "Alice" })?;
//! let alice = users.get("u1");
//! ```
//!
//! # Events
//!
//! Collections accept injected [`CollectionEventListener`]s, notified on
//! insert, update, and remove.

mod collection;
mod document;
mod event;

pub use collection::{Collection, CollectionConfig};
pub use document::{normalize, Document};
pub use event::{CollectionEventInfo, CollectionEventListener, CollectionEvents};
