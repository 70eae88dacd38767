//! The document store and its persistence layer.
//!
//! A [`Store`] owns named [`Collection`](crate::collection::Collection)s and
//! is the unit of persistence: the whole graph serializes to an opaque byte
//! blob ([`Store::dump`]) and back ([`Store::from_dump`]), with crash-safe
//! file wrappers ([`Store::dump_to_file`], [`Store::from_file`]).
//!
//! The store is a single-writer, in-process structure: no internal locking,
//! no background tasks. Callers that need concurrent access must serialize
//! all access to a given store externally.

mod document_store;
mod event;
mod persistence;

pub use document_store::Store;
pub use event::{StoreEventInfo, StoreEventListener, StoreEvents};
