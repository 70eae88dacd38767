//! Common types, traits, and utilities.
//!
//! This module holds the value model shared by the whole crate
//! ([`FieldType`], [`Number`], [`FieldValue`]) and the marshal/unmarshal
//! engine ([`Convertible`], [`Entity`], [`marshal`], [`unmarshal`]).

mod convertible;
pub(crate) mod util;
mod value;

pub use convertible::{marshal, unmarshal, unmarshal_into, Convertible, Entity};
pub use util::type_utils::{atomic, Atomic, ReadExecutor};
pub use value::{FieldType, FieldValue, Number};
