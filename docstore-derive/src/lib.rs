#![recursion_limit = "128"]
//! # Docstore Derive Macros
//!
//! This crate provides the procedural macro that wires user structs into the
//! docstore marshaling engine.
//!
//! ## `Convertible`
//!
//! Derives the `Convertible` and `Entity` traits for structs with named
//! fields, enabling automatic conversion between Rust records and docstore's
//! `Document` representation. Every field type must itself implement
//! `Convertible`, and the struct must implement `Default` (missing document
//! fields are left at their default value during unmarshaling).
//!
//! # Examples
//!
//! ```rust,ignore
//! use docstore_derive::Convertible;
//!
//! #[derive(Convertible, Default)]
//! pub struct User {
//!     pub id: String,
//!     pub name: String,
//!     pub age: u32,
//! }
//! ```
//!
//! ## Field attribute
//!
//! `#[converter(ignored = "a, b")]` on the struct skips the named fields on
//! marshal and leaves them at their default value on unmarshal.
//!
//! ## Error Messages
//!
//! Deriving fails with a compile error for enums, tuple structs, and unit
//! structs; only structs with named fields can be mapped to documents.

extern crate proc_macro;
mod convertible;

use crate::convertible::generate_convertible_for_struct;
use proc_macro::TokenStream;
use syn::{Data, DeriveInput};

/// Derives the `Convertible` and `Entity` traits for a struct.
///
/// The generated code marshals every named field into a document field of
/// the same name, depth first, and unmarshals in place, field by field.
/// Failures carry the offending field's name so nested errors read as a
/// dotted path.
#[proc_macro_derive(Convertible, attributes(converter))]
pub fn convertible_derive(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);

    let result = match &ast.data {
        Data::Struct(data) => generate_convertible_for_struct(&ast, data),
        _ => Err(syn::Error::new_spanned(
            &ast.ident,
            "Convertible can only be derived for structs with named fields",
        )),
    };

    match result {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
