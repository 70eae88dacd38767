use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::quote;
use syn::{DataStruct, DeriveInput, Field, LitStr, Result};

pub(crate) fn generate_convertible_for_struct(
    ast: &DeriveInput,
    data: &DataStruct,
) -> Result<TokenStream> {
    let mut ignored_fields: Vec<String> = vec![];

    // Collect field names listed in a `#[converter(ignored = "a, b")]` attribute
    for attr in &ast.attrs {
        if attr.path().is_ident("converter") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("ignored") {
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    for field in s.value().split(',') {
                        ignored_fields.push(field.trim().to_string());
                    }
                }
                Ok(())
            })?
        }
    }

    let fields: Vec<&Field> = match &data.fields {
        syn::Fields::Named(fields) => fields.named.iter().collect(),
        _ => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "Convertible can only be derived for structs with named fields",
            ))
        }
    };

    // Ignored fields take no part in marshal or unmarshal; they keep their
    // default value when a record is rebuilt from a document.
    let mapped_fields: Vec<&Field> = fields
        .iter()
        .filter(|f| {
            f.ident
                .as_ref()
                .map_or(true, |ident| !ignored_fields.contains(&ident.to_string()))
        })
        .copied()
        .collect();

    let mapped_idents: Vec<&Ident> = mapped_fields
        .iter()
        .filter_map(|f| f.ident.as_ref())
        .collect();

    let mapped_names: Vec<String> = mapped_idents.iter().map(|i| i.to_string()).collect();

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let gen = quote! {
        impl #impl_generics docstore::common::Entity for #name #ty_generics #where_clause {
            fn to_document(&self) -> docstore::errors::StoreResult<docstore::collection::Document> {
                let mut document = docstore::collection::Document::new();
                #(
                    document.put(
                        #mapped_names,
                        docstore::common::Convertible::to_field(&self.#mapped_idents)
                            .map_err(|err| err.with_field(#mapped_names))?,
                    )?;
                )*
                Ok(document)
            }

            fn update_from_document(
                &mut self,
                document: &docstore::collection::Document,
            ) -> docstore::errors::StoreResult<()> {
                #(
                    if let Some(value) = document.get(#mapped_names) {
                        docstore::common::Convertible::update_from(&mut self.#mapped_idents, value)
                            .map_err(|err| err.with_field(#mapped_names))?;
                    }
                )*
                Ok(())
            }
        }

        impl #impl_generics docstore::common::Convertible for #name #ty_generics #where_clause {
            fn to_field(&self) -> docstore::errors::StoreResult<docstore::common::FieldValue> {
                Ok(docstore::common::FieldValue::Object(Some(
                    docstore::common::Entity::to_document(self)?,
                )))
            }

            fn from_field(
                value: &docstore::common::FieldValue,
            ) -> docstore::errors::StoreResult<Self> {
                let mut record = <Self as ::core::default::Default>::default();
                docstore::common::Convertible::update_from(&mut record, value)?;
                Ok(record)
            }

            fn update_from(
                &mut self,
                value: &docstore::common::FieldValue,
            ) -> docstore::errors::StoreResult<()> {
                match value {
                    docstore::common::FieldValue::Object(Some(document)) => {
                        docstore::common::Entity::update_from_document(self, document)
                    }
                    // The empty marker leaves the record untouched
                    docstore::common::FieldValue::Object(None) => Ok(()),
                    other => Err(docstore::errors::StoreError::new(
                        &::std::format!("expected object, found {}", other.field_type()),
                        docstore::errors::ErrorKind::TypeMismatch,
                    )),
                }
            }
        }
    };

    Ok(TokenStream::from(gen))
}
