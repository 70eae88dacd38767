use crate::common::FieldValue;
use crate::errors::{ErrorKind, StoreError, StoreResult};
use std::collections::BTreeMap;

/// A generic, self-describing representation of a structured record.
///
/// Documents are composed of named fields. The field name is always a
/// [String] and the value is a type-tagged [`FieldValue`]. A document
/// exclusively owns its fields and, transitively, any nested documents inside
/// object or array fields; the graph has no sharing and no cycles.
///
/// Documents are usually produced by [`marshal`](crate::common::marshal)ing a
/// typed record, or built directly with the [`doc!`](crate::doc) macro:
///
/// ```ignore
/// let doc = doc! {
///     name: "Alice",
///     age: 30i64,
///     address: { city: "New York", zip: "10001" },
/// };
/// assert_eq!(doc.size(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Document {
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            fields: BTreeMap::new(),
        }
    }

    /// Checks if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields in the document.
    pub fn size(&self) -> usize {
        self.fields.len()
    }

    /// Associates the specified value with the specified field name.
    ///
    /// If the field already exists, its value is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the field name is empty.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> StoreResult<()> {
        let name = name.into();
        if name.is_empty() {
            log::error!("Document does not support an empty field name");
            return Err(StoreError::new(
                "Document does not support an empty field name",
                ErrorKind::InvalidOperation,
            ));
        }
        self.fields.insert(name, value.into());
        Ok(())
    }

    /// Returns the value of the named field, if present.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Removes the named field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Checks whether the document contains the named field.
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns an iterator over the field names.
    pub fn field_names(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    /// Returns an iterator over (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}

/// Strips the quotes `stringify!` leaves around string-literal keys, so the
/// `doc!` macro accepts both identifier and quoted keys.
pub fn normalize(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Creates a [`Document`] from field/value pairs.
///
/// Keys can be identifiers or string literals; values can be expressions,
/// nested `{ ... }` documents, or `[ ... ]` arrays.
///
/// # Examples
///
/// ```ignore
/// let simple = doc! {
///     name: "Alice",
///     age: 30
/// };
///
/// let complex = doc! {
///     user: {
///         name: "Charlie",
///         tags: ["admin", "user"]
///     },
///     values: [1, 2, 3]
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::field_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::field_value!($value))
                    .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the `doc!` macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! field_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::FieldValue::Object(Some($crate::doc!{ $($key : $value),* }))
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::FieldValue::Array(vec![$($crate::field_value!($value)),*])
    };

    // match an expression (variable, function call, literal, etc.)
    ($value:expr) => {
        $crate::common::FieldValue::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{FieldType, Number};

    #[test]
    fn test_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.size(), 0);
    }

    #[test]
    fn test_put_and_get() {
        let mut doc = Document::new();
        doc.put("name", "Alice").unwrap();
        doc.put("age", 30i64).unwrap();

        assert_eq!(doc.size(), 2);
        assert_eq!(doc.get("name").and_then(|v| v.as_str()), Some("Alice"));
        assert_eq!(
            doc.get("age"),
            Some(&FieldValue::Number(Number::I64(30)))
        );
        assert!(doc.get("missing").is_none());
    }

    #[test]
    fn test_put_replaces_existing_field() {
        let mut doc = Document::new();
        doc.put("status", "inactive").unwrap();
        doc.put("status", "active").unwrap();
        assert_eq!(doc.size(), 1);
        assert_eq!(doc.get("status").and_then(|v| v.as_str()), Some("active"));
    }

    #[test]
    fn test_put_empty_name_fails() {
        let mut doc = Document::new();
        let err = doc.put("", "value").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_remove() {
        let mut doc = Document::new();
        doc.put("gone", true).unwrap();
        assert_eq!(doc.remove("gone"), Some(FieldValue::Bool(true)));
        assert_eq!(doc.remove("gone"), None);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("\"ABC\""), "ABC");
        assert_eq!(normalize("ABC"), "ABC");
    }

    #[test]
    fn test_doc_macro() {
        let doc = doc! {
            score: 1034,
            location: {
                state: "NY",
                city: "New York",
                house: ["1", "2", "3"],
            },
            category: ["food", "produce", "grocery"],
        };

        assert_eq!(doc.size(), 3);
        let location = doc.get("location").and_then(|v| v.as_object()).unwrap();
        assert_eq!(location.get("state").and_then(|v| v.as_str()), Some("NY"));
        assert_eq!(
            location.get("house").and_then(|v| v.as_array()).map(|a| a.len()),
            Some(3)
        );
        assert_eq!(
            doc.get("category").unwrap().field_type(),
            FieldType::Array
        );
    }

    #[test]
    fn test_doc_macro_string_keys() {
        let doc = doc! { "name": "Bob" };
        assert_eq!(doc.get("name").and_then(|v| v.as_str()), Some("Bob"));
    }

    #[test]
    fn test_empty_doc_macro() {
        let doc = doc! {};
        assert!(doc.is_empty());
    }

    #[test]
    fn test_iter() {
        let doc = doc! { b: 2, a: 1 };
        let names: Vec<&String> = doc.field_names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(doc.iter().count(), 2);
    }
}
