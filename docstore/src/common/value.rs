use crate::collection::Document;
use std::fmt::{Display, Formatter};

/// The dynamic kind of a document field.
///
/// A field's type tag is always derived from its value, so the tag can never
/// disagree with the runtime shape of the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum FieldType {
    String,
    Number,
    Bool,
    Array,
    Object,
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Number => write!(f, "number"),
            FieldType::Bool => write!(f, "bool"),
            FieldType::Array => write!(f, "array"),
            FieldType::Object => write!(f, "object"),
        }
    }
}

/// A numeric field value that preserves its native Rust representation.
///
/// Marshaling never normalizes numeric width or signedness: an `i8` stays an
/// `I8`, a `usize` stays a `USize`. Unmarshaling converts between widths by
/// value, with range checking, through the helpers below.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Number {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    ISize(isize),
    USize(usize),
    F32(f32),
    F64(f64),
}

impl Number {
    /// Returns true for the floating-point variants.
    pub fn is_float(&self) -> bool {
        matches!(self, Number::F32(_) | Number::F64(_))
    }

    /// Widens an integer variant to `i128`. Returns `None` for floats and for
    /// `u128` values above `i128::MAX`.
    pub fn to_i128(&self) -> Option<i128> {
        match *self {
            Number::I8(v) => Some(v as i128),
            Number::U8(v) => Some(v as i128),
            Number::I16(v) => Some(v as i128),
            Number::U16(v) => Some(v as i128),
            Number::I32(v) => Some(v as i128),
            Number::U32(v) => Some(v as i128),
            Number::I64(v) => Some(v as i128),
            Number::U64(v) => Some(v as i128),
            Number::I128(v) => Some(v),
            Number::U128(v) => i128::try_from(v).ok(),
            Number::ISize(v) => Some(v as i128),
            Number::USize(v) => Some(v as i128),
            Number::F32(_) | Number::F64(_) => None,
        }
    }

    /// Widens a non-negative integer variant to `u128`. Returns `None` for
    /// floats and negative values.
    pub fn to_u128(&self) -> Option<u128> {
        match *self {
            Number::U8(v) => Some(v as u128),
            Number::U16(v) => Some(v as u128),
            Number::U32(v) => Some(v as u128),
            Number::U64(v) => Some(v as u128),
            Number::U128(v) => Some(v),
            Number::USize(v) => Some(v as u128),
            Number::I8(v) => u128::try_from(v).ok(),
            Number::I16(v) => u128::try_from(v).ok(),
            Number::I32(v) => u128::try_from(v).ok(),
            Number::I64(v) => u128::try_from(v).ok(),
            Number::I128(v) => u128::try_from(v).ok(),
            Number::ISize(v) => u128::try_from(v).ok(),
            Number::F32(_) | Number::F64(_) => None,
        }
    }

    /// The value as an `f64`, losing precision for very large integers.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::I8(v) => v as f64,
            Number::U8(v) => v as f64,
            Number::I16(v) => v as f64,
            Number::U16(v) => v as f64,
            Number::I32(v) => v as f64,
            Number::U32(v) => v as f64,
            Number::I64(v) => v as f64,
            Number::U64(v) => v as f64,
            Number::I128(v) => v as f64,
            Number::U128(v) => v as f64,
            Number::ISize(v) => v as f64,
            Number::USize(v) => v as f64,
            Number::F32(v) => v as f64,
            Number::F64(v) => v,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Number::I8(v) => write!(f, "{}", v),
            Number::U8(v) => write!(f, "{}", v),
            Number::I16(v) => write!(f, "{}", v),
            Number::U16(v) => write!(f, "{}", v),
            Number::I32(v) => write!(f, "{}", v),
            Number::U32(v) => write!(f, "{}", v),
            Number::I64(v) => write!(f, "{}", v),
            Number::U64(v) => write!(f, "{}", v),
            Number::I128(v) => write!(f, "{}", v),
            Number::U128(v) => write!(f, "{}", v),
            Number::ISize(v) => write!(f, "{}", v),
            Number::USize(v) => write!(f, "{}", v),
            Number::F32(v) => write!(f, "{}", v),
            Number::F64(v) => write!(f, "{}", v),
        }
    }
}

/// Represents one document field value.
///
/// # Purpose
/// Provides the tagged representation for everything a document can hold:
/// text, numbers, booleans, ordered arrays of further values, and nested
/// documents. The variant itself is the type tag, so a field's declared type
/// and its runtime shape cannot drift apart.
///
/// # Variants
/// - `String(String)`: text value
/// - `Number(Number)`: numeric value in its native width and signedness
/// - `Bool(bool)`: boolean value
/// - `Array(Vec<FieldValue>)`: ordered, possibly heterogeneous sequence
/// - `Object(Option<Document>)`: a fully owned nested document, or `None` as
///   the explicit empty marker for a null/absent nested record
///
/// # Usage
/// Values are usually built through `From` conversions or the `doc!` macro:
/// ```text
/// let v1: FieldValue = 42i32.into();
/// let v2 = FieldValue::from("hello");
/// let doc = doc! { name: "Alice", age: 30i64 };
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum FieldValue {
    /// Represents a text value.
    String(String),
    /// Represents a numeric value in its native representation.
    Number(Number),
    /// Represents a boolean value.
    Bool(bool),
    /// Represents an ordered sequence of field values.
    Array(Vec<FieldValue>),
    /// Represents a nested document, or the explicit empty marker.
    Object(Option<Document>),
}

impl FieldValue {
    /// Returns the type tag matching this value's shape.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::String(_) => FieldType::String,
            FieldValue::Number(_) => FieldType::Number,
            FieldValue::Bool(_) => FieldType::Bool,
            FieldValue::Array(_) => FieldType::Array,
            FieldValue::Object(_) => FieldType::Object,
        }
    }

    /// Returns the text if this is a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a `Number` value.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            FieldValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements if this is an `Array` value.
    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested document if this is a non-empty `Object` value.
    pub fn as_object(&self) -> Option<&Document> {
        match self {
            FieldValue::Object(Some(doc)) => Some(doc),
            _ => None,
        }
    }

    /// Returns true if this is the explicit empty object marker.
    pub fn is_empty_object(&self) -> bool {
        matches!(self, FieldValue::Object(None))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Number> for FieldValue {
    fn from(value: Number) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Document> for FieldValue {
    fn from(value: Document) -> Self {
        FieldValue::Object(Some(value))
    }
}

impl From<Option<Document>> for FieldValue {
    fn from(value: Option<Document>) -> Self {
        FieldValue::Object(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::Array(values.into_iter().map(Into::into).collect())
    }
}

macro_rules! from_numeric {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for FieldValue {
                fn from(value: $t) -> Self {
                    FieldValue::Number(Number::$variant(value))
                }
            }
        )*
    };
}

from_numeric! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    i128 => I128,
    u128 => U128,
    isize => ISize,
    usize => USize,
    f32 => F32,
    f64 => F64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_matches_shape() {
        assert_eq!(FieldValue::from("a").field_type(), FieldType::String);
        assert_eq!(FieldValue::from(1i32).field_type(), FieldType::Number);
        assert_eq!(FieldValue::from(true).field_type(), FieldType::Bool);
        assert_eq!(
            FieldValue::from(vec![1i32, 2, 3]).field_type(),
            FieldType::Array
        );
        assert_eq!(
            FieldValue::from(Document::new()).field_type(),
            FieldType::Object
        );
        assert_eq!(FieldValue::Object(None).field_type(), FieldType::Object);
    }

    #[test]
    fn test_number_keeps_native_width() {
        assert_eq!(FieldValue::from(5i8), FieldValue::Number(Number::I8(5)));
        assert_eq!(FieldValue::from(5u64), FieldValue::Number(Number::U64(5)));
        assert_ne!(FieldValue::from(5i8), FieldValue::from(5i64));
    }

    #[test]
    fn test_to_i128() {
        assert_eq!(Number::I8(-3).to_i128(), Some(-3));
        assert_eq!(Number::U64(u64::MAX).to_i128(), Some(u64::MAX as i128));
        assert_eq!(Number::U128(u128::MAX).to_i128(), None);
        assert_eq!(Number::F64(1.0).to_i128(), None);
    }

    #[test]
    fn test_to_u128() {
        assert_eq!(Number::I8(-3).to_u128(), None);
        assert_eq!(Number::U128(u128::MAX).to_u128(), Some(u128::MAX));
        assert_eq!(Number::I64(7).to_u128(), Some(7));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Number::I32(-2).as_f64(), -2.0);
        assert_eq!(Number::F32(1.5).as_f64(), 1.5);
    }

    #[test]
    fn test_accessors() {
        let value = FieldValue::from("hello");
        assert_eq!(value.as_str(), Some("hello"));
        assert_eq!(value.as_bool(), None);

        let value = FieldValue::from(vec!["a", "b"]);
        assert_eq!(value.as_array().map(|a| a.len()), Some(2));

        assert!(FieldValue::Object(None).is_empty_object());
        assert!(FieldValue::Object(None).as_object().is_none());
    }

    #[test]
    fn test_heterogeneous_array() {
        let value = FieldValue::Array(vec![
            FieldValue::from(1i32),
            FieldValue::from("two"),
            FieldValue::from(true),
        ]);
        let items = value.as_array().unwrap();
        assert_eq!(items[0].field_type(), FieldType::Number);
        assert_eq!(items[1].field_type(), FieldType::String);
        assert_eq!(items[2].field_type(), FieldType::Bool);
    }
}
