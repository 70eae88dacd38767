use crate::collection::Document;
use crate::common::{FieldType, FieldValue, Number};
use crate::errors::{ErrorKind, StoreError, StoreResult};

/// Conversion between a Rust value and a document field value.
///
/// This is the marshal/unmarshal engine's dispatch point. Dispatch is
/// resolved statically: each supported type carries its own conversion, and
/// `#[derive(Convertible)]` generates the per-field code for user structs.
///
/// `update_from` converts in place; the default implementation replaces the
/// whole value, and the derive overrides it for structs so that unmarshaling
/// writes field by field.
pub trait Convertible: Sized {
    /// Marshals this value into a field value.
    fn to_field(&self) -> StoreResult<FieldValue>;

    /// Unmarshals a new value from a field value, type-checking as it goes.
    fn from_field(value: &FieldValue) -> StoreResult<Self>;

    /// Unmarshals into this value in place.
    fn update_from(&mut self, value: &FieldValue) -> StoreResult<()> {
        *self = Self::from_field(value)?;
        Ok(())
    }
}

/// Document-level mapping for record types, generated by
/// `#[derive(Convertible)]` for structs with named fields.
///
/// `update_from_document` looks up each struct field by name. An absent field
/// leaves the current value untouched, which is not an error: documents may be
/// partial relative to a target type. The first mismatch aborts the call with
/// the failing field's path; fields processed before the failure keep their
/// new values.
pub trait Entity: Convertible {
    /// Marshals this record into a document, depth first. Any nested failure
    /// aborts the whole call; no partial document is returned.
    fn to_document(&self) -> StoreResult<Document>;

    /// Unmarshals a document into this record in place.
    fn update_from_document(&mut self, document: &Document) -> StoreResult<()>;
}

/// Marshals a record into a document.
pub fn marshal<T: Entity>(record: &T) -> StoreResult<Document> {
    record.to_document()
}

/// Unmarshals a document into a freshly defaulted record.
pub fn unmarshal<T: Entity + Default>(document: &Document) -> StoreResult<T> {
    let mut record = T::default();
    record.update_from_document(document)?;
    Ok(record)
}

/// Unmarshals a document into an existing record in place.
///
/// Fields absent from the document keep their current value. On failure,
/// fields processed before the failing one keep their newly written values;
/// callers that need all-or-nothing semantics should unmarshal into a scratch
/// record first.
pub fn unmarshal_into<T: Entity>(document: &Document, record: &mut T) -> StoreResult<()> {
    record.update_from_document(document)
}

fn type_mismatch(expected: FieldType, actual: &FieldValue) -> StoreError {
    let message = format!("expected {}, found {}", expected, actual.field_type());
    log::error!("{}", message);
    StoreError::new(&message, ErrorKind::TypeMismatch)
}

fn expect_array(value: &FieldValue) -> StoreResult<&[FieldValue]> {
    match value {
        FieldValue::Array(items) => Ok(items),
        other => Err(type_mismatch(FieldType::Array, other)),
    }
}

impl Convertible for String {
    fn to_field(&self) -> StoreResult<FieldValue> {
        Ok(FieldValue::String(self.clone()))
    }

    fn from_field(value: &FieldValue) -> StoreResult<Self> {
        match value {
            FieldValue::String(s) => Ok(s.clone()),
            other => Err(type_mismatch(FieldType::String, other)),
        }
    }
}

impl Convertible for bool {
    fn to_field(&self) -> StoreResult<FieldValue> {
        Ok(FieldValue::Bool(*self))
    }

    fn from_field(value: &FieldValue) -> StoreResult<Self> {
        match value {
            FieldValue::Bool(b) => Ok(*b),
            other => Err(type_mismatch(FieldType::Bool, other)),
        }
    }
}

fn conversion_error(number: &Number, target: &str) -> StoreError {
    let message = format!("cannot convert {} to {}", number, target);
    log::error!("{}", message);
    StoreError::new(&message, ErrorKind::ConversionError)
}

// Integer conversions are value-preserving: any stored integer width converts
// when the value fits the destination, and floats convert only when finite
// and integral. Out-of-range values are a ConversionError, never wrapped.
macro_rules! convertible_int {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Convertible for $t {
                fn to_field(&self) -> StoreResult<FieldValue> {
                    Ok(FieldValue::Number(Number::$variant(*self)))
                }

                fn from_field(value: &FieldValue) -> StoreResult<Self> {
                    let number = match value {
                        FieldValue::Number(n) => n,
                        other => return Err(type_mismatch(FieldType::Number, other)),
                    };
                    let converted = if number.is_float() {
                        // i128::MAX and u128::MAX are not representable in
                        // f64, so the range checks use exclusive power-of-two
                        // bounds, which are exact. Non-negative values go
                        // through a u128 intermediate so the upper half of the
                        // u128 range converts without saturating at i128::MAX.
                        let f = number.as_f64();
                        if !f.is_finite() || f.fract() != 0.0 {
                            None
                        } else if f >= 0.0 && f < 2f64.powi(128) {
                            <$t>::try_from(f as u128).ok()
                        } else if f >= -(2f64.powi(127)) && f < 0.0 {
                            <$t>::try_from(f as i128).ok()
                        } else {
                            None
                        }
                    } else {
                        match number.to_i128() {
                            Some(v) => <$t>::try_from(v).ok(),
                            // u128 values above i128::MAX
                            None => number.to_u128().and_then(|v| <$t>::try_from(v).ok()),
                        }
                    };
                    converted.ok_or_else(|| conversion_error(number, stringify!($t)))
                }
            }
        )*
    };
}

convertible_int! {
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
}

impl Convertible for f32 {
    fn to_field(&self) -> StoreResult<FieldValue> {
        Ok(FieldValue::Number(Number::F32(*self)))
    }

    fn from_field(value: &FieldValue) -> StoreResult<Self> {
        match value {
            FieldValue::Number(n) => Ok(n.as_f64() as f32),
            other => Err(type_mismatch(FieldType::Number, other)),
        }
    }
}

impl Convertible for f64 {
    fn to_field(&self) -> StoreResult<FieldValue> {
        Ok(FieldValue::Number(Number::F64(*self)))
    }

    fn from_field(value: &FieldValue) -> StoreResult<Self> {
        match value {
            FieldValue::Number(n) => Ok(n.as_f64()),
            other => Err(type_mismatch(FieldType::Number, other)),
        }
    }
}

impl<T: Convertible> Convertible for Vec<T> {
    fn to_field(&self) -> StoreResult<FieldValue> {
        let mut items = Vec::with_capacity(self.len());
        for (index, element) in self.iter().enumerate() {
            items.push(element.to_field().map_err(|err| err.with_index(index))?);
        }
        Ok(FieldValue::Array(items))
    }

    fn from_field(value: &FieldValue) -> StoreResult<Self> {
        let items = expect_array(value)?;
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            out.push(T::from_field(item).map_err(|err| err.with_index(index))?);
        }
        Ok(out)
    }
}

impl<T: Convertible, const N: usize> Convertible for [T; N] {
    fn to_field(&self) -> StoreResult<FieldValue> {
        let mut items = Vec::with_capacity(N);
        for (index, element) in self.iter().enumerate() {
            items.push(element.to_field().map_err(|err| err.with_index(index))?);
        }
        Ok(FieldValue::Array(items))
    }

    fn from_field(value: &FieldValue) -> StoreResult<Self> {
        let items = expect_array(value)?;
        if items.len() != N {
            let message = format!("array length mismatch: have {}, need {}", items.len(), N);
            log::error!("{}", message);
            return Err(StoreError::new(&message, ErrorKind::LengthMismatch));
        }
        let mut out = Vec::with_capacity(N);
        for (index, item) in items.iter().enumerate() {
            out.push(T::from_field(item).map_err(|err| err.with_index(index))?);
        }
        out.try_into().map_err(|_| {
            StoreError::new("array length mismatch", ErrorKind::InternalError)
        })
    }
}

// A `None` marshals to the explicit empty object marker regardless of the
// pointee type.
impl<T: Convertible> Convertible for Option<T> {
    fn to_field(&self) -> StoreResult<FieldValue> {
        match self {
            Some(inner) => inner.to_field(),
            None => Ok(FieldValue::Object(None)),
        }
    }

    fn from_field(value: &FieldValue) -> StoreResult<Self> {
        match value {
            FieldValue::Object(None) => Ok(None),
            other => Ok(Some(T::from_field(other)?)),
        }
    }

    fn update_from(&mut self, value: &FieldValue) -> StoreResult<()> {
        match value {
            FieldValue::Object(None) => {
                *self = None;
                Ok(())
            }
            other => match self {
                // transparent dereference: allocate when currently empty
                Some(inner) => inner.update_from(other),
                None => {
                    *self = Some(T::from_field(other)?);
                    Ok(())
                }
            },
        }
    }
}

impl<T: Entity + Default> Entity for Option<T> {
    fn to_document(&self) -> StoreResult<Document> {
        match self {
            Some(record) => record.to_document(),
            None => {
                log::error!("cannot marshal an absent record");
                Err(StoreError::new(
                    "cannot marshal an absent record",
                    ErrorKind::NilOrInvalidInput,
                ))
            }
        }
    }

    fn update_from_document(&mut self, document: &Document) -> StoreResult<()> {
        self.get_or_insert_with(T::default)
            .update_from_document(document)
    }
}
