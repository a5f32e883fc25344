//! Field assignment helpers for macro-generated code

use crate::error::{Error, Result};
use crate::field::FieldValue;

/// Conversion from a coerced [`FieldValue`] into a concrete field type.
#[doc(hidden)]
pub trait FromFieldValue: Sized {
    /// Convert `value` for the field named `field`.
    fn from_field_value(field: &str, value: FieldValue) -> Result<Self>;
}

/// Assign a coerced value to a field slot.
///
/// Used by the derive macro for every supported field.
#[doc(hidden)]
pub fn assign<T: FromFieldValue>(slot: &mut T, field: &str, value: FieldValue) -> Result<()> {
    *slot = T::from_field_value(field, value)?;
    Ok(())
}

fn mismatch<T>(field: &str, value: &FieldValue) -> Error {
    Error::coerce::<T>(field, format!("got a {} value", value.kind_name()))
}

macro_rules! impl_from_field_value {
    ($variant:ident => $($ty:ty),+) => {
        $(
            impl FromFieldValue for $ty {
                fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
                    match value {
                        FieldValue::$variant(v) => {
                            <$ty>::try_from(v).map_err(|e| Error::coerce::<$ty>(field, e))
                        }
                        other => Err(mismatch::<$ty>(field, &other)),
                    }
                }
            }
        )+
    };
}

impl_from_field_value!(Signed => i8, i16, i32, i64, isize);
impl_from_field_value!(Unsigned => u8, u16, u32, u64, usize);

impl FromFieldValue for String {
    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Str(s) => Ok(s),
            other => Err(mismatch::<Self>(field, &other)),
        }
    }
}

impl FromFieldValue for bool {
    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(mismatch::<Self>(field, &other)),
        }
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::Float(v) => Ok(v),
            other => Err(mismatch::<Self>(field, &other)),
        }
    }
}

impl FromFieldValue for f32 {
    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        match value {
            // Parsed at f32 precision, so narrowing is exact
            FieldValue::Float(v) => Ok(v as f32),
            other => Err(mismatch::<Self>(field, &other)),
        }
    }
}

impl FromFieldValue for Vec<String> {
    fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
        match value {
            FieldValue::List(items) => Ok(items),
            other => Err(mismatch::<Self>(field, &other)),
        }
    }
}
