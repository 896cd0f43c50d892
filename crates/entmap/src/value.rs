//! Cell values, semantic field types and the read-accessor table.

use crate::error::ValueError;
use std::fmt;

/// Semantic type of an entity field.
///
/// Each variant corresponds to exactly one read accessor on a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    SmallInt,
    Int,
    BigInt,
    Real,
    Double,
    Text,
    Bytes,
}

impl FieldType {
    /// Name of the result-set read accessor for this type.
    pub const fn accessor_name(self) -> &'static str {
        match self {
            Self::Bool => "get_bool",
            Self::SmallInt => "get_short",
            Self::Int => "get_int",
            Self::BigInt => "get_long",
            Self::Real => "get_float",
            Self::Double => "get_double",
            Self::Text => "get_string",
            Self::Bytes => "get_bytes",
        }
    }

    /// Whether a cell of type `self` can be read losslessly as `target`.
    pub const fn widens_to(self, target: FieldType) -> bool {
        matches!(
            (self, target),
            (Self::Bool, Self::Bool)
                | (Self::SmallInt, Self::SmallInt | Self::Int | Self::BigInt)
                | (Self::Int, Self::Int | Self::BigInt)
                | (Self::BigInt, Self::BigInt)
                | (Self::Real, Self::Real | Self::Double)
                | (Self::Double, Self::Double)
                | (Self::Text, Self::Text)
                | (Self::Bytes, Self::Bytes)
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::SmallInt => "smallint",
            Self::Int => "int",
            Self::BigInt => "bigint",
            Self::Real => "real",
            Self::Double => "double",
            Self::Text => "text",
            Self::Bytes => "bytes",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a result column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlType {
    Bool,
    SmallInt,
    Int,
    BigInt,
    Real,
    Double,
    Text,
    Bytes,
    /// A database type with no read accessor (e.g. `uuid`, `jsonb`).
    Other(String),
}

impl SqlType {
    /// The field type cells of this column carry, if readable at all.
    pub fn field_type(&self) -> Option<FieldType> {
        Some(match self {
            Self::Bool => FieldType::Bool,
            Self::SmallInt => FieldType::SmallInt,
            Self::Int => FieldType::Int,
            Self::BigInt => FieldType::BigInt,
            Self::Real => FieldType::Real,
            Self::Double => FieldType::Double,
            Self::Text => FieldType::Text,
            Self::Bytes => FieldType::Bytes,
            Self::Other(_) => return None,
        })
    }
}

impl From<FieldType> for SqlType {
    fn from(ty: FieldType) -> Self {
        match ty {
            FieldType::Bool => Self::Bool,
            FieldType::SmallInt => Self::SmallInt,
            FieldType::Int => Self::Int,
            FieldType::BigInt => Self::BigInt,
            FieldType::Real => Self::Real,
            FieldType::Double => Self::Double,
            FieldType::Text => Self::Text,
            FieldType::Bytes => Self::Bytes,
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(name) => f.write_str(name),
            known => match known.field_type() {
                Some(ty) => f.write_str(ty.as_str()),
                None => Ok(()),
            },
        }
    }
}

/// A single result cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Real(f32),
    Double(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The field type of a non-null cell.
    pub fn field_type(&self) -> Option<FieldType> {
        Some(match self {
            Self::Null => return None,
            Self::Bool(_) => FieldType::Bool,
            Self::SmallInt(_) => FieldType::SmallInt,
            Self::Int(_) => FieldType::Int,
            Self::BigInt(_) => FieldType::BigInt,
            Self::Real(_) => FieldType::Real,
            Self::Double(_) => FieldType::Double,
            Self::Text(_) => FieldType::Text,
            Self::Bytes(_) => FieldType::Bytes,
        })
    }

    pub fn type_name(&self) -> &'static str {
        match self.field_type() {
            Some(ty) => ty.as_str(),
            None => "null",
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: FieldValue> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.to_value()
    }
}

/// A Rust type that can back an entity field.
///
/// Implemented for the scalar types the mapper understands and for `Option`
/// of each (nullable columns).
pub trait FieldValue: Sized {
    const FIELD_TYPE: FieldType;
    const NULLABLE: bool = false;

    fn from_value(value: Value) -> Result<Self, ValueError>;

    fn to_value(&self) -> Value;
}

macro_rules! impl_field_value {
    ($ty:ty, $variant:ident) => {
        impl FieldValue for $ty {
            const FIELD_TYPE: FieldType = FieldType::$variant;

            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    Value::Null => Err(ValueError::UnexpectedNull(FieldType::$variant)),
                    other => Err(ValueError::TypeMismatch {
                        expected: FieldType::$variant,
                        found: other.type_name(),
                    }),
                }
            }

            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }
    };
}

impl_field_value!(bool, Bool);
impl_field_value!(i16, SmallInt);
impl_field_value!(i32, Int);
impl_field_value!(i64, BigInt);
impl_field_value!(f32, Real);
impl_field_value!(f64, Double);
impl_field_value!(String, Text);
impl_field_value!(Vec<u8>, Bytes);

impl<T: FieldValue> FieldValue for Option<T> {
    const FIELD_TYPE: FieldType = T::FIELD_TYPE;
    const NULLABLE: bool = true;

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

/// A read accessor resolved for one column: reads cells of the column's type
/// and widens them to the field's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadAccessor {
    source: FieldType,
    target: FieldType,
}

impl ReadAccessor {
    /// Resolve the accessor reading `column` cells as `target`.
    ///
    /// Returns `None` when the column type has no lossless path to `target`.
    pub fn resolve(target: FieldType, column: &SqlType) -> Option<Self> {
        let source = column.field_type()?;
        source
            .widens_to(target)
            .then_some(Self { source, target })
    }

    pub fn name(&self) -> &'static str {
        self.target.accessor_name()
    }

    pub fn target(&self) -> FieldType {
        self.target
    }

    /// Read one cell. `NULL` passes through untouched.
    pub fn read(&self, cell: &Value) -> Result<Value, ValueError> {
        if cell.is_null() {
            return Ok(Value::Null);
        }
        if cell.field_type() != Some(self.source) {
            return Err(ValueError::TypeMismatch {
                expected: self.source,
                found: cell.type_name(),
            });
        }

        Ok(match (cell, self.target) {
            (Value::SmallInt(v), FieldType::Int) => Value::Int(i32::from(*v)),
            (Value::SmallInt(v), FieldType::BigInt) => Value::BigInt(i64::from(*v)),
            (Value::Int(v), FieldType::BigInt) => Value::BigInt(i64::from(*v)),
            (Value::Real(v), FieldType::Double) => Value::Double(f64::from(*v)),
            (v, _) => v.clone(),
        })
    }
}
