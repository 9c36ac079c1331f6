//! Typed literal values.
//!
//! Module: value
//! Responsibility: the closed set of scalar and collection values an
//! expression literal or document field can carry, and the data-construction
//! API that validates vector, sparse-vector, matrix and list payloads.
//! Does not own: expression nodes or coercion of operator operands.

mod list;
mod matrix;
mod number;
mod sparse;
mod vector;

#[cfg(test)]
mod tests;

pub use list::{
    List, f32_list, f64_list, i8_list, i32_list, i64_list, string_list, u8_list, u32_list,
    u64_list,
};
pub use matrix::{Matrix, MatrixValueType, MatrixValues, matrix};
pub use number::Number;
pub use sparse::{SparseValues, SparseVector, f32_sparse_vector, u8_sparse_vector};
pub use vector::{Vector, binary_vector, f32_vector, i8_vector, u8_vector};

use crate::error::ConstructionError;
use std::fmt;

///
/// Value
///
/// One literal value. Integers are widened to signed 64-bit and floats to
/// double precision on the way in.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Vector(Vector),
    SparseVector(SparseVector),
    List(List),
    Matrix(Matrix),
}

impl Value {
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Bool(_) => ValueType::Bool,
            Self::I64(_) => ValueType::Int,
            Self::F64(_) => ValueType::Float,
            Self::String(_) => ValueType::String,
            Self::Bytes(_) => ValueType::Bytes,
            Self::Vector(_) => ValueType::Vector,
            Self::SparseVector(_) => ValueType::SparseVector,
            Self::List(_) => ValueType::List,
            Self::Matrix(_) => ValueType::Matrix,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => write!(f, "Bool({v})"),
            Self::I64(v) => write!(f, "I64({v})"),
            Self::F64(v) => write!(f, "F64({v:?})"),
            Self::String(v) => write!(f, "String({v:?})"),
            Self::Bytes(v) => write!(f, "Bytes({v:?})"),
            Self::Vector(v) => write!(f, "{v}"),
            Self::SparseVector(v) => write!(f, "{v}"),
            Self::List(v) => write!(f, "{v}"),
            Self::Matrix(v) => write!(f, "{v}"),
        }
    }
}

/// Build a bytes value.
#[must_use]
pub fn bytes(data: impl Into<Vec<u8>>) -> Value {
    Value::Bytes(data.into())
}

// ----------------------------------------------------------------------
// Conversions
// ----------------------------------------------------------------------

macro_rules! value_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::I64(i64::from(v))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::F64(f64::from(v))
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        match v {
            Number::Int(v) => Self::I64(v),
            Number::Float(v) => Self::F64(v),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::String(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<Vector> for Value {
    fn from(v: Vector) -> Self {
        Self::Vector(v)
    }
}

impl From<SparseVector> for Value {
    fn from(v: SparseVector) -> Self {
        Self::SparseVector(v)
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Self::List(v)
    }
}

impl From<Matrix> for Value {
    fn from(v: Matrix) -> Self {
        Self::Matrix(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl TryFrom<u64> for Value {
    type Error = ConstructionError;

    fn try_from(v: u64) -> Result<Self, Self::Error> {
        i64::try_from(v)
            .map(Self::I64)
            .map_err(|_| ConstructionError::range("value", v, "i64"))
    }
}

impl TryFrom<usize> for Value {
    type Error = ConstructionError;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        i64::try_from(v)
            .map(Self::I64)
            .map_err(|_| ConstructionError::range("value", v, "i64"))
    }
}

///
/// ValueType
/// Runtime type tag, used by result-type inference and error messages.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Float,
    String,
    Bytes,
    Vector,
    SparseVector,
    List,
    Matrix,
}

impl ValueType {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// Types a sort or topk key may produce.
    #[must_use]
    pub const fn is_sortable(self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::Bytes => "Bytes",
            Self::Vector => "Vector",
            Self::SparseVector => "SparseVector",
            Self::List => "List",
            Self::Matrix => "Matrix",
        };
        f.write_str(label)
    }
}
