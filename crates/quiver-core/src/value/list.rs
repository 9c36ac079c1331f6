use crate::{
    error::ConstructionError,
    value::{Number, vector::narrow},
};
use std::fmt;

///
/// List
/// Homogeneous typed list literal.
///

#[derive(Clone, Debug, PartialEq)]
pub enum List {
    U8(Vec<u8>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    I8(Vec<i8>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    String(Vec<String>),
}

impl List {
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::U64(v) => v.len(),
            Self::I8(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::String(v) => v.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(v) => write!(f, "List(U8({v:?}))"),
            Self::U32(v) => write!(f, "List(U32({v:?}))"),
            Self::U64(v) => write!(f, "List(U64({v:?}))"),
            Self::I8(v) => write!(f, "List(I8({v:?}))"),
            Self::I32(v) => write!(f, "List(I32({v:?}))"),
            Self::I64(v) => write!(f, "List(I64({v:?}))"),
            Self::F32(v) => write!(f, "List(F32({v:?}))"),
            Self::F64(v) => write!(f, "List(F64({v:?}))"),
            Self::String(v) => write!(f, "List(String({v:?}))"),
        }
    }
}

impl From<Vec<String>> for List {
    fn from(v: Vec<String>) -> Self {
        Self::String(v)
    }
}

impl From<Vec<&str>> for List {
    fn from(v: Vec<&str>) -> Self {
        Self::String(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for List {
    fn from(v: Vec<i64>) -> Self {
        Self::I64(v)
    }
}

impl From<Vec<i32>> for List {
    fn from(v: Vec<i32>) -> Self {
        Self::I32(v)
    }
}

impl From<Vec<u32>> for List {
    fn from(v: Vec<u32>) -> Self {
        Self::U32(v)
    }
}

impl From<Vec<f64>> for List {
    fn from(v: Vec<f64>) -> Self {
        Self::F64(v)
    }
}

impl From<Vec<f32>> for List {
    fn from(v: Vec<f32>) -> Self {
        Self::F32(v)
    }
}

// ----------------------------------------------------------------------
// Constructors
// ----------------------------------------------------------------------

pub fn u8_list<N: Into<Number>>(
    values: impl IntoIterator<Item = N>,
) -> Result<List, ConstructionError> {
    narrow(values, "u8").map(List::U8)
}

pub fn u32_list<N: Into<Number>>(
    values: impl IntoIterator<Item = N>,
) -> Result<List, ConstructionError> {
    narrow(values, "u32").map(List::U32)
}

pub fn u64_list<N: Into<Number>>(
    values: impl IntoIterator<Item = N>,
) -> Result<List, ConstructionError> {
    narrow(values, "u64").map(List::U64)
}

pub fn i8_list<N: Into<Number>>(
    values: impl IntoIterator<Item = N>,
) -> Result<List, ConstructionError> {
    narrow(values, "i8").map(List::I8)
}

pub fn i32_list<N: Into<Number>>(
    values: impl IntoIterator<Item = N>,
) -> Result<List, ConstructionError> {
    narrow(values, "i32").map(List::I32)
}

pub fn i64_list<N: Into<Number>>(
    values: impl IntoIterator<Item = N>,
) -> Result<List, ConstructionError> {
    narrow(values, "i64").map(List::I64)
}

#[must_use]
pub fn f32_list<N: Into<Number>>(values: impl IntoIterator<Item = N>) -> List {
    List::F32(values.into_iter().map(|v| v.into().to_f32()).collect())
}

#[must_use]
pub fn f64_list<N: Into<Number>>(values: impl IntoIterator<Item = N>) -> List {
    List::F64(values.into_iter().map(|v| v.into().to_f64()).collect())
}

#[must_use]
pub fn string_list<S: Into<String>>(values: impl IntoIterator<Item = S>) -> List {
    List::String(values.into_iter().map(Into::into).collect())
}
