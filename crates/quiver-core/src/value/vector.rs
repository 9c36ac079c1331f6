use crate::{error::ConstructionError, value::Number};
use std::fmt;

///
/// Vector
/// Dense vector literal.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Vector {
    F32(Vec<f32>),
    U8(Vec<u8>),
    I8(Vec<i8>),
}

impl Vector {
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::F32(v) => v.len(),
            Self::U8(v) => v.len(),
            Self::I8(v) => v.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn element_type(&self) -> &'static str {
        match self {
            Self::F32(_) => "f32",
            Self::U8(_) => "u8",
            Self::I8(_) => "i8",
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32(v) => write!(f, "Vector(F32({v:?}))"),
            Self::U8(v) => write!(f, "Vector(U8({v:?}))"),
            Self::I8(v) => write!(f, "Vector(I8({v:?}))"),
        }
    }
}

impl From<Vec<f32>> for Vector {
    fn from(v: Vec<f32>) -> Self {
        Self::F32(v)
    }
}

impl From<Vec<u8>> for Vector {
    fn from(v: Vec<u8>) -> Self {
        Self::U8(v)
    }
}

impl From<Vec<i8>> for Vector {
    fn from(v: Vec<i8>) -> Self {
        Self::I8(v)
    }
}

/// Dense f32 vector. Integer elements are converted.
#[must_use]
pub fn f32_vector<N: Into<Number>>(values: impl IntoIterator<Item = N>) -> Vector {
    Vector::F32(values.into_iter().map(|v| v.into().to_f32()).collect())
}

/// Dense u8 vector. Elements must be integers in `0..=255`.
pub fn u8_vector<N: Into<Number>>(
    values: impl IntoIterator<Item = N>,
) -> Result<Vector, ConstructionError> {
    narrow(values, "u8").map(Vector::U8)
}

/// Dense i8 vector. Elements must be integers in `-128..=127`.
pub fn i8_vector<N: Into<Number>>(
    values: impl IntoIterator<Item = N>,
) -> Result<Vector, ConstructionError> {
    narrow(values, "i8").map(Vector::I8)
}

/// Bit-packed binary vector; each element carries eight dimensions.
pub fn binary_vector<N: Into<Number>>(
    values: impl IntoIterator<Item = N>,
) -> Result<Vector, ConstructionError> {
    narrow(values, "u8").map(Vector::U8)
}

pub(super) fn narrow<T, N>(
    values: impl IntoIterator<Item = N>,
    target: &'static str,
) -> Result<Vec<T>, ConstructionError>
where
    T: TryFrom<i64>,
    N: Into<Number>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| v.into().to_int(&format!("values[{i}]"), target))
        .collect()
}
