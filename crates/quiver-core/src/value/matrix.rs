use crate::{error::ConstructionError, value::Number};
use float8::F8E4M3;
use half::f16;
use std::{fmt, str::FromStr};

const EMPTY_MATRIX: &str = "Cannot create matrix from empty list";

///
/// Matrix
///
/// Row-major rectangular matrix literal used for multi-vector search.
/// `num_cols` is non-zero and evenly divides the element count.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    num_cols: u32,
    values: MatrixValues,
}

impl Matrix {
    /// Build from a flat row-major buffer.
    pub fn from_flat(num_cols: u32, values: MatrixValues) -> Result<Self, ConstructionError> {
        if num_cols == 0 || values.is_empty() {
            return Err(ConstructionError::shape(EMPTY_MATRIX));
        }
        if values.len() % num_cols as usize != 0 {
            return Err(divisibility_error(values.len(), num_cols));
        }

        Ok(Self { num_cols, values })
    }

    #[must_use]
    pub const fn num_cols(&self) -> u32 {
        self.num_cols
    }

    #[must_use]
    pub const fn num_rows(&self) -> usize {
        self.values.len() / self.num_cols as usize
    }

    /// Total element count.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub const fn values(&self) -> &MatrixValues {
        &self.values
    }

    #[must_use]
    pub const fn value_type(&self) -> MatrixValueType {
        self.values.value_type()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix({}, {})", self.num_cols, self.values)
    }
}

///
/// MatrixValues
///

#[derive(Clone, Debug, PartialEq)]
pub enum MatrixValues {
    F32(Vec<f32>),
    F16(Vec<f16>),
    F8(Vec<F8E4M3>),
    U8(Vec<u8>),
    I8(Vec<i8>),
}

impl MatrixValues {
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::F32(v) => v.len(),
            Self::F16(v) => v.len(),
            Self::F8(v) => v.len(),
            Self::U8(v) => v.len(),
            Self::I8(v) => v.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn value_type(&self) -> MatrixValueType {
        match self {
            Self::F32(_) => MatrixValueType::F32,
            Self::F16(_) => MatrixValueType::F16,
            Self::F8(_) => MatrixValueType::F8,
            Self::U8(_) => MatrixValueType::U8,
            Self::I8(_) => MatrixValueType::I8,
        }
    }
}

impl fmt::Display for MatrixValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32(v) => write!(f, "F32({v:?})"),
            Self::F16(v) => write!(f, "F16({v:?})"),
            Self::F8(v) => write!(f, "F8({v:?})"),
            Self::U8(v) => write!(f, "U8({v:?})"),
            Self::I8(v) => write!(f, "I8({v:?})"),
        }
    }
}

///
/// MatrixValueType
/// Supported matrix element types.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MatrixValueType {
    F8,
    F16,
    #[default]
    F32,
    U8,
    I8,
}

impl MatrixValueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::F8 => "f8",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::U8 => "u8",
            Self::I8 => "i8",
        }
    }
}

impl fmt::Display for MatrixValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatrixValueType {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f8" => Ok(Self::F8),
            "f16" => Ok(Self::F16),
            "f32" => Ok(Self::F32),
            "u8" => Ok(Self::U8),
            "i8" => Ok(Self::I8),
            other => Err(ConstructionError::shape(format!(
                "Unsupported value_type: {other}. Supported types: f8, f16, f32, u8, i8"
            ))),
        }
    }
}

/// Build a matrix from rows.
///
/// Rows must be non-empty and of equal length. A total element count that
/// does not divide by the first row's length is reported before ragged rows.
/// `value_type` defaults to f32; integer element types reject float inputs
/// and out-of-range integers.
pub fn matrix<R, N>(
    rows: impl IntoIterator<Item = R>,
    value_type: Option<MatrixValueType>,
) -> Result<Matrix, ConstructionError>
where
    R: IntoIterator<Item = N>,
    N: Into<Number>,
{
    let rows: Vec<Vec<Number>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect();

    let num_cols = rows.first().map_or(0, Vec::len);
    if num_cols == 0 {
        return Err(ConstructionError::shape(EMPTY_MATRIX));
    }
    let total: usize = rows.iter().map(Vec::len).sum();
    if total % num_cols != 0 {
        return Err(divisibility_error(total, num_cols));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != num_cols {
            return Err(ConstructionError::shape(format!(
                "All rows must have the same length. Row {i} has length {}, but expected {num_cols}",
                row.len()
            )));
        }
    }

    let num_cols = u32::try_from(num_cols)
        .map_err(|_| ConstructionError::range("num_cols", num_cols, "u32"))?;
    let flat = rows.into_iter().flatten();
    let values = match value_type.unwrap_or_default() {
        MatrixValueType::F32 => MatrixValues::F32(flat.map(Number::to_f32).collect()),
        MatrixValueType::F16 => {
            MatrixValues::F16(flat.map(|v| f16::from_f32(v.to_f32())).collect())
        }
        MatrixValueType::F8 => {
            MatrixValues::F8(flat.map(|v| F8E4M3::from_f32(v.to_f32())).collect())
        }
        MatrixValueType::U8 => MatrixValues::U8(narrow_cells(flat, num_cols, "u8")?),
        MatrixValueType::I8 => MatrixValues::I8(narrow_cells(flat, num_cols, "i8")?),
    };

    Matrix::from_flat(num_cols, values)
}

fn narrow_cells<T: TryFrom<i64>>(
    cells: impl Iterator<Item = Number>,
    num_cols: u32,
    target: &'static str,
) -> Result<Vec<T>, ConstructionError> {
    let num_cols = num_cols as usize;
    cells
        .enumerate()
        .map(|(i, v)| v.to_int(&format!("rows[{}][{}]", i / num_cols, i % num_cols), target))
        .collect()
}

fn divisibility_error(len: usize, num_cols: impl fmt::Display) -> ConstructionError {
    ConstructionError::shape(format!(
        "len(values) must be divisible by num_cols, got {len} values for {num_cols} columns"
    ))
}
