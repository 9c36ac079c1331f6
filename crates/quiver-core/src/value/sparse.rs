use crate::{error::ConstructionError, value::Number};
use std::{collections::BTreeMap, fmt};

///
/// SparseVector
///
/// Sparse vector literal as parallel index/value arrays. Indices are strictly
/// increasing and the two arrays always have equal length; the fields are
/// private so every instance passes through a checked constructor.
///

#[derive(Clone, Debug, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: SparseValues,
}

impl SparseVector {
    /// Build an f32 sparse vector from already-ordered parallel arrays.
    pub fn f32(indices: Vec<u32>, values: Vec<f32>) -> Result<Self, ConstructionError> {
        check_layout(&indices, values.len())?;

        Ok(Self {
            indices,
            values: SparseValues::F32(values),
        })
    }

    /// Build a u8 sparse vector from already-ordered parallel arrays.
    pub fn u8(indices: Vec<u32>, values: Vec<u8>) -> Result<Self, ConstructionError> {
        check_layout(&indices, values.len())?;

        Ok(Self {
            indices,
            values: SparseValues::U8(values),
        })
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[must_use]
    pub const fn values(&self) -> &SparseValues {
        &self.values
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SparseVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices = &self.indices;
        match &self.values {
            SparseValues::F32(values) => write!(f, "SparseVector(F32({indices:?}, {values:?}))"),
            SparseValues::U8(values) => write!(f, "SparseVector(U8({indices:?}, {values:?}))"),
        }
    }
}

///
/// SparseValues
///

#[derive(Clone, Debug, PartialEq)]
pub enum SparseValues {
    F32(Vec<f32>),
    U8(Vec<u8>),
}

fn check_layout(indices: &[u32], value_count: usize) -> Result<(), ConstructionError> {
    if indices.len() != value_count {
        return Err(ConstructionError::shape(format!(
            "Invalid sparse vector: {} indices but {value_count} values",
            indices.len()
        )));
    }
    if let Some(pair) = indices.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(ConstructionError::shape(format!(
            "Invalid sparse vector: indices must be strictly increasing, found {} followed by {}",
            pair[0], pair[1]
        )));
    }

    Ok(())
}

/// Collect `(index, value)` entries into index order, rejecting duplicates.
fn collect_entries<N: Into<Number>>(
    entries: impl IntoIterator<Item = (u32, N)>,
) -> Result<BTreeMap<u32, Number>, ConstructionError> {
    let mut map = BTreeMap::new();
    for (index, value) in entries {
        if map.insert(index, value.into()).is_some() {
            return Err(ConstructionError::shape(format!(
                "Invalid sparse vector: duplicate index {index}"
            )));
        }
    }

    Ok(map)
}

/// Sparse f32 vector from `(index, value)` entries in any order.
pub fn f32_sparse_vector<N: Into<Number>>(
    entries: impl IntoIterator<Item = (u32, N)>,
) -> Result<SparseVector, ConstructionError> {
    let map = collect_entries(entries)?;
    let (indices, values) = map.into_iter().map(|(i, v)| (i, v.to_f32())).unzip();

    Ok(SparseVector {
        indices,
        values: SparseValues::F32(values),
    })
}

/// Sparse u8 vector from `(index, value)` entries in any order.
pub fn u8_sparse_vector<N: Into<Number>>(
    entries: impl IntoIterator<Item = (u32, N)>,
) -> Result<SparseVector, ConstructionError> {
    let map = collect_entries(entries)?;
    let mut indices = Vec::with_capacity(map.len());
    let mut values = Vec::with_capacity(map.len());
    for (index, value) in map {
        values.push(value.to_int(&format!("values[{index}]"), "u8")?);
        indices.push(index);
    }

    Ok(SparseVector {
        indices,
        values: SparseValues::U8(values),
    })
}
