//! Collection schema as seen by the compile step.
//!
//! A schema is optional. When one is supplied, the compile step uses it to
//! type field references and to check that scoring functions have the index
//! they need; without one those checks are left to the engine.

use crate::{
    error::ConstructionError,
    value::{MatrixValueType, ValueType},
};
use std::{collections::BTreeMap, fmt, str::FromStr};

///
/// Schema
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    fields: BTreeMap<String, FieldSpec>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Index attached to `name`, if the field exists and is indexed.
    #[must_use]
    pub fn index(&self, name: &str) -> Option<&FieldIndex> {
        self.field(name).and_then(|spec| spec.index.as_ref())
    }

    #[must_use]
    pub fn has_keyword_index(&self) -> bool {
        self.fields
            .values()
            .any(|spec| matches!(spec.index, Some(FieldIndex::Keyword)))
    }
}

///
/// FieldSpec
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub data_type: DataType,
    pub index: Option<FieldIndex>,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            index: None,
        }
    }

    #[must_use]
    pub fn index(mut self, index: FieldIndex) -> Self {
        self.index = Some(index);
        self
    }
}

///
/// DataType
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataType {
    Text,
    Integer,
    Float,
    Boolean,
    Bytes,
    F32Vector { dimension: u32 },
    U8Vector { dimension: u32 },
    I8Vector { dimension: u32 },
    BinaryVector { dimension: u32 },
    F32SparseVector,
    U8SparseVector,
    List { element: ListType },
    Matrix { dimension: u32, value_type: MatrixValueType },
}

impl DataType {
    /// Runtime type a field of this data type produces.
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::Text => ValueType::String,
            Self::Integer => ValueType::Int,
            Self::Float => ValueType::Float,
            Self::Boolean => ValueType::Bool,
            Self::Bytes => ValueType::Bytes,
            Self::F32Vector { .. }
            | Self::U8Vector { .. }
            | Self::I8Vector { .. }
            | Self::BinaryVector { .. } => ValueType::Vector,
            Self::F32SparseVector | Self::U8SparseVector => ValueType::SparseVector,
            Self::List { .. } => ValueType::List,
            Self::Matrix { .. } => ValueType::Matrix,
        }
    }
}

///
/// ListType
/// Element type of a list field.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListType {
    U8,
    U32,
    U64,
    I8,
    I32,
    I64,
    F32,
    F64,
    String,
}

///
/// FieldIndex
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldIndex {
    Keyword,
    Vector { metric: VectorMetric },
    Semantic { model: Option<String> },
    MultiVector { metric: VectorMetric },
}

impl FieldIndex {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Vector { .. } => "vector",
            Self::Semantic { .. } => "semantic",
            Self::MultiVector { .. } => "multi-vector",
        }
    }
}

///
/// VectorMetric
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum VectorMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
    Hamming,
}

impl fmt::Display for VectorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cosine => "cosine",
            Self::Euclidean => "euclidean",
            Self::DotProduct => "dot_product",
            Self::Hamming => "hamming",
        };
        f.write_str(label)
    }
}

impl FromStr for VectorMetric {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "euclidean" => Ok(Self::Euclidean),
            "dot_product" => Ok(Self::DotProduct),
            "hamming" => Ok(Self::Hamming),
            _ => Err(ConstructionError::type_coercion(
                "metric",
                "one of cosine, euclidean, dot_product, hamming",
                s,
            )),
        }
    }
}

// ----------------------------------------------------------------------
// Shorthand constructors
// ----------------------------------------------------------------------

#[must_use]
pub const fn text() -> FieldSpec {
    FieldSpec::new(DataType::Text)
}

#[must_use]
pub const fn int() -> FieldSpec {
    FieldSpec::new(DataType::Integer)
}

#[must_use]
pub const fn float() -> FieldSpec {
    FieldSpec::new(DataType::Float)
}

#[must_use]
pub const fn bool() -> FieldSpec {
    FieldSpec::new(DataType::Boolean)
}

#[must_use]
pub const fn bytes() -> FieldSpec {
    FieldSpec::new(DataType::Bytes)
}

#[must_use]
pub const fn f32_vector(dimension: u32) -> FieldSpec {
    FieldSpec::new(DataType::F32Vector { dimension })
}

#[must_use]
pub const fn u8_vector(dimension: u32) -> FieldSpec {
    FieldSpec::new(DataType::U8Vector { dimension })
}

#[must_use]
pub const fn binary_vector(dimension: u32) -> FieldSpec {
    FieldSpec::new(DataType::BinaryVector { dimension })
}

#[must_use]
pub const fn f32_sparse_vector() -> FieldSpec {
    FieldSpec::new(DataType::F32SparseVector)
}

#[must_use]
pub const fn list(element: ListType) -> FieldSpec {
    FieldSpec::new(DataType::List { element })
}

#[must_use]
pub const fn matrix(dimension: u32, value_type: MatrixValueType) -> FieldSpec {
    FieldSpec::new(DataType::Matrix {
        dimension,
        value_type,
    })
}

#[must_use]
pub const fn keyword_index() -> FieldIndex {
    FieldIndex::Keyword
}

#[must_use]
pub const fn vector_index(metric: VectorMetric) -> FieldIndex {
    FieldIndex::Vector { metric }
}

#[must_use]
pub const fn semantic_index() -> FieldIndex {
    FieldIndex::Semantic { model: None }
}

#[must_use]
pub const fn multi_vector_index(metric: VectorMetric) -> FieldIndex {
    FieldIndex::MultiVector { metric }
}
