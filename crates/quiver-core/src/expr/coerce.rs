//! Dynamic operand coercion.
//!
//! Values that arrive untyped (decoded JSON, host-language bindings) are
//! checked against the operator's operand category here. Supported inputs
//! become literal nodes; anything else is rejected with a type-coercion error
//! naming the argument and the rejected type.

use crate::{
    error::ConstructionError,
    expr::{BinaryOp, Expr},
    value::{List, Value},
};

/// Message returned when an expression is asked for a native truth value.
pub const LOGICAL_KEYWORDS_UNSUPPORTED: &str = "Using `and` or `or` keywords with Logical expressions is not supported. Please use `&` or `|` instead.";

///
/// Operand
/// Untyped operand at the coercion boundary.
///

#[derive(Clone, Debug)]
pub enum Operand {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Sequence(Vec<Self>),
    Mapping(Vec<(String, Self)>),
    Expr(Expr),
    /// Any other input, carried by type name for error reporting.
    Other(String),
}

impl Operand {
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Expr(_) => "expression",
            Self::Other(name) => name,
        }
    }

    /// Coerce into an expression accepted by `category`.
    pub fn into_expr(
        self,
        category: OperandCategory,
        argument: &str,
    ) -> Result<Expr, ConstructionError> {
        use OperandCategory as C;

        let reject = |found: &str| {
            ConstructionError::type_coercion(argument, category.expected(), found)
        };

        let value = match (category, self) {
            (_, Self::Expr(expr)) => return Ok(expr),
            (C::Flexible, Self::Null) => Value::Null,
            (C::Boolish | C::Flexible, Self::Bool(v)) => Value::Bool(v),
            (C::Numeric | C::Ordered | C::Flexible, Self::Int(v)) => Value::I64(v),
            (C::Numeric | C::Ordered | C::Flexible, Self::Float(v)) => Value::F64(v),
            (
                C::Ordered | C::Flexible | C::Stringy | C::StringyList | C::Iterable,
                Self::String(v),
            ) => Value::String(v),
            (C::Flexible, Self::Bytes(v)) => Value::Bytes(v),
            (C::StringyList, Self::Sequence(items)) => match string_items(items) {
                Some(strings) => Value::List(List::String(strings)),
                None => return Err(reject("sequence")),
            },
            (C::Iterable, Self::Sequence(items)) => match homogeneous_list(items) {
                Some(list) => Value::List(list),
                None => return Err(reject("sequence")),
            },
            (_, other) => return Err(reject(other.type_name())),
        };

        Ok(Expr::Literal(value))
    }
}

fn string_items(items: Vec<Operand>) -> Option<Vec<String>> {
    items
        .into_iter()
        .map(|item| match item {
            Operand::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

/// Strings, integers, or numbers with at least one float (widened to f64).
#[expect(clippy::cast_precision_loss)]
fn homogeneous_list(items: Vec<Operand>) -> Option<List> {
    if items.iter().all(|item| matches!(item, Operand::String(_))) {
        return string_items(items).map(List::String);
    }
    if items.iter().all(|item| matches!(item, Operand::Int(_))) {
        let ints = items
            .into_iter()
            .filter_map(|item| match item {
                Operand::Int(v) => Some(v),
                _ => None,
            })
            .collect();
        return Some(List::I64(ints));
    }

    items
        .into_iter()
        .map(|item| match item {
            Operand::Int(v) => Some(v as f64),
            Operand::Float(v) => Some(v),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .map(List::F64)
}

impl From<serde_json::Value> for Operand {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Self::Null,
            Json::Bool(v) => Self::Bool(v),
            Json::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Self::Int(v)
                } else if n.is_u64() {
                    // integers past i64::MAX have no lossless literal
                    Self::Other("u64 out of i64 range".to_string())
                } else {
                    n.as_f64()
                        .map_or_else(|| Self::Other("number".to_string()), Self::Float)
                }
            }
            Json::String(v) => Self::String(v),
            Json::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Json::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Expr> for Operand {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

///
/// OperandCategory
/// Operand class each binary operator accepts.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperandCategory {
    Numeric,
    Ordered,
    Boolish,
    Flexible,
    Stringy,
    StringyList,
    Iterable,
}

impl OperandCategory {
    #[must_use]
    pub const fn of(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Pow
            | BinaryOp::Coalesce => Self::Numeric,
            BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
            | BinaryOp::Min
            | BinaryOp::Max => Self::Ordered,
            BinaryOp::And | BinaryOp::Or => Self::Boolish,
            BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::Contains => Self::Flexible,
            BinaryOp::StartsWith => Self::Stringy,
            BinaryOp::MatchAll | BinaryOp::MatchAny => Self::StringyList,
            BinaryOp::In => Self::Iterable,
        }
    }

    #[must_use]
    pub const fn expected(self) -> &'static str {
        match self {
            Self::Numeric => "int, float or expression",
            Self::Ordered => "int, float, string or expression",
            Self::Boolish => "bool or expression",
            Self::Flexible => "null, bool, int, float, string, bytes or expression",
            Self::Stringy => "string or expression",
            Self::StringyList => "string, list of strings or expression",
            Self::Iterable => "string, list or expression",
        }
    }
}

impl Expr {
    /// Apply `op` with `self` on the left and a dynamically typed right operand.
    pub fn apply(self, op: BinaryOp, other: impl Into<Operand>) -> Result<Self, ConstructionError> {
        let rhs = other.into().into_expr(OperandCategory::of(op), "other")?;

        Ok(Self::binary(self, op, rhs))
    }

    /// Apply `op` with a dynamically typed left operand and `self` on the right.
    ///
    /// Commutative operators mirror the scalar onto the right; ordering
    /// comparisons flip (`x < self` becomes `self > x`); `-`, `/`, `pow` and
    /// `coalesce` keep the scalar on the left.
    pub fn apply_reflected(
        self,
        op: BinaryOp,
        other: impl Into<Operand>,
    ) -> Result<Self, ConstructionError> {
        let lhs = other.into().into_expr(OperandCategory::of(op), "other")?;

        let expr = match op {
            BinaryOp::Add
            | BinaryOp::Mul
            | BinaryOp::And
            | BinaryOp::Or
            | BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Min
            | BinaryOp::Max => Self::binary(self, op, lhs),
            BinaryOp::Sub | BinaryOp::Div | BinaryOp::Pow | BinaryOp::Coalesce => {
                Self::binary(lhs, op, self)
            }
            BinaryOp::Lt => Self::binary(self, BinaryOp::Gt, lhs),
            BinaryOp::LtEq => Self::binary(self, BinaryOp::GtEq, lhs),
            BinaryOp::Gt => Self::binary(self, BinaryOp::Lt, lhs),
            BinaryOp::GtEq => Self::binary(self, BinaryOp::LtEq, lhs),
            BinaryOp::StartsWith
            | BinaryOp::Contains
            | BinaryOp::In
            | BinaryOp::MatchAll
            | BinaryOp::MatchAny => {
                return Err(ConstructionError::unsupported(format!(
                    "operator {op} has no reflected form"
                )));
            }
        };

        Ok(expr)
    }

    /// Power with an optional modulus. Modular power is not implemented.
    pub fn try_pow(
        self,
        exponent: impl Into<Operand>,
        modulus: Option<Operand>,
    ) -> Result<Self, ConstructionError> {
        if modulus.is_some() {
            return Err(ConstructionError::unsupported(
                "pow() with a modulus argument is not implemented",
            ));
        }

        self.apply(BinaryOp::Pow, exponent)
    }
}

impl TryFrom<&Expr> for bool {
    type Error = ConstructionError;

    fn try_from(_: &Expr) -> Result<Self, Self::Error> {
        Err(ConstructionError::unsupported(LOGICAL_KEYWORDS_UNSUPPORTED))
    }
}
