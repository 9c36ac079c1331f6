//! Result-type inference for sort and topk keys.
//!
//! Inference is best effort. `None` means the type depends on data the
//! compile step cannot see (a field with no schema), and the check is left to
//! the engine.

use crate::{
    db::ID_FIELD,
    expr::{BinaryOp, Expr, TernaryOp, UnaryOp},
    query::Schema,
    value::ValueType,
};
use std::collections::BTreeMap;

///
/// TypeEnv
///

#[derive(Clone, Copy)]
pub(crate) struct TypeEnv<'a> {
    schema: Option<&'a Schema>,
    select: Option<&'a BTreeMap<String, Expr>>,
}

impl<'a> TypeEnv<'a> {
    pub(crate) const fn new(
        schema: Option<&'a Schema>,
        select: &'a BTreeMap<String, Expr>,
    ) -> Self {
        Self {
            schema,
            select: Some(select),
        }
    }

    // Select expressions read document fields, never other select columns.
    const fn documents_only(self) -> Self {
        Self {
            schema: self.schema,
            select: None,
        }
    }

    pub(crate) fn infer(self, expr: &Expr) -> Option<ValueType> {
        match expr {
            Expr::Field(name) => self.field(name),
            Expr::Literal(value) => Some(value.value_type()),
            Expr::Unary { op, expr } => match op {
                UnaryOp::Not | UnaryOp::IsNull | UnaryOp::IsNotNull => Some(ValueType::Bool),
                UnaryOp::Abs | UnaryOp::Square => self.infer(expr),
                UnaryOp::Ln | UnaryOp::Exp | UnaryOp::Sqrt => Some(ValueType::Float),
            },
            Expr::Binary { left, op, right } => self.binary(left, *op, right),
            Expr::Ternary { op, y, z, .. } => match op {
                TernaryOp::RegexpMatch => Some(ValueType::Bool),
                TernaryOp::Choose => match self.infer(y)? {
                    ValueType::Null => self.infer(z),
                    other => Some(other),
                },
            },
            Expr::Nary { .. } | Expr::Match(_) => Some(ValueType::Bool),
            Expr::Function(_) => Some(ValueType::Float),
        }
    }

    fn field(self, name: &str) -> Option<ValueType> {
        if name == ID_FIELD {
            return Some(ValueType::String);
        }
        if let Some(alias) = self.select.and_then(|select| select.get(name)) {
            return self.documents_only().infer(alias);
        }

        let schema = self.schema?;
        Some(
            schema
                .field(name)
                .map_or(ValueType::Null, |spec| spec.data_type.value_type()),
        )
    }

    fn binary(self, left: &Expr, op: BinaryOp, right: &Expr) -> Option<ValueType> {
        if op.is_predicate() {
            return Some(ValueType::Bool);
        }

        let l = self.infer(left)?;
        match op {
            BinaryOp::Coalesce if l == ValueType::Null => self.infer(right),
            BinaryOp::Coalesce => Some(l),
            BinaryOp::Div => {
                let r = self.infer(right)?;
                Some(if l.is_numeric() && r.is_numeric() {
                    ValueType::Float
                } else {
                    widen(l, r)
                })
            }
            _ => self.infer(right).map(|r| widen(l, r)),
        }
    }
}

// Arithmetic over two ints stays int; any float widens the result.
// Non-numeric operands carry their own type through so the caller reports it.
fn widen(l: ValueType, r: ValueType) -> ValueType {
    match (l, r) {
        (ValueType::Int, ValueType::Int) => ValueType::Int,
        (ValueType::Int | ValueType::Float, ValueType::Int | ValueType::Float) => {
            ValueType::Float
        }
        (ValueType::Null, other) | (other, ValueType::Null) => other,
        (l, r) => {
            if l.is_numeric() {
                r
            } else {
                l
            }
        }
    }
}
