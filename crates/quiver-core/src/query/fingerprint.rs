//! Deterministic plan fingerprinting over a tagged encoding of the plan.
#![expect(clippy::cast_possible_truncation)]

use crate::{
    expr::{Expr, FunctionExpr, TextMatch, VectorQuery},
    query::{Collector, QueryPlan, RerankSpec},
    value::{List, Matrix, MatrixValues, SparseValues, SparseVector, Value, Vector},
};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// PlanFingerprint
///
/// Stable, deterministic fingerprint for compiled plans. Structurally equal
/// plans hash equal; any change in operator, operand order or literal value
/// changes the digest.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PlanFingerprint([u8; 32]);

impl PlanFingerprint {
    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            use std::fmt::Write as _;
            let _ = write!(out, "{byte:02x}");
        }
        out
    }

    /// First eight hex digits, for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        let mut hex = self.as_hex();
        hex.truncate(8);
        hex
    }
}

impl fmt::Display for PlanFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

impl QueryPlan {
    /// Compute a stable fingerprint for this plan.
    #[must_use]
    pub fn fingerprint(&self) -> PlanFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"quiverplan:v1");

        write_tag(&mut hasher, 0x01);
        write_u32(&mut hasher, self.select.len() as u32);
        for (name, expr) in &self.select {
            write_str(&mut hasher, name);
            hash_expr(&mut hasher, expr);
        }

        write_tag(&mut hasher, 0x02);
        match &self.filter {
            Some(filter) => hash_expr(&mut hasher, filter),
            None => write_tag(&mut hasher, 0x00),
        }

        write_tag(&mut hasher, 0x03);
        hash_collector(&mut hasher, &self.collector);

        write_tag(&mut hasher, 0x04);
        match &self.rerank {
            Some(spec) => hash_rerank(&mut hasher, spec),
            None => write_tag(&mut hasher, 0x00),
        }

        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        PlanFingerprint(out)
    }
}

fn hash_collector(hasher: &mut Sha256, collector: &Collector) {
    match collector {
        Collector::TopK { expr, k, asc } => {
            write_tag(hasher, 0x30);
            hash_expr(hasher, expr);
            write_u64(hasher, *k);
            write_bool(hasher, *asc);
        }
        Collector::SortLimit { expr, asc, k } => {
            write_tag(hasher, 0x31);
            hash_expr(hasher, expr);
            write_u64(hasher, *k);
            write_bool(hasher, *asc);
        }
        Collector::Limit { k } => {
            write_tag(hasher, 0x32);
            write_u64(hasher, *k);
        }
        Collector::Count => write_tag(hasher, 0x33),
    }
}

fn hash_rerank(hasher: &mut Sha256, spec: &RerankSpec) {
    write_tag(hasher, 0x40);
    write_opt_str(hasher, spec.model.as_deref());
    write_opt_str(hasher, spec.query.as_deref());
    write_u32(hasher, spec.fields.len() as u32);
    for field in &spec.fields {
        write_str(hasher, field);
    }
    match spec.topk_multiple {
        Some(multiple) => {
            write_tag(hasher, 0x01);
            write_u32(hasher, multiple);
        }
        None => write_tag(hasher, 0x00),
    }
}

fn hash_expr(hasher: &mut Sha256, expr: &Expr) {
    match expr {
        Expr::Field(name) => {
            write_tag(hasher, 0x10);
            write_str(hasher, name);
        }
        Expr::Literal(value) => {
            write_tag(hasher, 0x11);
            write_value(hasher, value);
        }
        Expr::Unary { op, expr } => {
            write_tag(hasher, 0x12);
            write_tag(hasher, op.tag());
            hash_expr(hasher, expr);
        }
        Expr::Binary { left, op, right } => {
            write_tag(hasher, 0x13);
            write_tag(hasher, op.tag());
            hash_expr(hasher, left);
            hash_expr(hasher, right);
        }
        Expr::Ternary { op, x, y, z } => {
            write_tag(hasher, 0x14);
            write_tag(hasher, op.tag());
            hash_expr(hasher, x);
            hash_expr(hasher, y);
            hash_expr(hasher, z);
        }
        Expr::Nary { op, exprs } => {
            write_tag(hasher, 0x15);
            write_tag(hasher, op.tag());
            write_u32(hasher, exprs.len() as u32);
            for child in exprs {
                hash_expr(hasher, child);
            }
        }
        Expr::Match(text) => {
            write_tag(hasher, 0x16);
            hash_match(hasher, text);
        }
        Expr::Function(function) => {
            write_tag(hasher, 0x17);
            hash_function(hasher, function);
        }
    }
}

fn hash_match(hasher: &mut Sha256, text: &TextMatch) {
    write_str(hasher, &text.token);
    write_opt_str(hasher, text.field.as_deref());
    hasher.update(text.weight.to_bits().to_be_bytes());
    write_bool(hasher, text.all);
}

fn hash_function(hasher: &mut Sha256, function: &FunctionExpr) {
    write_tag(hasher, function.tag());
    match function {
        FunctionExpr::Bm25Score => {}
        FunctionExpr::VectorDistance {
            field,
            query,
            skip_refine,
        } => {
            write_str(hasher, field);
            match query {
                VectorQuery::Dense(vector) => {
                    write_tag(hasher, 0x01);
                    write_vector(hasher, vector);
                }
                VectorQuery::Sparse(sparse) => {
                    write_tag(hasher, 0x02);
                    write_sparse(hasher, sparse);
                }
            }
            write_bool(hasher, *skip_refine);
        }
        FunctionExpr::SemanticSimilarity { field, query } => {
            write_str(hasher, field);
            write_str(hasher, query);
        }
        FunctionExpr::MultiVectorDistance {
            field,
            query,
            candidates,
        } => {
            write_str(hasher, field);
            write_matrix(hasher, query);
            match candidates {
                Some(n) => {
                    write_tag(hasher, 0x01);
                    write_u32(hasher, *n);
                }
                None => write_tag(hasher, 0x00),
            }
        }
    }
}

// ----------------------------------------------------------------------
// Values
// ----------------------------------------------------------------------

fn write_value(hasher: &mut Sha256, value: &Value) {
    match value {
        Value::Null => write_tag(hasher, 0x50),
        Value::Bool(v) => {
            write_tag(hasher, 0x51);
            write_bool(hasher, *v);
        }
        Value::I64(v) => {
            write_tag(hasher, 0x52);
            hasher.update(v.to_be_bytes());
        }
        Value::F64(v) => {
            write_tag(hasher, 0x53);
            hasher.update(v.to_bits().to_be_bytes());
        }
        Value::String(v) => {
            write_tag(hasher, 0x54);
            write_str(hasher, v);
        }
        Value::Bytes(v) => {
            write_tag(hasher, 0x55);
            write_bytes(hasher, v);
        }
        Value::Vector(v) => {
            write_tag(hasher, 0x56);
            write_vector(hasher, v);
        }
        Value::SparseVector(v) => {
            write_tag(hasher, 0x57);
            write_sparse(hasher, v);
        }
        Value::List(v) => {
            write_tag(hasher, 0x58);
            write_list(hasher, v);
        }
        Value::Matrix(v) => {
            write_tag(hasher, 0x59);
            write_matrix(hasher, v);
        }
    }
}

fn write_vector(hasher: &mut Sha256, vector: &Vector) {
    match vector {
        Vector::F32(values) => {
            write_tag(hasher, 0x01);
            write_f32s(hasher, values);
        }
        Vector::U8(values) => {
            write_tag(hasher, 0x02);
            write_bytes(hasher, values);
        }
        Vector::I8(values) => {
            write_tag(hasher, 0x03);
            write_u32(hasher, values.len() as u32);
            for v in values {
                hasher.update(v.to_be_bytes());
            }
        }
    }
}

fn write_sparse(hasher: &mut Sha256, sparse: &SparseVector) {
    match sparse.values() {
        SparseValues::F32(values) => {
            write_tag(hasher, 0x01);
            write_u32s(hasher, sparse.indices());
            write_f32s(hasher, values);
        }
        SparseValues::U8(values) => {
            write_tag(hasher, 0x02);
            write_u32s(hasher, sparse.indices());
            write_bytes(hasher, values);
        }
    }
}

fn write_list(hasher: &mut Sha256, list: &List) {
    write_u32(hasher, list.len() as u32);
    match list {
        List::U8(items) => {
            write_tag(hasher, 0x01);
            write_bytes(hasher, items);
        }
        List::U32(items) => {
            write_tag(hasher, 0x02);
            write_u32s(hasher, items);
        }
        List::U64(items) => {
            write_tag(hasher, 0x03);
            for v in items {
                write_u64(hasher, *v);
            }
        }
        List::I8(items) => {
            write_tag(hasher, 0x04);
            for v in items {
                hasher.update(v.to_be_bytes());
            }
        }
        List::I32(items) => {
            write_tag(hasher, 0x05);
            for v in items {
                hasher.update(v.to_be_bytes());
            }
        }
        List::I64(items) => {
            write_tag(hasher, 0x06);
            for v in items {
                hasher.update(v.to_be_bytes());
            }
        }
        List::F32(items) => {
            write_tag(hasher, 0x07);
            write_f32s(hasher, items);
        }
        List::F64(items) => {
            write_tag(hasher, 0x08);
            for v in items {
                hasher.update(v.to_bits().to_be_bytes());
            }
        }
        List::String(items) => {
            write_tag(hasher, 0x09);
            for v in items {
                write_str(hasher, v);
            }
        }
    }
}

fn write_matrix(hasher: &mut Sha256, matrix: &Matrix) {
    write_u32(hasher, matrix.num_cols());
    write_str(hasher, matrix.value_type().as_str());
    match matrix.values() {
        MatrixValues::F32(values) => write_f32s(hasher, values),
        MatrixValues::F16(values) => {
            for v in values {
                hasher.update(v.to_bits().to_be_bytes());
            }
        }
        MatrixValues::F8(values) => {
            for v in values {
                hasher.update([v.to_bits()]);
            }
        }
        MatrixValues::U8(values) => write_bytes(hasher, values),
        MatrixValues::I8(values) => {
            for v in values {
                hasher.update(v.to_be_bytes());
            }
        }
    }
}

// ----------------------------------------------------------------------
// Primitives
// ----------------------------------------------------------------------

fn write_f32s(hasher: &mut Sha256, values: &[f32]) {
    write_u32(hasher, values.len() as u32);
    for v in values {
        hasher.update(v.to_bits().to_be_bytes());
    }
}

fn write_u32s(hasher: &mut Sha256, values: &[u32]) {
    write_u32(hasher, values.len() as u32);
    for v in values {
        hasher.update(v.to_be_bytes());
    }
}

fn write_bytes(hasher: &mut Sha256, value: &[u8]) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value);
}

fn write_opt_str(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(v) => {
            write_tag(hasher, 0x01);
            write_str(hasher, v);
        }
        None => write_tag(hasher, 0x00),
    }
}

fn write_str(hasher: &mut Sha256, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u64(hasher: &mut Sha256, value: u64) {
    hasher.update(value.to_be_bytes());
}

fn write_u32(hasher: &mut Sha256, value: u32) {
    hasher.update(value.to_be_bytes());
}

fn write_bool(hasher: &mut Sha256, value: bool) {
    hasher.update([u8::from(value)]);
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}
