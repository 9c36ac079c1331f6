use super::*;
use crate::error::ErrorKind;

// ----------------------------------------------------------------------
// dense vectors
// ----------------------------------------------------------------------

#[test]
fn dense_vectors_render_with_element_type() {
    assert_eq!(
        f32_vector([1.0, 2.0, 3.0]).to_string(),
        "Vector(F32([1.0, 2.0, 3.0]))"
    );
    assert_eq!(
        u8_vector([1, 2, 3]).unwrap().to_string(),
        "Vector(U8([1, 2, 3]))"
    );
    assert_eq!(f32_vector([1, 2]).to_string(), "Vector(F32([1.0, 2.0]))");
}

#[test]
fn u8_vector_out_of_range_is_a_range_error() {
    let err = u8_vector([1, 256]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Range);
    assert!(err.to_string().contains("values[1]"));
    assert!(err.to_string().contains("256"));

    let err = u8_vector([-1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn u8_vector_float_element_is_a_type_error() {
    let err = u8_vector([Number::Int(1), Number::Float(2.5)]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TypeCoercion);
    assert!(err.to_string().contains("values[1]"));
    assert!(err.to_string().contains("float"));
}

#[test]
fn i8_vector_accepts_signed_range() {
    let vector = i8_vector([-128, 0, 127]).unwrap();

    assert_eq!(vector, Vector::I8(vec![-128, 0, 127]));
    assert_eq!(i8_vector([128]).unwrap_err().kind(), ErrorKind::Range);
}

// ----------------------------------------------------------------------
// sparse vectors
// ----------------------------------------------------------------------

#[test]
fn sparse_entries_are_sorted_by_index() {
    let vector = f32_sparse_vector([(7, 0.5), (1, 1.1), (3, 2.0)]).unwrap();

    assert_eq!(vector.indices(), &[1, 3, 7]);
    assert_eq!(
        vector.to_string(),
        "SparseVector(F32([1, 3, 7], [1.1, 2.0, 0.5]))"
    );
}

#[test]
fn sparse_u8_renders() {
    let vector = u8_sparse_vector([(1, 1)]).unwrap();

    assert_eq!(vector.to_string(), "SparseVector(U8([1], [1]))");
}

#[test]
fn sparse_duplicate_index_is_a_shape_error() {
    let err = f32_sparse_vector([(1, 1.0), (1, 2.0)]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Shape);
    assert!(err.to_string().contains("duplicate index 1"));
}

#[test]
fn strict_sparse_constructor_rejects_unsorted_indices() {
    let err = SparseVector::f32(vec![3, 1], vec![1.0, 2.0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);

    let err = SparseVector::u8(vec![1, 1], vec![1, 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
}

#[test]
fn checked_sparse_vector_exposes_parallel_arrays() {
    let vector = SparseVector::u8(vec![2, 9], vec![4, 5]).unwrap();

    assert_eq!(vector.indices(), &[2, 9]);
    assert_eq!(vector.values(), &SparseValues::U8(vec![4, 5]));
    assert_eq!(vector.len(), 2);
    assert_eq!(
        Value::from(vector).to_string(),
        "SparseVector(U8([2, 9], [4, 5]))"
    );
}

#[test]
fn strict_sparse_constructor_rejects_length_mismatch() {
    let err = SparseVector::f32(vec![0, 1, 2], vec![1.0]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Shape);
    assert!(err.to_string().contains("3 indices but 1 values"));
}

#[test]
fn sparse_u8_rejects_out_of_range_value() {
    let err = u8_sparse_vector([(0, 300)]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Range);
}

// ----------------------------------------------------------------------
// matrices
// ----------------------------------------------------------------------

#[test]
fn matrix_is_row_major() {
    let m = matrix([[1, 2], [3, 4]], None).unwrap();

    assert_eq!(m.num_cols(), 2);
    assert_eq!(m.num_rows(), 2);
    assert_eq!(m.len(), 4);
    assert_eq!(m.values(), &MatrixValues::F32(vec![1.0, 2.0, 3.0, 4.0]));
}

#[test]
fn matrix_renders_columns_and_values() {
    let m = matrix([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], None).unwrap();

    assert_eq!(m.to_string(), "Matrix(3, F32([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]))");
}

#[test]
fn empty_matrix_is_a_shape_error() {
    let empty: Vec<Vec<f32>> = vec![];
    let err = matrix(empty, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    assert!(err.to_string().contains("empty"));

    let err = matrix([vec![], vec![1, 2]], None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    assert!(err.to_string().contains("empty"));
}

#[test]
fn uneven_total_reports_divisibility() {
    let err = matrix([vec![1, 2], vec![3, 4, 5]], None).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Shape);
    assert!(err.to_string().contains("len(values) must be divisible by num_cols"));
}

#[test]
fn ragged_rows_with_divisible_total_report_the_row() {
    let err = matrix(
        [vec![1, 2, 3], vec![4, 5, 6], vec![7, 8], vec![9]],
        None,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Shape);
    assert!(
        err.to_string()
            .contains("All rows must have the same length. Row 2 has length 2, but expected 3")
    );
}

#[test]
fn flat_matrix_requires_divisible_length() {
    let err = Matrix::from_flat(2, MatrixValues::F32(vec![1.0, 2.0, 3.0])).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Shape);
    assert!(err.to_string().contains("must be divisible by num_cols"));
}

#[test]
fn matrix_value_types_convert_elements() {
    let m = matrix([[1.0, 2.0]], Some(MatrixValueType::F16)).unwrap();
    assert_eq!(
        m.values(),
        &MatrixValues::F16(vec![half::f16::from_f32(1.0), half::f16::from_f32(2.0)])
    );

    let m = matrix([[0.5, 1.0]], Some(MatrixValueType::F8)).unwrap();
    assert_eq!(m.value_type(), MatrixValueType::F8);
    let MatrixValues::F8(values) = m.values() else {
        panic!("expected f8 values");
    };
    assert_eq!(values[1].to_f32(), 1.0);

    let m = matrix([[-1, 2]], Some(MatrixValueType::I8)).unwrap();
    assert_eq!(m.values(), &MatrixValues::I8(vec![-1, 2]));
}

#[test]
fn integer_matrix_rejects_floats_and_overflow() {
    let err = matrix([[1.5, 2.0]], Some(MatrixValueType::U8)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeCoercion);
    assert!(err.to_string().contains("rows[0][0]"));

    let err = matrix([[1, 2], [3, 256]], Some(MatrixValueType::U8)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert!(err.to_string().contains("rows[1][1]"));
}

#[test]
fn unknown_matrix_value_type_is_rejected() {
    let err = "f64".parse::<MatrixValueType>().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Shape);
    assert_eq!(
        err.to_string(),
        "Unsupported value_type: f64. Supported types: f8, f16, f32, u8, i8"
    );
    assert_eq!("u8".parse::<MatrixValueType>().unwrap(), MatrixValueType::U8);
}

// ----------------------------------------------------------------------
// lists and scalars
// ----------------------------------------------------------------------

#[test]
fn typed_lists_render_and_range_check() {
    assert_eq!(
        u32_list([0_i64, 1, 255, 4_294_967_295]).unwrap().to_string(),
        "List(U32([0, 1, 255, 4294967295]))"
    );
    assert_eq!(i32_list(Vec::<i32>::new()).unwrap().to_string(), "List(I32([]))");
    assert_eq!(
        string_list(["a", "b"]).to_string(),
        "List(String([\"a\", \"b\"]))"
    );

    assert_eq!(u32_list([-1]).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(u64_list([-1]).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(
        i64_list([Number::Float(1.0)]).unwrap_err().kind(),
        ErrorKind::TypeCoercion
    );
}

#[test]
fn float_lists_widen_integers() {
    assert_eq!(f64_list([1, 2]), List::F64(vec![1.0, 2.0]));
    assert_eq!(f32_list([0.5]), List::F32(vec![0.5]));
}

#[test]
fn scalars_widen_on_conversion() {
    assert_eq!(Value::from(7_u8), Value::I64(7));
    assert_eq!(Value::from(1.5_f32), Value::F64(1.5));
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from("x"), Value::String("x".to_string()));
    assert_eq!(bytes(vec![1, 2]), Value::Bytes(vec![1, 2]));
}

#[test]
fn oversized_unsigned_is_a_range_error() {
    let err = Value::try_from(u64::MAX).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Range);
    assert_eq!(
        Value::try_from(42_u64).unwrap(),
        Value::I64(42),
    );
}

#[test]
fn value_types_classify_sort_keys() {
    assert!(Value::from(1).value_type().is_sortable());
    assert!(Value::from(true).value_type().is_sortable());
    assert!(!Value::from("a").value_type().is_sortable());
    assert!(!Value::Null.value_type().is_sortable());
    assert_eq!(Value::from("a").value_type().to_string(), "String");
}
