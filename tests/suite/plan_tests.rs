//! Plan builder tests.

use einstein_strided::plan::{BufferInfo, FlatBuffer, Label};
use einstein_strided::{
    DimOrdering, EinsteinError, Operand, OperandDesc, PlanConfig, build_dense_plan, build_plan,
    execute,
};
use pretty_assertions::assert_eq;

/// A container that reports itself as sparse storage.
struct SparseColumn {
    nnz: usize,
}

impl FlatBuffer for SparseColumn {
    fn numel(&self) -> usize {
        self.nnz
    }

    fn is_dense(&self) -> bool {
        false
    }
}

#[test]
fn test_matmul_plan() {
    // A[i,k] * B[k,j] -> C[i,j] with i=2, k=3, j=2.
    let plan = build_dense_plan(
        [&[2, 3], &[3, 2], &[2, 2]],
        [&[-1, -2], &[-2, -3], &[-1, -3]],
        &PlanConfig::default(),
    )
    .unwrap();

    // i and j tie at extent 2; the lower label i runs inside j.
    assert_eq!(plan.labels(), &[Label(3), Label(1), Label(2)]);
    assert_eq!(plan.iter_dims(), &[2, 2, 3]);
    assert_eq!(plan.total_iterations(), 12);
    assert_eq!(plan.strides_a(), &[0, 0, 1, 2]);
    assert_eq!(plan.strides_b(), &[0, 3, 0, 1]);
    assert_eq!(plan.strides_c(), &[0, 2, 1, 0]);
}

#[test]
fn test_equal_extents_keep_unit_stride_innermost() {
    let plan = build_dense_plan(
        [&[2, 2, 2], &[], &[]],
        [&[-1, -2, -3], &[], &[]],
        &PlanConfig::default(),
    )
    .unwrap();

    assert_eq!(plan.labels(), &[Label(3), Label(2), Label(1)]);
    assert_eq!(plan.strides_a(), &[0, 4, 2, 1]);
}

#[test]
fn test_stride_tables_have_one_slot_per_variable_plus_base() {
    let plan = build_dense_plan(
        [&[2, 3, 4], &[4, 5], &[2, 3, 5]],
        [&[-1, -2, -3], &[-3, -4], &[-1, -2, -4]],
        &PlanConfig::default(),
    )
    .unwrap();

    for operand in Operand::ALL {
        assert_eq!(plan.strides(operand).len(), plan.num_vars() + 1);
    }
}

#[test]
fn test_largest_extent_is_innermost() {
    let plan = build_dense_plan(
        [&[100, 2], &[2, 7], &[100, 7]],
        [&[-1, -2], &[-2, -3], &[-1, -3]],
        &PlanConfig::default(),
    )
    .unwrap();

    assert_eq!(plan.iter_dims(), &[2, 7, 100]);
    assert_eq!(plan.position(Label(1)), Some(2));

    let config = PlanConfig::default().with_ordering(DimOrdering::Label);
    let plan = build_dense_plan(
        [&[100, 2], &[2, 7], &[100, 7]],
        [&[-1, -2], &[-2, -3], &[-1, -3]],
        &config,
    )
    .unwrap();
    assert_eq!(plan.iter_dims(), &[100, 2, 7]);
}

#[test]
fn test_label_only_in_result_broadcasts() {
    // C[i, j] += A[i] * B[0] for every j.
    let plan = build_dense_plan(
        [&[3], &[1], &[3, 2]],
        [&[-1], &[0], &[-1, -2]],
        &PlanConfig::default(),
    )
    .unwrap();

    assert_eq!(plan.total_iterations(), 6);
    assert_eq!(plan.strides_b(), &[0, 0, 0]);
}

#[test]
fn test_label_conflict_across_operands() {
    let err = build_dense_plan(
        [&[2, 3], &[4], &[2]],
        [&[-1, -2], &[-2], &[-1]],
        &PlanConfig::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        EinsteinError::LabelConflict {
            label: 2,
            operand: Operand::B,
            expected: 3,
            got: 4,
        }
    );
}

#[test]
fn test_label_conflict_with_result() {
    let err = build_dense_plan(
        [&[2, 3], &[3], &[5]],
        [&[-1, -2], &[-2], &[-1]],
        &PlanConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        EinsteinError::LabelConflict { operand: Operand::C, expected: 2, got: 5, .. }
    ));
}

#[test]
fn test_label_conflict_within_operand() {
    let err = build_dense_plan(
        [&[2, 3], &[], &[]],
        [&[-1, -1], &[], &[]],
        &PlanConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, EinsteinError::LabelConflict { operand: Operand::A, .. }));
}

#[test]
fn test_sparse_container_rejected() {
    let sparse = SparseColumn { nnz: 3 };
    let a = OperandDesc::new(&sparse, &[3], &[-1]);
    let b = OperandDesc::dense(&[3], &[-1]);
    let c = OperandDesc::dense(&[], &[]);

    let err = build_plan(&a, &b, &c, &PlanConfig::default()).unwrap_err();

    assert_eq!(err, EinsteinError::NotDense { operand: Operand::A });
    assert!(err.is_shape_error());
}

#[test]
fn test_matrix_container_rejected() {
    let matrix = BufferInfo {
        numel: 6,
        dense: true,
        vector: false,
    };
    let a = OperandDesc::dense(&[6], &[-1]);
    let b = OperandDesc::dense(&[6], &[-1]);
    let c = OperandDesc::new(&matrix, &[6], &[-1]);

    let err = build_plan(&a, &b, &c, &PlanConfig::default()).unwrap_err();

    assert_eq!(err, EinsteinError::NotVector { operand: Operand::C });
}

#[test]
fn test_slices_validate_against_shape() {
    let data = vec![0.0f32; 5];
    let a = OperandDesc::new(&data, &[2, 3], &[-1, -2]);
    let b = OperandDesc::dense(&[3], &[-2]);
    let c = OperandDesc::dense(&[2], &[-1]);

    let err = build_plan(&a, &b, &c, &PlanConfig::default()).unwrap_err();

    assert_eq!(
        err,
        EinsteinError::ElementCount {
            operand: Operand::A,
            numel: 5,
            expected: 6,
        }
    );
}

#[test]
fn test_short_result_spec_accumulates_into_first_column() {
    // C has shape [2, 3] but only its leading dim is indexed: C[i, 0] += A[i] * B[i].
    let plan = build_dense_plan(
        [&[2], &[2], &[2, 3]],
        [&[-1], &[-1], &[-1]],
        &PlanConfig::default(),
    )
    .unwrap();

    let mut c = [0.0f64; 6];
    execute(&plan, &[1.0, 2.0], &[3.0, 4.0], &mut c);

    assert_eq!(c, [3.0, 8.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_result_spec_longer_than_shape_rejected() {
    let err = build_dense_plan(
        [&[2], &[2], &[2]],
        [&[-1], &[-1], &[-1, 0]],
        &PlanConfig::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        EinsteinError::SpecLength {
            operand: Operand::C,
            spec: 2,
            shape: 1,
        }
    );
    assert!(err.is_spec_length_error());
}

#[test]
fn test_literal_on_empty_axis_rejected() {
    let err = build_dense_plan(
        [&[0, 2], &[2], &[2]],
        [&[0, -1], &[-1], &[-1]],
        &PlanConfig::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        EinsteinError::LiteralOutOfRange {
            operand: Operand::A,
            axis: 0,
            offset: 0,
            extent: 0,
        }
    );
}

#[test]
fn test_shape_product_overflow() {
    let shape = [usize::MAX / 2 + 1, 4];
    let a = OperandDesc::new(&BufferInfo::dense(0), &shape, &[-1, -2]);
    let b = OperandDesc::dense(&[], &[]);
    let c = OperandDesc::dense(&[], &[]);

    let err = build_plan(&a, &b, &c, &PlanConfig::default()).unwrap_err();

    assert!(matches!(err, EinsteinError::Overflow { .. }));
}

#[test]
fn test_planning_twice_is_identical() {
    let shapes: [&[usize]; 3] = [&[3, 1, 4], &[4, 2], &[3, 2]];
    let specs: [&[i64]; 3] = [&[-1, 0, -2], &[-2, -3], &[-1, -3]];

    let first = build_dense_plan(shapes, specs, &PlanConfig::default()).unwrap();
    let second = build_dense_plan(shapes, specs, &PlanConfig::default()).unwrap();

    assert_eq!(first, second);
}
