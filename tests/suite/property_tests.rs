//! Randomized contractions checked against the naive reference.

use std::collections::BTreeMap;

use einstein_strided::{DepMask, PlanConfig, build_dense_plan, execute};
use proptest::collection::vec;
use proptest::prelude::*;

use super::reference::{element_count, naive_contract, ramp};

#[derive(Debug, Clone)]
struct Case {
    shapes: [Vec<usize>; 3],
    specs: [Vec<i64>; 3],
}

impl Case {
    fn from_axes(axes: [Vec<(usize, i64)>; 3]) -> Self {
        Self {
            shapes: axes.clone().map(|ax| ax.iter().map(|&(extent, _)| extent).collect()),
            specs: axes.map(|ax| ax.iter().map(|&(_, entry)| entry).collect()),
        }
    }

    fn shapes(&self) -> [&[usize]; 3] {
        [&self.shapes[0], &self.shapes[1], &self.shapes[2]]
    }

    fn specs(&self) -> [&[i64]; 3] {
        [&self.specs[0], &self.specs[1], &self.specs[2]]
    }

    fn numel(&self, operand: usize) -> usize {
        element_count(&self.shapes[operand])
    }

    fn repeats_label(&self) -> bool {
        self.specs.iter().any(|spec| {
            let labels: Vec<i64> = spec.iter().copied().filter(|&e| e < 0).collect();
            let mut unique = labels.clone();
            unique.sort_unstable();
            unique.dedup();
            unique.len() != labels.len()
        })
    }

    fn label_extents(&self) -> BTreeMap<i64, usize> {
        let mut extents = BTreeMap::new();
        for (shape, spec) in self.shapes.iter().zip(&self.specs) {
            for (&extent, &entry) in shape.iter().zip(spec) {
                if entry < 0 {
                    extents.insert(entry, extent);
                }
            }
        }
        extents
    }
}

/// One axis: either a shared label from the table or a literal offset.
fn axis(extents: Vec<usize>) -> impl Strategy<Value = (usize, i64)> {
    let labels = extents.len();
    prop_oneof![
        3 => (0..labels).prop_map(move |l| (extents[l], -(l as i64) - 1)),
        1 => (1usize..=3)
            .prop_flat_map(|extent| (Just(extent), 0..extent))
            .prop_map(|(extent, offset)| (extent, offset as i64)),
    ]
}

fn case() -> impl Strategy<Value = Case> {
    vec(1usize..=4, 1..=5)
        .prop_flat_map(|extents| {
            (
                vec(axis(extents.clone()), 0..=3),
                vec(axis(extents.clone()), 0..=3),
                vec(axis(extents), 0..=3),
            )
        })
        .prop_filter("result spec longer than inputs", |(a, b, c)| {
            c.len() <= a.len() + b.len()
        })
        .prop_map(|(a, b, c)| Case::from_axes([a, b, c]))
}

fn numeric(case: &Case, config: &PlanConfig) -> (Vec<f64>, Vec<f64>) {
    let a = ramp(case.numel(0), 3);
    let b = ramp(case.numel(1), 5);
    let c0 = ramp(case.numel(2), 8);

    let plan = build_dense_plan(case.shapes(), case.specs(), config).unwrap();
    let mut actual = c0.clone();
    execute(&plan, &a, &b, &mut actual);

    let mut expected = c0;
    naive_contract(case.shapes(), case.specs(), &a, &b, &mut expected, |acc, x, y| {
        *acc += x * y
    });
    (actual, expected)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn planning_is_pure(case in case()) {
        let config = PlanConfig::default();
        let first = build_dense_plan(case.shapes(), case.specs(), &config).unwrap();
        let second = build_dense_plan(case.shapes(), case.specs(), &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn diagonal_contraction_matches_reference(case in case()) {
        let (actual, expected) = numeric(&case, &PlanConfig::diagonal());
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn default_contraction_matches_reference(case in case()) {
        prop_assume!(!case.repeats_label());
        let (actual, expected) = numeric(&case, &PlanConfig::default());
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn mask_contraction_matches_reference(case in case()) {
        let a: Vec<DepMask> = (0..case.numel(0) as u32).map(DepMask::bit).collect();
        let b: Vec<DepMask> = (0..case.numel(1) as u32).map(|i| DepMask::bit(i + 32)).collect();

        let plan = build_dense_plan(case.shapes(), case.specs(), &PlanConfig::diagonal()).unwrap();
        let mut actual = vec![DepMask::EMPTY; case.numel(2)];
        execute(&plan, &a, &b, &mut actual);

        let mut expected = vec![DepMask::EMPTY; case.numel(2)];
        naive_contract(case.shapes(), case.specs(), &a, &b, &mut expected, |acc, x, y| {
            *acc = *acc | x | y
        });
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn numeric_and_mask_reach_the_same_outputs(case in case()) {
        let plan = build_dense_plan(case.shapes(), case.specs(), &PlanConfig::default()).unwrap();

        let mut counts = vec![0.0f64; case.numel(2)];
        execute(&plan, &vec![1.0; case.numel(0)], &vec![1.0; case.numel(1)], &mut counts);

        let mut flags = vec![DepMask::EMPTY; case.numel(2)];
        execute(
            &plan,
            &vec![DepMask::bit(0); case.numel(0)],
            &vec![DepMask::bit(0); case.numel(1)],
            &mut flags,
        );

        for (count, flag) in counts.iter().zip(&flags) {
            prop_assert_eq!(*count == 0.0, flag.is_empty());
        }
    }

    #[test]
    fn total_iterations_is_product_of_label_extents(case in case()) {
        let plan = build_dense_plan(case.shapes(), case.specs(), &PlanConfig::default()).unwrap();
        let expected: usize = case.label_extents().values().product();

        prop_assert_eq!(plan.total_iterations(), expected);
        prop_assert_eq!(plan.num_vars(), case.label_extents().len());
    }
}
