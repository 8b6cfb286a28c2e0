/*!
 * QuickHeap Property Tests
 * Random operation sequences compared against a sorted reference
 */

use proptest::prelude::*;
use qhalloc::heap::{QueueError, QuickHeap};

#[derive(Debug, Clone)]
enum Op {
    Insert(u32),
    Peek,
    Extract,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u32..1000).prop_map(Op::Insert),
        1 => Just(Op::Peek),
        3 => Just(Op::Extract),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn matches_sorted_reference(
        capacity in 1usize..64,
        ops in prop::collection::vec(op_strategy(), 1..400),
    ) {
        let mut heap = QuickHeap::with_natural_order(capacity, u32::MAX);
        let mut reference: Vec<u32> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(value) => {
                    let result = heap.insert(value);
                    if reference.len() == capacity {
                        prop_assert_eq!(result, Err(QueueError::Overflow { capacity }));
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        reference.push(value);
                    }
                }
                Op::Peek => {
                    let expected = reference.iter().min().copied();
                    prop_assert_eq!(heap.peek_min().ok().copied(), expected);
                }
                Op::Extract => {
                    reference.sort_unstable_by(|a, b| b.cmp(a));
                    prop_assert_eq!(heap.extract_min().ok(), reference.pop());
                }
            }
            prop_assert_eq!(heap.len(), reference.len());
            prop_assert!(heap.check_invariants());
        }
    }

    #[test]
    fn full_drain_is_sorted(values in prop::collection::vec(any::<u16>(), 0..300)) {
        let mut heap = QuickHeap::with_natural_order(values.len(), u16::MAX);
        for &value in &values {
            heap.insert(value).unwrap();
        }

        let mut drained = Vec::with_capacity(values.len());
        while let Ok(value) = heap.extract_min() {
            drained.push(value);
        }

        let mut expected = values;
        expected.sort_unstable();
        prop_assert_eq!(drained, expected);
    }

    #[test]
    fn retain_keeps_exactly_the_matching_elements(
        values in prop::collection::vec(0u32..500, 1..100),
        modulus in 2u32..5,
        warmup in 0usize..10,
    ) {
        let mut heap = QuickHeap::with_natural_order(values.len(), u32::MAX);
        for &value in &values {
            heap.insert(value).unwrap();
        }
        let mut expected = values.clone();
        expected.sort_unstable();
        for _ in 0..warmup.min(values.len()) {
            heap.extract_min().unwrap();
        }
        expected.drain(..warmup.min(values.len()));
        expected.retain(|v| v % modulus == 0);

        heap.retain(|v| v % modulus == 0);
        prop_assert!(heap.check_invariants());

        let mut drained = Vec::new();
        while let Ok(value) = heap.extract_min() {
            drained.push(value);
        }
        prop_assert_eq!(drained, expected);
    }
}
