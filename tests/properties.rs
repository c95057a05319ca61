//! Property tests: random insert/delete/remove sequences checked against a sorted `Vec`.

use proptest::prelude::*;
use rankskip::{FnLess, LevelGenerator, Natural, SkipList};

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Delete(i16),
    /// Remove the element at this fraction of the list, by handle.
    Remove(f64),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-64i16..64).prop_map(Op::Insert),
        2 => (-80i16..80).prop_map(Op::Delete),
        1 => (0.0..1.0f64).prop_map(Op::Remove),
    ]
}

fn apply(list: &mut SkipList<i16>, model: &mut Vec<i16>, op: &Op) {
    match *op {
        Op::Insert(value) => {
            list.insert(value);
            let at = model.partition_point(|v| *v <= value);
            model.insert(at, value);
        }
        Op::Delete(value) => {
            let at = model.partition_point(|v| *v < value);
            let expected = (model.get(at) == Some(&value)).then(|| model.remove(at));

            assert_eq!(list.delete(&value), expected);
        }
        Op::Remove(fraction) => {
            if model.is_empty() {
                return;
            }

            let at = ((fraction * model.len() as f64) as usize).min(model.len() - 1);
            let handle = list.get_by_rank(at + 1).unwrap();

            assert_eq!(list.remove(handle), Some(model.remove(at)));
            assert!(list.get(handle).is_none());
        }
    }
}

fn build(seed: u64, ops: &[Op]) -> (SkipList<i16>, Vec<i16>) {
    let mut list = SkipList::with_generator(Natural, LevelGenerator::seeded(seed));
    let mut model = Vec::new();

    for op in ops {
        apply(&mut list, &mut model, op);
    }

    (list, model)
}

proptest! {
    #[test]
    fn matches_sorted_model(seed in any::<u64>(), ops in prop::collection::vec(arbitrary_op(), 0..300)) {
        let (list, model) = build(seed, &ops);

        prop_assert_eq!(list.verify(), Ok(()));
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), model);
    }

    #[test]
    fn length_matches_both_traversals(seed in any::<u64>(), ops in prop::collection::vec(arbitrary_op(), 0..300)) {
        let (list, _) = build(seed, &ops);

        let mut forward = 0;
        let mut cursor = list.front();
        while let Some(handle) = cursor {
            forward += 1;
            cursor = list.next(handle);
        }

        let mut backward = 0;
        let mut cursor = list.back();
        while let Some(handle) = cursor {
            backward += 1;
            cursor = list.prev(handle);
        }

        prop_assert_eq!(forward, list.len());
        prop_assert_eq!(backward, list.len());
    }

    #[test]
    fn inserted_values_are_found(seed in any::<u64>(), values in prop::collection::vec(any::<i16>(), 1..200)) {
        let mut list = SkipList::with_generator(Natural, LevelGenerator::seeded(seed));
        list.extend(values.iter().copied());

        for value in &values {
            let handle = list.find(value);
            prop_assert!(handle.is_some());
            prop_assert_eq!(list.get(handle.unwrap()), Some(value));
        }
    }

    #[test]
    fn deleting_absent_changes_nothing(seed in any::<u64>(), values in prop::collection::vec(-50i16..50, 0..200), absent in 50i16..1000) {
        let mut list = SkipList::with_generator(Natural, LevelGenerator::seeded(seed));
        list.extend(values.iter().copied());
        let handles: Vec<_> = list.handles().collect();
        let before: Vec<_> = list.iter().copied().collect();

        prop_assert_eq!(list.delete(&absent), None);
        prop_assert_eq!(list.delete(&(-absent - 1)), None);

        prop_assert_eq!(list.len(), before.len());
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), before);
        prop_assert_eq!(list.handles().collect::<Vec<_>>(), handles);
    }

    #[test]
    fn ranks_are_consistent(seed in any::<u64>(), ops in prop::collection::vec(arbitrary_op(), 0..300)) {
        let (list, model) = build(seed, &ops);

        for k in 1..=list.len() {
            let handle = list.get_by_rank(k).unwrap();
            let value = *list.get(handle).unwrap();
            let rank = list.rank(&value);

            prop_assert_eq!(value, model[k - 1]);
            prop_assert_eq!(rank, model.partition_point(|v| *v < value) + 1);
            prop_assert!(rank <= k);
            prop_assert_eq!(list.rank(list.get(list.get_by_rank(rank).unwrap()).unwrap()), rank);
            prop_assert_eq!(list.rank_of(handle), Some(k));
        }

        prop_assert!(list.get_by_rank(0).is_none());
        prop_assert!(list.get_by_rank(list.len() + 1).is_none());
        prop_assert_eq!(list.rank(&i16::MAX), 0);
    }

    #[test]
    fn reset_behaves_like_new(seed in any::<u64>(), first in prop::collection::vec(any::<i16>(), 0..100), second in prop::collection::vec(any::<i16>(), 0..100)) {
        let mut list = SkipList::with_generator(Natural, LevelGenerator::seeded(seed));
        list.extend(first.iter().copied());

        list.reset();
        prop_assert_eq!(list.len(), 0);
        prop_assert!(list.front().is_none());
        prop_assert!(list.back().is_none());

        list.extend(second.iter().copied());
        let mut expected = second.clone();
        expected.sort();

        prop_assert_eq!(list.verify(), Ok(()));
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn equal_keys_keep_insertion_order(seed in any::<u64>(), keys in prop::collection::vec(0u8..8, 0..200)) {
        let by_key = FnLess(|a: &(u8, usize), b: &(u8, usize)| a.0 < b.0);
        let mut list = SkipList::with_generator(by_key, LevelGenerator::seeded(seed));

        for (id, key) in keys.iter().enumerate() {
            list.insert((*key, id));
        }

        let mut expected: Vec<_> = keys.iter().copied().zip(0..).collect();
        // stable sort keeps ids ascending within each key
        expected.sort_by_key(|(key, _)| *key);

        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
    }
}

#[test]
fn scenario_ordered_inserts() {
    let mut list = SkipList::new();

    for value in [1, 2, 3] {
        list.insert(value);
    }

    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(list.len(), 3);
}

#[test]
fn scenario_rank_among_duplicates() {
    let list: SkipList<_> = [5, 2, 3, 1, 4, 2, 3, 6, 2, 7, 8, 6].into_iter().collect();

    assert_eq!(list.rank(&3), 5);
}

#[test]
fn scenario_remove_and_delete() {
    let mut list: SkipList<_> = [-999, -888, 1, 2, 3, 888, 999, 1000].into_iter().collect();

    let two = list.find(&2).unwrap();
    assert_eq!(list.remove(two), Some(2));
    assert_eq!(list.delete(&888), Some(888));
    assert_eq!(list.delete(&1000), Some(1000));

    assert_eq!(
        list.iter().rev().copied().collect::<Vec<_>>(),
        vec![999, 3, 1, -888, -999]
    );
}

#[test]
fn scenario_delete_missing() {
    let mut list: SkipList<_> = [1, 2, 3].into_iter().collect();

    assert_eq!(list.delete(&123), None);
    assert_eq!(list.len(), 3);
}
