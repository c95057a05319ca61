#![no_main]

use libfuzzer_sys::fuzz_target;
use rankskip::{LevelGenerator, Natural, SkipList};

// Every pair of bytes is one operation; the model is a sorted Vec.
fuzz_target!(|data: &[u8]| {
    let seed = data.iter().fold(0u64, |acc, b| acc.rotate_left(5) ^ *b as u64);
    let mut list = SkipList::with_generator(Natural, LevelGenerator::seeded(seed));
    let mut model: Vec<u8> = Vec::new();

    for pair in data.chunks_exact(2) {
        let (op, target) = (pair[0], pair[1] % 64);

        match op % 5 {
            0 => {
                let at = model.partition_point(|v| *v < target);
                let expected = (model.get(at) == Some(&target)).then(|| model.remove(at));
                assert_eq!(list.delete(&target), expected);
            }
            1 if !model.is_empty() => {
                let at = target as usize % model.len();
                let handle = list.get_by_rank(at + 1).unwrap();
                assert_eq!(list.remove(handle), Some(model.remove(at)));
                assert!(list.get(handle).is_none());
            }
            2 => {
                let at = model.partition_point(|v| *v < target);
                let expected = if model.get(at) == Some(&target) { at + 1 } else { 0 };
                assert_eq!(list.rank(&target), expected);
            }
            _ => {
                list.insert(target);
                let at = model.partition_point(|v| *v <= target);
                model.insert(at, target);
            }
        }
    }

    list.verify().unwrap();
    assert!(list.iter().eq(model.iter()));
    assert!(list.iter().rev().eq(model.iter().rev()));
});
