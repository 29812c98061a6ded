#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so they can observe
// the size table alongside the public surface.

use crate::chain_hash_map::{ChainHashMap, BUCKET_SIZES};
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(usize),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=60).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            idx.prop_map(OpI::Contains),
        ];
        (
            Just(pool),
            proptest::collection::vec(op, 1..300),
        )
    })
}

// Replays the resize policy: grow one class before an insert that would
// cross half-full, shrink one class after a removal that crosses an eighth.
struct SizeModel {
    index: usize,
    len: usize,
}

impl SizeModel {
    fn new() -> Self {
        Self { index: 0, len: 0 }
    }

    fn insert_new(&mut self) {
        if self.len + 1 > BUCKET_SIZES[self.index] / 2 {
            self.index = (self.index + 1).min(BUCKET_SIZES.len() - 1);
        }
        self.len += 1;
    }

    fn remove(&mut self) {
        self.len -= 1;
        if self.len < BUCKET_SIZES[self.index] / 8 {
            self.index = self.index.saturating_sub(1);
        }
    }
}

proptest! {
    // Invariants exercised against a std::collections::HashMap model:
    // - insert/get/remove/contains_key agree with the model for every key,
    //   with duplicate pool entries exercising overwrites.
    // - len() equals the model's length after every operation.
    // - bucket_count() tracks the single-step grow/shrink policy exactly.
    #[test]
    fn prop_matches_hash_map_model((pool, ops) in arb_scenario()) {
        let mut m: ChainHashMap<i32> = ChainHashMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();
        let mut size = SizeModel::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    if !model.contains_key(k) {
                        size.insert_new();
                    }
                    let prev = m.insert(k, v).unwrap();
                    prop_assert_eq!(prev, model.insert(k.clone(), v));
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    if model.contains_key(k) {
                        size.remove();
                    }
                    prop_assert_eq!(m.remove(k), model.remove(k));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(m.get(k), model.get(k));
                }
                OpI::Contains(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(m.contains_key(k), model.contains_key(k));
                }
            }

            prop_assert_eq!(m.len(), model.len());
            prop_assert_eq!(m.bucket_count(), BUCKET_SIZES[size.index]);
        }

        // Everything the model still holds must be reachable at the end.
        for (k, v) in &model {
            prop_assert_eq!(m.get(k), Some(v));
        }
    }
}
