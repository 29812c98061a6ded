use proptest::prelude::*;
use seqmap::OrderedMap;
use std::collections::HashMap;

// Model operations on OrderedMap against a std map plus an insertion-order
// vector, and assert lookups, lengths, and iteration order all agree.
proptest! {
    #[test]
    fn prop_ordered_map_matches_model(keys in 1usize..=8, ops in proptest::collection::vec((0u8..=3u8, 0usize..100usize, any::<i32>()), 1..200)) {
        let mut m: OrderedMap<i32> = OrderedMap::new();
        let mut values: HashMap<String, i32> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for (op, raw_k, v) in ops {
            let key = format!("k{}", raw_k % keys);
            match op {
                // Insert: new keys append to the order, existing ones only
                // change their value.
                0 => {
                    let prev = m.insert(&key, v).unwrap();
                    prop_assert_eq!(prev, values.insert(key.clone(), v));
                    if prev.is_none() {
                        order.push(key.clone());
                    }
                }
                // Remove: drops the key from both models.
                1 => {
                    prop_assert_eq!(m.remove(&key), values.remove(&key));
                    order.retain(|k| k != &key);
                }
                // Get
                2 => {
                    prop_assert_eq!(m.get(&key), values.get(&key));
                }
                // Contains
                3 => {
                    prop_assert_eq!(m.contains_key(&key), values.contains_key(&key));
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(m.len(), values.len());
        }

        // Iteration must replay the surviving first-insertion order with the
        // latest values.
        let walked: Vec<(String, i32)> = m.iter().map(|(k, v)| (k.to_owned(), *v)).collect();
        let expected: Vec<(String, i32)> = order.iter().map(|k| (k.clone(), values[k])).collect();
        prop_assert_eq!(walked, expected);
    }

    // A cursor swept forward over any map yields the same sequence as the
    // iterator, and retreating from the end replays it reversed.
    #[test]
    fn prop_cursor_agrees_with_iteration(ops in proptest::collection::vec((any::<bool>(), 0usize..12usize), 1..100)) {
        let mut m: OrderedMap<usize> = OrderedMap::new();
        for (insert, raw_k) in ops {
            let key = format!("k{raw_k}");
            if insert {
                m.insert(&key, raw_k).unwrap();
            } else {
                m.remove(&key);
            }
        }

        let forward: Vec<String> = m.iter().map(|(k, _)| k.to_owned()).collect();

        let mut c = m.cursor();
        let mut swept = Vec::new();
        while c.has_current() {
            swept.push(c.key().unwrap().to_owned());
            c.advance();
        }
        prop_assert_eq!(&swept, &forward);

        let mut backwards = Vec::new();
        c.retreat();
        while c.has_current() {
            backwards.push(c.key().unwrap().to_owned());
            c.retreat();
        }
        backwards.reverse();
        prop_assert_eq!(&backwards, &forward);
    }
}
