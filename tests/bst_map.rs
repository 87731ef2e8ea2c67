use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use size_bst::{BstMap, Error, Rank};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys drawn from a range narrow enough to cause plenty of collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn btree_floor(map: &BTreeMap<i64, i64>, key: i64) -> Result<&i64, Error> {
    if map.is_empty() {
        return Err(Error::EmptyMap);
    }
    map.range(..=key).next_back().map(|(k, _)| k).ok_or(Error::NoFloor)
}

fn btree_ceiling(map: &BTreeMap<i64, i64>, key: i64) -> Result<&i64, Error> {
    if map.is_empty() {
        return Err(Error::EmptyMap);
    }
    map.range(key..).next().map(|(k, _)| k).ok_or(Error::NoCeiling)
}

/// Sorted keys, read back through rank selection.
fn keys_by_rank(map: &BstMap<i64, i64>) -> Vec<i64> {
    (0..map.len()).map(|rank| *map.get_by_rank(rank).expect("rank below len").0).collect()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    Floor(i64),
    Ceiling(i64),
    Rank(i64),
    Min,
    Max,
    DeleteMin,
    DeleteMax,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        2 => key_strategy().prop_map(MapOp::Floor),
        2 => key_strategy().prop_map(MapOp::Ceiling),
        1 => key_strategy().prop_map(MapOp::Rank),
        1 => Just(MapOp::Min),
        1 => Just(MapOp::Max),
        1 => Just(MapOp::DeleteMin),
        1 => Just(MapOp::DeleteMax),
    ]
}

// ─── Model checks against BTreeMap ───────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both BstMap and BTreeMap and
    /// asserts identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = BstMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match *op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(bst.insert(k, v), model.insert(k, v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(bst.remove(&k), model.remove(&k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(bst.get(&k).ok(), model.get(&k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(bst.contains_key(&k), model.contains_key(&k), "contains_key({})", k);
                }
                MapOp::Floor(k) => {
                    prop_assert_eq!(bst.floor(&k), btree_floor(&model, k), "floor({})", k);
                }
                MapOp::Ceiling(k) => {
                    prop_assert_eq!(bst.ceiling(&k), btree_ceiling(&model, k), "ceiling({})", k);
                }
                MapOp::Rank(k) => {
                    prop_assert_eq!(bst.rank(&k), model.range(..k).count(), "rank({})", k);
                }
                MapOp::Min => {
                    prop_assert_eq!(bst.min().ok(), model.keys().next(), "min");
                }
                MapOp::Max => {
                    prop_assert_eq!(bst.max().ok(), model.keys().next_back(), "max");
                }
                MapOp::DeleteMin => {
                    prop_assert_eq!(bst.delete_min().ok(), model.pop_first(), "delete_min");
                }
                MapOp::DeleteMax => {
                    prop_assert_eq!(bst.delete_max().ok(), model.pop_last(), "delete_max");
                }
            }
            prop_assert_eq!(bst.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(bst.is_empty(), model.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let expected: Vec<i64> = model.keys().copied().collect();
        prop_assert_eq!(keys_by_rank(&bst), expected);
    }

    /// A put followed by a get returns the value, including after overwriting.
    #[test]
    fn insert_then_get_round_trips(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..500),
        replacement in value_strategy(),
    ) {
        let mut map = BstMap::new();
        for &(k, v) in &entries {
            map.insert(k, v);
            prop_assert_eq!(map.get(&k), Ok(&v));
        }

        let (k, _) = entries[0];
        map.insert(k, replacement);
        prop_assert_eq!(map.get(&k), Ok(&replacement));
    }

    /// Removing a key drops exactly that key and leaves every other value alone.
    #[test]
    fn remove_affects_only_its_key(
        entries in proptest::collection::btree_map(key_strategy(), value_strategy(), 1..300),
        victim in key_strategy(),
    ) {
        let mut map: BstMap<i64, i64> = entries.iter().map(|(&k, &v)| (k, v)).collect();
        let was_present = entries.contains_key(&victim);

        prop_assert_eq!(map.remove(&victim), entries.get(&victim).copied());
        prop_assert!(!map.contains_key(&victim));
        prop_assert_eq!(map.len(), entries.len() - usize::from(was_present));

        for (k, v) in entries.iter().filter(|&(&k, _)| k != victim) {
            prop_assert_eq!(map.get(k), Ok(v));
        }
    }

    /// Floor and ceiling agree with a brute-force scan below, inside and above
    /// the stored range, and on exact matches.
    #[test]
    fn floor_and_ceiling_match_a_scan(keys in proptest::collection::btree_set(-500i64..500, 1..200)) {
        let map: BstMap<i64, ()> = keys.iter().map(|&k| (k, ())).collect();
        let lowest = *keys.first().unwrap();
        let highest = *keys.last().unwrap();

        for probe in (lowest - 3)..=(highest + 3) {
            let floor = keys.iter().rev().find(|&&k| k <= probe).ok_or(Error::NoFloor);
            let ceiling = keys.iter().find(|&&k| k >= probe).ok_or(Error::NoCeiling);
            prop_assert_eq!(map.floor(&probe), floor, "floor({})", probe);
            prop_assert_eq!(map.ceiling(&probe), ceiling, "ceiling({})", probe);
        }
    }

    /// Inserting the same pair twice produces the same map as inserting it once.
    #[test]
    fn repeated_insert_is_idempotent(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..300)) {
        let once: BstMap<i64, i64> = entries.iter().copied().collect();
        let mut twice = BstMap::new();
        for &(k, v) in &entries {
            twice.insert(k, v);
            twice.insert(k, v);
        }

        prop_assert_eq!(twice.len(), once.len());
        prop_assert_eq!(twice.height(), once.height());
        prop_assert_eq!(&twice, &once);
    }

    /// Rank and selection are inverse to each other for every stored key.
    #[test]
    fn rank_and_select_are_inverse(keys in proptest::collection::vec(key_strategy(), 1..300)) {
        let map: BstMap<i64, i64> = keys.iter().map(|&k| (k, k * 3)).collect();

        for rank in 0..map.len() {
            let (key, value) = map.get_by_rank(rank).expect("rank below len");
            prop_assert_eq!(*value, *key * 3);
            prop_assert_eq!(map.rank_of(key), Some(rank));
            prop_assert_eq!(map.rank(key), rank);
            prop_assert_eq!(map[Rank(rank)], *key * 3);
        }
        prop_assert!(map.get_by_rank(map.len()).is_none());
    }
}

// ─── End-to-end scenario ─────────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn people() -> BstMap<&'static str, i32> {
    let mut map = BstMap::new();
    for (name, age) in [("Mary", 10), ("Alice", 30), ("Vera", 60), ("Susan", 20), ("Zena", 40), ("Ursula", 50)] {
        map.insert(name, age);
    }
    map
}

#[test]
fn successor_promotion_scenario() {
    init_tracing();

    let mut map = people();
    assert_eq!(map.len(), 6);
    assert_eq!(map.to_string(), "Mary:10(Alice:30, Vera:60(Susan:20(--, Ursula:50), Zena:40))");

    // Mary has two children; her successor Susan moves into the root.
    assert_eq!(map.remove("Mary"), Some(10));
    assert_eq!(map.len(), 5);
    assert!(!map.contains_key("Mary"));
    assert_eq!(map.min(), Ok(&"Alice"));
    assert_eq!(map.get_by_rank(0), Some((&"Alice", &30)));
    assert_eq!(map.to_string(), "Susan:20(Alice:30, Vera:60(Ursula:50, Zena:40))");

    // Zena is a leaf.
    assert_eq!(map.remove("Zena"), Some(40));
    assert_eq!(map.len(), 4);
    assert_eq!(map.max(), Ok(&"Vera"));
    assert_eq!(map.to_string(), "Susan:20(Alice:30, Vera:60(Ursula:50, --))");

    for (name, age) in [("Alice", 30), ("Susan", 20), ("Ursula", 50), ("Vera", 60)] {
        assert_eq!(map.get(name), Ok(&age));
    }
}

#[test]
fn order_statistics_on_names() {
    let map = people();

    assert_eq!(map.floor("Bob"), Ok(&"Alice"));
    assert_eq!(map.floor("Mary"), Ok(&"Mary"));
    assert_eq!(map.floor("Aaron"), Err(Error::NoFloor));
    assert_eq!(map.ceiling("Bob"), Ok(&"Mary"));
    assert_eq!(map.ceiling("Tina"), Ok(&"Ursula"));
    assert_eq!(map.ceiling("Zoe"), Err(Error::NoCeiling));
    assert_eq!(map.rank("Susan"), 2);
    assert_eq!(map.rank_of("Nobody"), None);
}

#[test]
fn empty_map_errors() {
    let mut map: BstMap<String, u8> = BstMap::new();

    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.min(), Err(Error::EmptyMap));
    assert_eq!(map.max(), Err(Error::EmptyMap));
    assert_eq!(map.floor("a"), Err(Error::EmptyMap));
    assert_eq!(map.ceiling("a"), Err(Error::EmptyMap));
    assert_eq!(map.delete_min(), Err(Error::EmptyMap));
    assert_eq!(map.delete_max(), Err(Error::EmptyMap));
    assert_eq!(map.get("a"), Err(Error::KeyNotFound));
    assert_eq!(map.remove("a"), None);
    assert_eq!(map.to_string(), "--");
}

#[test]
fn stored_values_are_not_mistaken_for_absence() {
    let mut map: BstMap<u8, Option<u8>> = BstMap::new();
    map.insert(1, None);

    assert!(map.contains_key(&1));
    assert_eq!(map.get(&1), Ok(&None));
    assert_eq!(map.get(&2), Err(Error::KeyNotFound));
}

#[test]
fn borrowed_string_keys() {
    let mut map: BstMap<String, usize> = BstMap::new();
    for word in ["delta", "alpha", "charlie", "bravo"] {
        map.insert(word.to_owned(), word.len());
    }

    assert_eq!(map.get("charlie"), Ok(&7));
    assert_eq!(map.floor("bz").map(String::as_str), Ok("bravo"));
    assert_eq!(map.remove_entry("alpha"), Some(("alpha".to_owned(), 5)));
    assert_eq!(map.min().map(String::as_str), Ok("bravo"));
    assert_eq!(format!("{map:?}"), r#"{"bravo": 5, "charlie": 7, "delta": 5}"#);
}

#[test]
fn sorted_input_builds_a_deep_path_that_still_answers_queries() {
    const N: u32 = 100_000;
    let mut map: BstMap<u32, u32> = (0..N).map(|i| (i, i * 2)).collect();

    assert_eq!(map.len(), 100_000);
    assert_eq!(map.height(), 100_000);
    assert_eq!(map.get(&(N - 1)), Ok(&((N - 1) * 2)));
    assert_eq!(map.floor(&(N + 5)), Ok(&(N - 1)));
    assert_eq!(map.ceiling(&(N / 2)), Ok(&(N / 2)));
    assert_eq!(map.rank(&(N - 1)), 99_999);
    assert_eq!(map[Rank(50_000)], 100_000);

    assert_eq!(map.remove(&(N / 2)), Some(N));
    assert_eq!(map.floor(&(N / 2)), Ok(&(N / 2 - 1)));
    assert_eq!(map.ceiling(&(N / 2)), Ok(&(N / 2 + 1)));
    assert_eq!(map.rank(&(N / 2 + 1)), 50_000);
    assert_eq!(map.delete_min(), Ok((0, 0)));
    assert_eq!(map.delete_max(), Ok((N - 1, (N - 1) * 2)));
    assert_eq!(map.len(), 99_997);
    assert_eq!(map.height(), 99_997);

    // Every node but the last has an empty left child.
    let dump = map.to_string();
    assert!(dump.starts_with("1:2(--, 2:4(--, 3:6(--, "));
    assert!(dump.trim_end_matches(')').ends_with("(--, 99998:199996"));
    assert_eq!(dump.matches("--").count(), 99_996);
}

#[test]
fn index_by_rank_mut_updates_value() {
    let mut map = people();
    map[Rank(0)] += 1;
    assert_eq!(map.get("Alice"), Ok(&31));
}

#[test]
fn clone_is_deep() {
    let original = people();
    let mut copy = original.clone();
    copy.remove("Mary");
    copy.insert("Yara", 70);

    assert_eq!(original.len(), 6);
    assert!(original.contains_key("Mary"));
    assert!(!original.contains_key("Yara"));
    assert_ne!(original, copy);
}

#[test]
fn drain_with_delete_min_yields_sorted_entries() {
    let mut map = people();
    let mut drained = Vec::new();
    while let Ok((name, _)) = map.delete_min() {
        drained.push(name);
    }
    assert_eq!(drained, ["Alice", "Mary", "Susan", "Ursula", "Vera", "Zena"]);
    assert!(map.is_empty());
}
