//! Generic population tests over the fixture records.
//!
//! Inputs start with a zero seed unless a test needs a long random-looking
//! stream; positions below therefore count the 8 seed bytes.

use std::collections::{BTreeMap, HashMap};

use fuzzfill::{ProviderConfig, SEED_SIZE, TypeProvider};
use fuzzfill_tests::{
    Branch, Everything, Leaf, Node, Octet, Opaque, Optionals, Secretive, Tree, WithOpaque, seeded,
};

/// Zero seed followed by `tail`.
fn input(tail: &[u8]) -> Vec<u8> {
    let mut data = vec![0u8; SEED_SIZE];
    data.extend_from_slice(tail);
    data
}

/// A provider with every bias at 0, so fills are fully populated.
fn eager(data: &[u8]) -> TypeProvider<'_> {
    let mut provider = TypeProvider::new(data).unwrap();
    provider.set_biases_common(0.0, 0.0).unwrap();
    provider
}

fn sentinel_tree() -> Tree {
    Tree {
        id: 0,
        branch: Branch {
            tag: 0xAA,
            leaf: Leaf { value: 0xBBBB },
        },
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

#[test]
fn vec_lengths_stay_in_slice_bounds() {
    let data = seeded(11, 1 << 14);
    let mut provider = eager(&data);
    provider.set_slice_bounds(3, 7).unwrap();

    for _ in 0..100 {
        let mut values: Vec<u16> = Vec::new();
        provider.fill(&mut values).unwrap();
        assert!((3..=7).contains(&values.len()), "len {}", values.len());
    }
}

#[test]
fn string_consumption_stays_in_string_bounds() {
    let data = seeded(12, 1 << 12);
    let mut provider = eager(&data);
    provider.set_string_bounds(2, 5).unwrap();

    for _ in 0..100 {
        let before = provider.position();
        let mut text = String::new();
        provider.fill(&mut text).unwrap();
        // Lossy decoding can grow the text, so check raw bytes consumed.
        assert!((2..=5).contains(&(provider.position() - before)));
    }
}

#[test]
fn map_sizes_stay_in_map_bounds() {
    let data = seeded(13, 1 << 14);
    let mut provider = eager(&data);
    provider.set_map_bounds(2, 5).unwrap();

    for _ in 0..100 {
        let before = provider.position();
        let mut map: BTreeMap<u32, u8> = BTreeMap::new();
        provider.fill(&mut map).unwrap();

        // Each drawn entry reads a 4-byte key and a 1-byte value.
        let drawn = (provider.position() - before) / 5;
        assert!((2..=5).contains(&drawn), "drawn {drawn}");
        assert!((1..=drawn).contains(&map.len()), "len {}", map.len());
    }
}

#[test]
fn hash_map_duplicate_keys_overwrite() {
    let data = seeded(20, 1 << 14);
    let mut provider = eager(&data);
    provider.set_map_bounds(4, 8).unwrap();

    for _ in 0..100 {
        let before = provider.position();
        let mut map: HashMap<bool, u8> = HashMap::new();
        provider.fill(&mut map).unwrap();

        let drawn = (provider.position() - before) / 2;
        assert!((4..=8).contains(&drawn), "drawn {drawn}");
        // `bool` keys collide, so later entries replace earlier ones.
        assert!((1..=2).contains(&map.len()), "len {}", map.len());
    }
}

// ── Nil biases ────────────────────────────────────────────────────────────────

#[test]
fn nil_bias_zero_never_empties() {
    let data = seeded(14, 1 << 14);
    let mut provider = eager(&data);
    provider.set_slice_bounds(1, 4).unwrap();
    provider.set_map_bounds(1, 4).unwrap();

    for _ in 0..100 {
        let mut value = Optionals::default();
        provider.fill(&mut value).unwrap();
        assert!(value.name.is_some());
        assert!(!value.list.is_empty());
        assert!(!value.blob.is_empty());
        assert!(!value.map.is_empty());
    }
}

#[test]
fn nil_bias_one_empties_without_reading() {
    let data = seeded(15, 256);
    let mut provider = eager(&data);
    provider.set_biases_common(1.0, 0.0).unwrap();

    let mut value = Optionals {
        name: Some("old".into()),
        list: vec![1, 2],
        blob: vec![3],
        map: BTreeMap::from([(4, 5)]),
    };
    provider.fill(&mut value).unwrap();

    assert_eq!(value, Optionals::default());
    assert_eq!(provider.position(), SEED_SIZE);
}

#[test]
fn skip_and_nil_one_keep_the_prefilled_record() {
    let data = seeded(16, 256);
    let mut provider = eager(&data);
    provider.set_biases_common(1.0, 1.0).unwrap();

    let original = Optionals {
        name: Some("kept".into()),
        list: vec![7, 8, 9],
        blob: vec![0xAB],
        map: BTreeMap::from([(1, 1)]),
    };
    let mut value = original.clone();
    provider.fill(&mut value).unwrap();

    assert_eq!(value, original);
    assert_eq!(provider.position(), SEED_SIZE);
}

// ── Depth limit ───────────────────────────────────────────────────────────────

#[test]
fn depth_limit_one_fills_only_the_top_record() {
    let data = input(&[0, 0, 0, 5, 1, 0, 2]);
    let mut provider = eager(&data);
    provider.set_depth_limit(1);

    let mut tree = sentinel_tree();
    provider.fill(&mut tree).unwrap();

    assert_eq!(tree.id, 5);
    assert_eq!(tree.branch, sentinel_tree().branch);
    assert_eq!(provider.position(), 12);
}

#[test]
fn depth_limit_two_stops_at_the_leaf() {
    let data = input(&[0, 0, 0, 5, 1, 0, 2]);
    let mut provider = eager(&data);
    provider.set_depth_limit(2);

    let mut tree = sentinel_tree();
    provider.fill(&mut tree).unwrap();

    assert_eq!(tree.branch.tag, 1);
    assert_eq!(tree.branch.leaf.value, 0xBBBB);
    assert_eq!(provider.position(), 13);
}

#[test]
fn unlimited_depth_fills_everything() {
    let data = input(&[0, 0, 0, 5, 1, 0, 2]);
    let mut provider = eager(&data);

    let mut tree = sentinel_tree();
    provider.fill(&mut tree).unwrap();

    assert_eq!(tree.branch.leaf.value, 2);
    assert_eq!(provider.bytes_left(), 0);
}

#[test]
fn depth_limit_bounds_a_never_nil_cycle() {
    let data = input(&[1, 2, 3, 4, 5, 6]);
    let mut provider = eager(&data);
    provider.set_depth_limit(3);

    let mut head = Node::default();
    provider.fill(&mut head).unwrap();

    // Three records are filled; the fourth node exists but is refused.
    assert_eq!(head.chain_len(), 4);
    assert_eq!(head.value, 1);
    let last = head.next.as_ref().and_then(|n| n.next.as_ref()).and_then(|n| n.next.as_ref());
    assert_eq!(last.map(|n| n.value), Some(0));
    assert_eq!(provider.position(), 11);
}

#[test]
fn cyclic_type_terminates_through_pointer_bias() {
    let data = seeded(17, 1 << 16);
    let mut provider = TypeProvider::new(&data).unwrap();
    provider.set_biases(0.0, 0.5, 0.0, 0.0).unwrap();

    for _ in 0..50 {
        let mut head = Node::default();
        provider.fill(&mut head).unwrap();
        assert!(head.chain_len() >= 1);
    }
}

#[test]
fn unbounded_never_nil_chain_ends_at_input_end() {
    let data = seeded(1, 1 << 16);
    let mut provider = TypeProvider::new(&data).unwrap();
    provider.set_biases(0.0, 0.0, 0.0, 0.0).unwrap();

    // One byte per node: the chain nests ~64k records before the input runs out.
    let mut head = Node::default();
    let err = provider.fill(&mut head).unwrap_err();
    assert!(err.is_end_of_stream());
    assert_eq!(provider.bytes_left(), 0);
}

#[test]
fn long_chain_fills_and_drops() {
    let data = seeded(2, 1 << 16);
    let mut provider = TypeProvider::new(&data).unwrap();
    provider.set_biases(0.0, 0.0, 0.0, 0.0).unwrap();
    provider.set_depth_limit(50_000);

    let mut head = Node::default();
    provider.fill(&mut head).unwrap();
    assert_eq!(head.chain_len(), 50_001);
    drop(head);
}

// ── Private and skipped fields ────────────────────────────────────────────────

#[test]
fn private_fields_fill_by_default() {
    let data = input(&[0, 0, 0, 1, 0, 0, 0, 2, 0, 3]);
    let mut provider = eager(&data);

    let mut value = Secretive::default();
    provider.fill(&mut value).unwrap();

    assert_eq!((value.visible, value.hidden(), value.internal()), (1, 2, 3));
    assert_eq!(provider.bytes_left(), 0);
}

#[test]
fn private_fields_left_alone_when_disabled() {
    let data = input(&[0, 0, 0, 1, 0, 0, 0, 2, 0, 3]);
    let mut provider = eager(&data);
    provider.set_fill_private_fields(false);

    let mut value = Secretive::with_private(40, 41);
    provider.fill(&mut value).unwrap();

    assert_eq!((value.visible, value.hidden(), value.internal()), (1, 40, 41));
    assert_eq!(provider.position(), 12);
}

#[test]
fn skipped_attribute_field_is_untouched() {
    let data = input(&[7, 9]);
    let mut provider = eager(&data);

    let mut value = WithOpaque {
        opaque: Opaque("keep".into()),
        ..WithOpaque::default()
    };
    provider.fill(&mut value).unwrap();

    assert_eq!(value.before, 7);
    assert_eq!(value.opaque, Opaque("keep".into()));
    assert_eq!(value.after, 9);
}

// ── Byte blobs ────────────────────────────────────────────────────────────────

#[test]
fn nested_byte_blobs_match_the_element_path() {
    let data = seeded(18, 1 << 15);
    let mut config = ProviderConfig::default();
    config.set_slice_bounds(0, 12).unwrap();
    config.set_biases(0.0, 0.0, 0.1, 0.0).unwrap();

    let mut bulk = TypeProvider::with_config(&data, config.clone()).unwrap();
    let mut elementwise = TypeProvider::with_config(&data, config).unwrap();

    for _ in 0..20 {
        let mut blobs: Vec<Vec<u8>> = Vec::new();
        bulk.fill(&mut blobs).unwrap();

        let mut octets: Vec<Vec<Octet>> = Vec::new();
        elementwise.fill(&mut octets).unwrap();

        let unpacked: Vec<Vec<u8>> = octets
            .iter()
            .map(|inner| inner.iter().map(|o| o.0).collect())
            .collect();
        assert_eq!(blobs, unpacked);
        assert_eq!(bulk.position(), elementwise.position());
    }
}

// ── Errors and whole-record fills ─────────────────────────────────────────────

#[test]
fn running_out_mid_record_is_end_of_stream() {
    let data = input(&[0, 0, 0, 5, 1]);
    let mut provider = eager(&data);

    let mut tree = Tree::default();
    let err = provider.fill(&mut tree).unwrap_err();
    assert!(err.is_end_of_stream());
}

#[test]
fn everything_fills_from_a_long_input() {
    let data = seeded(19, 1 << 16);
    let mut provider = TypeProvider::new(&data).unwrap();

    let mut last = provider.position();
    for _ in 0..5 {
        let mut value = Everything::default();
        provider.fill(&mut value).unwrap();
        // At least the fixed-width parts are always read.
        assert!(provider.position() > last);
        last = provider.position();
    }
}
