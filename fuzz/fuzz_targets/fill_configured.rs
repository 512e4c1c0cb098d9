#![no_main]

use arbitrary::Arbitrary;
use fuzzfill::{Fill, ProviderConfig, TypeProvider};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    slice_max: u8,
    map_max: u8,
    string_max: u8,
    nil_bias: u8,
    skip_bias: u8,
    depth_limit: u8,
    fill_private: bool,
    data: Vec<u8>,
}

#[derive(Debug, Default, Fill)]
struct Node {
    pub label: String,
    pub weights: Vec<u16>,
    pub children: Vec<Node>,
    pub next: Option<Box<Node>>,
    secret: i64,
}

fn config(input: &Input) -> ProviderConfig {
    let mut config = ProviderConfig::default();
    let bias = |b: u8| f32::from(b) / 255.0;
    config
        .set_slice_bounds(0, usize::from(input.slice_max % 4))
        .expect("min <= max");
    config
        .set_map_bounds(0, usize::from(input.map_max % 4))
        .expect("min <= max");
    config
        .set_string_bounds(0, usize::from(input.string_max))
        .expect("min <= max");
    config
        .set_biases_common(bias(input.nil_bias).max(0.1), bias(input.skip_bias))
        .expect("biases in [0, 1]");
    config.set_depth_limit(1 + usize::from(input.depth_limit % 6));
    config.set_fill_private_fields(input.fill_private);
    config
}

// Fuzz target: fill and replay a recursive record under a fuzzed config.
//
// The depth limit is always set: with a high skip bias a node can consume
// no input at all, so only the limit bounds the tree.
// Two fills of the same bytes with the same config must consume the same
// number of bytes and produce the same outcome.
fuzz_target!(|input: Input| {
    let config = config(&input);
    let Ok(mut provider) = TypeProvider::with_config(&input.data, config) else {
        return;
    };

    let mut first = Node::default();
    let first_outcome = provider.fill(&mut first);
    let first_position = provider.position();

    provider.reset().expect("input already seeded once");
    let mut second = Node::default();
    let second_outcome = provider.fill(&mut second);

    assert_eq!(first_outcome, second_outcome);
    assert_eq!(first_position, provider.position());
    assert_eq!(format!("{first:?}"), format!("{second:?}"));
    let _ = first.secret;
});
