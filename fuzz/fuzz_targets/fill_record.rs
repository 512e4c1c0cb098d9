#![no_main]

use std::collections::{BTreeMap, HashMap};

use fuzzfill::{Complex, Fill, TypeProvider};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Default, Fill)]
struct Record {
    pub id: u64,
    pub name: String,
    pub tags: Vec<String>,
    pub blob: Vec<u8>,
    pub index: HashMap<u16, Vec<i32>>,
    pub sorted: BTreeMap<String, f64>,
    pub point: [f32; 3],
    pub phase: Complex<f32>,
    pub pair: (bool, i8),
    pub child: Option<Box<Record>>,
    hidden: u32,
}

// Fuzz target: fill a self-referential record with default settings.
//
// Any input must either fill completely or fail with a cursor error;
// panics and unbounded recursion are bugs.
fuzz_target!(|data: &[u8]| {
    let Ok(mut provider) = TypeProvider::new(data) else {
        return;
    };
    let mut record = Record::default();
    if let Err(err) = provider.fill(&mut record) {
        assert!(err.is_end_of_stream());
    }
    assert!(provider.position() <= data.len());
    let _ = record.hidden;
});
