#![no_main]

use fuzzfill_cursor::ByteCursor;
use libfuzzer_sys::fuzz_target;

// Fuzz target: ByteCursor read sequence.
//
// Every other input byte picks a read width; the cursor must never panic
// and never move on a failed read.
fuzz_target!(|data: &[u8]| {
    let mut cursor = ByteCursor::new(data);
    for &op in data.iter().step_by(2) {
        let before = cursor.position();
        let ok = match op % 6 {
            0 => cursor.read_byte().is_ok(),
            1 => cursor.read_u16().is_ok(),
            2 => cursor.read_u32().is_ok(),
            3 => cursor.read_u64().is_ok(),
            4 => cursor.read_f64().is_ok(),
            _ => cursor.read_bytes(usize::from(op)).is_ok(),
        };
        if !ok {
            assert_eq!(cursor.position(), before);
        }
        assert!(cursor.position() <= data.len());
    }
});
