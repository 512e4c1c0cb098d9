#![no_main]

use fuzzfill::TypeProvider;
use libfuzzer_sys::fuzz_target;

// Fuzz target: TypeProvider primitive accessors.
//
// Catches bugs in:
// - Seed handling on short inputs
// - Length draws running past the end of the input
// - Lossy string decoding of arbitrary bytes
fuzz_target!(|data: &[u8]| {
    let Ok(mut provider) = TypeProvider::new(data) else {
        return;
    };

    loop {
        let before = provider.position();
        let outcome = match provider.random_size(0, 7) {
            0 => provider.get_bool().map(|_| ()),
            1 => provider.get_i16().map(|_| ()),
            2 => provider.get_u32().map(|_| ()),
            3 => provider.get_i64().map(|_| ()),
            4 => provider.get_f64().map(|_| ()),
            5 => provider.get_string().map(|_| ()),
            6 => provider.get_bytes().map(|_| ()),
            _ => provider.get_usize().map(|_| ()),
        };
        if outcome.is_err() {
            assert_eq!(provider.position(), before);
            break;
        }
        if provider.bytes_left() == 0 {
            break;
        }
    }
});
