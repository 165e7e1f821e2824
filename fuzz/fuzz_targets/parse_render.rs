#![no_main]
use libfuzzer_sys::fuzz_target;
use tact_roundtrip::{check_roundtrip, TactFrontend};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(expr) = tact_syntax::parse_expression(s) {
            if let Err(failure) = check_roundtrip(&TactFrontend, &expr) {
                panic!("{}", failure);
            }
        }
    }
});
