#![no_main]

use libfuzzer_sys::fuzz_target;
use pareto::shell::parse;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse(input);
    }
});
