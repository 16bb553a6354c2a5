#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(canon) = urlcanon::normalize(s) {
            // a canonical form must survive renormalization
            let _ = urlcanon::normalize(&canon);
        }
    }
});
