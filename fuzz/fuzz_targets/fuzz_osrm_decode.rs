#![no_main]

use floorpath_core::osrm::decode_steps;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary response bodies must decode or fail, never panic.
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(steps) = decode_steps(body) {
        for (k, step) in steps.iter().enumerate() {
            assert_eq!(step.position, k, "step positions not sequential");
        }
    }
});
