#![no_main]
use daylog::Level;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Must not panic, and anything accepted must round-trip through its name
    if let Ok(level) = data.parse::<Level>() {
        assert_eq!(level.as_str().parse::<Level>(), Ok(level));
    }
});
