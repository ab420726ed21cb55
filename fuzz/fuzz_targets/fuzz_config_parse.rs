#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Must not panic on any config content
    if let Ok(config) = daylog::Config::parse(data) {
        let _ = config.parse_level();
        let _ = config.resolved_directory();
    }
});
