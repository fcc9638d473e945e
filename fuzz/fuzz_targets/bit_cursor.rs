#![no_main]

use bit_cursor::fuzz::bit_cursor::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzCase| {
    harness(data);
});
