//! Fuzz target for input normalization
//!
//! Raw socket reads are arbitrary bytes decoded lossily, so normalization
//! must cope with anything a client sends.
//!
//! # Invariants
//!
//! - Never panics
//! - Output contains no CR or LF
//! - ASCII input normalizes idempotently

#![no_main]

use libfuzzer_sys::fuzz_target;
use wopr_core::normalize;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let token = normalize(&raw);

    assert!(!token.contains(['\r', '\n']), "line break survived: {token:?}");

    if raw.is_ascii() {
        assert_eq!(normalize(&token), token);
        assert_eq!(token.len(), raw.len() - raw.matches(['\r', '\n']).count());
    }
});
