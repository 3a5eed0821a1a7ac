//! Fuzz testing for request body validation and pagination parsing.
//!
//! Ensures that arbitrary request bodies and query values never panic and
//! that every accepted product body satisfies the write invariants.
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! cargo +nightly install cargo-fuzz
//! cargo +nightly fuzz run fuzz_validation
//! cargo +nightly fuzz run fuzz_validation -- -max_total_time=60
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use product_catalog::pagination::Pagination;
use product_catalog::validation::parse_product_body;

fuzz_target!(|data: &[u8]| {
    // Any accepted body has a non-empty name and a positive price
    if let Ok(payload) = parse_product_body(data) {
        assert!(!payload.name.is_empty());
        assert!(payload.price > rust_decimal::Decimal::ZERO);
    }

    if let Ok(s) = std::str::from_utf8(data) {
        let (page, limit) = s.split_once('&').unwrap_or((s, ""));
        let pagination = Pagination::from_query(Some(page), Some(limit));

        for len in [0usize, 1, 3, 10, 1000] {
            let range = pagination.range(len);
            assert!(range.start <= range.end && range.end <= len);
        }

        let _ = serde_json::from_str::<serde_json::Value>(s);
    }
});
