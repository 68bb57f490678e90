// SPDX-License-Identifier: Apache-2.0

use pixelvault_core::canonical;
use proptest::prelude::*;
use serde_json::json;

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

proptest! {
    #[test]
    fn stable_hash_is_deterministic(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
        let h1 = canonical::stable_hash_hex(&payload);
        let h2 = canonical::stable_hash_hex(&payload);
        prop_assert_eq!(h1.len(), 64);
        prop_assert_eq!(h1, h2);
    }

    #[test]
    fn stable_json_bytes_ignore_insertion_order(a in key_strategy(), b in key_strategy(), av in any::<u32>(), bv in any::<u32>()) {
        prop_assume!(a != b);

        let left = json!({a.clone(): av, b.clone(): bv});
        let right = json!({b: bv, a: av});

        let left_bytes = canonical::stable_json_bytes(&left).expect("canonical left");
        let right_bytes = canonical::stable_json_bytes(&right).expect("canonical right");

        prop_assert_eq!(left_bytes, right_bytes);
    }
}
