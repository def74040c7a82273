use proptest::prelude::*;

use accountsvc_types::{Account, AccountId};

proptest! {
    /// Any pair of strings survives the stored JSON encoding unchanged.
    #[test]
    fn account_json_roundtrip(id in ".*", name in ".*") {
        let account = Account::new(id.clone(), name.clone());
        let bytes = account.to_json_bytes().unwrap();
        let decoded = Account::from_json_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded.id.as_str(), id.as_str());
        prop_assert_eq!(decoded.name, name);
    }

    /// Key bytes are exactly the UTF-8 bytes of the id.
    #[test]
    fn account_id_key_bytes(id in "\\PC{1,32}") {
        let key = AccountId::new(id.clone());
        prop_assert_eq!(key.as_bytes(), id.as_bytes());
        prop_assert!(key.is_valid());
    }

    /// Arbitrary bytes never panic the decoder.
    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = Account::from_json_bytes(&bytes);
    }
}
