use crate::KnownValue;

/// Declares a `pub const` [`KnownValue`] with a compile-time-static
/// name, and registers it into the crate's `ALL` slice.
macro_rules! known_value {
    ($const_name:ident, $value:expr, $name:expr) => {
        pub const $const_name: KnownValue = KnownValue::new_with_static_name($value, $name);
    };
}

// Registry values, per Blockchain Commons bcr-2023-002 "Known Value"
// (https://github.com/BlockchainCommons/Research/blob/master/papers/bcr-2023-002-known-value.md#appendix-a-registry).
known_value!(IS_A, 1, "isA");
known_value!(ID, 2, "id");
known_value!(VERIFIED_BY, 3, "verifiedBy");
known_value!(NOTE, 4, "note");
known_value!(HAS_RECIPIENT, 5, "hasRecipient");
known_value!(SSKR_SHARE, 6, "sskrShare");
known_value!(CONTROLLER, 7, "controller");
known_value!(PUBLIC_KEYS, 8, "publicKeys");
known_value!(DEREFERENCE_VIA, 9, "dereferenceVia");
known_value!(ENTITY, 10, "entity");
known_value!(HAS_NAME, 11, "hasName");
known_value!(LANGUAGE, 12, "language");
known_value!(ISSUER, 13, "issuer");
known_value!(HOLDER, 14, "holder");
known_value!(SALT, 15, "salt");
known_value!(DATE, 16, "date");
known_value!(UNKNOWN_VALUE, 17, "Unknown");
known_value!(DIFF_EDITS, 20, "edits");

known_value!(ATTACHMENT, 50, "attachment");
known_value!(VENDOR, 51, "vendor");
known_value!(CONFORMS_TO, 52, "conformsTo");

known_value!(BODY, 100, "body");
known_value!(RESULT, 101, "result");
known_value!(ERROR, 102, "error");
known_value!(OK_VALUE, 103, "OK");
known_value!(PROCESSING_VALUE, 104, "Processing");

known_value!(SEED_TYPE, 200, "Seed");
known_value!(PRIVATE_KEY_TYPE, 201, "PrivateKey");
known_value!(PUBLIC_KEY_TYPE, 202, "PublicKey");
known_value!(MASTER_KEY_TYPE, 203, "MasterKey");

known_value!(ASSET, 300, "asset");
known_value!(BITCOIN_VALUE, 301, "BTC");
known_value!(ETHEREUM_VALUE, 302, "ETH");

known_value!(NETWORK, 400, "network");
known_value!(MAIN_NET_VALUE, 401, "MainNet");
known_value!(TEST_NET_VALUE, 402, "TestNet");

known_value!(BIP32_KEY_TYPE, 500, "BIP32Key");
known_value!(CHAIN_CODE, 501, "chainCode");
known_value!(DERIVATION_PATH_TYPE, 502, "DerivationPath");
known_value!(PARENT_PATH, 503, "parent");
known_value!(CHILDREN_PATH, 504, "children");
known_value!(PARENT_FINGERPRINT, 505, "parentFingerprint");
known_value!(PSBT_TYPE, 506, "PSBT");
known_value!(OUTPUT_DESCRIPTOR_TYPE, 507, "OutputDescriptor");

/// Every constant above, in declaration order -- the seed list for
/// [`crate::KnownValuesStore::standard`].
pub const ALL: &[KnownValue] = &[
    IS_A,
    ID,
    VERIFIED_BY,
    NOTE,
    HAS_RECIPIENT,
    SSKR_SHARE,
    CONTROLLER,
    PUBLIC_KEYS,
    DEREFERENCE_VIA,
    ENTITY,
    HAS_NAME,
    LANGUAGE,
    ISSUER,
    HOLDER,
    SALT,
    DATE,
    UNKNOWN_VALUE,
    DIFF_EDITS,
    ATTACHMENT,
    VENDOR,
    CONFORMS_TO,
    BODY,
    RESULT,
    ERROR,
    OK_VALUE,
    PROCESSING_VALUE,
    SEED_TYPE,
    PRIVATE_KEY_TYPE,
    PUBLIC_KEY_TYPE,
    MASTER_KEY_TYPE,
    ASSET,
    BITCOIN_VALUE,
    ETHEREUM_VALUE,
    NETWORK,
    MAIN_NET_VALUE,
    TEST_NET_VALUE,
    BIP32_KEY_TYPE,
    CHAIN_CODE,
    DERIVATION_PATH_TYPE,
    PARENT_PATH,
    CHILDREN_PATH,
    PARENT_FINGERPRINT,
    PSBT_TYPE,
    OUTPUT_DESCRIPTOR_TYPE,
];
