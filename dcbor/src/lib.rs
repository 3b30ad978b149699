//! Deterministic CBOR (dCBOR, IETF draft `draft-mcnally-deterministic-cbor`):
//! a strict subset of RFC 8949 CBOR with exactly one valid encoding for
//! any abstract value. Every [`CBOR`] produced by this crate round-trips
//! through [`CBOR::to_cbor_data`]/[`CBOR::try_from_data`] byte-for-byte,
//! and [`CBOR::try_from_data`] rejects any input that is not itself in
//! that single canonical form.

mod cbor;
mod convert;
mod date;
mod decode;
mod diagnostic;
mod error;
mod map;
mod simple;
mod tag;
mod varint;

pub use cbor::{CBOR, CBORCase};
pub use convert::{cbor_array, cbor_array_to_vec};
pub use date::{Date, DATE_TAG};
pub use diagnostic::DiagOpts;
pub use error::{Error, Result};
pub use map::Map;
pub use simple::Simple;
pub use tag::{Tag, TagsStore};
pub use varint::MajorType;

pub mod prelude {
    pub use crate::{
        cbor_array, cbor_array_to_vec, CBORCase, Date, DiagOpts, Error, Map, Result, Simple,
        Tag, TagsStore, CBOR,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_unsigned() {
        for n in [0u64, 1, 23, 24, 255, 256, 65535, 65536, u32::MAX as u64, u64::MAX]
        {
            let cbor: CBOR = n.into();
            let data = cbor.to_cbor_data();
            let decoded = CBOR::try_from_data(&data).unwrap();
            assert_eq!(cbor, decoded);
            assert_eq!(u64::try_from(decoded).unwrap(), n);
        }
    }

    #[test]
    fn roundtrips_negative() {
        let cbor: CBOR = (-1i64).into();
        assert_eq!(cbor.to_hex(), "20");
        let cbor: CBOR = (-100i64).into();
        let decoded = CBOR::try_from_data(cbor.to_cbor_data()).unwrap();
        assert_eq!(i64::try_from(decoded).unwrap(), -100);
    }

    #[test]
    fn rejects_non_shortest_form_unsigned() {
        // 0x18 0x05 encodes 5 using the one-byte-extension form, which
        // is non-canonical: 5 must be encoded as a single byte 0x05.
        let data = [0x18, 0x05];
        assert!(matches!(
            CBOR::try_from_data(data),
            Err(Error::DecodeNonCanonical(_))
        ));
    }

    #[test]
    fn rejects_indefinite_length() {
        // 0x9f is the indefinite-length array initial byte; dCBOR
        // forbids indefinite lengths entirely.
        let data = [0x9f, 0x01, 0xff];
        assert!(matches!(
            CBOR::try_from_data(data),
            Err(Error::DecodeMalformed(_))
        ));
    }

    #[test]
    fn rejects_trailing_input() {
        let one: CBOR = 1u64.into();
        let mut data = one.to_cbor_data();
        data.push(0x00);
        assert!(matches!(
            CBOR::try_from_data(data),
            Err(Error::TrailingInput(_))
        ));
    }

    #[test]
    fn map_keys_are_sorted_and_duplicates_rejected() {
        let mut map = Map::new();
        map.insert("b", 2u64);
        map.insert("a", 1u64);
        let cbor: CBOR = map.into();
        let data = cbor.to_cbor_data();
        let decoded = CBOR::try_from_data(&data).unwrap();
        assert_eq!(cbor, decoded);

        // Hand-build a map with an out-of-order key pair: should be
        // rejected as non-canonical on decode.
        let a: CBOR = "a".into();
        let b: CBOR = "b".into();
        let one: CBOR = 1u64.into();
        let two: CBOR = 2u64.into();
        let mut bad = vec![0xa2u8];
        bad.extend(b.to_cbor_data());
        bad.extend(one.to_cbor_data());
        bad.extend(a.to_cbor_data());
        bad.extend(two.to_cbor_data());
        assert!(matches!(
            CBOR::try_from_data(bad),
            Err(Error::DecodeNonCanonical(_))
        ));
    }

    #[test]
    fn nan_has_single_canonical_encoding() {
        let a: CBOR = f64::NAN.into();
        let b: CBOR = (-f64::NAN).into();
        assert_eq!(a, b);
        assert_eq!(a.to_hex(), b.to_hex());
    }

    #[test]
    fn floats_use_shortest_width() {
        let half: CBOR = 1.5f64.into();
        assert_eq!(half.to_cbor_data().len(), 3); // 1 header + 2 bytes
    }

    #[test]
    fn integral_floats_are_reduced_to_integers() {
        // dCBOR numeric reduction: a float with an integral value
        // collapses to the same encoding as the equivalent integer.
        let whole: CBOR = 3.0f64.into();
        let int: CBOR = 3u64.into();
        assert_eq!(whole, int);
        assert_eq!(whole.to_cbor_data(), int.to_cbor_data());
        assert_eq!(whole.to_cbor_data()[0] >> 5, 0);

        let neg: CBOR = (-5.0f64).into();
        let neg_int: CBOR = (-5i64).into();
        assert_eq!(neg, neg_int);
    }

    #[test]
    fn text_is_nfc_normalized() {
        // "e" + combining acute vs precomposed "é" must encode
        // identically.
        let decomposed: CBOR = "e\u{0301}".into();
        let precomposed: CBOR = "\u{00e9}".into();
        assert_eq!(decomposed.to_cbor_data(), precomposed.to_cbor_data());
    }

    #[test]
    fn date_round_trips_through_tag_one() {
        let d = Date::from_timestamp(1_650_000_000.5);
        let cbor: CBOR = d.into();
        let decoded = CBOR::try_from_data(cbor.to_cbor_data()).unwrap();
        let back = Date::try_from(decoded).unwrap();
        assert!((back.timestamp() - d.timestamp()).abs() < 1e-6);
    }
}
