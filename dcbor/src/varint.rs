/// CBOR major types, numbered as in RFC 8949 §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorType {
    Unsigned = 0,
    Negative = 1,
    ByteString = 2,
    Text = 3,
    Array = 4,
    Map = 5,
    Tagged = 6,
    Simple = 7,
}

/// Encodes a non-negative integer argument in the shortest possible
/// CBOR initial-byte-plus-argument form for the given major type.
///
/// This is the single choke point for the "shortest form" canonical
/// invariant: every caller that needs to emit an unsigned-int-shaped
/// argument (array/map lengths, tag numbers, the unsigned/negative
/// major types themselves, string lengths) goes through here.
pub trait EncodeVarInt {
    fn encode_varint(&self, major_type: MajorType) -> Vec<u8>;
}

fn encode_header(major: MajorType, value: u64) -> Vec<u8> {
    let high = (major as u8) << 5;
    match value {
        0..=23 => vec![high | (value as u8)],
        24..=0xff => vec![high | 24, value as u8],
        0x100..=0xffff => {
            let mut buf = vec![high | 25];
            buf.extend_from_slice(&(value as u16).to_be_bytes());
            buf
        }
        0x1_0000..=0xffff_ffff => {
            let mut buf = vec![high | 26];
            buf.extend_from_slice(&(value as u32).to_be_bytes());
            buf
        }
        _ => {
            let mut buf = vec![high | 27];
            buf.extend_from_slice(&value.to_be_bytes());
            buf
        }
    }
}

impl EncodeVarInt for u64 {
    fn encode_varint(&self, major_type: MajorType) -> Vec<u8> {
        encode_header(major_type, *self)
    }
}

impl EncodeVarInt for usize {
    fn encode_varint(&self, major_type: MajorType) -> Vec<u8> {
        encode_header(major_type, *self as u64)
    }
}

/// The length in bytes of the header that `encode_header` would emit,
/// used by the decoder to reject non-shortest-form arguments.
pub(crate) fn header_len_for(value: u64) -> usize {
    match value {
        0..=23 => 1,
        24..=0xff => 2,
        0x100..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}
