//! The `ur:type/bytewords` and `ur:type/seq-seqlen/bytewords` grammars:
//! a type-tagged, case-insensitive URI wrapper over an arbitrary byte
//! payload, single-part or fountain-coded multipart.

use dcbor::CBOR;

use crate::bytewords::{self, Style};
use crate::error::{Error, Result};
use crate::fountain::{fragment_len, FountainDecoder, FountainEncoder, Part};

fn is_valid_type(ur_type: &str) -> bool {
    !ur_type.is_empty() && ur_type.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// A parsed single-part `ur:type/bytewords` string together with its
/// decoded payload bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UR {
    ur_type: String,
    cbor_data: Vec<u8>,
}

impl UR {
    pub fn new(ur_type: impl Into<String>, cbor_data: impl Into<Vec<u8>>) -> Result<Self> {
        let ur_type = ur_type.into();
        if !is_valid_type(&ur_type) {
            return Err(Error::InvalidType);
        }
        Ok(Self { ur_type, cbor_data: cbor_data.into() })
    }

    pub fn from_cbor(ur_type: impl Into<String>, cbor: &CBOR) -> Result<Self> {
        Self::new(ur_type, cbor.to_cbor_data())
    }

    pub fn ur_type(&self) -> &str { &self.ur_type }

    pub fn cbor_data(&self) -> &[u8] { &self.cbor_data }

    pub fn cbor(&self) -> Result<CBOR> { Ok(CBOR::try_from_data(&self.cbor_data)?) }

    /// `"ur:" + type + "/" + Bytewords(cbor-bytes, Minimal)`.
    pub fn string(&self) -> String {
        format!("ur:{}/{}", self.ur_type, bytewords::encode(&self.cbor_data, Style::Minimal))
    }

    /// Parses a single-part UR string, verifying its scheme, type
    /// syntax, and bytewords checksum.
    pub fn from_ur_string(s: &str) -> Result<Self> {
        let rest = s.strip_prefix("ur:").ok_or(Error::InvalidScheme)?;
        let mut parts = rest.splitn(2, '/');
        let ur_type = parts.next().filter(|t| !t.is_empty()).ok_or(Error::TypeUnspecified)?;
        let body = parts.next().ok_or(Error::NotSinglePart)?;
        if !is_valid_type(ur_type) {
            return Err(Error::InvalidType);
        }
        if body.contains('/') {
            return Err(Error::NotSinglePart);
        }
        let cbor_data = bytewords::decode(body, Style::Minimal)?;
        Ok(Self { ur_type: ur_type.to_string(), cbor_data })
    }

    /// Parses a UR string and checks its type against `expected`.
    pub fn from_ur_string_expecting(s: &str, expected: &str) -> Result<Self> {
        let ur = Self::from_ur_string(s)?;
        if ur.ur_type != expected {
            return Err(Error::UnexpectedType {
                expected: expected.to_string(),
                found: ur.ur_type.clone(),
            });
        }
        Ok(ur)
    }
}

/// Encodes a payload as a sequence of multipart UR strings, each of
/// the form `ur:<type>/<seqNum>-<seqLen>/<bytewords>`.
///
/// `max_fragment_len` bounds each fragment's size (e.g. for QR code
/// capacity); `part_count` is the number of parts to emit, which may
/// exceed `seq_len` to draw from the rateless fountain tail.
pub fn encode_multipart(
    ur_type: &str,
    cbor_data: &[u8],
    max_fragment_len: usize,
    part_count: u32,
) -> Result<Vec<String>> {
    if !is_valid_type(ur_type) {
        return Err(Error::InvalidType);
    }
    let mut encoder = FountainEncoder::new(cbor_data, max_fragment_len);
    if encoder.is_single_part() {
        return Ok(vec![UR::new(ur_type, cbor_data.to_vec())?.string()]);
    }
    let mut out = Vec::with_capacity(part_count as usize);
    for _ in 0..part_count {
        out.push(part_to_string(ur_type, &encoder.next_part()));
    }
    Ok(out)
}

fn part_to_string(ur_type: &str, part: &Part) -> String {
    let mut framed = Vec::with_capacity(8 + part.data.len());
    framed.extend_from_slice(&part.message_len.to_be_bytes());
    framed.extend_from_slice(&part.checksum.to_be_bytes());
    framed.extend_from_slice(&part.data);
    format!(
        "ur:{}/{}-{}/{}",
        ur_type,
        part.seq_num,
        part.seq_len,
        bytewords::encode(&framed, Style::Minimal)
    )
}

fn part_from_string(s: &str, expected_type: &str) -> Result<Part> {
    let rest = s.strip_prefix("ur:").ok_or(Error::InvalidScheme)?;
    let mut segments = rest.splitn(3, '/');
    let ur_type = segments.next().filter(|t| !t.is_empty()).ok_or(Error::TypeUnspecified)?;
    if ur_type != expected_type {
        return Err(Error::UnexpectedType {
            expected: expected_type.to_string(),
            found: ur_type.to_string(),
        });
    }
    let seq = segments.next().ok_or(Error::InvalidType)?;
    let body = segments.next().ok_or(Error::InvalidType)?;
    let (seq_num, seq_len) = seq.split_once('-').ok_or(Error::InvalidType)?;
    let seq_num: u32 = seq_num.parse().map_err(|_| Error::InvalidType)?;
    let seq_len: u32 = seq_len.parse().map_err(|_| Error::InvalidType)?;

    let framed = bytewords::decode(body, Style::Minimal)?;
    if framed.len() < 8 {
        return Err(Error::BytewordsChecksum);
    }
    let message_len = u32::from_be_bytes(framed[0..4].try_into().unwrap());
    let checksum = u32::from_be_bytes(framed[4..8].try_into().unwrap());
    let data = framed[8..].to_vec();
    Ok(Part { seq_num, seq_len, message_len, checksum, data })
}

/// Accumulates multipart UR strings (in any order, with any
/// duplication) of a known type, producing the reassembled CBOR bytes
/// once enough parts have arrived.
#[derive(Default)]
pub struct MultipartDecoder {
    decoder: FountainDecoder,
}

impl MultipartDecoder {
    pub fn new() -> Self { Self::default() }

    pub fn is_complete(&self) -> bool { self.decoder.is_complete() }

    pub fn receive(&mut self, s: &str, expected_type: &str) -> Result<()> {
        let part = part_from_string(s, expected_type)?;
        self.decoder.receive(part)
    }

    pub fn message(&self) -> Result<Vec<u8>> { self.decoder.message() }
}

/// The `ur-string` grammar's `seq-len` upper limit is implicit; this
/// bound catches malformed input before it reaches the fountain
/// decoder.
pub fn fragment_length_hint(message_len: usize, max_fragment_len: usize) -> usize {
    fragment_len(message_len, max_fragment_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_part_round_trips() {
        let cbor: CBOR = 42u64.into();
        let ur = UR::from_cbor("seed", &cbor).unwrap();
        let s = ur.string();
        assert!(s.starts_with("ur:seed/"));
        let parsed = UR::from_ur_string(&s).unwrap();
        assert_eq!(parsed.cbor().unwrap(), cbor);
    }

    #[test]
    fn rejects_bad_scheme_and_type() {
        assert_eq!(UR::from_ur_string("not-a-ur"), Err(Error::InvalidScheme));
        assert_eq!(UR::new("Has_Upper", vec![]).unwrap_err(), Error::InvalidType);
    }

    #[test]
    fn multipart_round_trips_reassembly() {
        let payload: Vec<u8> = (0u8..=255).cycle().take(900).collect();
        let parts = encode_multipart("crypto-seed", &payload, 40, 40).unwrap();
        let mut decoder = MultipartDecoder::new();
        for s in parts {
            decoder.receive(&s, "crypto-seed").unwrap();
            if decoder.is_complete() {
                break;
            }
        }
        assert!(decoder.is_complete());
        assert_eq!(decoder.message().unwrap(), payload);
    }

    #[test]
    fn multipart_rejects_wrong_type() {
        let payload: Vec<u8> = (0u8..=255).collect();
        let parts = encode_multipart("crypto-seed", &payload, 20, 20).unwrap();
        let mut decoder = MultipartDecoder::new();
        assert!(matches!(
            decoder.receive(&parts[0], "crypto-request"),
            Err(Error::UnexpectedType { .. })
        ));
    }
}
