use unicode_normalization::{is_nfc, UnicodeNormalization};

use crate::{
    cbor::{CBOR, CBORCase},
    error::Error,
    map::Map,
    simple::Simple,
    tag::Tag,
};

/// Decodes a single dCBOR item from `data`, rejecting any trailing
/// bytes and any non-canonical encoding found at any depth.
pub(crate) fn decode_cbor(data: &[u8]) -> crate::Result<CBOR> {
    let mut reader = Reader { data, pos: 0 };
    let item = reader.read_item()?;
    if reader.pos != data.len() {
        return Err(Error::TrailingInput(reader.pos));
    }
    Ok(item)
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

/// The initial-byte header: major type (top 3 bits) and argument
/// (bottom 5 bits, possibly an extension-length marker).
struct Header {
    major: u8,
    arg: u64,
    offset: usize,
}

impl<'a> Reader<'a> {
    fn peek_byte(&self) -> crate::Result<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(Error::Underrun(self.pos))
    }

    fn take(&mut self, n: usize) -> crate::Result<&'a [u8]> {
        if self.pos + n > self.data.len() {
            return Err(Error::Underrun(self.pos));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads an initial byte plus its argument.
    ///
    /// For major types 0-6 the argument is a length-prefixed unsigned
    /// integer and must use the shortest encoding that represents it
    /// (dCBOR's general argument-canonicality rule). For major type 7
    /// (simple/float), additional-info 25/26/27 instead denote a fixed
    /// half/single/double-width IEEE-754 bit pattern: the "shortest
    /// form" question there is which *width* round-trips losslessly,
    /// not whether the raw bits happen to be numerically small, so that
    /// check is skipped here and performed separately in
    /// `read_simple`/`validate_canonical_float_width`.
    fn read_header(&mut self) -> crate::Result<Header> {
        let offset = self.pos;
        let byte = self.peek_byte()?;
        self.pos += 1;
        let major = byte >> 5;
        let info = byte & 0x1f;
        let is_float_major = major == 7;
        let arg = match info {
            0..=23 => info as u64,
            24 => {
                let b = self.take(1)?;
                let v = b[0] as u64;
                if !is_float_major && v < 24 {
                    return Err(Error::DecodeNonCanonical(offset));
                }
                v
            }
            25 => {
                let b = self.take(2)?;
                let v = u16::from_be_bytes([b[0], b[1]]) as u64;
                if !is_float_major && v <= 0xff {
                    return Err(Error::DecodeNonCanonical(offset));
                }
                v
            }
            26 => {
                let b = self.take(4)?;
                let v = u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as u64;
                if !is_float_major && v <= 0xffff {
                    return Err(Error::DecodeNonCanonical(offset));
                }
                v
            }
            27 => {
                let b = self.take(8)?;
                let v = u64::from_be_bytes([
                    b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
                ]);
                if !is_float_major && v <= 0xffff_ffff {
                    return Err(Error::DecodeNonCanonical(offset));
                }
                v
            }
            28..=30 => return Err(Error::DecodeMalformed(offset)),
            31 => return Err(Error::DecodeMalformed(offset)),
            _ => unreachable!(),
        };
        if is_float_major && info == 24 {
            // Simple-value extension byte: dCBOR only ever allows
            // False/True/Null/Float, none of which use this form.
            return Err(Error::DecodeMalformed(offset));
        }
        Ok(Header { major, arg, offset })
    }

    fn read_item(&mut self) -> crate::Result<CBOR> {
        let header = self.read_header()?;
        match header.major {
            0 => Ok(CBORCase::Unsigned(header.arg).into()),
            1 => Ok(CBORCase::Negative(header.arg).into()),
            2 => {
                let bytes = self.take(header.arg as usize)?;
                Ok(CBORCase::ByteString(bytes.to_vec()).into())
            }
            3 => {
                let bytes = self.take(header.arg as usize)?;
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::InvalidUtf8(header.offset))?;
                if !is_nfc(s) {
                    return Err(Error::DecodeNonCanonical(header.offset));
                }
                Ok(CBORCase::Text(s.nfc().collect::<String>()).into())
            }
            4 => {
                let mut items = Vec::with_capacity(header.arg as usize);
                for _ in 0..header.arg {
                    items.push(self.read_item()?);
                }
                Ok(CBORCase::Array(items).into())
            }
            5 => {
                let mut map = Map::new();
                let mut last_key_bytes: Option<Vec<u8>> = None;
                for _ in 0..header.arg {
                    let entry_offset = self.pos;
                    let key = self.read_item()?;
                    let value = self.read_item()?;
                    let key_bytes = key.to_cbor_data();
                    if let Some(prev) = &last_key_bytes {
                        if key_bytes.as_slice() < prev.as_slice() {
                            return Err(Error::DecodeNonCanonical(entry_offset));
                        }
                    }
                    last_key_bytes = Some(key_bytes);
                    map.insert_decoded(key, value, entry_offset)?;
                }
                Ok(CBORCase::Map(map).into())
            }
            6 => {
                let content = self.read_item()?;
                Ok(CBORCase::Tagged(Tag::new(header.arg), content).into())
            }
            7 => self.read_simple(&header),
            _ => unreachable!(),
        }
    }

    fn read_simple(&mut self, header: &Header) -> crate::Result<CBOR> {
        let info = header.arg;
        match info {
            20 => Ok(CBORCase::Simple(Simple::False).into()),
            21 => Ok(CBORCase::Simple(Simple::True).into()),
            22 => Ok(CBORCase::Simple(Simple::Null).into()),
            _ => {
                let initial = self.data[header.offset];
                let additional = initial & 0x1f;
                match additional {
                    25 => {
                        let bits = info as u16;
                        let half = half::f16::from_bits(bits);
                        let f = half.to_f64();
                        validate_canonical_float_width(f, 25, header.offset)?;
                        reject_integer_reducible_float(f, header.offset)?;
                        Ok(CBORCase::Simple(Simple::Float(f)).into())
                    }
                    26 => {
                        let bits = info as u32;
                        let f = f32::from_bits(bits);
                        validate_canonical_float_width(f as f64, 26, header.offset)?;
                        reject_integer_reducible_float(f as f64, header.offset)?;
                        Ok(CBORCase::Simple(Simple::Float(f as f64)).into())
                    }
                    27 => {
                        let f = f64::from_bits(info);
                        validate_canonical_float_width(f, 27, header.offset)?;
                        reject_integer_reducible_float(f, header.offset)?;
                        Ok(CBORCase::Simple(Simple::Float(f)).into())
                    }
                    _ => Err(Error::DecodeMalformed(header.offset)),
                }
            }
        }
    }
}

/// Rejects a decoded float that represents an exact integer -- such a
/// value must be encoded as `Unsigned`/`Negative`, never as a float,
/// under the dCBOR numeric-reduction rule.
fn reject_integer_reducible_float(f: f64, offset: usize) -> crate::Result<()> {
    if Simple::float_is_integer_reducible(f) {
        return Err(Error::DecodeNonCanonical(offset));
    }
    Ok(())
}

/// Confirms that a decoded float, at the width it was encoded in
/// (`encoded_width` is the additional-info value: 25/26/27 for
/// f16/f32/f64), could not have been represented losslessly in a
/// narrower width -- dCBOR requires the narrowest width that
/// round-trips exactly.
fn validate_canonical_float_width(
    f: f64,
    encoded_width: u8,
    offset: usize,
) -> crate::Result<()> {
    if f.is_nan() {
        if encoded_width != 25 || f.to_bits() != half::f16::NAN.to_f64().to_bits() {
            return Err(Error::DecodeNonCanonical(offset));
        }
        return Ok(());
    }
    let half_val = half::f16::from_f64(f);
    if half_val.to_f64() == f {
        if encoded_width != 25 {
            return Err(Error::DecodeNonCanonical(offset));
        }
        return Ok(());
    }
    let single_val = f as f32;
    if single_val as f64 == f {
        if encoded_width != 26 {
            return Err(Error::DecodeNonCanonical(offset));
        }
        return Ok(());
    }
    if encoded_width != 27 {
        return Err(Error::DecodeNonCanonical(offset));
    }
    Ok(())
}
