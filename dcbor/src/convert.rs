use crate::{
    cbor::{CBOR, CBORCase},
    error::Error,
    simple::Simple,
};

macro_rules! impl_from_unsigned {
    ($($t:ty),+) => {
        $(
            impl From<$t> for CBOR {
                fn from(value: $t) -> Self {
                    CBORCase::Unsigned(value as u64).into()
                }
            }
        )+
    };
}
impl_from_unsigned!(u8, u16, u32, u64, usize);

macro_rules! impl_from_signed {
    ($($t:ty),+) => {
        $(
            impl From<$t> for CBOR {
                fn from(value: $t) -> Self {
                    if value >= 0 {
                        CBORCase::Unsigned(value as u64).into()
                    } else {
                        CBORCase::Negative((-1 - value as i128) as u64).into()
                    }
                }
            }
        )+
    };
}
impl_from_signed!(i8, i16, i32, i64, isize);

impl From<bool> for CBOR {
    fn from(value: bool) -> Self {
        CBORCase::Simple(if value { Simple::True } else { Simple::False }).into()
    }
}

/// Folds a float that exactly represents an integer in `i64`/`u64`
/// range down to `CBORCase::Unsigned`/`Negative`, per the dCBOR
/// numeric-reduction rule; otherwise keeps it as a canonicalized float.
fn reduce_float(value: f64) -> CBORCase {
    if Simple::float_is_integer_reducible(value) {
        if value >= 0.0 {
            return CBORCase::Unsigned(value as u64);
        }
        return CBORCase::Negative((-1.0 - value) as u64);
    }
    CBORCase::Simple(Simple::Float(Simple::canonicalize_float(value)))
}

impl From<f64> for CBOR {
    fn from(value: f64) -> Self { reduce_float(value).into() }
}

impl From<f32> for CBOR {
    fn from(value: f32) -> Self { reduce_float(value as f64).into() }
}

impl From<&str> for CBOR {
    fn from(value: &str) -> Self { CBORCase::Text(value.to_string()).into() }
}

impl From<String> for CBOR {
    fn from(value: String) -> Self { CBORCase::Text(value).into() }
}

impl From<&[u8]> for CBOR {
    fn from(value: &[u8]) -> Self { CBORCase::ByteString(value.to_vec()).into() }
}

impl From<Vec<u8>> for CBOR {
    fn from(value: Vec<u8>) -> Self { CBORCase::ByteString(value).into() }
}

/// Builds an array-typed `CBOR` from any iterable of convertible
/// items. Not a blanket `From` impl because `Vec<u8>`/`&[u8]` need the
/// distinct bytestring encoding above, not an array of unsigned ints.
pub fn cbor_array<T: Into<CBOR>>(items: impl IntoIterator<Item = T>) -> CBOR {
    CBORCase::Array(items.into_iter().map(Into::into).collect()).into()
}

impl From<crate::map::Map> for CBOR {
    fn from(value: crate::map::Map) -> Self { CBORCase::Map(value).into() }
}

macro_rules! impl_try_from_unsigned {
    ($($t:ty),+) => {
        $(
            impl TryFrom<CBOR> for $t {
                type Error = Error;
                fn try_from(value: CBOR) -> Result<Self, Self::Error> {
                    match value.as_case() {
                        CBORCase::Unsigned(n) => {
                            <$t>::try_from(*n).map_err(|_| Error::OutOfRange)
                        }
                        _ => Err(Error::WrongCase {
                            expected: "unsigned",
                            found: case_name(&value),
                        }),
                    }
                }
            }
        )+
    };
}
impl_try_from_unsigned!(u8, u16, u32, u64, usize);

macro_rules! impl_try_from_signed {
    ($($t:ty),+) => {
        $(
            impl TryFrom<CBOR> for $t {
                type Error = Error;
                fn try_from(value: CBOR) -> Result<Self, Self::Error> {
                    match value.as_case() {
                        CBORCase::Unsigned(n) => {
                            <$t>::try_from(*n).map_err(|_| Error::OutOfRange)
                        }
                        CBORCase::Negative(n) => {
                            let v = -1i128 - (*n as i128);
                            <$t>::try_from(v).map_err(|_| Error::OutOfRange)
                        }
                        _ => Err(Error::WrongCase {
                            expected: "integer",
                            found: case_name(&value),
                        }),
                    }
                }
            }
        )+
    };
}
impl_try_from_signed!(i8, i16, i32, i64, isize);

impl TryFrom<CBOR> for bool {
    type Error = Error;
    fn try_from(value: CBOR) -> Result<Self, Self::Error> {
        value.as_bool().ok_or(Error::WrongCase {
            expected: "bool",
            found: case_name(&value),
        })
    }
}

impl TryFrom<CBOR> for f64 {
    type Error = Error;
    fn try_from(value: CBOR) -> Result<Self, Self::Error> {
        match value.as_case() {
            CBORCase::Simple(Simple::Float(f)) => Ok(*f),
            CBORCase::Unsigned(n) => Ok(*n as f64),
            CBORCase::Negative(n) => Ok(-1.0 - (*n as f64)),
            _ => Err(Error::WrongCase { expected: "number", found: case_name(&value) }),
        }
    }
}

impl TryFrom<CBOR> for String {
    type Error = Error;
    fn try_from(value: CBOR) -> Result<Self, Self::Error> {
        match value.into_case() {
            CBORCase::Text(s) => Ok(s),
            other => Err(Error::WrongCase {
                expected: "text",
                found: case_name(&other.into()),
            }),
        }
    }
}

impl TryFrom<CBOR> for Vec<u8> {
    type Error = Error;
    fn try_from(value: CBOR) -> Result<Self, Self::Error> {
        match value.into_case() {
            CBORCase::ByteString(b) => Ok(b),
            other => Err(Error::WrongCase {
                expected: "bytestring",
                found: case_name(&other.into()),
            }),
        }
    }
}

/// Decodes an array-typed `CBOR` into any collectible of convertible
/// items. Not a blanket `TryFrom` impl for the same reason `cbor_array`
/// isn't a blanket `From`: it would conflict with the dedicated
/// `Vec<u8>` bytestring conversion above.
pub fn cbor_array_to_vec<T: TryFrom<CBOR, Error = Error>>(
    value: CBOR,
) -> Result<Vec<T>, Error> {
    match value.into_case() {
        CBORCase::Array(items) => items.into_iter().map(T::try_from).collect(),
        other => Err(Error::WrongCase {
            expected: "array",
            found: case_name(&other.into()),
        }),
    }
}

fn case_name(value: &CBOR) -> &'static str {
    match value.as_case() {
        CBORCase::Unsigned(_) => "unsigned",
        CBORCase::Negative(_) => "negative",
        CBORCase::ByteString(_) => "bytestring",
        CBORCase::Text(_) => "text",
        CBORCase::Array(_) => "array",
        CBORCase::Map(_) => "map",
        CBORCase::Tagged(..) => "tagged",
        CBORCase::Simple(_) => "simple",
    }
}
