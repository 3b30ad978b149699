//! Uniform Resources: a transport wrapper presenting arbitrary byte
//! payloads (almost always dCBOR) as URI-ish, QR-code- and
//! voice-survivable text.
//!
//! Three layers build on each other: [`bytewords`] is the alphabet and
//! framing codec, [`fountain`] is the rateless multipart erasure code,
//! and [`ur`] ties both to the `ur:type/...` grammar.

pub mod bytewords;
mod error;
pub mod fountain;
mod ur;
mod xoshiro;

pub use bytewords::Style as BytewordsStyle;
pub use error::{Error, Result};
pub use fountain::{FountainDecoder, FountainEncoder, Part as FountainPart};
pub use ur::{encode_multipart, MultipartDecoder, UR};

pub mod prelude {
    pub use crate::{
        bytewords::Style as BytewordsStyle, encode_multipart, Error, FountainDecoder,
        FountainEncoder, FountainPart, MultipartDecoder, Result, UR,
    };
}
