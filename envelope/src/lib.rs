//! Gordian Envelope: a hash-addressable, signable, encryptable, elidable
//! document tree over dCBOR.
//!
//! An [`Envelope`] is one of eight cases (§3.3 of the design): a
//! decorated subject (`Node`), a single dCBOR value (`Leaf`), an opaque
//! wrapper (`Wrapped`), a predicate/object pair (`Assertion`), a small
//! well-known integer (`KnownValue`), or one of three "obscured" forms
//! (`Elided`, `Encrypted`, `Compressed`) that redact content while
//! preserving the digest of the node they replace. That digest
//! stability is the central design invariant of the whole suite: a
//! signature computed over a tree remains valid over any elided,
//! encrypted, or compressed transformation of that tree.

mod assertion;
mod cbor;
mod compress;
pub mod crypto;
mod digest;
mod elide;
mod encrypt;
mod envelope;
mod error;
pub mod format;
mod recipient;
mod salt;
mod sign;
pub mod sskr;
mod walk;

pub use assertion::Assertion;
pub use cbor::{TAG_COMPRESSED, TAG_ENCRYPTED, TAG_ENVELOPE, TAG_LEAF};
pub use compress::Compressed;
pub use digest::{Digest, DigestProvider};
pub use elide::ObscureAction;
pub use envelope::Envelope;
pub use error::{Error, Result};
pub use sskr::{SSKRGroupSpec, SSKRShare, SSKRSpec};
pub use walk::EdgeType;

pub mod prelude {
    pub use crate::{
        crypto::{
            PrivateKey, PublicKey, SealedMessage, Signature, Signer, SymmetricKey, Verifier,
        },
        format::{EnvelopeSummary, FormatContext},
        Assertion, Digest, DigestProvider, EdgeType, Envelope, Error, ObscureAction, Result,
        SSKRGroupSpec, SSKRShare, SSKRSpec,
    };
}
