//! Cryptographic primitives backing the envelope transformation
//! operators: symmetric subject encryption, public-key sealed messages
//! for recipients, and Ed25519 signing.
//!
//! This module plays the role the teacher's external `bc-components`
//! and `bc-crypto` crates play, built directly on published primitive
//! crates (`x25519-dalek`, `ed25519-dalek`, `chacha20poly1305`, `sha2`,
//! `hkdf`) rather than an intermediate components library.

mod keys;
mod sealed;
mod signature;
mod symmetric;

pub use keys::{PrivateKey, PublicKey};
pub use sealed::SealedMessage;
pub use signature::{Signature, Signer, Verifier};
pub use symmetric::{EncryptedMessage, SymmetricKey};
