//! Sharded Secret Key Reconstruction: splits a symmetric content key into
//! a two-level hierarchy of Shamir shares (groups of members), attaches
//! one `sskrShare: SSKRShare` assertion per share to a copy of the
//! encrypted envelope, and recombines a quorum of shares back into the
//! original content key.
//!
//! Neither level is special-cased: a 1-of-1 group is just a degenerate
//! Shamir split, so the usual "1 group, threshold 1" case costs nothing
//! extra.

mod gf256;
mod shamir;

use std::collections::HashMap;

use dcbor::prelude::*;
use known_values::SSKR_SHARE;
use rand::RngCore;

use crate::envelope::Envelope;
use crate::error::{Error, Result};

const MAX_GROUPS: usize = 16;
const MAX_MEMBERS: usize = 16;

/// A single group's member threshold and member count within an
/// [`SSKRSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SSKRGroupSpec {
    member_threshold: u8,
    member_count: u8,
}

impl SSKRGroupSpec {
    pub fn new(member_threshold: u8, member_count: u8) -> Result<Self> {
        if member_count == 0 || member_count as usize > MAX_MEMBERS {
            return Err(Error::InvalidSskrSpec("group member count must be between 1 and 16"));
        }
        if member_threshold == 0 || member_threshold > member_count {
            return Err(Error::InvalidSskrSpec("group member threshold must be between 1 and the member count"));
        }
        Ok(Self { member_threshold, member_count })
    }

    pub fn member_threshold(&self) -> u8 { self.member_threshold }
    pub fn member_count(&self) -> u8 { self.member_count }
}

/// The overall split specification: how many groups there are, how
/// many of them must be satisfied (`group_threshold`), and each
/// group's own member threshold and count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SSKRSpec {
    group_threshold: u8,
    groups: Vec<SSKRGroupSpec>,
}

impl SSKRSpec {
    pub fn new(group_threshold: u8, groups: Vec<SSKRGroupSpec>) -> Result<Self> {
        if groups.is_empty() || groups.len() > MAX_GROUPS {
            return Err(Error::InvalidSskrSpec("there must be between 1 and 16 groups"));
        }
        if group_threshold == 0 || group_threshold as usize > groups.len() {
            return Err(Error::InvalidSskrSpec("group threshold must be between 1 and the number of groups"));
        }
        Ok(Self { group_threshold, groups })
    }

    pub fn group_threshold(&self) -> u8 { self.group_threshold }
    pub fn groups(&self) -> &[SSKRGroupSpec] { &self.groups }
}

/// One share of a split secret, carrying enough of the split's shape
/// (`identifier`, group and member indices/thresholds/counts) that an
/// arbitrary subset of shares can be grouped and combined correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SSKRShare {
    identifier: u16,
    group_index: u8,
    group_threshold: u8,
    group_count: u8,
    member_index: u8,
    member_threshold: u8,
    member_count: u8,
    value: Vec<u8>,
}

impl SSKRShare {
    /// Shares from distinct splits (and so not combinable together)
    /// carry distinct identifiers.
    pub fn identifier(&self) -> u16 { self.identifier }

    pub fn to_cbor(&self) -> CBOR {
        cbor_array([
            CBOR::from(self.identifier),
            CBOR::from(self.group_index),
            CBOR::from(self.group_threshold),
            CBOR::from(self.group_count),
            CBOR::from(self.member_index),
            CBOR::from(self.member_threshold),
            CBOR::from(self.member_count),
            CBOR::from(self.value.clone()),
        ])
    }

    pub fn from_cbor(cbor: CBOR) -> Result<Self> {
        let items = cbor
            .as_array()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "an eight-element array", found: "other" }))?;
        if items.len() != 8 {
            return Err(Error::Cbor(dcbor::Error::OutOfRange));
        }
        Ok(Self {
            identifier: items[0].clone().try_into()?,
            group_index: items[1].clone().try_into()?,
            group_threshold: items[2].clone().try_into()?,
            group_count: items[3].clone().try_into()?,
            member_index: items[4].clone().try_into()?,
            member_threshold: items[5].clone().try_into()?,
            member_count: items[6].clone().try_into()?,
            value: items[7]
                .as_byte_string()
                .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?
                .to_vec(),
        })
    }
}

/// Splits `secret` per `spec` using `rng`, returning one inner `Vec` of
/// member shares per group.
pub fn sskr_generate(spec: &SSKRSpec, secret: &[u8], rng: &mut impl RngCore) -> Result<Vec<Vec<SSKRShare>>> {
    let identifier = rng.next_u32() as u16;
    let group_count = spec.groups.len() as u8;

    let group_shares = shamir::split(secret, spec.group_threshold, group_count, rng);

    let mut result = Vec::with_capacity(spec.groups.len());
    for (group_index, group_spec) in spec.groups.iter().enumerate() {
        let group_share = &group_shares[group_index];
        let member_shares = shamir::split(&group_share.y, group_spec.member_threshold, group_spec.member_count, rng);
        let shares = member_shares
            .into_iter()
            .map(|member_share| SSKRShare {
                identifier,
                group_index: group_index as u8,
                group_threshold: spec.group_threshold,
                group_count,
                member_index: member_share.x - 1,
                member_threshold: group_spec.member_threshold,
                member_count: group_spec.member_count,
                value: member_share.y,
            })
            .collect();
        result.push(shares);
    }
    Ok(result)
}

/// Recombines a quorum of `shares` (which may come from several
/// different groups, and need not all share the same `identifier` --
/// the caller is expected to have already filtered to one split) back
/// into the original secret.
pub fn sskr_combine(shares: &[SSKRShare]) -> Result<Vec<u8>> {
    if shares.is_empty() {
        return Err(Error::InvalidShares);
    }

    let mut by_group: HashMap<u8, Vec<&SSKRShare>> = HashMap::new();
    for share in shares {
        by_group.entry(share.group_index).or_default().push(share);
    }

    let group_threshold = shares[0].group_threshold;
    let mut group_shares = Vec::new();
    for (group_index, members) in by_group {
        let member_threshold = members[0].member_threshold;
        if members.len() < member_threshold as usize {
            continue;
        }
        let member_shares = members
            .iter()
            .take(member_threshold as usize)
            .map(|m| shamir::Share { x: m.member_index + 1, y: m.value.clone() })
            .collect::<Vec<_>>();
        if let Some(group_secret) = shamir::combine(&member_shares) {
            group_shares.push(shamir::Share { x: group_index + 1, y: group_secret });
        }
    }

    if group_shares.len() < group_threshold as usize {
        return Err(Error::InvalidShares);
    }
    group_shares.truncate(group_threshold as usize);
    shamir::combine(&group_shares).ok_or(Error::InvalidShares)
}

impl Envelope {
    fn add_sskr_share(&self, share: &SSKRShare) -> Envelope {
        self.add_assertion_with(SSKR_SHARE, Envelope::new_leaf(share.to_cbor()))
    }

    /// Splits this envelope into SSKR shares, one copy of the envelope
    /// per share, each carrying a unique `sskrShare` assertion. The
    /// envelope's subject should already be encrypted with
    /// `content_key`. Returns shares grouped by their `SSKRSpec` group.
    pub fn sskr_split(&self, spec: &SSKRSpec, content_key: &crate::crypto::SymmetricKey) -> Result<Vec<Vec<Envelope>>> {
        self.sskr_split_using(spec, content_key, &mut rand::thread_rng())
    }

    pub fn sskr_split_using(
        &self,
        spec: &SSKRSpec,
        content_key: &crate::crypto::SymmetricKey,
        rng: &mut impl RngCore,
    ) -> Result<Vec<Vec<Envelope>>> {
        let shares = sskr_generate(spec, content_key.data(), rng)?;
        Ok(shares
            .into_iter()
            .map(|group| group.iter().map(|share| self.add_sskr_share(share)).collect())
            .collect())
    }

    /// Flattened form of [`Envelope::sskr_split`], discarding group
    /// structure.
    pub fn sskr_split_flattened(
        &self,
        spec: &SSKRSpec,
        content_key: &crate::crypto::SymmetricKey,
    ) -> Result<Vec<Envelope>> {
        Ok(self.sskr_split(spec, content_key)?.into_iter().flatten().collect())
    }

    fn sskr_shares_in(envelopes: &[&Envelope]) -> Result<HashMap<u16, Vec<SSKRShare>>> {
        let mut result: HashMap<u16, Vec<SSKRShare>> = HashMap::new();
        for envelope in envelopes {
            for assertion in envelope.assertions_with_predicate(SSKR_SHARE) {
                let object = assertion.object().expect("assertion always has an object");
                let cbor = object
                    .leaf_cbor()
                    .cloned()
                    .ok_or(Error::UnexpectedCase { expected: "leaf", actual: "non-leaf" })?;
                let share = SSKRShare::from_cbor(cbor)?;
                result.entry(share.identifier).or_default().push(share);
            }
        }
        Ok(result)
    }

    /// Reconstructs the original envelope from a set of SSKR-bearing
    /// envelopes. Tries every distinct split identifier present until
    /// one combines to a content key that successfully decrypts the
    /// (shared) encrypted subject.
    pub fn sskr_join(envelopes: &[&Envelope]) -> Result<Envelope> {
        if envelopes.is_empty() {
            return Err(Error::InvalidShares);
        }

        for shares in Self::sskr_shares_in(envelopes)?.values() {
            if let Ok(secret) = sskr_combine(shares) {
                if let Ok(array) = <[u8; 32]>::try_from(secret.as_slice()) {
                    let content_key = crate::crypto::SymmetricKey::from_bytes(array);
                    if let Ok(envelope) = envelopes[0].decrypt_subject(&content_key) {
                        return Ok(envelope.subject());
                    }
                }
            }
        }
        Err(Error::InvalidShares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SymmetricKey;

    #[test]
    fn single_group_threshold_split_and_join_recovers_the_secret() {
        let original = Envelope::from("Secret message").add_assertion_with("metadata", "a test");
        let content_key = SymmetricKey::new();
        let wrapped = original.wrap();
        let encrypted = wrapped.encrypt_subject(&content_key).unwrap();

        let group = SSKRGroupSpec::new(2, 3).unwrap();
        let spec = SSKRSpec::new(1, vec![group]).unwrap();
        let shares = encrypted.sskr_split(&spec, &content_key).unwrap();
        assert_eq!(shares[0].len(), 3);

        let recovered_wrapped = Envelope::sskr_join(&[&shares[0][0], &shares[0][1]]).unwrap();
        let recovered = recovered_wrapped.try_unwrap().unwrap();
        assert_eq!(recovered, original);
    }

    #[test]
    fn fewer_than_threshold_shares_fail_to_join() {
        let original = Envelope::from("Secret message");
        let content_key = SymmetricKey::new();
        let encrypted = original.wrap().encrypt_subject(&content_key).unwrap();

        let group = SSKRGroupSpec::new(2, 3).unwrap();
        let spec = SSKRSpec::new(1, vec![group]).unwrap();
        let shares = encrypted.sskr_split(&spec, &content_key).unwrap();

        assert!(Envelope::sskr_join(&[&shares[0][0]]).is_err());
    }

    #[test]
    fn multi_group_split_requires_enough_groups_and_members() {
        let original = Envelope::from("Shared family secret");
        let content_key = SymmetricKey::new();
        let encrypted = original.wrap().encrypt_subject(&content_key).unwrap();

        let group_a = SSKRGroupSpec::new(1, 1).unwrap();
        let group_b = SSKRGroupSpec::new(2, 3).unwrap();
        let spec = SSKRSpec::new(2, vec![group_a, group_b]).unwrap();
        let shares = encrypted.sskr_split(&spec, &content_key).unwrap();

        // One share from group A, two from group B: satisfies both groups.
        let recovered = Envelope::sskr_join(&[&shares[0][0], &shares[1][0], &shares[1][1]])
            .unwrap()
            .try_unwrap()
            .unwrap();
        assert_eq!(recovered, original);

        // Only group B satisfied: group threshold of 2 is not met.
        assert!(Envelope::sskr_join(&[&shares[1][0], &shares[1][1]]).is_err());
    }
}
