//! Rateless fountain coding for multipart UR transport: splits a
//! payload into fixed-size fragments, emits pure fragments `1..=seqLen`
//! followed by an unbounded tail of XOR mixtures, and reassembles from
//! any sufficiently diverse subset of received parts.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};
use crate::xoshiro::{create_seed, Xoshiro256StarStar};

/// One fountain-coded part of a multipart UR transmission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    pub seq_num: u32,
    pub seq_len: u32,
    pub message_len: u32,
    pub checksum: u32,
    pub data: Vec<u8>,
}

pub fn fragment_len(message_len: usize, max_fragment_len: usize) -> usize {
    let max_fragment_len = max_fragment_len.max(1);
    let fragment_count = message_len.div_ceil(max_fragment_len).max(1);
    message_len.div_ceil(fragment_count).max(1)
}

fn partition(message: &[u8], fragment_len: usize) -> Vec<Vec<u8>> {
    message
        .chunks(fragment_len)
        .map(|chunk| {
            let mut fragment = chunk.to_vec();
            fragment.resize(fragment_len, 0);
            fragment
        })
        .collect()
}

fn xor_into(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

/// Picks the degree for seq_num's XOR mixture from a `1/k` weighted
/// distribution over `1..=seq_len`.
fn choose_degree(seq_len: usize, rng: &mut Xoshiro256StarStar) -> usize {
    let weights: Vec<f64> = (1..=seq_len).map(|k| 1.0 / k as f64).collect();
    let total: f64 = weights.iter().sum();
    let threshold = rng.next_double() * total;
    let mut acc = 0.0;
    for (i, w) in weights.iter().enumerate() {
        acc += w;
        if threshold < acc {
            return i + 1;
        }
    }
    seq_len
}

/// Re-derives the set of fragment indices mixed into `seq_num`'s part.
/// Pure for `seq_num in 1..=seq_len`; a seeded pseudo-random subset for
/// the rateless tail.
pub fn choose_fragments(seq_num: u32, seq_len: usize, checksum: u32) -> BTreeSet<usize> {
    if (seq_num as usize) <= seq_len {
        return [(seq_num as usize) - 1].into_iter().collect();
    }
    let seed = create_seed(checksum, seq_num);
    let mut rng = Xoshiro256StarStar::from_seed(&seed);
    let degree = choose_degree(seq_len, &mut rng);
    let mut remaining: Vec<usize> = (0..seq_len).collect();
    let mut chosen = BTreeSet::new();
    while chosen.len() < degree && !remaining.is_empty() {
        let i = rng.next_int(0, remaining.len() as u64 - 1) as usize;
        chosen.insert(remaining.remove(i));
    }
    chosen
}

pub struct FountainEncoder {
    fragments: Vec<Vec<u8>>,
    message_len: u32,
    checksum: u32,
    next_seq_num: u32,
}

impl FountainEncoder {
    pub fn new(message: &[u8], max_fragment_len: usize) -> Self {
        let flen = fragment_len(message.len(), max_fragment_len);
        Self {
            fragments: partition(message, flen),
            message_len: message.len() as u32,
            checksum: crate::bytewords::crc32(message),
            next_seq_num: 0,
        }
    }

    pub fn seq_len(&self) -> u32 { self.fragments.len() as u32 }

    /// Whether the encoder has emitted every pure fragment at least
    /// once; callers may stop here for a lossless transport, or keep
    /// calling `next_part` indefinitely for a lossy one.
    pub fn is_single_part(&self) -> bool { self.fragments.len() == 1 }

    pub fn next_part(&mut self) -> Part {
        self.next_seq_num += 1;
        let indices = choose_fragments(self.next_seq_num, self.fragments.len(), self.checksum);
        let mut data = vec![0u8; self.fragments[0].len()];
        for i in indices {
            xor_into(&mut data, &self.fragments[i]);
        }
        Part {
            seq_num: self.next_seq_num,
            seq_len: self.seq_len(),
            message_len: self.message_len,
            checksum: self.checksum,
            data,
        }
    }
}

struct Mixture {
    indices: BTreeSet<usize>,
    data: Vec<u8>,
}

pub struct FountainDecoder {
    seq_len: Option<u32>,
    message_len: Option<u32>,
    checksum: Option<u32>,
    pure: HashMap<usize, Vec<u8>>,
    mixtures: Vec<Mixture>,
    seen_seq_nums: BTreeSet<u32>,
}

impl Default for FountainDecoder {
    fn default() -> Self { Self::new() }
}

impl FountainDecoder {
    pub fn new() -> Self {
        Self {
            seq_len: None,
            message_len: None,
            checksum: None,
            pure: HashMap::new(),
            mixtures: Vec::new(),
            seen_seq_nums: BTreeSet::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.seq_len, Some(n) if self.pure.len() == n as usize)
    }

    /// Feeds a received part into the decoder. Idempotent under
    /// duplicates and indifferent to arrival order.
    pub fn receive(&mut self, part: Part) -> Result<()> {
        if let Some(seq_len) = self.seq_len {
            if seq_len != part.seq_len
                || self.message_len != Some(part.message_len)
                || self.checksum != Some(part.checksum)
            {
                return Err(Error::MultipartInconsistent);
            }
        } else {
            self.seq_len = Some(part.seq_len);
            self.message_len = Some(part.message_len);
            self.checksum = Some(part.checksum);
        }

        if self.is_complete() || !self.seen_seq_nums.insert(part.seq_num) {
            return Ok(());
        }

        let indices = choose_fragments(part.seq_num, part.seq_len as usize, part.checksum);
        if indices.len() == 1 {
            let i = *indices.iter().next().unwrap();
            self.pure.entry(i).or_insert(part.data);
        } else {
            self.mixtures.push(Mixture { indices, data: part.data });
        }
        self.reduce();
        Ok(())
    }

    fn reduce(&mut self) {
        loop {
            let mut changed = false;
            let mut still_mixed = Vec::new();
            for mut mixture in self.mixtures.drain(..) {
                let known: Vec<usize> =
                    mixture.indices.iter().copied().filter(|i| self.pure.contains_key(i)).collect();
                for i in known {
                    xor_into(&mut mixture.data, &self.pure[&i]);
                    mixture.indices.remove(&i);
                    changed = true;
                }
                match mixture.indices.len() {
                    0 => {}
                    1 => {
                        let i = *mixture.indices.iter().next().unwrap();
                        self.pure.entry(i).or_insert(mixture.data);
                    }
                    _ => still_mixed.push(mixture),
                }
            }
            self.mixtures = still_mixed;
            if !changed {
                break;
            }
        }
    }

    /// Reassembles the message once complete, verifying its checksum.
    pub fn message(&self) -> Result<Vec<u8>> {
        let seq_len = self.seq_len.ok_or(Error::MultipartInconsistent)?;
        if !self.is_complete() {
            return Err(Error::MultipartInconsistent);
        }
        let mut message = Vec::new();
        for i in 0..seq_len as usize {
            message.extend_from_slice(&self.pure[&i]);
        }
        message.truncate(self.message_len.unwrap() as usize);
        if crate::bytewords::crc32(&message) != self.checksum.unwrap() {
            return Err(Error::MultipartChecksumMismatch);
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reassembles_from_pure_parts_only() {
        let message = b"the quick brown fox jumps over the lazy dog".to_vec();
        let mut encoder = FountainEncoder::new(&message, 8);
        let mut decoder = FountainDecoder::new();
        for _ in 0..encoder.seq_len() {
            decoder.receive(encoder.next_part()).unwrap();
        }
        assert!(decoder.is_complete());
        assert_eq!(decoder.message().unwrap(), message);
    }

    #[test]
    fn reassembles_out_of_order_with_duplicates() {
        let message: Vec<u8> = (0u8..200).collect();
        let mut encoder = FountainEncoder::new(&message, 11);
        let mut parts: Vec<_> = (0..encoder.seq_len()).map(|_| encoder.next_part()).collect();
        parts.reverse();
        parts.push(parts[0].clone());

        let mut decoder = FountainDecoder::new();
        for part in parts {
            decoder.receive(part).unwrap();
        }
        assert_eq!(decoder.message().unwrap(), message);
    }

    #[test]
    fn reassembles_using_tail_mixtures_after_losing_a_pure_part() {
        let message: Vec<u8> = (0u8..=255).collect();
        let mut encoder = FountainEncoder::new(&message, 16);
        let seq_len = encoder.seq_len();
        let mut decoder = FountainDecoder::new();
        // Skip the first pure part, then draw from the rateless tail
        // until reassembly completes.
        let mut parts = Vec::new();
        for _ in 0..seq_len {
            parts.push(encoder.next_part());
        }
        for part in parts.into_iter().skip(1) {
            decoder.receive(part).unwrap();
        }
        let mut guard = 0;
        while !decoder.is_complete() && guard < 10_000 {
            decoder.receive(encoder.next_part()).unwrap();
            guard += 1;
        }
        assert!(decoder.is_complete());
        assert_eq!(decoder.message().unwrap(), message);
    }
}
