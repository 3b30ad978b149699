//! Byte-wise `(threshold, share_count)` Shamir secret sharing over
//! GF(256): each byte of the secret is an independent polynomial's
//! constant term, shares are `(x, [p_0(x), p_1(x), ...])` pairs, and
//! the secret is recovered by Lagrange-interpolating each byte position
//! back to `x = 0`.

use rand::RngCore;

use super::gf256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub x: u8,
    pub y: Vec<u8>,
}

/// Splits `secret` into `share_count` shares, any `threshold` of which
/// reconstruct it. `threshold == 1` degenerates to copying the secret
/// to every share (no randomness needed).
pub fn split(secret: &[u8], threshold: u8, share_count: u8, rng: &mut impl RngCore) -> Vec<Share> {
    assert!(threshold >= 1 && threshold <= share_count);

    if threshold == 1 {
        return (1..=share_count).map(|x| Share { x, y: secret.to_vec() }).collect();
    }

    // For each byte position, draw `threshold - 1` random coefficients
    // for a degree-(threshold-1) polynomial whose constant term is that
    // byte, then evaluate it at each share's x-coordinate.
    let mut coefficients = vec![vec![0u8; threshold as usize]; secret.len()];
    for (byte_index, byte) in secret.iter().enumerate() {
        coefficients[byte_index][0] = *byte;
        for c in coefficients[byte_index].iter_mut().skip(1) {
            let mut buf = [0u8; 1];
            rng.fill_bytes(&mut buf);
            *c = buf[0];
        }
    }

    (1..=share_count)
        .map(|x| {
            let y = coefficients.iter().map(|poly| evaluate(poly, x)).collect();
            Share { x, y }
        })
        .collect()
}

fn evaluate(coefficients: &[u8], x: u8) -> u8 {
    // Horner's method, highest-degree coefficient first.
    coefficients.iter().rev().fold(0u8, |acc, &c| gf256::add(gf256::mul(acc, x), c))
}

/// Reconstructs the secret from `shares` via Lagrange interpolation at
/// `x = 0`. All shares must carry the same secret length and distinct
/// `x` values; the caller is responsible for supplying at least
/// `threshold` of them.
pub fn combine(shares: &[Share]) -> Option<Vec<u8>> {
    if shares.is_empty() {
        return None;
    }
    let len = shares[0].y.len();
    if shares.iter().any(|s| s.y.len() != len) {
        return None;
    }
    let mut xs = shares.iter().map(|s| s.x).collect::<Vec<_>>();
    xs.sort_unstable();
    xs.dedup();
    if xs.len() != shares.len() {
        return None; // duplicate x-coordinate: shares are not independent
    }

    let mut secret = vec![0u8; len];
    for byte_index in 0..len {
        let mut acc = 0u8;
        for (i, share_i) in shares.iter().enumerate() {
            // Lagrange basis polynomial l_i(0) = product_{j != i} (x_j / (x_j - x_i)).
            let mut numerator = 1u8;
            let mut denominator = 1u8;
            for (j, share_j) in shares.iter().enumerate() {
                if i == j {
                    continue;
                }
                numerator = gf256::mul(numerator, share_j.x);
                denominator = gf256::mul(denominator, gf256::add(share_j.x, share_i.x));
            }
            let basis = gf256::div(numerator, denominator);
            acc = gf256::add(acc, gf256::mul(share_i.y[byte_index], basis));
        }
        secret[byte_index] = acc;
    }
    Some(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn threshold_of_shares_reconstructs_the_secret() {
        let secret = b"a secret symmetric key!".to_vec();
        let shares = split(&secret, 3, 5, &mut OsRng);
        let subset = vec![shares[0].clone(), shares[2].clone(), shares[4].clone()];
        assert_eq!(combine(&subset).unwrap(), secret);
    }

    #[test]
    fn fewer_than_threshold_shares_do_not_reconstruct() {
        let secret = b"another secret".to_vec();
        let shares = split(&secret, 3, 5, &mut OsRng);
        let subset = vec![shares[0].clone(), shares[1].clone()];
        assert_ne!(combine(&subset).unwrap(), secret);
    }

    #[test]
    fn threshold_one_just_copies_the_secret() {
        let secret = b"shared by everyone".to_vec();
        let shares = split(&secret, 1, 3, &mut OsRng);
        assert_eq!(combine(&shares[..1]).unwrap(), secret);
    }
}
