//! GF(2^8) arithmetic over the AES reduction polynomial (x^8 + x^4 +
//! x^3 + x + 1, 0x11D), the field Shamir secret sharing is done in.

const POLY: u16 = 0x11D;

fn build_tables() -> ([u8; 256], [u8; 255]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 255];
    let mut x: u16 = 1;
    for i in 0..255usize {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= POLY;
        }
    }
    exp[255] = exp[0];
    (exp, log)
}

struct Tables {
    exp: [u8; 256],
    log: [u8; 255],
}

thread_local! {
    static TABLES: Tables = {
        let (exp, log) = build_tables();
        Tables { exp, log }
    };
}

pub fn add(a: u8, b: u8) -> u8 { a ^ b }

pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    TABLES.with(|t| {
        let sum = t.log[a as usize] as u16 + t.log[b as usize] as u16;
        t.exp[(sum % 255) as usize]
    })
}

pub fn inv(a: u8) -> u8 {
    assert!(a != 0, "zero has no multiplicative inverse in GF(256)");
    TABLES.with(|t| {
        let l = t.log[a as usize] as u16;
        t.exp[((255 - l) % 255) as usize]
    })
}

pub fn div(a: u8, b: u8) -> u8 { mul(a, inv(b)) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication_and_division_are_inverses() {
        for a in 1..=255u8 {
            for b in [1u8, 2, 7, 200, 255] {
                assert_eq!(div(mul(a, b), b), a);
            }
        }
    }

    #[test]
    fn zero_absorbs_multiplication() {
        assert_eq!(mul(0, 200), 0);
        assert_eq!(mul(200, 0), 0);
    }
}
