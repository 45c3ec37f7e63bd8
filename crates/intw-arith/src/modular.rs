//! Word-sized arithmetic in `Z/pZ`.
//!
//! Every function expects operands already reduced into `[0, p)` and a
//! modulus below `2^63`; products go through `u128`.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::ToPrimitive;

/// Returns `(a + b) mod p`.
pub fn add_mod(a: u64, b: u64, p: u64) -> u64 {
    let sum = a + b;
    if sum >= p {
        sum - p
    } else {
        sum
    }
}

/// Returns `(a - b) mod p`.
pub fn sub_mod(a: u64, b: u64, p: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        p - (b - a)
    }
}

/// Returns `(a * b) mod p`.
pub fn mul_mod(a: u64, b: u64, p: u64) -> u64 {
    ((a as u128 * b as u128) % p as u128) as u64
}

/// Returns `-a mod p`.
pub fn neg_mod(a: u64, p: u64) -> u64 {
    if a == 0 {
        0
    } else {
        p - a
    }
}

/// Returns `base^exp mod p` by square and multiply.
pub fn pow_mod(base: u64, mut exp: u64, p: u64) -> u64 {
    if p == 1 {
        return 0;
    }
    let mut result = 1u64;
    let mut base = base % p;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, p);
        }
        base = mul_mod(base, base, p);
        exp >>= 1;
    }
    result
}

/// Returns the inverse of `a` modulo `p`, or `None` when `gcd(a, p) != 1`.
pub fn inv_mod(a: u64, p: u64) -> Option<u64> {
    let (mut old_r, mut r) = (a as i128 % p as i128, p as i128);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(p as i128) as u64)
}

/// Returns the non-negative residue of `value` modulo `p`.
pub fn reduce_bigint(value: &BigInt, p: u64) -> u64 {
    let modulus = BigInt::from(p);
    let residue = value.mod_floor(&modulus);
    // mod_floor with a positive modulus lands in [0, p).
    residue.to_u64().unwrap_or(0)
}

/// Reduces a rational number modulo `p`.
///
/// Returns `None` when the denominator vanishes modulo `p`; callers treat
/// such a prime as degenerate and skip it.
pub fn reduce_rational(value: &BigRational, p: u64) -> Option<u64> {
    let numer = reduce_bigint(value.numer(), p);
    let denom = reduce_bigint(value.denom(), p);
    let inv = inv_mod(denom, p)?;
    Some(mul_mod(numer, inv, p))
}

/// Maps a residue in `[0, p)` to its symmetric representative in `(-p/2, p/2]`.
pub fn symmetric(value: u64, p: u64) -> BigInt {
    if value > p / 2 {
        BigInt::from_biguint(Sign::Minus, (p - value).into())
    } else {
        BigInt::from(value)
    }
}
