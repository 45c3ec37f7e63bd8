//! Chinese remainder combination over arbitrary precision integers.

use intw_core::errors::{ErrorInfo, IntwError};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed};

/// Combines `a mod m` and `b mod n` into the residue modulo `m * n`.
///
/// The moduli must be positive and coprime. The result lies in `[0, m * n)`.
pub fn crt_combine(a: &BigInt, m: &BigInt, b: &BigInt, n: &BigInt) -> Result<BigInt, IntwError> {
    if !m.is_positive() || !n.is_positive() {
        return Err(IntwError::Precondition(
            ErrorInfo::new("crt-modulus", "CRT moduli must be positive")
                .with_context("m", m)
                .with_context("n", n),
        ));
    }
    let ext = m.extended_gcd(n);
    if !ext.gcd.is_one() {
        return Err(IntwError::Precondition(
            ErrorInfo::new("crt-coprime", "CRT moduli must be coprime")
                .with_context("m", m)
                .with_context("n", n)
                .with_context("gcd", &ext.gcd),
        ));
    }
    let mn = m * n;
    // ext.x * m == 1 (mod n), so a + m * x * (b - a) lifts both residues.
    let delta = (b - a).mod_floor(n);
    let step = (&ext.x * &delta).mod_floor(n);
    let combined = (a + m * step).mod_floor(&mn);
    Ok(combined)
}

/// Entry-wise CRT of two residue vectors sharing the moduli `m` and `n`.
pub fn crt_combine_slices(
    left: &[BigInt],
    m: &BigInt,
    right: &[BigInt],
    n: &BigInt,
) -> Result<Vec<BigInt>, IntwError> {
    if left.len() != right.len() {
        return Err(IntwError::Precondition(
            ErrorInfo::new("crt-length", "residue vectors differ in length")
                .with_context("left", left.len())
                .with_context("right", right.len()),
        ));
    }
    left.iter()
        .zip(right)
        .map(|(a, b)| crt_combine(a, m, b, n))
        .collect()
}
