//! Rational reconstruction (Wang's algorithm).

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Returns the numerator/denominator bound `floor(sqrt((N - 1) / 2))` used for modulus `N`.
pub fn reconstruction_bound(modulus: &BigInt) -> BigInt {
    if modulus <= &BigInt::one() {
        return BigInt::zero();
    }
    ((modulus - BigInt::one()) / BigInt::from(2)).sqrt()
}

/// Recovers `r / s` from `value mod modulus`.
///
/// Succeeds when there are `|r|, s <= reconstruction_bound(modulus)` with
/// `gcd(s, modulus) = 1` and `r = value * s (mod modulus)`. Such a fraction
/// is unique, so a reconstruction that succeeds at two different precisions
/// with the same result is very likely the true value; the solver still
/// verifies every candidate exactly.
pub fn rational_reconstruction(value: &BigInt, modulus: &BigInt) -> Option<BigRational> {
    if !modulus.is_positive() {
        return None;
    }
    let bound = reconstruction_bound(modulus);
    let a = value.mod_floor(modulus);
    if a <= bound {
        return Some(BigRational::from_integer(a));
    }

    let (mut r0, mut r1) = (modulus.clone(), a);
    let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());
    while r1 > bound {
        let q = &r0 / &r1;
        let r2 = &r0 - &q * &r1;
        let t2 = &t0 - &q * &t1;
        r0 = std::mem::replace(&mut r1, r2);
        t0 = std::mem::replace(&mut t1, t2);
    }

    if t1.is_zero() || t1.abs() > bound {
        return None;
    }
    if !t1.gcd(modulus).is_one() || !r1.gcd(&t1).is_one() {
        return None;
    }
    Some(BigRational::new(r1, t1))
}
