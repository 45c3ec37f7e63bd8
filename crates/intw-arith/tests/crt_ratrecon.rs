use intw_arith::{crt_combine, crt_combine_slices, rational_reconstruction, reconstruction_bound};
use intw_core::IntwError;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use proptest::prelude::*;

fn big(v: i64) -> BigInt {
    BigInt::from(v)
}

#[test]
fn consistent_residues_combine() {
    let combined = crt_combine(&big(3), &big(5), &big(3), &big(7)).expect("crt");
    assert_eq!(combined, big(3));
}

#[test]
fn inconsistent_residues_still_produce_a_residue() {
    // 3 mod 5 and 4 mod 7 is 18 mod 35; only verification can tell it is wrong.
    let combined = crt_combine(&big(3), &big(5), &big(4), &big(7)).expect("crt");
    assert_eq!(combined, big(18));
}

#[test]
fn non_coprime_moduli_are_rejected() {
    let err = crt_combine(&big(1), &big(6), &big(1), &big(9)).unwrap_err();
    assert!(matches!(err, IntwError::Precondition(_)));
    assert_eq!(err.info().code, "crt-coprime");
}

#[test]
fn slices_combine_entrywise() {
    let out = crt_combine_slices(&[big(1), big(2)], &big(3), &[big(0), big(4)], &big(5))
        .expect("slices");
    assert_eq!(out, vec![big(10), big(14)]);
    assert!(crt_combine_slices(&[big(1)], &big(3), &[], &big(5)).is_err());
}

#[test]
fn reconstructs_small_fractions() {
    let modulus = big(127 * 131);
    let truth = BigRational::new(big(-3), big(7));
    let inv7 = big(7).extended_gcd(&modulus).x.mod_floor(&modulus);
    let residue = (big(-3) * inv7).mod_floor(&modulus);
    assert_eq!(rational_reconstruction(&residue, &modulus), Some(truth));
}

#[test]
fn fails_below_precision() {
    // 1/1000 needs a modulus above 2 * 1000^2.
    let modulus = big(131);
    let inv = big(1000).extended_gcd(&modulus).x.mod_floor(&modulus);
    let recon = rational_reconstruction(&inv, &modulus);
    assert_ne!(recon, Some(BigRational::new(big(1), big(1000))));
    assert_eq!(reconstruction_bound(&big(131)), big(8));
}

proptest! {
    #[test]
    fn crt_matches_both_residues(a in 0i64..1000, b in 0i64..1000) {
        let (m, n) = (big(1009), big(1013));
        let c = crt_combine(&big(a), &m, &big(b), &n).unwrap();
        prop_assert_eq!(c.mod_floor(&m), big(a));
        prop_assert_eq!(c.mod_floor(&n), big(b));
        prop_assert!(c < &m * &n);
    }

    #[test]
    fn reconstruction_recovers_bounded_rationals(num in -500i64..500, den in 1i64..500) {
        let modulus = big(1_000_003) * big(1_000_033);
        let truth = BigRational::new(big(num), big(den));
        let inv = truth.denom().extended_gcd(&modulus).x.mod_floor(&modulus);
        let residue = (truth.numer() * inv).mod_floor(&modulus);
        prop_assert_eq!(rational_reconstruction(&residue, &modulus), Some(truth));
    }
}
