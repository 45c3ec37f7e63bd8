use intw_field::{commutes_with, NfMatrix, NumberField};
use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;

fn q(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

#[test]
fn gaussian_generator_squares_to_minus_one() {
    let k = NumberField::gaussian();
    let i = k.generator();
    assert_eq!(k.mul(&i, &i), k.from_int(-1));
}

#[test]
fn eisenstein_root_has_order_three() {
    let k = NumberField::eisenstein();
    let z = k.generator();
    let z2 = k.mul(&z, &z);
    assert_eq!(k.mul(&z2, &z), k.one());
    // 1 + z + z^2 = 0
    assert!(k.one().add(&z).add(&z2).is_zero());
}

#[test]
fn rationals_embed_trivially() {
    let k = NumberField::rationals();
    assert_eq!(k.degree(), 1);
    assert!(k.generator().is_zero());
    let half = k.from_rational(q(1, 2));
    assert_eq!(half.as_rational(), Some(&q(1, 2)));
    assert_eq!(k.mul(&half, &half).as_rational(), Some(&q(1, 4)));
}

#[test]
fn field_equality_ignores_name() {
    let a = NumberField::new("A", vec![BigInt::from(1), BigInt::from(0), BigInt::from(1)]).unwrap();
    assert_eq!(a, NumberField::gaussian());
    assert_ne!(a, NumberField::eisenstein());
    assert!(NumberField::new("bad", vec![BigInt::from(1), BigInt::from(2)]).is_err());
    assert!(NumberField::new("bad", vec![BigInt::from(1)]).is_err());
}

#[test]
fn multiplication_matrix_matches_product() {
    let k = NumberField::gaussian();
    let e = k.elem(vec![q(2, 1), q(3, 1)]).unwrap(); // 2 + 3i
    let m = k.multiplication_matrix(&e);
    // row 0 = 1 * e, row 1 = i * e = -3 + 2i
    assert_eq!(m[0], vec![q(2, 1), q(3, 1)]);
    assert_eq!(m[1], vec![q(-3, 1), q(2, 1)]);
}

#[test]
fn matrix_product_and_commutation() {
    let k = NumberField::rationals();
    let swap = NfMatrix::from_ints(&k, 2, 2, &[0, 1, 1, 0]).unwrap();
    let ones = NfMatrix::from_ints(&k, 2, 2, &[1, 1, 1, 1]).unwrap();
    let diag = NfMatrix::from_ints(&k, 2, 2, &[1, 0, 0, 2]).unwrap();
    assert!(commutes_with(&swap, &ones, &swap).unwrap());
    assert!(!commutes_with(&swap, &diag, &swap).unwrap());
    assert_eq!(swap.mul(&swap).unwrap(), NfMatrix::identity(&k, 2));
    assert!(NfMatrix::identity(&k, 3).is_scalar());
    assert!(!diag.is_scalar());
}

#[test]
fn mixed_fields_are_rejected() {
    let a = NfMatrix::identity(&NumberField::rationals(), 2);
    let b = NfMatrix::identity(&NumberField::gaussian(), 2);
    let err = a.mul(&b).unwrap_err();
    assert_eq!(err.info().code, "field-mismatch");
}

#[test]
fn flat_coefficients_round_trip() {
    let k = NumberField::gaussian();
    let coeffs = vec![q(1, 1), q(0, 1), q(0, 1), q(-1, 2)];
    let m = NfMatrix::from_flat_coefficients(&k, 1, 2, coeffs).unwrap();
    assert_eq!(m.get(0, 1).coeffs(), &[q(0, 1), q(-1, 2)]);
    assert_eq!(m.common_denominator(), BigInt::from(2));
    assert!(NfMatrix::from_flat_coefficients(&k, 1, 2, vec![q(1, 1)]).is_err());
}

proptest! {
    #[test]
    fn multiplication_is_commutative(a in -20i64..20, b in -20i64..20, c in -20i64..20, d in 1i64..20) {
        let k = NumberField::eisenstein();
        let x = k.elem(vec![q(a, d), q(b, 1)]).unwrap();
        let y = k.elem(vec![q(c, 1), q(a, 1)]).unwrap();
        prop_assert_eq!(k.mul(&x, &y), k.mul(&y, &x));
    }
}
