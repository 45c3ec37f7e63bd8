use intw_arith::modular::{neg_mod, symmetric};
use intw_arith::{
    add_mod, inv_mod, is_prime, mul_mod, next_prime, pow_mod, reduce_bigint, reduce_rational,
    sub_mod, PrimeLadder,
};
use num_bigint::BigInt;
use num_rational::BigRational;

#[test]
fn primality_agrees_with_trial_division() {
    let naive = |n: u64| n >= 2 && (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0);
    for n in 0..2000u64 {
        assert_eq!(is_prime(n), naive(n), "n = {n}");
    }
    assert!(is_prime(1_000_000_007));
    assert!(!is_prime(3_215_031_751));
}

#[test]
fn next_prime_is_strict() {
    assert_eq!(next_prime(127).unwrap(), 131);
    assert_eq!(next_prime(126).unwrap(), 127);
    assert_eq!(next_prime(1).unwrap(), 2);
    assert!(next_prime(u64::MAX).is_err());
}

#[test]
fn ladder_counts_visits_and_skips() {
    let mut ladder = PrimeLadder::new(127);
    assert_eq!(ladder.advance().unwrap(), 131);
    assert_eq!(ladder.advance().unwrap(), 137);
    ladder.skip();
    assert_eq!(ladder.current(), 137);
    assert_eq!(ladder.visited(), 2);
    assert_eq!(ladder.skipped(), 1);
}

#[test]
fn word_arithmetic() {
    let p = 131;
    assert_eq!(add_mod(130, 5, p), 4);
    assert_eq!(sub_mod(3, 5, p), 129);
    assert_eq!(mul_mod(130, 130, p), 1);
    assert_eq!(neg_mod(0, p), 0);
    assert_eq!(pow_mod(2, 130, p), 1);
    assert_eq!(mul_mod(inv_mod(17, p).unwrap(), 17, p), 1);
    assert_eq!(inv_mod(0, p), None);
    assert_eq!(inv_mod(6, 9), None);
}

#[test]
fn reduction_of_integers_and_rationals() {
    assert_eq!(reduce_bigint(&BigInt::from(-1), 7), 6);
    let half = BigRational::new(BigInt::from(1), BigInt::from(2));
    assert_eq!(reduce_rational(&half, 7), Some(4));
    let seventh = BigRational::new(BigInt::from(1), BigInt::from(7));
    assert_eq!(reduce_rational(&seventh, 7), None);
    assert_eq!(symmetric(6, 7), BigInt::from(-1));
    assert_eq!(symmetric(3, 7), BigInt::from(3));
}
