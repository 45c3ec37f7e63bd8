use intw_arith::{interpolate, FpPoly};
use intw_core::rng::RngHandle;

#[test]
fn splits_product_of_linear_factors() {
    let p = 131;
    // (x - 2)(x - 5)(x - 100)
    let f = FpPoly::linear(p - 2, p)
        .mul(&FpPoly::linear(p - 5, p))
        .mul(&FpPoly::linear(p - 100, p));
    let mut rng = RngHandle::from_seed(3);
    let roots = f.split_roots(&mut rng).unwrap();
    assert_eq!(roots, Some(vec![2, 5, 100]));
}

#[test]
fn roots_do_not_depend_on_seed() {
    let p = 1009;
    let f = FpPoly::new(vec![p - 2, 0, 1], p); // x^2 - 2, 2 is a square mod 1009
    let a = f.split_roots(&mut RngHandle::from_seed(1)).unwrap();
    let b = f.split_roots(&mut RngHandle::from_seed(2)).unwrap();
    assert_eq!(a, b);
    let roots = a.expect("splits");
    for r in roots {
        assert_eq!(f.eval(r), 0);
    }
}

#[test]
fn rejects_inert_and_ramified() {
    let mut rng = RngHandle::from_seed(0);
    // x^2 + 1 is irreducible mod 131 (131 = 3 mod 4).
    let inert = FpPoly::new(vec![1, 0, 1], 131);
    assert_eq!(inert.split_roots(&mut rng).unwrap(), None);
    // (x - 1)^2 is not squarefree.
    let ramified = FpPoly::new(vec![1, 129, 1], 131);
    assert_eq!(ramified.split_roots(&mut rng).unwrap(), None);
}

#[test]
fn linear_field_polynomial_has_root_zero() {
    let mut rng = RngHandle::from_seed(0);
    let x = FpPoly::linear(0, 137);
    assert_eq!(x.split_roots(&mut rng).unwrap(), Some(vec![0]));
}

#[test]
fn division_and_gcd() {
    let p = 17;
    let a = FpPoly::new(vec![1, 0, 1], p); // x^2 + 1
    let b = FpPoly::linear(4, p); // x + 4, and 4^2 + 1 = 17
    let (q, r) = a.div_rem(&b).unwrap();
    assert!(r.is_zero());
    assert_eq!(q.mul(&b), a);
    assert_eq!(a.gcd(&b).unwrap(), b);
    assert!(a.div_rem(&FpPoly::zero(p)).is_err());
}

#[test]
fn interpolation_hits_values() {
    let p = 101;
    let points = [3, 7, 50];
    let values = [10, 0, 99];
    let coeffs = interpolate(&points, &values, p).unwrap();
    let poly = FpPoly::new(coeffs.clone(), p);
    assert_eq!(coeffs.len(), 3);
    for (x, v) in points.iter().zip(values) {
        assert_eq!(poly.eval(*x), v);
    }
    assert!(interpolate(&[1, 1], &[2, 3], p).is_err());
}
