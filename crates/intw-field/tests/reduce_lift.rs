use intw_core::rng::RngHandle;
use intw_field::{FieldData, MatrixData, ModularContext, NfMatrix, NumberField};
use num_bigint::BigInt;
use num_rational::BigRational;

fn q(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

#[test]
fn gaussian_splits_only_at_one_mod_four() {
    let k = NumberField::gaussian();
    let mut rng = RngHandle::from_seed(0);
    assert!(ModularContext::new(&k, 131, &mut rng).unwrap().is_none());
    let ctx = ModularContext::new(&k, 137, &mut rng).unwrap().expect("137 = 1 mod 4");
    assert_eq!(ctx.components(), 2);
    for &r in ctx.roots() {
        assert_eq!((r * r + 1) % 137, 0);
    }
}

#[test]
fn reduce_then_lift_recovers_coordinates() {
    let k = NumberField::gaussian();
    let mut rng = RngHandle::from_seed(5);
    let ctx = ModularContext::new(&k, 137, &mut rng).unwrap().unwrap();
    let elem = k.elem(vec![q(3, 1), q(-2, 1)]).unwrap();
    let images = ctx.reduce_elem(&elem).unwrap();
    assert_eq!(ctx.lift(&images).unwrap(), vec![3, 135]);
}

#[test]
fn vanishing_denominator_is_detected() {
    let k = NumberField::rationals();
    let mut rng = RngHandle::from_seed(0);
    let ctx = ModularContext::new(&k, 131, &mut rng).unwrap().unwrap();
    let m = NfMatrix::from_rationals(&k, 1, 1, vec![q(1, 131)]).unwrap();
    assert!(ctx.reduce_matrix(&m).unwrap().is_none());
    let ok = NfMatrix::from_rationals(&k, 1, 1, vec![q(1, 2)]).unwrap();
    let images = ctx.reduce_matrix(&ok).unwrap().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].get(0, 0), 66);
}

#[test]
fn lift_matrices_is_entry_major() {
    let k = NumberField::gaussian();
    let mut rng = RngHandle::from_seed(9);
    let ctx = ModularContext::new(&k, 137, &mut rng).unwrap().unwrap();
    let i = k.generator();
    let m = NfMatrix::from_entries(&k, 1, 2, vec![k.one(), i]).unwrap();
    let images = ctx.reduce_matrix(&m).unwrap().unwrap();
    assert_eq!(ctx.lift_matrices(&images).unwrap(), vec![1, 0, 0, 1]);
    assert!(ctx.lift_matrices(&images[..1]).is_err());
}

#[test]
fn data_round_trip_through_json() {
    let k = NumberField::eisenstein();
    let z = k.generator();
    let m = NfMatrix::from_entries(&k, 1, 2, vec![z, k.from_rational(q(-2, 3))]).unwrap();
    let data = MatrixData::from_matrix(&m);
    assert_eq!(data.entries[1], vec!["-2/3".to_string()]);
    let json = serde_json::to_string(&data).unwrap();
    let back: MatrixData = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_matrix(&k).unwrap(), m);

    let field_data = FieldData::from_field(&k);
    assert_eq!(field_data.modulus, vec!["1", "1", "1"]);
    assert_eq!(field_data.to_field().unwrap(), k);
}

#[test]
fn malformed_numbers_are_serde_errors() {
    let data = MatrixData {
        rows: 1,
        cols: 1,
        entries: vec![vec!["one".to_string()]],
    };
    let err = data.to_matrix(&NumberField::rationals()).unwrap_err();
    assert_eq!(err.info().code, "rational-parse");
}
