use intw_field::{NfMatrix, NumberField};
use intw_rep::{
    from_json_slice, hom_basis, integral_lattice, stable_hash_string, to_canonical_json_bytes,
    HomBasisReport, LatticeOpts, LatticeReport, Representation, RepresentationData, SolverOpts,
};
use num_bigint::BigInt;
use num_rational::BigRational;
use serde_json::json;

fn twisted() -> Representation {
    let k = NumberField::rationals();
    let q = |n: i64, d: i64| BigRational::new(BigInt::from(n), BigInt::from(d));
    let g = NfMatrix::from_rationals(&k, 2, 2, vec![q(1, 2), q(3, 4), q(1, 1), q(-1, 2)]).unwrap();
    Representation::new("C2", k, 2, vec![g]).unwrap()
}

fn report(opts: &SolverOpts) -> HomBasisReport {
    let a = twisted();
    let outcome = hom_basis(&a, &a, opts).unwrap();
    HomBasisReport::new(&a, &a, opts, &outcome).unwrap()
}

#[test]
fn hom_basis_report_is_reproducible() {
    let opts = SolverOpts::default();
    let first = report(&opts);
    let second = report(&opts);
    assert_eq!(first, second);
    assert_eq!(
        to_canonical_json_bytes(&first).unwrap(),
        to_canonical_json_bytes(&second).unwrap()
    );
    assert_eq!(first.basis.len(), 2);
    assert_eq!(first.basis_hash.len(), 64);
}

#[test]
fn seed_changes_provenance_but_not_the_basis() {
    let base = report(&SolverOpts::default());
    let reseeded = report(&SolverOpts {
        seed: 99,
        ..SolverOpts::default()
    });
    assert_eq!(base.basis_hash, reseeded.basis_hash);
    assert_ne!(base.provenance.input_hash, reseeded.provenance.input_hash);
    assert_eq!(reseeded.provenance.seed, 99);
}

#[test]
fn reports_survive_json() {
    let hom = report(&SolverOpts::default());
    let bytes = to_canonical_json_bytes(&hom).unwrap();
    let restored: HomBasisReport = from_json_slice(&bytes).unwrap();
    assert_eq!(restored, hom);

    let rep = twisted();
    let opts = LatticeOpts::default();
    let outcome = integral_lattice(&rep, &opts).unwrap();
    let lattice = LatticeReport::new(&rep, &opts, &outcome).unwrap();
    let restored: LatticeReport =
        from_json_slice(&to_canonical_json_bytes(&lattice).unwrap()).unwrap();
    assert_eq!(restored, lattice);
    assert_eq!(
        restored.representation.to_representation().unwrap(),
        outcome.representation
    );
}

#[test]
fn representation_data_round_trips() {
    let rep = twisted();
    let data = RepresentationData::from_representation(&rep);
    assert_eq!(data.generators[0].entries[0][0], "1/2");
    let bytes = to_canonical_json_bytes(&data).unwrap();
    let restored: RepresentationData = from_json_slice(&bytes).unwrap();
    assert_eq!(restored.to_representation().unwrap(), rep);
}

#[test]
fn stable_hash_ignores_key_order() {
    let left = json!({"b": 1, "a": {"y": [1, 2], "x": null}});
    let right = json!({"a": {"x": null, "y": [1, 2]}, "b": 1});
    assert_eq!(stable_hash_string(&left).unwrap(), stable_hash_string(&right).unwrap());
    assert_eq!(stable_hash_string(&left).unwrap().len(), 64);
}

#[test]
fn canonical_bytes_are_compact_and_sorted() {
    let value = json!({"zeta": [{"b": 2, "a": 1}], "alpha": "x"});
    let bytes = to_canonical_json_bytes(&value).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"alpha":"x","zeta":[{"a":1,"b":2}]}"#
    );
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = from_json_slice::<HomBasisReport>(b"{\"basis\": 3}").unwrap_err();
    assert_eq!(err.info().code, "json-read");
    assert_eq!(err.info().context["line"], "1");
}
