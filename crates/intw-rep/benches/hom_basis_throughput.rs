use criterion::{criterion_group, criterion_main, Criterion};
use intw_field::{NfMatrix, NumberField};
use intw_rep::{hom_basis, Representation, SolverOpts, VerificationPolicy};

/// Dihedral group acting on the vertices of an `n`-gon.
fn dihedral(field: &NumberField, n: usize) -> Representation {
    let mut rotation = vec![0; n * n];
    let mut reflection = vec![0; n * n];
    for i in 0..n {
        rotation[i * n + (i + 1) % n] = 1;
        reflection[i * n + (n - i) % n] = 1;
    }
    let generators = vec![
        NfMatrix::from_ints(field, n, n, &rotation).expect("rotation"),
        NfMatrix::from_ints(field, n, n, &reflection).expect("reflection"),
    ];
    Representation::new(format!("D{n}"), field.clone(), n, generators).expect("dihedral")
}

fn bench_hom_basis(c: &mut Criterion) {
    let rationals = dihedral(&NumberField::rationals(), 6);
    let gaussian = dihedral(&NumberField::gaussian(), 6);
    c.bench_function("hom_basis_d6_rationals", |b| {
        b.iter(|| {
            let _ = hom_basis(&rationals, &rationals, &SolverOpts::default()).expect("basis");
        });
    });
    c.bench_function("hom_basis_d6_gaussian", |b| {
        b.iter(|| {
            let _ = hom_basis(&gaussian, &gaussian, &SolverOpts::default()).expect("basis");
        });
    });
    c.bench_function("hom_basis_d6_drop_all", |b| {
        let opts = SolverOpts {
            verification: VerificationPolicy::DropAll,
            ..SolverOpts::default()
        };
        b.iter(|| {
            let _ = hom_basis(&rationals, &rationals, &opts).expect("basis");
        });
    });
}

criterion_group!(benches, bench_hom_basis);
criterion_main!(benches);
