use intw_arith::FpMatrix;
use intw_core::IntwError;
use intw_field::{NfMatrix, NumberField};
use intw_rep::{
    hom_basis, hom_basis_with, FiniteFieldHomSolver, FpHomBasis, LinearHomSolver,
    Representation, SolverOpts, VerificationPolicy,
};
use num_bigint::BigInt;
use num_rational::BigRational;

const POLICIES: [VerificationPolicy; 2] = [VerificationPolicy::RetryFailing, VerificationPolicy::DropAll];

fn with_policy(verification: VerificationPolicy) -> SolverOpts {
    SolverOpts {
        verification,
        ..SolverOpts::default()
    }
}

fn single(field: &NumberField, dim: usize, generator: NfMatrix) -> Representation {
    Representation::new("C", field.clone(), dim, vec![generator]).unwrap()
}

#[test]
fn rank_drop_at_first_prime_triggers_a_restart() {
    // 132 = 1 mod 131, so the first prime sees two copies of the trivial character.
    let k = NumberField::rationals();
    let a = single(&k, 1, NfMatrix::identity(&k, 1));
    let b = single(&k, 2, NfMatrix::from_ints(&k, 2, 2, &[1, 0, 0, 132]).unwrap());
    for policy in POLICIES {
        let outcome = hom_basis(&a, &b, &with_policy(policy)).unwrap();
        assert_eq!(outcome.basis, vec![NfMatrix::from_ints(&k, 1, 2, &[1, 0]).unwrap()]);
        assert_eq!(outcome.stats.restarts, 1);
        assert_eq!(outcome.stats.primes_used, 2);
        assert_eq!(outcome.stats.last_prime, 139);
    }
}

#[test]
fn residue_fields_disagreeing_skip_the_prime() {
    // -11 + 4i has norm 137, so b - 1 vanishes at exactly one root of x^2 + 1 mod 137.
    let k = NumberField::gaussian();
    let q = |n: i64| BigRational::from_integer(BigInt::from(n));
    let b_entry = k.elem(vec![q(-10), q(4)]).unwrap();
    let a = single(&k, 1, NfMatrix::identity(&k, 1));
    let b = single(&k, 1, NfMatrix::from_entries(&k, 1, 1, vec![b_entry]).unwrap());
    let outcome = hom_basis(&a, &b, &SolverOpts::default()).unwrap();
    assert!(outcome.basis.is_empty());
    // 131 and 139 are inert, 137 disagrees, 149 proves the kernel empty.
    assert_eq!(outcome.stats.primes_skipped, 3);
    assert_eq!(outcome.stats.last_prime, 149);
    assert_eq!(outcome.stats.primes_used, 1);
}

/// Returns a basis with one shifted entry modulo `prime`, pivots untouched.
struct ShiftedEntrySolver {
    prime: u64,
}

impl FiniteFieldHomSolver for ShiftedEntrySolver {
    fn hom_basis(&self, a: &[FpMatrix], b: &[FpMatrix]) -> Result<FpHomBasis, IntwError> {
        let mut solved = LinearHomSolver.hom_basis(a, b)?;
        if let Some(first) = solved.basis.first_mut() {
            if first.modulus() == self.prime {
                let value = first.get(0, 1);
                first.set(0, 1, value + 1);
            }
        }
        Ok(solved)
    }
}

#[test]
fn inconsistent_residue_is_never_returned() {
    let k = NumberField::rationals();
    let generators = vec![
        NfMatrix::from_ints(&k, 2, 2, &[0, 1, 1, 0]).unwrap(),
        NfMatrix::from_ints(&k, 2, 2, &[0, -1, 1, -1]).unwrap(),
    ];
    let s3 = Representation::new("S3", k, 2, generators).unwrap();
    let engine = ShiftedEntrySolver { prime: 137 };
    for policy in POLICIES {
        let opts = SolverOpts {
            max_primes: 40,
            ..with_policy(policy)
        };
        match hom_basis_with(&s3, &s3, &opts, &engine) {
            Err(IntwError::BoundExceeded(info)) => {
                assert_eq!(info.code, "max-primes");
                assert_eq!(info.context.get("active_candidates").map(String::as_str), Some("1"));
                let failed: usize = info.context["failed_checks"].parse().unwrap();
                assert!(failed > 0, "wrong reconstructions must reach verification");
            }
            other => panic!("unexpected {other:?}"),
        }
        // The same input with a sound engine settles after two primes.
        let sound = hom_basis(&s3, &s3, &opts).unwrap();
        assert_eq!(sound.stats.primes_used, 2);
    }
}
