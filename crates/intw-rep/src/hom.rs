use intw_arith::linalg::FpMatrix;
use intw_core::errors::{ErrorInfo, IntwError};

/// Basis of the equivariant maps between two `F_p` representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpHomBasis {
    /// Pivot columns of the reduced linear system. Primes whose pivots
    /// agree produce bases that lift to the same characteristic-zero vectors.
    pub pivots: Vec<usize>,
    /// Basis matrices of shape `dim(A) x dim(B)`, in canonical order.
    pub basis: Vec<FpMatrix>,
}

/// Engine computing equivariant maps over a prime field.
///
/// Implementations must return the canonical kernel basis (see
/// [`intw_arith::Nullspace`]) so that results for different primes can be
/// combined entry by entry.
///
/// The solver trusts every residue that comes with an accepted pivot
/// signature. A basis that is wrong modulo one prime but carries the right
/// pivots stays in the accumulator for the rest of the run: exact
/// verification keeps it out of the result, and the call ends with
/// `BoundExceeded` once `max_primes` is used up.
pub trait FiniteFieldHomSolver: Send + Sync {
    /// Returns a basis of `{T : a[i] * T == T * b[i] for all i}`.
    fn hom_basis(&self, a: &[FpMatrix], b: &[FpMatrix]) -> Result<FpHomBasis, IntwError>;
}

/// Default engine: solves the linear system `A_i T - T B_i = 0` directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearHomSolver;

impl FiniteFieldHomSolver for LinearHomSolver {
    fn hom_basis(&self, a: &[FpMatrix], b: &[FpMatrix]) -> Result<FpHomBasis, IntwError> {
        if a.len() != b.len() {
            return Err(IntwError::Precondition(
                ErrorInfo::new("generator-count", "generator counts differ")
                    .with_context("a", a.len())
                    .with_context("b", b.len()),
            ));
        }
        let (Some(first_a), Some(first_b)) = (a.first(), b.first()) else {
            return Err(IntwError::precondition(
                "no-generators",
                "finite-field solver needs at least one generator pair",
            ));
        };
        let n = first_a.rows();
        let m = first_b.rows();
        let p = first_a.modulus();
        let unknowns = n * m;
        let mut system = FpMatrix::zeros(a.len() * unknowns, unknowns, p);
        for (g, (ga, gb)) in a.iter().zip(b).enumerate() {
            if ga.rows() != n || ga.cols() != n || gb.rows() != m || gb.cols() != m {
                return Err(IntwError::Precondition(
                    ErrorInfo::new("generator-shape", "generator images have inconsistent shapes")
                        .with_context("generator", g),
                ));
            }
            // Equation (r, c): sum_k A[r,k] T[k,c] - sum_k T[r,k] B[k,c] = 0.
            for r in 0..n {
                for c in 0..m {
                    let eq = g * unknowns + r * m + c;
                    for k in 0..n {
                        let unknown = k * m + c;
                        let value = system.get(eq, unknown);
                        system.set(eq, unknown, value + ga.get(r, k));
                    }
                    for k in 0..m {
                        let unknown = r * m + k;
                        let value = system.get(eq, unknown);
                        system.set(eq, unknown, value + (p - gb.get(k, c)));
                    }
                }
            }
        }
        let kernel = system.nullspace();
        let basis = kernel
            .basis
            .into_iter()
            .map(|v| FpMatrix::from_vec(n, m, v, p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FpHomBasis {
            pivots: kernel.pivots,
            basis,
        })
    }
}
