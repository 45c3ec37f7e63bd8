//! Integral forms of rational representations.
//!
//! [`restrict_scalars`] views a representation over `K = Q(a)` as one over
//! `Q` of `deg K` times the dimension. [`integral_lattice`] then grows the
//! standard lattice `Z^n` by the images of its rows under every generator,
//! normalising with the Hermite normal form, until it stops changing. The
//! generators preserve the stable lattice, so in a basis of it they act by
//! integer matrices.

use intw_arith::hnf::hermite_normal_form;
use intw_core::errors::{ErrorInfo, IntwError};
use intw_field::{NfMatrix, NumberField};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::module::Representation;

type RatRows = Vec<Vec<BigRational>>;

fn default_max_iterations() -> usize {
    256
}

/// Options for lattice stabilisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeOpts {
    /// Maximum number of enlargement steps before giving up.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for LatticeOpts {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

/// Stable lattice and the integral representation on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeOutcome {
    /// Rows form a `Z`-basis of the stable lattice inside `Q^n`.
    pub basis: NfMatrix,
    /// The generators expressed in that basis; every entry is an integer.
    pub representation: Representation,
    /// Enlargement steps performed.
    pub iterations: usize,
}

/// Rewrites a representation over a number field as one over `Q`.
///
/// Entry `g[j][l]` becomes the `deg K x deg K` block of multiplication by
/// `g[j][l]` in the power basis, so coordinates of a row vector in `K^n`
/// are ordered `(x_0 coefficients, x_1 coefficients, ...)`.
pub fn restrict_scalars(rep: &Representation) -> Result<Representation, IntwError> {
    let field = rep.field();
    if field.is_rational() {
        return Ok(rep.clone());
    }
    let rationals = NumberField::rationals();
    let d = field.degree();
    let n = rep.dim();
    let size = n * d;
    let mut generators = Vec::with_capacity(rep.generator_count());
    for gen in rep.generators() {
        let mut values = vec![BigRational::zero(); size * size];
        for j in 0..n {
            for l in 0..n {
                let block = field.multiplication_matrix(gen.get(j, l));
                for (r, row) in block.into_iter().enumerate() {
                    for (c, value) in row.into_iter().enumerate() {
                        values[(j * d + r) * size + l * d + c] = value;
                    }
                }
            }
        }
        generators.push(NfMatrix::from_rationals(&rationals, size, size, values)?);
    }
    Representation::new(rep.group().to_string(), rationals, size, generators)
}

/// Finds a lattice in `Q^n` stable under every generator and returns the
/// representation on it.
pub fn integral_lattice(rep: &Representation, opts: &LatticeOpts) -> Result<LatticeOutcome, IntwError> {
    if !rep.field().is_rational() {
        return Err(IntwError::Precondition(
            ErrorInfo::new("lattice-field", "lattice stabilisation needs a representation over Q")
                .with_context("field", rep.field())
                .with_hint("apply restrict_scalars first"),
        ));
    }
    let n = rep.dim();
    let generators = rep
        .generators()
        .iter()
        .map(|g| to_rows(g, n))
        .collect::<Result<Vec<_>, _>>()?;

    let mut lattice = identity_rows(n);
    for iteration in 1..=opts.max_iterations {
        let mut spanning = lattice.clone();
        for g in &generators {
            for row in &lattice {
                spanning.push(row_times(row, g));
            }
        }
        let enlarged = hnf_rows(spanning);
        if enlarged == lattice {
            log::debug!("lattice stable after {iteration} step(s)");
            return finish(rep, &lattice, &generators, iteration);
        }
        log::debug!(
            "lattice step {iteration}: index denominator {}",
            common_denominator(&enlarged)
        );
        lattice = enlarged;
    }
    Err(IntwError::BoundExceeded(
        ErrorInfo::new("lattice-iterations", "lattice did not stabilise within the bound")
            .with_context("max_iterations", opts.max_iterations)
            .with_context("denominator", common_denominator(&lattice))
            .with_hint("generators of infinite order have no stable lattice"),
    ))
}

/// Restriction of scalars followed by lattice stabilisation.
pub fn to_integral(rep: &Representation, opts: &LatticeOpts) -> Result<LatticeOutcome, IntwError> {
    integral_lattice(&restrict_scalars(rep)?, opts)
}

fn finish(
    rep: &Representation,
    lattice: &RatRows,
    generators: &[RatRows],
    iterations: usize,
) -> Result<LatticeOutcome, IntwError> {
    let n = rep.dim();
    let rationals = NumberField::rationals();
    let inverse = invert(lattice)?;
    let mut actions = Vec::with_capacity(generators.len());
    for (idx, g) in generators.iter().enumerate() {
        let conj = mat_mul(&mat_mul(lattice, g), &inverse);
        if let Some(bad) = conj.iter().flatten().find(|v| !v.is_integer()) {
            return Err(IntwError::Arithmetic(
                ErrorInfo::new("lattice-integrality", "stable lattice produced a non-integral action")
                    .with_context("generator", idx)
                    .with_context("entry", bad),
            ));
        }
        actions.push(NfMatrix::from_rationals(
            &rationals,
            n,
            n,
            conj.into_iter().flatten().collect(),
        )?);
    }
    let basis = NfMatrix::from_rationals(&rationals, n, n, lattice.iter().flatten().cloned().collect())?;
    Ok(LatticeOutcome {
        basis,
        representation: Representation::new(rep.group().to_string(), rationals, n, actions)?,
        iterations,
    })
}

fn to_rows(matrix: &NfMatrix, n: usize) -> Result<RatRows, IntwError> {
    let values = matrix.to_rationals().ok_or_else(|| {
        IntwError::precondition("lattice-entries", "generator has irrational entries")
    })?;
    Ok(values.chunks(n.max(1)).map(<[BigRational]>::to_vec).collect())
}

fn identity_rows(n: usize) -> RatRows {
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { BigRational::one() } else { BigRational::zero() })
                .collect()
        })
        .collect()
}

fn row_times(row: &[BigRational], matrix: &RatRows) -> Vec<BigRational> {
    let cols = matrix.first().map(Vec::len).unwrap_or(0);
    (0..cols)
        .map(|c| {
            row.iter()
                .zip(matrix)
                .filter(|(v, _)| !v.is_zero())
                .fold(BigRational::zero(), |acc, (v, m_row)| acc + v * &m_row[c])
        })
        .collect()
}

fn mat_mul(left: &RatRows, right: &RatRows) -> RatRows {
    left.iter().map(|row| row_times(row, right)).collect()
}

fn common_denominator(rows: &RatRows) -> BigInt {
    rows.iter()
        .flatten()
        .fold(BigInt::one(), |acc, v| acc.lcm(v.denom()))
}

// HNF of the Z-span of rational rows, returned as rational rows.
fn hnf_rows(rows: RatRows) -> RatRows {
    let denominator = common_denominator(&rows);
    let scaled: Vec<Vec<BigInt>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| (v * BigRational::from_integer(denominator.clone())).to_integer())
                .collect()
        })
        .collect();
    hermite_normal_form(scaled)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|v| BigRational::new(v, denominator.clone()))
                .collect()
        })
        .collect()
}

// Gauss-Jordan inverse over Q.
fn invert(matrix: &RatRows) -> Result<RatRows, IntwError> {
    let n = matrix.len();
    let mut work: RatRows = matrix
        .iter()
        .zip(identity_rows(n))
        .map(|(row, unit)| row.iter().cloned().chain(unit).collect())
        .collect();
    for col in 0..n {
        let pivot = (col..n).find(|&r| !work[r][col].is_zero()).ok_or_else(|| {
            IntwError::Arithmetic(
                ErrorInfo::new("lattice-singular", "lattice basis is singular").with_context("column", col),
            )
        })?;
        work.swap(col, pivot);
        let inv = work[col][col].recip();
        for value in work[col].iter_mut() {
            *value = &*value * &inv;
        }
        for r in 0..n {
            if r == col || work[r][col].is_zero() {
                continue;
            }
            let factor = work[r][col].clone();
            let pivot_row = work[col].clone();
            for (dst, src) in work[r].iter_mut().zip(pivot_row) {
                *dst -= &factor * src;
            }
        }
    }
    Ok(work.into_iter().map(|row| row[n..].to_vec()).collect())
}
