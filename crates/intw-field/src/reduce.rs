//! Reduction of number-field data modulo primes that split completely.
//!
//! For a prime `p` at which the defining polynomial `f` is squarefree and
//! splits into linear factors, `Q[x]/(f)` reduces to a product of
//! `deg f` copies of `F_p`, one per root of `f mod p`. Reduction evaluates
//! power-basis coordinates at each root; lifting interpolates back.

use intw_arith::linalg::FpMatrix;
use intw_arith::modular::{add_mod, mul_mod, reduce_bigint, reduce_rational};
use intw_arith::poly::{interpolate, FpPoly};
use intw_core::errors::{ErrorInfo, IntwError};
use intw_core::rng::RngHandle;

use crate::matrix::NfMatrix;
use crate::number_field::{NfElem, NumberField};

/// Residue fields of a number field at a completely split prime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModularContext {
    p: u64,
    degree: usize,
    roots: Vec<u64>,
}

impl ModularContext {
    /// Prepares the reduction of `field` at `p`.
    ///
    /// Returns `Ok(None)` when `f mod p` is not squarefree or does not split
    /// into distinct linear factors; such primes are skipped by callers.
    pub fn new(field: &NumberField, p: u64, rng: &mut RngHandle) -> Result<Option<Self>, IntwError> {
        let coeffs = field.modulus().iter().map(|c| reduce_bigint(c, p)).collect();
        let poly = FpPoly::new(coeffs, p);
        let Some(roots) = poly.split_roots(rng)? else {
            return Ok(None);
        };
        if roots.len() != field.degree() {
            return Ok(None);
        }
        Ok(Some(Self {
            p,
            degree: field.degree(),
            roots,
        }))
    }

    /// The prime.
    pub fn prime(&self) -> u64 {
        self.p
    }

    /// Roots of `f mod p`, one per residue field, ascending.
    pub fn roots(&self) -> &[u64] {
        &self.roots
    }

    /// Number of residue fields.
    pub fn components(&self) -> usize {
        self.roots.len()
    }

    /// Images of `elem` in every residue field.
    ///
    /// Returns `None` when a coefficient denominator vanishes modulo `p`.
    pub fn reduce_elem(&self, elem: &NfElem) -> Option<Vec<u64>> {
        let coeffs = elem
            .coeffs()
            .iter()
            .map(|c| reduce_rational(c, self.p))
            .collect::<Option<Vec<u64>>>()?;
        Some(
            self.roots
                .iter()
                .map(|&root| {
                    coeffs
                        .iter()
                        .rev()
                        .fold(0, |acc, &c| add_mod(mul_mod(acc, root, self.p), c, self.p))
                })
                .collect(),
        )
    }

    /// Images of `matrix` in every residue field, or `None` when a denominator vanishes.
    pub fn reduce_matrix(&self, matrix: &NfMatrix) -> Result<Option<Vec<FpMatrix>>, IntwError> {
        self.check_field(matrix.field())?;
        let mut per_component = vec![Vec::with_capacity(matrix.entries().len()); self.components()];
        for entry in matrix.entries() {
            let Some(images) = self.reduce_elem(entry) else {
                return Ok(None);
            };
            for (component, value) in per_component.iter_mut().zip(images) {
                component.push(value);
            }
        }
        per_component
            .into_iter()
            .map(|data| FpMatrix::from_vec(matrix.rows(), matrix.cols(), data, self.p))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Interpolates one value per residue field back to power-basis coordinates mod `p`.
    pub fn lift(&self, values: &[u64]) -> Result<Vec<u64>, IntwError> {
        interpolate(&self.roots, values, self.p)
    }

    /// Lifts matching matrices (one per residue field) to entry-major coordinates mod `p`.
    ///
    /// The output has `rows * cols * degree` values; entry `(r, c)` occupies
    /// the `degree` consecutive slots starting at `(r * cols + c) * degree`.
    pub fn lift_matrices(&self, images: &[FpMatrix]) -> Result<Vec<u64>, IntwError> {
        if images.len() != self.components() {
            return Err(IntwError::Precondition(
                ErrorInfo::new("lift-components", "one image per residue field is required")
                    .with_context("expected", self.components())
                    .with_context("got", images.len()),
            ));
        }
        let Some(first) = images.first() else {
            return Ok(Vec::new());
        };
        let (rows, cols) = (first.rows(), first.cols());
        if images.iter().any(|m| m.rows() != rows || m.cols() != cols) {
            return Err(IntwError::precondition(
                "lift-shape",
                "residue images differ in shape",
            ));
        }
        let mut out = Vec::with_capacity(rows * cols * self.degree);
        let mut values = vec![0u64; images.len()];
        for idx in 0..rows * cols {
            for (slot, image) in values.iter_mut().zip(images) {
                *slot = image.data()[idx];
            }
            out.extend(self.lift(&values)?);
        }
        Ok(out)
    }

    fn check_field(&self, field: &NumberField) -> Result<(), IntwError> {
        if field.degree() != self.degree {
            return Err(IntwError::Precondition(
                ErrorInfo::new("context-field", "matrix field does not match the reduction context")
                    .with_context("context_degree", self.degree)
                    .with_context("field", field),
            ));
        }
        Ok(())
    }
}
