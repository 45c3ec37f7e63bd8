//! Dense linear algebra over `F_p`.

use intw_core::errors::{ErrorInfo, IntwError};
use serde::{Deserialize, Serialize};

use crate::modular::{add_mod, inv_mod, mul_mod, neg_mod, sub_mod};

fn shape_error(code: &str, message: &str, left: (usize, usize), right: (usize, usize)) -> IntwError {
    IntwError::Precondition(
        ErrorInfo::new(code, message)
            .with_context("left", format!("{}x{}", left.0, left.1))
            .with_context("right", format!("{}x{}", right.0, right.1)),
    )
}

/// Row-major dense matrix with entries in `[0, p)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FpMatrix {
    rows: usize,
    cols: usize,
    p: u64,
    data: Vec<u64>,
}

/// Canonical kernel basis of a matrix.
///
/// `basis` holds one vector per non-pivot column `f` (ascending), with a one
/// at `f` and zeros at every other non-pivot column. Any field containing the
/// entries produces the same vectors from the same reduced row echelon form,
/// so bases computed modulo different good primes describe the same
/// characteristic-zero vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nullspace {
    /// Pivot columns of the reduced row echelon form.
    pub pivots: Vec<usize>,
    /// Kernel vectors, each of length `cols`.
    pub basis: Vec<Vec<u64>>,
}

impl FpMatrix {
    /// Zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize, p: u64) -> Self {
        Self {
            rows,
            cols,
            p,
            data: vec![0; rows * cols],
        }
    }

    /// Identity matrix of size `n`.
    pub fn identity(n: usize, p: u64) -> Self {
        let mut out = Self::zeros(n, n, p);
        for i in 0..n {
            out.data[i * n + i] = 1 % p;
        }
        out
    }

    /// Builds a matrix from row-major data, reducing entries modulo `p`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<u64>, p: u64) -> Result<Self, IntwError> {
        if data.len() != rows * cols {
            return Err(IntwError::Precondition(
                ErrorInfo::new("matrix-data", "data length does not match shape")
                    .with_context("rows", rows)
                    .with_context("cols", cols)
                    .with_context("len", data.len()),
            ));
        }
        Ok(Self {
            rows,
            cols,
            p,
            data: data.into_iter().map(|v| v % p).collect(),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The prime modulus.
    pub fn modulus(&self) -> u64 {
        self.p
    }

    /// Row-major entries.
    pub fn data(&self) -> &[u64] {
        &self.data
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.data[row * self.cols + col]
    }

    /// Overwrites entry `(row, col)` with `value mod p`.
    pub fn set(&mut self, row: usize, col: usize, value: u64) {
        self.data[row * self.cols + col] = value % self.p;
    }

    /// Whether every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Self) -> Result<Self, IntwError> {
        if self.cols != other.rows || self.p != other.p {
            return Err(shape_error(
                "matmul-shape",
                "incompatible matrices for product",
                (self.rows, self.cols),
                (other.rows, other.cols),
            ));
        }
        let p = self.p;
        let mut out = Self::zeros(self.rows, other.cols, p);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a == 0 {
                    continue;
                }
                for j in 0..other.cols {
                    let idx = i * other.cols + j;
                    out.data[idx] = add_mod(out.data[idx], mul_mod(a, other.get(k, j), p), p);
                }
            }
        }
        Ok(out)
    }

    /// Entry-wise difference.
    pub fn sub(&self, other: &Self) -> Result<Self, IntwError> {
        if self.rows != other.rows || self.cols != other.cols || self.p != other.p {
            return Err(shape_error(
                "sub-shape",
                "incompatible matrices for difference",
                (self.rows, self.cols),
                (other.rows, other.cols),
            ));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| sub_mod(a, b, self.p))
            .collect();
        Ok(Self { data, ..self.clone() })
    }

    /// Adds `scale * other` into `self` in place.
    pub fn add_scaled(&mut self, other: &Self, scale: u64) -> Result<(), IntwError> {
        if self.rows != other.rows || self.cols != other.cols || self.p != other.p {
            return Err(shape_error(
                "add-shape",
                "incompatible matrices for sum",
                (self.rows, self.cols),
                (other.rows, other.cols),
            ));
        }
        let p = self.p;
        for (dst, &src) in self.data.iter_mut().zip(&other.data) {
            *dst = add_mod(*dst, mul_mod(src, scale % p, p), p);
        }
        Ok(())
    }

    /// Reduces the matrix in place to reduced row echelon form and returns the pivot columns.
    pub fn rref(&mut self) -> Vec<usize> {
        let p = self.p;
        let mut pivots = Vec::new();
        let mut row = 0;
        for col in 0..self.cols {
            if row == self.rows {
                break;
            }
            let Some(found) = (row..self.rows).find(|&r| self.get(r, col) != 0) else {
                continue;
            };
            if found != row {
                for c in 0..self.cols {
                    self.data.swap(found * self.cols + c, row * self.cols + c);
                }
            }
            // Non-zero entries are units because p is prime.
            let inv = inv_mod(self.get(row, col), p).unwrap_or(0);
            for c in col..self.cols {
                let idx = row * self.cols + c;
                self.data[idx] = mul_mod(self.data[idx], inv, p);
            }
            for r in 0..self.rows {
                if r == row {
                    continue;
                }
                let factor = self.get(r, col);
                if factor == 0 {
                    continue;
                }
                for c in col..self.cols {
                    let pivot_val = self.get(row, c);
                    let idx = r * self.cols + c;
                    self.data[idx] = sub_mod(self.data[idx], mul_mod(factor, pivot_val, p), p);
                }
            }
            pivots.push(col);
            row += 1;
        }
        pivots
    }

    /// Rank of the matrix.
    pub fn rank(&self) -> usize {
        self.clone().rref().len()
    }

    /// Canonical kernel basis; see [`Nullspace`].
    pub fn nullspace(&self) -> Nullspace {
        let mut reduced = self.clone();
        let pivots = reduced.rref();
        let mut is_pivot = vec![false; self.cols];
        for &c in &pivots {
            is_pivot[c] = true;
        }
        let basis = (0..self.cols)
            .filter(|&c| !is_pivot[c])
            .map(|free| {
                let mut v = vec![0u64; self.cols];
                v[free] = 1 % self.p;
                for (r, &pc) in pivots.iter().enumerate() {
                    v[pc] = neg_mod(reduced.get(r, free), self.p);
                }
                v
            })
            .collect();
        Nullspace { pivots, basis }
    }

    /// Determinant of a square matrix.
    pub fn determinant(&self) -> Result<u64, IntwError> {
        if self.rows != self.cols {
            return Err(shape_error(
                "det-shape",
                "determinant requires a square matrix",
                (self.rows, self.cols),
                (self.rows, self.cols),
            ));
        }
        let p = self.p;
        let n = self.rows;
        let mut work = self.clone();
        let mut det = 1 % p;
        for col in 0..n {
            let Some(found) = (col..n).find(|&r| work.get(r, col) != 0) else {
                return Ok(0);
            };
            if found != col {
                for c in 0..n {
                    work.data.swap(found * n + c, col * n + c);
                }
                det = neg_mod(det, p);
            }
            let pivot = work.get(col, col);
            det = mul_mod(det, pivot, p);
            let inv = inv_mod(pivot, p).unwrap_or(0);
            for r in (col + 1)..n {
                let factor = mul_mod(work.get(r, col), inv, p);
                if factor == 0 {
                    continue;
                }
                for c in col..n {
                    let idx = r * n + c;
                    work.data[idx] = sub_mod(work.data[idx], mul_mod(factor, work.get(col, c), p), p);
                }
            }
        }
        Ok(det)
    }
}
