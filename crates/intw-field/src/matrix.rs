//! Dense matrices over a number field with exact arithmetic.

use intw_core::errors::{ErrorInfo, IntwError};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::One;

use crate::number_field::{NfElem, NumberField};

fn shape_error(code: &str, message: &str, left: (usize, usize), right: (usize, usize)) -> IntwError {
    IntwError::Precondition(
        ErrorInfo::new(code, message)
            .with_context("left", format!("{}x{}", left.0, left.1))
            .with_context("right", format!("{}x{}", right.0, right.1)),
    )
}

fn field_mismatch(left: &NumberField, right: &NumberField) -> IntwError {
    IntwError::Precondition(
        ErrorInfo::new("field-mismatch", "matrices live over different fields")
            .with_context("left", left)
            .with_context("right", right),
    )
}

/// Row-major matrix over a [`NumberField`]. Matrices act on row vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfMatrix {
    field: NumberField,
    rows: usize,
    cols: usize,
    entries: Vec<NfElem>,
}

impl NfMatrix {
    /// Zero matrix.
    pub fn zeros(field: &NumberField, rows: usize, cols: usize) -> Self {
        Self {
            field: field.clone(),
            rows,
            cols,
            entries: vec![field.zero(); rows * cols],
        }
    }

    /// Identity matrix of size `n`.
    pub fn identity(field: &NumberField, n: usize) -> Self {
        let mut out = Self::zeros(field, n, n);
        for i in 0..n {
            out.entries[i * n + i] = field.one();
        }
        out
    }

    /// Builds a matrix from row-major field elements.
    pub fn from_entries(
        field: &NumberField,
        rows: usize,
        cols: usize,
        entries: Vec<NfElem>,
    ) -> Result<Self, IntwError> {
        if entries.len() != rows * cols {
            return Err(IntwError::Precondition(
                ErrorInfo::new("matrix-data", "entry count does not match shape")
                    .with_context("rows", rows)
                    .with_context("cols", cols)
                    .with_context("len", entries.len()),
            ));
        }
        if let Some(bad) = entries.iter().position(|e| e.coeffs().len() != field.degree()) {
            return Err(IntwError::Precondition(
                ErrorInfo::new("matrix-entry", "entry does not belong to the field")
                    .with_context("index", bad)
                    .with_context("field", field),
            ));
        }
        Ok(Self {
            field: field.clone(),
            rows,
            cols,
            entries,
        })
    }

    /// Builds a matrix with rational entries.
    pub fn from_rationals(
        field: &NumberField,
        rows: usize,
        cols: usize,
        values: Vec<BigRational>,
    ) -> Result<Self, IntwError> {
        let entries = values.into_iter().map(|v| field.from_rational(v)).collect();
        Self::from_entries(field, rows, cols, entries)
    }

    /// Builds a matrix with integer entries.
    pub fn from_ints(
        field: &NumberField,
        rows: usize,
        cols: usize,
        values: &[i64],
    ) -> Result<Self, IntwError> {
        let entries = values.iter().map(|&v| field.from_int(v)).collect();
        Self::from_entries(field, rows, cols, entries)
    }

    /// Rebuilds a matrix from `rows * cols * degree` coefficients, entry-major.
    pub fn from_flat_coefficients(
        field: &NumberField,
        rows: usize,
        cols: usize,
        coeffs: Vec<BigRational>,
    ) -> Result<Self, IntwError> {
        let d = field.degree();
        if coeffs.len() != rows * cols * d {
            return Err(IntwError::Precondition(
                ErrorInfo::new("matrix-coefficients", "coefficient count does not match shape")
                    .with_context("expected", rows * cols * d)
                    .with_context("len", coeffs.len()),
            ));
        }
        let entries = coeffs
            .chunks(d)
            .map(|chunk| field.elem(chunk.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(field, rows, cols, entries)
    }

    /// The base field.
    pub fn field(&self) -> &NumberField {
        &self.field
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major entries.
    pub fn entries(&self) -> &[NfElem] {
        &self.entries
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> &NfElem {
        &self.entries[row * self.cols + col]
    }

    /// Whether every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(NfElem::is_zero)
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Self) -> Result<Self, IntwError> {
        if self.field != other.field {
            return Err(field_mismatch(&self.field, &other.field));
        }
        if self.cols != other.rows {
            return Err(shape_error(
                "matmul-shape",
                "incompatible matrices for product",
                (self.rows, self.cols),
                (other.rows, other.cols),
            ));
        }
        let mut out = Self::zeros(&self.field, self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a.is_zero() {
                    continue;
                }
                for j in 0..other.cols {
                    let b = other.get(k, j);
                    if b.is_zero() {
                        continue;
                    }
                    let idx = i * other.cols + j;
                    out.entries[idx] = out.entries[idx].add(&self.field.mul(a, b));
                }
            }
        }
        Ok(out)
    }

    /// Entry-wise sum.
    pub fn add(&self, other: &Self) -> Result<Self, IntwError> {
        self.zip_with(other, NfElem::add)
    }

    /// Entry-wise difference.
    pub fn sub(&self, other: &Self) -> Result<Self, IntwError> {
        self.zip_with(other, NfElem::sub)
    }

    fn zip_with(&self, other: &Self, op: fn(&NfElem, &NfElem) -> NfElem) -> Result<Self, IntwError> {
        if self.field != other.field {
            return Err(field_mismatch(&self.field, &other.field));
        }
        if self.rows != other.rows || self.cols != other.cols {
            return Err(shape_error(
                "zip-shape",
                "entry-wise operation on matrices of different shapes",
                (self.rows, self.cols),
                (other.rows, other.cols),
            ));
        }
        let entries = self
            .entries
            .iter()
            .zip(&other.entries)
            .map(|(a, b)| op(a, b))
            .collect();
        Ok(Self {
            entries,
            ..self.clone()
        })
    }

    /// Multiplies every entry by a field element.
    pub fn scale(&self, factor: &NfElem) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|e| self.field.mul(e, factor))
            .collect();
        Self {
            entries,
            ..self.clone()
        }
    }

    /// Transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                entries.push(self.get(r, c).clone());
            }
        }
        Self {
            field: self.field.clone(),
            rows: self.cols,
            cols: self.rows,
            entries,
        }
    }

    /// Least common multiple of all coefficient denominators.
    pub fn common_denominator(&self) -> BigInt {
        self.entries
            .iter()
            .fold(BigInt::one(), |acc, e| acc.lcm(&e.common_denominator()))
    }

    /// Returns the entries as rationals when every entry lies in `Q`.
    pub fn to_rationals(&self) -> Option<Vec<BigRational>> {
        self.entries
            .iter()
            .map(|e| e.as_rational().cloned())
            .collect()
    }

    /// Whether `self` is `c * I` for some field element `c`.
    pub fn is_scalar(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.rows;
        (0..n).all(|i| {
            (0..n).all(|j| {
                if i == j {
                    self.get(i, j) == self.get(0, 0)
                } else {
                    self.get(i, j).is_zero()
                }
            })
        })
    }
}

/// Checks `a * t == t * b` exactly.
pub fn commutes_with(a: &NfMatrix, t: &NfMatrix, b: &NfMatrix) -> Result<bool, IntwError> {
    Ok(a.mul(t)? == t.mul(b)?)
}
