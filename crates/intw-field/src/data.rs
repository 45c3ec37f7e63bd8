//! Plain-data forms of fields and matrices for JSON/YAML interchange.
//!
//! Coefficients travel as decimal strings (`"3"`, `"-2/7"`) so payloads stay
//! readable and exact.

use std::str::FromStr;

use intw_core::errors::{ErrorInfo, IntwError};
use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

use crate::matrix::NfMatrix;
use crate::number_field::NumberField;

fn parse_error(code: &str, value: &str) -> IntwError {
    IntwError::Serde(ErrorInfo::new(code, "could not parse exact number").with_context("value", value))
}

fn parse_rational(value: &str) -> Result<BigRational, IntwError> {
    let trimmed = value.trim();
    let parsed = BigRational::from_str(trimmed).map_err(|_| parse_error("rational-parse", value))?;
    Ok(parsed)
}

/// Serializable description of a [`NumberField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldData {
    /// Display label.
    #[serde(default = "default_field_name")]
    pub name: String,
    /// Little-endian integer coefficients of the monic defining polynomial.
    pub modulus: Vec<String>,
}

fn default_field_name() -> String {
    "K".to_string()
}

impl FieldData {
    /// Captures a field.
    pub fn from_field(field: &NumberField) -> Self {
        Self {
            name: field.name().to_string(),
            modulus: field.modulus().iter().map(ToString::to_string).collect(),
        }
    }

    /// Rebuilds the field.
    pub fn to_field(&self) -> Result<NumberField, IntwError> {
        let modulus = self
            .modulus
            .iter()
            .map(|c| BigInt::from_str(c.trim()).map_err(|_| parse_error("integer-parse", c)))
            .collect::<Result<Vec<_>, _>>()?;
        NumberField::new(self.name.clone(), modulus)
    }
}

/// Serializable matrix: `entries[r * cols + c]` lists the power-basis
/// coefficients of entry `(r, c)`; short lists are zero padded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixData {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row-major entries, each a list of coefficient strings.
    pub entries: Vec<Vec<String>>,
}

impl MatrixData {
    /// Captures a matrix.
    pub fn from_matrix(matrix: &NfMatrix) -> Self {
        let entries = matrix
            .entries()
            .iter()
            .map(|e| {
                let mut coeffs: Vec<String> = e.coeffs().iter().map(ToString::to_string).collect();
                while coeffs.len() > 1 && coeffs.last().map(String::as_str) == Some("0") {
                    coeffs.pop();
                }
                coeffs
            })
            .collect();
        Self {
            rows: matrix.rows(),
            cols: matrix.cols(),
            entries,
        }
    }

    /// Rebuilds the matrix over `field`.
    pub fn to_matrix(&self, field: &NumberField) -> Result<NfMatrix, IntwError> {
        let entries = self
            .entries
            .iter()
            .map(|coeffs| {
                let values = coeffs
                    .iter()
                    .map(|c| parse_rational(c))
                    .collect::<Result<Vec<_>, _>>()?;
                field.elem(values)
            })
            .collect::<Result<Vec<_>, _>>()?;
        NfMatrix::from_entries(field, self.rows, self.cols, entries)
    }
}
