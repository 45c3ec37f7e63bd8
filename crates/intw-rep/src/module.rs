use intw_core::errors::{ErrorInfo, IntwError};
use intw_field::{FieldData, MatrixData, NfMatrix, NumberField};
use serde::{Deserialize, Serialize};

fn rep_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message)
}

/// A finite group acting linearly on `K^dim` through one matrix per generator.
///
/// Matrices act on row vectors. The generators are assumed, not checked, to
/// satisfy the relations of the group named by `group`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representation {
    group: String,
    field: NumberField,
    dim: usize,
    generators: Vec<NfMatrix>,
}

impl Representation {
    /// Validates shapes and fields and builds the representation.
    pub fn new(
        group: impl Into<String>,
        field: NumberField,
        dim: usize,
        generators: Vec<NfMatrix>,
    ) -> Result<Self, IntwError> {
        for (idx, gen) in generators.iter().enumerate() {
            if gen.field() != &field {
                return Err(IntwError::Precondition(
                    rep_error("generator-field", "generator is defined over another field")
                        .with_context("generator", idx)
                        .with_context("field", &field)
                        .with_context("generator_field", gen.field()),
                ));
            }
            if gen.rows() != dim || gen.cols() != dim {
                return Err(IntwError::Precondition(
                    rep_error("generator-shape", "generator must be dim x dim")
                        .with_context("generator", idx)
                        .with_context("dim", dim)
                        .with_context("shape", format!("{}x{}", gen.rows(), gen.cols())),
                ));
            }
        }
        Ok(Self {
            group: group.into(),
            field,
            dim,
            generators,
        })
    }

    /// The one-dimensional trivial representation.
    pub fn trivial(field: &NumberField, group: impl Into<String>, generator_count: usize) -> Self {
        Self {
            group: group.into(),
            field: field.clone(),
            dim: 1,
            generators: vec![NfMatrix::identity(field, 1); generator_count],
        }
    }

    /// Label of the acting group.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Base field.
    pub fn field(&self) -> &NumberField {
        &self.field
    }

    /// Dimension of the underlying vector space.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Generator actions, in generator order.
    pub fn generators(&self) -> &[NfMatrix] {
        &self.generators
    }

    /// Number of generators.
    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    /// Direct sum of two representations of the same group.
    pub fn direct_sum(&self, other: &Self) -> Result<Self, IntwError> {
        if self.field != other.field || self.generators.len() != other.generators.len() {
            return Err(IntwError::Precondition(
                rep_error("direct-sum", "summands need the same field and generator count")
                    .with_context("left_generators", self.generators.len())
                    .with_context("right_generators", other.generators.len()),
            ));
        }
        let dim = self.dim + other.dim;
        let mut generators = Vec::with_capacity(self.generators.len());
        for (left, right) in self.generators.iter().zip(&other.generators) {
            let mut entries = Vec::with_capacity(dim * dim);
            for r in 0..dim {
                for c in 0..dim {
                    let value = match (r < self.dim, c < self.dim) {
                        (true, true) => left.get(r, c).clone(),
                        (false, false) => right.get(r - self.dim, c - self.dim).clone(),
                        _ => self.field.zero(),
                    };
                    entries.push(value);
                }
            }
            generators.push(NfMatrix::from_entries(&self.field, dim, dim, entries)?);
        }
        Self::new(self.group.clone(), self.field.clone(), dim, generators)
    }
}

/// Serializable form of a [`Representation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentationData {
    /// Label of the acting group.
    pub group: String,
    /// Base field.
    pub field: FieldData,
    /// Dimension.
    pub dim: usize,
    /// Generator matrices.
    pub generators: Vec<MatrixData>,
}

impl RepresentationData {
    /// Captures a representation.
    pub fn from_representation(rep: &Representation) -> Self {
        Self {
            group: rep.group.clone(),
            field: FieldData::from_field(&rep.field),
            dim: rep.dim,
            generators: rep.generators.iter().map(MatrixData::from_matrix).collect(),
        }
    }

    /// Rebuilds and validates the representation.
    pub fn to_representation(&self) -> Result<Representation, IntwError> {
        let field = self.field.to_field()?;
        let generators = self
            .generators
            .iter()
            .map(|m| m.to_matrix(&field))
            .collect::<Result<Vec<_>, _>>()?;
        Representation::new(self.group.clone(), field, self.dim, generators)
    }
}
