use intw_core::errors::IntwError;
use intw_core::provenance::{RunProvenance, SchemaVersion};
use intw_field::{FieldData, MatrixData};
use serde::{Deserialize, Serialize};

use crate::json::stable_hash_string;
use crate::lattice::{LatticeOpts, LatticeOutcome};
use crate::module::{Representation, RepresentationData};
use crate::solver::{HomBasisOutcome, SolverOpts, SolverStats};

const TOOL: &str = "intw-rep";

/// Serializable record of an intertwiner computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomBasisReport {
    /// Payload schema.
    pub schema_version: SchemaVersion,
    /// Input hash, seed and tool version.
    pub provenance: RunProvenance,
    /// Label of the acting group.
    pub group: String,
    /// Base field.
    pub field: FieldData,
    /// Dimension of the source representation.
    pub dim_a: usize,
    /// Dimension of the target representation.
    pub dim_b: usize,
    /// Verified basis.
    pub basis: Vec<MatrixData>,
    /// Solver statistics.
    pub stats: SolverStats,
    /// Options the solver ran with.
    pub opts: SolverOpts,
    /// Hash of `basis` alone; identical inputs give identical hashes.
    pub basis_hash: String,
}

impl HomBasisReport {
    /// Assembles the report for `outcome`, computed from `a`, `b` and `opts`.
    pub fn new(
        a: &Representation,
        b: &Representation,
        opts: &SolverOpts,
        outcome: &HomBasisOutcome,
    ) -> Result<Self, IntwError> {
        let a_data = RepresentationData::from_representation(a);
        let b_data = RepresentationData::from_representation(b);
        let input_hash = stable_hash_string(&(&a_data, &b_data, opts))?;
        let basis: Vec<MatrixData> = outcome.basis.iter().map(MatrixData::from_matrix).collect();
        let basis_hash = stable_hash_string(&basis)?;
        Ok(Self {
            schema_version: SchemaVersion::default(),
            provenance: RunProvenance::new(input_hash, opts.seed, TOOL, env!("CARGO_PKG_VERSION")),
            group: a.group().to_string(),
            field: FieldData::from_field(a.field()),
            dim_a: a.dim(),
            dim_b: b.dim(),
            basis,
            stats: outcome.stats.clone(),
            opts: opts.clone(),
            basis_hash,
        })
    }
}

/// Serializable record of a lattice stabilisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeReport {
    /// Payload schema.
    pub schema_version: SchemaVersion,
    /// Input hash and tool version.
    pub provenance: RunProvenance,
    /// Enlargement steps performed.
    pub iterations: usize,
    /// Lattice basis (rows) inside `Q^n`.
    pub basis: MatrixData,
    /// Integral representation on the lattice.
    pub representation: RepresentationData,
    /// Hash of `basis` and `representation`.
    pub lattice_hash: String,
}

impl LatticeReport {
    /// Assembles the report for `outcome`, computed from `input` and `opts`.
    pub fn new(
        input: &Representation,
        opts: &LatticeOpts,
        outcome: &LatticeOutcome,
    ) -> Result<Self, IntwError> {
        let input_data = RepresentationData::from_representation(input);
        let input_hash = stable_hash_string(&(&input_data, opts))?;
        let basis = MatrixData::from_matrix(&outcome.basis);
        let representation = RepresentationData::from_representation(&outcome.representation);
        let lattice_hash = stable_hash_string(&(&basis, &representation))?;
        Ok(Self {
            schema_version: SchemaVersion::default(),
            provenance: RunProvenance::new(input_hash, 0, TOOL, env!("CARGO_PKG_VERSION")),
            iterations: outcome.iterations,
            basis,
            representation,
            lattice_hash,
        })
    }
}
