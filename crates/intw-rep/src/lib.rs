#![deny(missing_docs)]
#![doc = "Representations over number fields and the multi-modular intertwiner solver."]

mod hom;
mod json;
mod lattice;
mod module;
mod report;
mod solver;

pub use hom::{FiniteFieldHomSolver, FpHomBasis, LinearHomSolver};
pub use json::{from_json_slice, stable_hash_string, to_canonical_json_bytes};
pub use lattice::{integral_lattice, restrict_scalars, to_integral, LatticeOpts, LatticeOutcome};
pub use module::{Representation, RepresentationData};
pub use report::{HomBasisReport, LatticeReport};
pub use solver::{
    endomorphism_dimension, hom_basis, hom_basis_with, is_isomorphic, HomBasisOutcome,
    SolverOpts, SolverStats, VerificationPolicy,
};
