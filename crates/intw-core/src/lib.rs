#![deny(missing_docs)]
#![doc = "Core error, provenance and RNG types shared by the intertwiner workspace."]

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, IntwError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
