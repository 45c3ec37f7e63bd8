#![deny(missing_docs)]
#![doc = "Algebraic number fields `Q[x]/(f)`, exact matrices over them, and reduction modulo split primes."]

pub mod data;
pub mod matrix;
pub mod number_field;
pub mod reduce;

pub use data::{FieldData, MatrixData};
pub use matrix::{commutes_with, NfMatrix};
pub use number_field::{NfElem, NumberField};
pub use reduce::ModularContext;
