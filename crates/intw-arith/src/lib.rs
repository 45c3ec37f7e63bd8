#![deny(missing_docs)]
#![doc = "Exact arithmetic primitives: prime fields, CRT, rational reconstruction, F_p polynomials and linear algebra, Hermite normal form."]

pub mod crt;
pub mod hnf;
pub mod linalg;
pub mod modular;
pub mod poly;
pub mod primes;
pub mod ratrecon;

pub use crt::{crt_combine, crt_combine_slices};
pub use hnf::hermite_normal_form;
pub use linalg::{FpMatrix, Nullspace};
pub use modular::{add_mod, inv_mod, mul_mod, pow_mod, reduce_bigint, reduce_rational, sub_mod};
pub use poly::{interpolate, FpPoly};
pub use primes::{is_prime, next_prime, PrimeLadder};
pub use ratrecon::{rational_reconstruction, reconstruction_bound};
