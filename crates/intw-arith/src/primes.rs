//! Primality testing and the increasing prime ladder used by modular solvers.

use intw_core::errors::{ErrorInfo, IntwError};
use serde::{Deserialize, Serialize};

use crate::modular::{mul_mod, pow_mod};

// Deterministic witness set for every n < 2^64.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Deterministic Miller-Rabin primality test for 64-bit integers.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &small in &WITNESSES {
        if n == small {
            return true;
        }
        if n % small == 0 {
            return false;
        }
    }
    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }
    'witness: for &a in &WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Largest prime candidate the ladder will hand out; keeps `u128` products exact.
pub const MAX_LADDER_PRIME: u64 = 1 << 62;

/// Returns the smallest prime strictly greater than `n`.
pub fn next_prime(n: u64) -> Result<u64, IntwError> {
    let mut candidate = n.checked_add(1).ok_or_else(|| overflow(n))?;
    while candidate <= MAX_LADDER_PRIME {
        if is_prime(candidate) {
            return Ok(candidate);
        }
        candidate += 1;
    }
    Err(overflow(n))
}

fn overflow(n: u64) -> IntwError {
    IntwError::Degeneracy(
        ErrorInfo::new("prime-overflow", "no usable prime above the current one")
            .with_context("prime", n)
            .with_hint("lower start_prime"),
    )
}

/// Increasing sequence of primes starting after a seed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeLadder {
    current: u64,
    visited: usize,
    skipped: usize,
}

impl PrimeLadder {
    /// Creates a ladder whose first prime is the smallest prime above `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            current: seed,
            visited: 0,
            skipped: 0,
        }
    }

    /// Moves to the next prime and returns it.
    pub fn advance(&mut self) -> Result<u64, IntwError> {
        self.current = next_prime(self.current)?;
        self.visited += 1;
        Ok(self.current)
    }

    /// Records that the current prime was rejected as degenerate.
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// The most recent prime handed out (the seed before the first advance).
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Number of primes handed out so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Number of primes rejected via [`PrimeLadder::skip`].
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
