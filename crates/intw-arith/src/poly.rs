//! Dense univariate polynomials over `F_p` and root finding.

use intw_core::errors::{ErrorInfo, IntwError};
use intw_core::rng::RngHandle;

use crate::modular::{add_mod, inv_mod, mul_mod, neg_mod, sub_mod};

// Below this size roots are found by exhaustive evaluation.
const BRUTE_FORCE_LIMIT: u64 = 64;

/// Polynomial with coefficients in `F_p`, stored little-endian without trailing zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpPoly {
    coeffs: Vec<u64>,
    p: u64,
}

impl FpPoly {
    /// Builds a polynomial from little-endian coefficients, reducing them modulo `p`.
    pub fn new(coeffs: Vec<u64>, p: u64) -> Self {
        let mut poly = Self {
            coeffs: coeffs.into_iter().map(|c| c % p).collect(),
            p,
        };
        poly.trim();
        poly
    }

    /// The zero polynomial.
    pub fn zero(p: u64) -> Self {
        Self {
            coeffs: Vec::new(),
            p,
        }
    }

    /// The constant polynomial `c`.
    pub fn constant(c: u64, p: u64) -> Self {
        Self::new(vec![c], p)
    }

    /// The polynomial `x + shift`.
    pub fn linear(shift: u64, p: u64) -> Self {
        Self::new(vec![shift, 1], p)
    }

    fn trim(&mut self) {
        while self.coeffs.last() == Some(&0) {
            self.coeffs.pop();
        }
    }

    /// Little-endian coefficients.
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Characteristic of the coefficient field.
    pub fn modulus(&self) -> u64 {
        self.p
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Whether this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Evaluates the polynomial at `x` (Horner).
    pub fn eval(&self, x: u64) -> u64 {
        self.coeffs
            .iter()
            .rev()
            .fold(0, |acc, &c| add_mod(mul_mod(acc, x, self.p), c, self.p))
    }

    /// Scales the polynomial so its leading coefficient is one.
    pub fn monic(&self) -> Self {
        match self.coeffs.last() {
            None => self.clone(),
            Some(&lead) => {
                // Leading coefficient is non-zero and p is prime.
                let inv = inv_mod(lead, self.p).unwrap_or(1);
                Self::new(
                    self.coeffs.iter().map(|&c| mul_mod(c, inv, self.p)).collect(),
                    self.p,
                )
            }
        }
    }

    /// Formal derivative.
    pub fn derivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, &c)| mul_mod(c, k as u64 % self.p, self.p))
            .collect();
        Self::new(coeffs, self.p)
    }

    /// Sum of two polynomials.
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| {
                let a = self.coeffs.get(i).copied().unwrap_or(0);
                let b = other.coeffs.get(i).copied().unwrap_or(0);
                add_mod(a, b, self.p)
            })
            .collect();
        Self::new(coeffs, self.p)
    }

    /// Difference of two polynomials.
    pub fn sub(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| {
                let a = self.coeffs.get(i).copied().unwrap_or(0);
                let b = other.coeffs.get(i).copied().unwrap_or(0);
                sub_mod(a, b, self.p)
            })
            .collect();
        Self::new(coeffs, self.p)
    }

    /// Product of two polynomials.
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero(self.p);
        }
        let mut coeffs = vec![0u64; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = add_mod(coeffs[i + j], mul_mod(a, b, self.p), self.p);
            }
        }
        Self::new(coeffs, self.p)
    }

    /// Quotient and remainder of division by `divisor`.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), IntwError> {
        let lead = match divisor.coeffs.last() {
            Some(&lead) => lead,
            None => {
                return Err(IntwError::arithmetic(
                    "poly-div-zero",
                    "polynomial division by zero",
                ))
            }
        };
        let lead_inv = inv_mod(lead, self.p).ok_or_else(|| {
            IntwError::Arithmetic(
                ErrorInfo::new("poly-lead-inverse", "leading coefficient is not invertible")
                    .with_context("p", self.p),
            )
        })?;
        let dlen = divisor.coeffs.len();
        let mut rem = self.coeffs.clone();
        if rem.len() < dlen {
            return Ok((Self::zero(self.p), self.clone()));
        }
        let mut quot = vec![0u64; rem.len() - dlen + 1];
        for shift in (0..quot.len()).rev() {
            let top = rem[shift + dlen - 1];
            if top == 0 {
                continue;
            }
            let factor = mul_mod(top, lead_inv, self.p);
            quot[shift] = factor;
            for (k, &d) in divisor.coeffs.iter().enumerate() {
                rem[shift + k] = sub_mod(rem[shift + k], mul_mod(factor, d, self.p), self.p);
            }
        }
        Ok((Self::new(quot, self.p), Self::new(rem, self.p)))
    }

    /// Remainder of division by `divisor`.
    pub fn rem(&self, divisor: &Self) -> Result<Self, IntwError> {
        Ok(self.div_rem(divisor)?.1)
    }

    /// Monic greatest common divisor.
    pub fn gcd(&self, other: &Self) -> Result<Self, IntwError> {
        let (mut a, mut b) = (self.clone(), other.clone());
        while !b.is_zero() {
            let r = a.rem(&b)?;
            a = b;
            b = r;
        }
        Ok(a.monic())
    }

    /// Computes `self^exp mod modulus`.
    pub fn pow_mod(&self, mut exp: u64, modulus: &Self) -> Result<Self, IntwError> {
        let mut result = Self::constant(1, self.p).rem(modulus)?;
        let mut base = self.rem(modulus)?;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base).rem(modulus)?;
            }
            base = base.mul(&base).rem(modulus)?;
            exp >>= 1;
        }
        Ok(result)
    }

    /// All roots in `F_p`, provided the polynomial is squarefree and splits
    /// into distinct linear factors over `F_p`.
    ///
    /// Returns `Ok(None)` when it does not split that way. Roots are sorted
    /// ascending so the order is independent of the randomness used.
    pub fn split_roots(&self, rng: &mut RngHandle) -> Result<Option<Vec<u64>>, IntwError> {
        let f = self.monic();
        let degree = match f.degree() {
            None => return Ok(None),
            Some(0) => return Ok(Some(Vec::new())),
            Some(d) => d,
        };
        if degree as u64 > self.p {
            return Ok(None);
        }
        if f.gcd(&f.derivative())?.degree() != Some(0) {
            return Ok(None);
        }
        let x = Self::linear(0, self.p);
        let frobenius = x.pow_mod(self.p, &f)?;
        let split_part = f.gcd(&frobenius.sub(&x))?;
        if split_part.degree() != Some(degree) {
            return Ok(None);
        }

        let mut roots = if self.p <= BRUTE_FORCE_LIMIT {
            (0..self.p).filter(|&r| f.eval(r) == 0).collect()
        } else {
            let mut roots = Vec::with_capacity(degree);
            split_equal_degree(&f, rng, &mut roots)?;
            roots
        };
        roots.sort_unstable();
        if roots.len() != degree {
            return Ok(None);
        }
        Ok(Some(roots))
    }
}

// Cantor-Zassenhaus for a squarefree product of linear factors, odd p.
fn split_equal_degree(f: &FpPoly, rng: &mut RngHandle, roots: &mut Vec<u64>) -> Result<(), IntwError> {
    let p = f.p;
    match f.degree() {
        None | Some(0) => return Ok(()),
        Some(1) => {
            roots.push(neg_mod(f.coeffs[0], p));
            return Ok(());
        }
        Some(_) => {}
    }
    let half = (p - 1) / 2;
    loop {
        let delta = rng.below(p);
        let probe = FpPoly::linear(delta, p).pow_mod(half, f)?;
        let candidate = f.gcd(&probe.sub(&FpPoly::constant(1, p)))?;
        match candidate.degree() {
            Some(d) if d > 0 && Some(d) < f.degree() => {
                let (cofactor, _) = f.div_rem(&candidate)?;
                split_equal_degree(&candidate, rng, roots)?;
                split_equal_degree(&cofactor.monic(), rng, roots)?;
                return Ok(());
            }
            _ => continue,
        }
    }
}

/// Lagrange interpolation: the unique polynomial of degree `< points.len()`
/// taking `values[i]` at `points[i]`, as little-endian coefficients padded to
/// `points.len()` entries.
pub fn interpolate(points: &[u64], values: &[u64], p: u64) -> Result<Vec<u64>, IntwError> {
    if points.len() != values.len() {
        return Err(IntwError::Precondition(
            ErrorInfo::new("interpolate-shape", "points and values differ in length")
                .with_context("points", points.len())
                .with_context("values", values.len()),
        ));
    }
    let n = points.len();
    let mut product = FpPoly::constant(1, p);
    for &x in points {
        product = product.mul(&FpPoly::linear(neg_mod(x % p, p), p));
    }
    let mut out = vec![0u64; n];
    for (i, (&xi, &vi)) in points.iter().zip(values).enumerate() {
        let (basis, _) = product.div_rem(&FpPoly::linear(neg_mod(xi % p, p), p))?;
        let denom = basis.eval(xi % p);
        let inv = inv_mod(denom, p).ok_or_else(|| {
            IntwError::Precondition(
                ErrorInfo::new("interpolate-points", "interpolation points must be distinct")
                    .with_context("index", i)
                    .with_context("p", p),
            )
        })?;
        let scale = mul_mod(vi % p, inv, p);
        if scale == 0 {
            continue;
        }
        for (k, &c) in basis.coeffs().iter().enumerate() {
            out[k] = add_mod(out[k], mul_mod(c, scale, p), p);
        }
    }
    Ok(out)
}
