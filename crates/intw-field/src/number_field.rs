//! Number fields given by a monic integral defining polynomial.

use std::fmt;

use intw_core::errors::{ErrorInfo, IntwError};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// The field `Q[x]/(f)` for a monic, integral, irreducible `f`.
///
/// Irreducibility is assumed, not checked. Two fields are equal when their
/// defining polynomials are equal; the name is only a label.
#[derive(Debug, Clone)]
pub struct NumberField {
    name: String,
    modulus: Vec<BigInt>,
}

impl PartialEq for NumberField {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
    }
}

impl Eq for NumberField {}

impl fmt::Display for NumberField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = Q[x]/(", self.name)?;
        let mut first = true;
        for (k, c) in self.modulus.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match k {
                0 => write!(f, "{c}")?,
                1 => write!(f, "{c}*x")?,
                _ => write!(f, "{c}*x^{k}")?,
            }
        }
        write!(f, ")")
    }
}

/// Element of a [`NumberField`] in the power basis `1, a, ..., a^(d-1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NfElem {
    coeffs: Vec<BigRational>,
}

impl NumberField {
    /// Creates a field from the little-endian coefficients of a monic polynomial.
    pub fn new(name: impl Into<String>, modulus: Vec<BigInt>) -> Result<Self, IntwError> {
        match modulus.last() {
            Some(lead) if lead.is_one() && modulus.len() >= 2 => Ok(Self {
                name: name.into(),
                modulus,
            }),
            _ => Err(IntwError::Precondition(
                ErrorInfo::new(
                    "field-modulus",
                    "defining polynomial must be monic of degree at least one",
                )
                .with_context("len", modulus.len()),
            )),
        }
    }

    /// The rational numbers, presented as `Q[x]/(x)`.
    pub fn rationals() -> Self {
        Self {
            name: "QQ".to_string(),
            modulus: vec![BigInt::zero(), BigInt::one()],
        }
    }

    /// `Q(i)`, defined by `x^2 + 1`.
    pub fn gaussian() -> Self {
        Self {
            name: "QQ(i)".to_string(),
            modulus: vec![BigInt::one(), BigInt::zero(), BigInt::one()],
        }
    }

    /// `Q(zeta_3)`, defined by `x^2 + x + 1`.
    pub fn eisenstein() -> Self {
        Self {
            name: "QQ(z3)".to_string(),
            modulus: vec![BigInt::one(), BigInt::one(), BigInt::one()],
        }
    }

    /// Display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Little-endian coefficients of the defining polynomial.
    pub fn modulus(&self) -> &[BigInt] {
        &self.modulus
    }

    /// Degree over `Q`.
    pub fn degree(&self) -> usize {
        self.modulus.len() - 1
    }

    /// Whether this is `Q` itself.
    pub fn is_rational(&self) -> bool {
        self.degree() == 1
    }

    /// Builds an element from power-basis coefficients; missing trailing coefficients are zero.
    pub fn elem(&self, mut coeffs: Vec<BigRational>) -> Result<NfElem, IntwError> {
        let d = self.degree();
        if coeffs.len() > d {
            if coeffs[d..].iter().any(|c| !c.is_zero()) {
                return Err(IntwError::Precondition(
                    ErrorInfo::new("elem-length", "too many coefficients for the field degree")
                        .with_context("degree", d)
                        .with_context("len", coeffs.len()),
                ));
            }
            coeffs.truncate(d);
        }
        coeffs.resize(d, BigRational::zero());
        Ok(NfElem { coeffs })
    }

    /// The zero element.
    pub fn zero(&self) -> NfElem {
        NfElem {
            coeffs: vec![BigRational::zero(); self.degree()],
        }
    }

    /// The one element.
    pub fn one(&self) -> NfElem {
        self.from_rational(BigRational::one())
    }

    /// Embeds a rational number.
    pub fn from_rational(&self, value: BigRational) -> NfElem {
        let mut out = self.zero();
        out.coeffs[0] = value;
        out
    }

    /// Embeds an integer.
    pub fn from_int(&self, value: i64) -> NfElem {
        self.from_rational(BigRational::from_integer(BigInt::from(value)))
    }

    /// The class of `x`, the generator of the field.
    pub fn generator(&self) -> NfElem {
        let mut coeffs = vec![BigRational::zero(); self.degree() + 1];
        coeffs[1] = BigRational::one();
        NfElem {
            coeffs: self.reduce_poly(coeffs),
        }
    }

    /// Product of two elements.
    pub fn mul(&self, a: &NfElem, b: &NfElem) -> NfElem {
        if a.is_zero() || b.is_zero() {
            return self.zero();
        }
        let mut prod = vec![BigRational::zero(); a.coeffs.len() + b.coeffs.len()];
        for (i, x) in a.coeffs.iter().enumerate() {
            if x.is_zero() {
                continue;
            }
            for (j, y) in b.coeffs.iter().enumerate() {
                if !y.is_zero() {
                    prod[i + j] += x * y;
                }
            }
        }
        NfElem {
            coeffs: self.reduce_poly(prod),
        }
    }

    // Reduces a coefficient vector of any length modulo the monic defining polynomial.
    fn reduce_poly(&self, mut coeffs: Vec<BigRational>) -> Vec<BigRational> {
        let d = self.degree();
        for top in (d..coeffs.len()).rev() {
            let c = std::mem::replace(&mut coeffs[top], BigRational::zero());
            if c.is_zero() {
                continue;
            }
            for (j, f) in self.modulus[..d].iter().enumerate() {
                if !f.is_zero() {
                    coeffs[top - d + j] -= &c * BigRational::from_integer(f.clone());
                }
            }
        }
        coeffs.resize(d, BigRational::zero());
        coeffs
    }

    /// Matrix of multiplication by `elem` acting on row vectors of power-basis coordinates.
    ///
    /// Row `k` holds the coordinates of `a^k * elem`.
    pub fn multiplication_matrix(&self, elem: &NfElem) -> Vec<Vec<BigRational>> {
        let gen = self.generator();
        let mut power = self.one();
        let mut rows = Vec::with_capacity(self.degree());
        for _ in 0..self.degree() {
            rows.push(self.mul(&power, elem).coeffs);
            power = self.mul(&power, &gen);
        }
        rows
    }
}

impl NfElem {
    /// Power-basis coefficients.
    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    /// Whether the element is zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(Zero::is_zero)
    }

    /// Returns the element as a rational if it lies in `Q`.
    pub fn as_rational(&self) -> Option<&BigRational> {
        if self.coeffs[1..].iter().all(Zero::is_zero) {
            self.coeffs.first()
        } else {
            None
        }
    }

    /// Sum of two elements of the same field.
    pub fn add(&self, other: &Self) -> Self {
        Self {
            coeffs: self
                .coeffs
                .iter()
                .zip(&other.coeffs)
                .map(|(a, b)| a + b)
                .collect(),
        }
    }

    /// Difference of two elements of the same field.
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            coeffs: self
                .coeffs
                .iter()
                .zip(&other.coeffs)
                .map(|(a, b)| a - b)
                .collect(),
        }
    }

    /// Additive inverse.
    pub fn neg(&self) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }

    /// Multiplies every coefficient by a rational.
    pub fn scale(&self, factor: &BigRational) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| c * factor).collect(),
        }
    }

    /// Least common multiple of the coefficient denominators.
    pub fn common_denominator(&self) -> BigInt {
        self.coeffs
            .iter()
            .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()))
    }
}
