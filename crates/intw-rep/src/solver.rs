//! Multi-modular computation of intertwiner bases.
//!
//! Both representations are reduced modulo a ladder of primes that split
//! completely in the base field. Each residue field is solved independently,
//! the per-field bases are interpolated back to power-basis coordinates,
//! accumulated by CRT across primes, and rationally reconstructed. A
//! reconstructed candidate is only accepted after an exact check against
//! every generator pair.
//!
//! A prime whose pivot signature equals the characteristic-zero one yields
//! exactly the reduction of the canonical basis, so accumulated residues are
//! never re-seeded. Residues that are wrong despite matching pivots can only
//! come from an engine breaking the [`FiniteFieldHomSolver`] contract; such
//! candidates fail verification on every round until the prime budget runs
//! out.

use std::time::Instant;

use intw_arith::crt::crt_combine;
use intw_arith::linalg::FpMatrix;
use intw_arith::primes::PrimeLadder;
use intw_arith::ratrecon::rational_reconstruction;
use intw_core::errors::{ErrorInfo, IntwError};
use intw_core::rng::RngHandle;
use intw_field::{commutes_with, ModularContext, NfMatrix, NumberField};
use num_bigint::BigInt;
use num_rational::BigRational;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hom::{FiniteFieldHomSolver, FpHomBasis, LinearHomSolver};
use crate::module::Representation;

fn default_start_prime() -> u64 {
    127
}

fn default_max_primes() -> usize {
    4096
}

fn default_parallel() -> bool {
    true
}

// Salt separating the isomorphism-test substreams from the per-prime ones.
const ISO_SUBSTREAM: u64 = 0x1505;
const ISO_TRIALS: u64 = 4;
const ISO_PRIMES_PER_TRIAL: usize = 3;

/// What to do when every candidate reconstructs but some fail the exact check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPolicy {
    /// Accept only a round in which every candidate verifies; otherwise
    /// discard the round's reconstructions and keep accumulating all of them.
    DropAll,
    /// Freeze candidates that verify and keep accumulating only the failing ones.
    #[default]
    RetryFailing,
}

/// Options controlling the intertwiner solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverOpts {
    /// The ladder starts at the first prime above this value.
    #[serde(default = "default_start_prime")]
    pub start_prime: u64,
    /// Maximum number of primes visited, skipped ones included.
    #[serde(default = "default_max_primes")]
    pub max_primes: usize,
    /// Optional wall-clock limit in milliseconds.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
    /// Handling of partially verified rounds.
    #[serde(default)]
    pub verification: VerificationPolicy,
    /// Master seed for root splitting and isomorphism trials.
    #[serde(default)]
    pub seed: u64,
    /// Solve the residue fields of one prime on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel_components: bool,
}

impl Default for SolverOpts {
    fn default() -> Self {
        Self {
            start_prime: default_start_prime(),
            max_primes: default_max_primes(),
            time_limit_ms: None,
            verification: VerificationPolicy::default(),
            seed: 0,
            parallel_components: default_parallel(),
        }
    }
}

/// Bookkeeping reported alongside the basis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SolverStats {
    /// Primes whose data entered the final accumulator.
    pub primes_used: usize,
    /// Primes rejected (no complete splitting, vanishing denominators,
    /// disagreeing residue fields, or a worse pivot signature).
    pub primes_skipped: usize,
    /// Times the accumulator was discarded for a better pivot signature.
    pub restarts: usize,
    /// Last prime visited.
    pub last_prime: u64,
    /// Bit length of the final accumulated modulus.
    pub modulus_bits: u64,
    /// Rounds in which reconstruction was attempted.
    pub verification_rounds: usize,
    /// Candidates that reconstructed but failed the exact check, summed over rounds.
    pub failed_checks: usize,
}

/// Verified basis plus statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomBasisOutcome {
    /// Basis matrices of shape `dim(A) x dim(B)` with `A_i * T == T * B_i`.
    pub basis: Vec<NfMatrix>,
    /// Solver statistics.
    pub stats: SolverStats,
}

struct Candidate {
    index: usize,
    residues: Vec<BigInt>,
}

struct Accumulator {
    modulus: BigInt,
    primes: usize,
    pivots: Vec<usize>,
    active: Vec<Candidate>,
    settled: Vec<(usize, NfMatrix)>,
}

enum Signature {
    Better,
    Same,
    Worse,
}

impl Accumulator {
    fn seed(p: u64, pivots: Vec<usize>, lifted: Vec<Vec<BigInt>>) -> Self {
        Self {
            modulus: BigInt::from(p),
            primes: 1,
            pivots,
            active: lifted
                .into_iter()
                .enumerate()
                .map(|(index, residues)| Candidate { index, residues })
                .collect(),
            settled: Vec::new(),
        }
    }

    // Over a characteristic-zero field the pivots of the linear system have
    // maximal count and are lexicographically smallest; reduction modulo a
    // bad prime can only lose rank or push pivots right.
    fn compare(&self, pivots: &[usize]) -> Signature {
        match pivots.len().cmp(&self.pivots.len()) {
            std::cmp::Ordering::Greater => Signature::Better,
            std::cmp::Ordering::Less => Signature::Worse,
            std::cmp::Ordering::Equal => match pivots.cmp(self.pivots.as_slice()) {
                std::cmp::Ordering::Less => Signature::Better,
                std::cmp::Ordering::Equal => Signature::Same,
                std::cmp::Ordering::Greater => Signature::Worse,
            },
        }
    }

    fn combine(&mut self, p: u64, lifted: &[Vec<BigInt>]) -> Result<(), IntwError> {
        let prime = BigInt::from(p);
        for candidate in &mut self.active {
            let fresh = &lifted[candidate.index];
            for (acc, new) in candidate.residues.iter_mut().zip(fresh) {
                *acc = crt_combine(acc, &self.modulus, new, &prime)?;
            }
        }
        self.modulus *= prime;
        self.primes += 1;
        Ok(())
    }

    fn finish(mut self) -> Vec<NfMatrix> {
        self.settled.sort_by_key(|(index, _)| *index);
        self.settled.into_iter().map(|(_, m)| m).collect()
    }
}

/// Computes a basis of the intertwiners from `a` to `b` with the default engine.
pub fn hom_basis(
    a: &Representation,
    b: &Representation,
    opts: &SolverOpts,
) -> Result<HomBasisOutcome, IntwError> {
    hom_basis_with(a, b, opts, &LinearHomSolver)
}

/// Computes a basis of `{T : A_i * T == T * B_i}` using `engine` over each residue field.
///
/// Returns the canonical basis (one matrix per free coordinate of the
/// linear system) or an error when the inputs are inconsistent or the
/// configured bounds run out before a verified answer exists.
pub fn hom_basis_with<S>(
    a: &Representation,
    b: &Representation,
    opts: &SolverOpts,
    engine: &S,
) -> Result<HomBasisOutcome, IntwError>
where
    S: FiniteFieldHomSolver + ?Sized,
{
    check_compatible(a, b)?;
    let field = a.field();
    let (rows, cols) = (a.dim(), b.dim());
    let mut stats = SolverStats::default();

    if a.generator_count() == 0 {
        return Ok(HomBasisOutcome {
            basis: elementary_basis(field, rows, cols)?,
            stats,
        });
    }

    let started = Instant::now();
    let mut ladder = PrimeLadder::new(opts.start_prime);
    let mut acc: Option<Accumulator> = None;

    loop {
        check_bounds(opts, &ladder, acc.as_ref(), &stats, started)?;
        let p = ladder.advance()?;
        stats.last_prime = p;

        let Some(images) = reduce_pair(a, b, p, opts.seed)? else {
            log::debug!("prime {p}: no complete splitting or vanishing denominator, skipped");
            ladder.skip();
            continue;
        };
        let components = images.ctx.components();
        let solved = solve_components(engine, &images, opts.parallel_components)?;

        let pivots = solved[0].pivots.clone();
        if solved.iter().any(|s| s.pivots != pivots || s.basis.len() != solved[0].basis.len()) {
            log::debug!("prime {p}: residue fields disagree on the pivot signature, skipped");
            ladder.skip();
            continue;
        }
        if solved[0].basis.is_empty() {
            // Rank can only drop modulo p, so an empty kernel here is empty over the field.
            log::info!("prime {p}: no equivariant maps, returning the empty basis");
            stats.primes_used = 1;
            stats.primes_skipped = ladder.skipped();
            stats.modulus_bits = BigInt::from(p).bits();
            return Ok(HomBasisOutcome {
                basis: Vec::new(),
                stats,
            });
        }

        let lifted = lift_basis(&images.ctx, &solved)?;

        let mut state = match acc.take() {
            None => Accumulator::seed(p, pivots, lifted),
            Some(mut state) => match state.compare(&pivots) {
                Signature::Better => {
                    log::warn!(
                        "prime {p}: better pivot signature ({} pivots), discarding {} earlier primes",
                        pivots.len(),
                        state.primes
                    );
                    stats.restarts += 1;
                    Accumulator::seed(p, pivots, lifted)
                }
                Signature::Worse => {
                    log::debug!("prime {p}: worse pivot signature, skipped");
                    ladder.skip();
                    acc = Some(state);
                    continue;
                }
                Signature::Same => {
                    state.combine(p, &lifted)?;
                    state
                }
            },
        };

        log::debug!(
            "prime {p}: {components} residue field(s), modulus {} bits, {} active candidate(s)",
            state.modulus.bits(),
            state.active.len()
        );

        if state.primes >= 2 {
            stats.verification_rounds += 1;
            stats.failed_checks += reconstruct_round(&mut state, a, b, rows, cols, opts.verification)?;
            if state.active.is_empty() {
                stats.primes_used = state.primes;
                stats.primes_skipped = ladder.skipped();
                stats.modulus_bits = state.modulus.bits();
                let basis = state.finish();
                log::info!(
                    "verified {} intertwiner(s) after {} prime(s), modulus {} bits",
                    basis.len(),
                    stats.primes_used,
                    stats.modulus_bits
                );
                return Ok(HomBasisOutcome { basis, stats });
            }
        }
        acc = Some(state);
    }
}

fn check_compatible(a: &Representation, b: &Representation) -> Result<(), IntwError> {
    if a.field() != b.field() {
        return Err(IntwError::Precondition(
            ErrorInfo::new("field-mismatch", "representations have different base fields")
                .with_context("a", a.field())
                .with_context("b", b.field()),
        ));
    }
    if a.group() != b.group() {
        return Err(IntwError::Precondition(
            ErrorInfo::new("group-mismatch", "representations belong to different groups")
                .with_context("a", a.group())
                .with_context("b", b.group()),
        ));
    }
    if a.generator_count() != b.generator_count() {
        return Err(IntwError::Precondition(
            ErrorInfo::new("generator-count", "generator action counts differ")
                .with_context("a", a.generator_count())
                .with_context("b", b.generator_count()),
        ));
    }
    Ok(())
}

fn check_bounds(
    opts: &SolverOpts,
    ladder: &PrimeLadder,
    acc: Option<&Accumulator>,
    stats: &SolverStats,
    started: Instant,
) -> Result<(), IntwError> {
    let exceeded = if ladder.visited() >= opts.max_primes {
        Some(("max-primes", "prime budget exhausted before a verified basis"))
    } else if opts
        .time_limit_ms
        .is_some_and(|limit| started.elapsed().as_millis() >= u128::from(limit))
    {
        Some(("time-limit", "time limit reached before a verified basis"))
    } else {
        None
    };
    let Some((code, message)) = exceeded else {
        return Ok(());
    };
    let mut info = ErrorInfo::new(code, message)
        .with_context("prime", ladder.current())
        .with_context("primes_visited", ladder.visited())
        .with_context("primes_skipped", ladder.skipped())
        .with_context("restarts", stats.restarts)
        .with_context("failed_checks", stats.failed_checks);
    if let Some(state) = acc {
        info = info
            .with_context("modulus_bits", state.modulus.bits())
            .with_context("active_candidates", state.active.len());
    }
    Err(IntwError::BoundExceeded(
        info.with_hint("raise max_primes / time_limit_ms or check the generator matrices"),
    ))
}

struct ReducedPair {
    ctx: ModularContext,
    // Indexed [component][generator].
    a: Vec<Vec<FpMatrix>>,
    b: Vec<Vec<FpMatrix>>,
}

fn reduce_pair(
    a: &Representation,
    b: &Representation,
    p: u64,
    seed: u64,
) -> Result<Option<ReducedPair>, IntwError> {
    let mut rng = RngHandle::substream(seed, p);
    let Some(ctx) = ModularContext::new(a.field(), p, &mut rng)? else {
        return Ok(None);
    };
    let Some(a_images) = reduce_generators(&ctx, a)? else {
        return Ok(None);
    };
    let Some(b_images) = reduce_generators(&ctx, b)? else {
        return Ok(None);
    };
    Ok(Some(ReducedPair {
        ctx,
        a: a_images,
        b: b_images,
    }))
}

fn reduce_generators(
    ctx: &ModularContext,
    rep: &Representation,
) -> Result<Option<Vec<Vec<FpMatrix>>>, IntwError> {
    let mut per_component = vec![Vec::with_capacity(rep.generator_count()); ctx.components()];
    for gen in rep.generators() {
        let Some(images) = ctx.reduce_matrix(gen)? else {
            return Ok(None);
        };
        for (component, image) in per_component.iter_mut().zip(images) {
            component.push(image);
        }
    }
    Ok(Some(per_component))
}

fn solve_components<S>(
    engine: &S,
    images: &ReducedPair,
    parallel: bool,
) -> Result<Vec<FpHomBasis>, IntwError>
where
    S: FiniteFieldHomSolver + ?Sized,
{
    if parallel && images.a.len() > 1 {
        images
            .a
            .par_iter()
            .zip(images.b.par_iter())
            .map(|(ga, gb)| engine.hom_basis(ga, gb))
            .collect()
    } else {
        images
            .a
            .iter()
            .zip(&images.b)
            .map(|(ga, gb)| engine.hom_basis(ga, gb))
            .collect()
    }
}

// One entry-major coefficient vector per basis index.
fn lift_basis(ctx: &ModularContext, solved: &[FpHomBasis]) -> Result<Vec<Vec<BigInt>>, IntwError> {
    let count = solved[0].basis.len();
    (0..count)
        .map(|idx| {
            let images: Vec<FpMatrix> = solved.iter().map(|s| s.basis[idx].clone()).collect();
            Ok(ctx
                .lift_matrices(&images)?
                .into_iter()
                .map(BigInt::from)
                .collect())
        })
        .collect()
}

// Returns the number of candidates that reconstructed but failed verification.
fn reconstruct_round(
    state: &mut Accumulator,
    a: &Representation,
    b: &Representation,
    rows: usize,
    cols: usize,
    policy: VerificationPolicy,
) -> Result<usize, IntwError> {
    let field = a.field();
    let mut reconstructed = Vec::with_capacity(state.active.len());
    for candidate in &state.active {
        let matrix = reconstruct(field, rows, cols, &candidate.residues, &state.modulus)?;
        reconstructed.push(matrix);
    }

    match policy {
        VerificationPolicy::DropAll => {
            if reconstructed.iter().any(Option::is_none) {
                return Ok(0);
            }
            let mut failed = 0;
            let mut verified = Vec::with_capacity(reconstructed.len());
            for (candidate, matrix) in state.active.iter().zip(reconstructed.into_iter().flatten()) {
                if is_intertwiner(a, b, &matrix)? {
                    verified.push((candidate.index, matrix));
                } else {
                    failed += 1;
                }
            }
            if failed == 0 {
                state.settled.extend(verified);
                state.active.clear();
            } else {
                log::warn!(
                    "{failed} candidate(s) reconstructed but failed verification at {} bits, round discarded",
                    state.modulus.bits()
                );
            }
            Ok(failed)
        }
        VerificationPolicy::RetryFailing => {
            let mut failed = 0;
            let mut still_active = Vec::with_capacity(state.active.len());
            let active = std::mem::take(&mut state.active);
            for (candidate, matrix) in active.into_iter().zip(reconstructed) {
                match matrix {
                    Some(matrix) if is_intertwiner(a, b, &matrix)? => {
                        state.settled.push((candidate.index, matrix));
                    }
                    Some(_) => {
                        failed += 1;
                        still_active.push(candidate);
                    }
                    None => still_active.push(candidate),
                }
            }
            if failed > 0 {
                log::warn!(
                    "{failed} candidate(s) failed verification at {} bits, retrying with more primes",
                    state.modulus.bits()
                );
            }
            state.active = still_active;
            Ok(failed)
        }
    }
}

fn reconstruct(
    field: &NumberField,
    rows: usize,
    cols: usize,
    residues: &[BigInt],
    modulus: &BigInt,
) -> Result<Option<NfMatrix>, IntwError> {
    let coeffs: Option<Vec<BigRational>> = residues
        .iter()
        .map(|r| rational_reconstruction(r, modulus))
        .collect();
    match coeffs {
        Some(coeffs) => NfMatrix::from_flat_coefficients(field, rows, cols, coeffs).map(Some),
        None => Ok(None),
    }
}

fn is_intertwiner(a: &Representation, b: &Representation, t: &NfMatrix) -> Result<bool, IntwError> {
    for (ga, gb) in a.generators().iter().zip(b.generators()) {
        if !commutes_with(ga, t, gb)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn elementary_basis(field: &NumberField, rows: usize, cols: usize) -> Result<Vec<NfMatrix>, IntwError> {
    (0..rows * cols)
        .map(|idx| {
            let mut entries = vec![field.zero(); rows * cols];
            entries[idx] = field.one();
            NfMatrix::from_entries(field, rows, cols, entries)
        })
        .collect()
}

/// Dimension of the endomorphism algebra of `rep`.
pub fn endomorphism_dimension(rep: &Representation, opts: &SolverOpts) -> Result<usize, IntwError> {
    Ok(hom_basis(rep, rep, opts)?.basis.len())
}

/// Decides whether `a` and `b` are isomorphic.
///
/// A random integer combination of the intertwiner basis is reduced modulo
/// a few split primes; a non-zero determinant proves an isomorphism. Several
/// combinations are tried before answering `false`, which is therefore
/// correct with overwhelming probability rather than with certainty.
pub fn is_isomorphic(a: &Representation, b: &Representation, opts: &SolverOpts) -> Result<bool, IntwError> {
    if a.dim() != b.dim() {
        check_compatible(a, b)?;
        return Ok(false);
    }
    let basis = hom_basis(a, b, opts)?.basis;
    if a.dim() == 0 {
        return Ok(true);
    }
    if basis.is_empty() {
        return Ok(false);
    }
    let field = a.field();
    for trial in 0..ISO_TRIALS {
        let mut rng = RngHandle::substream(opts.seed ^ ISO_SUBSTREAM, trial);
        let mut combination = NfMatrix::zeros(field, a.dim(), b.dim());
        for t in &basis {
            let coeff = field.from_int(rng.below(1 << 16) as i64 + 1);
            combination = combination.add(&t.scale(&coeff))?;
        }
        if has_unit_determinant(&combination, opts, &mut rng)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn has_unit_determinant(
    matrix: &NfMatrix,
    opts: &SolverOpts,
    rng: &mut RngHandle,
) -> Result<bool, IntwError> {
    let mut ladder = PrimeLadder::new(opts.start_prime);
    let mut tested = 0;
    while tested < ISO_PRIMES_PER_TRIAL && ladder.visited() < opts.max_primes {
        let p = ladder.advance()?;
        let Some(ctx) = ModularContext::new(matrix.field(), p, rng)? else {
            continue;
        };
        let Some(images) = ctx.reduce_matrix(matrix)? else {
            continue;
        };
        tested += 1;
        if images[0].determinant()? != 0 {
            return Ok(true);
        }
    }
    Ok(false)
}
