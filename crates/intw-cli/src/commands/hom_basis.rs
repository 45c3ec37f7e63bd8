use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use intw_rep::{hom_basis, to_canonical_json_bytes, HomBasisReport, SolverOpts, VerificationPolicy};
use serde_json::json;

use super::{load_representation, write_json};

fn parse_policy(value: &str) -> Result<VerificationPolicy, Box<dyn Error>> {
    match value {
        "retry_failing" => Ok(VerificationPolicy::RetryFailing),
        "drop_all" => Ok(VerificationPolicy::DropAll),
        other => Err(format!("unknown verification policy '{other}'").into()),
    }
}

#[derive(Args, Debug)]
pub struct HomBasisArgs {
    /// Source representation (JSON).
    #[arg(long)]
    pub a: PathBuf,
    /// Target representation (JSON).
    #[arg(long)]
    pub b: PathBuf,
    /// Optional YAML file with solver options.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory.
    #[arg(long)]
    pub out: PathBuf,
    /// Master seed, overriding the config.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Prime budget, overriding the config.
    #[arg(long)]
    pub max_primes: Option<usize>,
    /// "retry_failing" or "drop_all", overriding the config.
    #[arg(long)]
    pub verification: Option<String>,
}

fn load_opts(args: &HomBasisArgs) -> Result<SolverOpts, Box<dyn Error>> {
    let mut opts = match &args.config {
        Some(path) => serde_yaml::from_str(&fs::read_to_string(path)?)?,
        None => SolverOpts::default(),
    };
    if let Some(seed) = args.seed {
        opts.seed = seed;
    }
    if let Some(max_primes) = args.max_primes {
        opts.max_primes = max_primes;
    }
    if let Some(policy) = &args.verification {
        opts.verification = parse_policy(policy)?;
    }
    Ok(opts)
}

pub fn run(args: &HomBasisArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let a = load_representation(&args.a)?;
    let b = load_representation(&args.b)?;
    let opts = load_opts(args)?;

    let outcome = hom_basis(&a, &b, &opts)?;
    let report = HomBasisReport::new(&a, &b, &opts, &outcome)?;

    fs::write(args.out.join("hom_basis.json"), to_canonical_json_bytes(&report)?)?;
    write_json(
        args.out.join("summary.json"),
        &json!({
            "dimension": report.basis.len(),
            "dim_a": report.dim_a,
            "dim_b": report.dim_b,
            "primes_used": report.stats.primes_used,
            "primes_skipped": report.stats.primes_skipped,
            "modulus_bits": report.stats.modulus_bits,
            "basis_hash": report.basis_hash,
        }),
    )?;
    log::info!("{} intertwiner(s) written to {}", report.basis.len(), args.out.display());
    Ok(())
}
