use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use intw_rep::{to_canonical_json_bytes, to_integral, LatticeOpts, LatticeReport};

use super::{load_representation, write_json};

#[derive(Args, Debug)]
pub struct LatticeArgs {
    /// Representation (JSON) over any number field.
    #[arg(long)]
    pub rep: PathBuf,
    /// Output directory.
    #[arg(long)]
    pub out: PathBuf,
    /// Enlargement steps before giving up.
    #[arg(long, default_value_t = 256)]
    pub max_iterations: usize,
}

pub fn run(args: &LatticeArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let rep = load_representation(&args.rep)?;
    let opts = LatticeOpts {
        max_iterations: args.max_iterations,
    };

    let outcome = to_integral(&rep, &opts)?;
    let report = LatticeReport::new(&rep, &opts, &outcome)?;

    fs::write(args.out.join("lattice_report.json"), to_canonical_json_bytes(&report)?)?;
    write_json(args.out.join("representation.json"), &report.representation)?;
    Ok(())
}
