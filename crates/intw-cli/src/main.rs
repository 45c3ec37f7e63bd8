use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    hom_basis::{self, HomBasisArgs},
    lattice::{self, LatticeArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "intw", about = "Intertwiners and integral forms of number-field representations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a verified basis of the intertwiners between two representations.
    HomBasis(HomBasisArgs),
    /// Find a stable lattice and write the integral representation on it.
    Lattice(LatticeArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::HomBasis(args) => hom_basis::run(&args),
        Command::Lattice(args) => lattice::run(&args),
    };
    if let Err(err) = &result {
        log::error!("{err}");
    }
    result
}
