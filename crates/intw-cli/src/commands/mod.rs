use std::error::Error;
use std::fs;
use std::path::Path;

use intw_rep::{from_json_slice, Representation, RepresentationData};

pub mod hom_basis;
pub mod lattice;

pub(crate) fn load_representation(path: &Path) -> Result<Representation, Box<dyn Error>> {
    let bytes = fs::read(path).map_err(|err| format!("reading {}: {err}", path.display()))?;
    let data: RepresentationData = from_json_slice(&bytes)?;
    Ok(data.to_representation()?)
}

pub(crate) fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
