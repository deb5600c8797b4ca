//! Binary population snapshots (§6 "Persisted state", §4.10).
//!
//! Format is deliberately opaque to everything outside this module. Only
//! the round-trip contract (`load(save(p)) == p`, up to fitness caching)
//! is part of the interface. Implemented with `bincode`'s `serde`
//! integration (see DESIGN.md).

use crate::error::SchedulerError;
use crate::genome::Individual;
use anyhow::Result;
use std::path::Path;

fn config() -> bincode::config::Configuration {
    bincode::config::standard()
}

/// Writes `population` to `path` as an opaque binary snapshot.
pub fn save_population(path: &Path, population: &[Individual]) -> Result<()> {
    let bytes = bincode::serde::encode_to_vec(population, config()).map_err(|e| {
        SchedulerError::Persistence {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;
    std::fs::write(path, bytes).map_err(|e| SchedulerError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

/// Reads a population previously written by [`save_population`].
pub fn load_population(path: &Path) -> Result<Vec<Individual>> {
    let bytes = std::fs::read(path).map_err(|e| SchedulerError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;
    let (population, _) =
        bincode::serde::decode_from_slice(&bytes, config()).map_err(|e| {
            SchedulerError::Persistence {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
    Ok(population)
}
