use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{AppError, Result};
use revisent_core::ImpactFactor;
use revisent_db::Db;

pub fn apply_impact_defaults(db_path: &Path, defaults_path: &Path) -> Result<()> {
    let factors = if defaults_path.exists() {
        load_impact_defaults(defaults_path)?
    } else {
        load_initial_impact()?
    };
    let mut db = Db::open(db_path)?;
    db.replace_impact_factors(&factors)?;
    Ok(())
}

/// Mirrors the stored factors into the defaults file so they survive a
/// fresh database.
pub fn sync_impact_defaults(db_path: &Path, defaults_path: &Path) -> Result<()> {
    let db = Db::open(db_path)?;
    let factors = db.list_impact_factors()?;
    if factors.is_empty() && !defaults_path.exists() {
        return Ok(());
    }
    write_impact_defaults(defaults_path, &factors)
}

pub fn load_impact_defaults(path: &Path) -> Result<Vec<ImpactFactor>> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(AppError::from)
}

pub fn load_initial_impact() -> Result<Vec<ImpactFactor>> {
    let data = include_str!("../initial-impact.json");
    serde_json::from_str(data).map_err(AppError::from)
}

pub fn write_impact_defaults(path: &Path, factors: &[ImpactFactor]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, factors).map_err(AppError::from)
}
