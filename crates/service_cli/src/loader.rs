//! Part table ingestion.
//!
//! CSV headers map one-to-one onto `PartRecord` fields. `.json` files are
//! read as an array of the same records. Missing columns fail the load;
//! they are never filled with zero.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tariff_core::types::PartRecord;
use tracing::{debug, info};

use crate::{CliError, Result};

/// Load a part table from CSV or JSON, chosen by file extension.
pub fn load_parts(path: &Path) -> Result<Vec<PartRecord>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let records = if is_json {
        let reader = BufReader::new(File::open(path)?);
        serde_json::from_reader(reader)?
    } else {
        read_csv(File::open(path)?)?
    };

    info!("Loaded {} parts from {}", records.len(), path.display());
    Ok(records)
}

/// Parse CSV part rows from any reader.
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<Vec<PartRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line, row) in csv_reader.deserialize::<PartRecord>().enumerate() {
        let record = row?;
        debug!("row {}: {}", line + 1, record.part_id);
        records.push(record);
    }
    Ok(records)
}
