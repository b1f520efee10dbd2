//! Boundary validation of the baseline table.

use std::collections::HashSet;

use tariff_core::types::{EngineError, PartRecord, Result};

/// Validate every record and the uniqueness of `part_id`.
///
/// Runs to completion before any row is costed, so callers never observe
/// partial results. The first violation is returned.
pub fn validate_records(records: &[PartRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(record.part_id.as_str()) {
            return Err(EngineError::DuplicatePart(record.part_id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_is_valid() {
        assert!(validate_records(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_part_id() {
        let records = vec![
            PartRecord::new("P1", "Bolt", "China"),
            PartRecord::new("P2", "Nut", "China"),
            PartRecord::new("P1", "Bolt (alt)", "Vietnam"),
        ];
        assert_eq!(
            validate_records(&records),
            Err(EngineError::DuplicatePart("P1".to_string()))
        );
    }

    #[test]
    fn test_row_error_surfaces() {
        let records = vec![
            PartRecord::new("P1", "Bolt", "China"),
            PartRecord::new("P2", "Nut", "China").with_unit_cost(-1.0),
        ];
        let err = validate_records(&records).unwrap_err();
        assert!(err.to_string().contains("P2"));
    }
}
