//! Result rendering for table, JSON and CSV output.

use std::io::Write;

use serde::Serialize;
use tariff_core::traits::{BubbleSize, CostDelta};
use tariff_engine::ScenarioSummary;

use crate::config::OutputFormat;
use crate::Result;

/// Write serialisable rows as JSON or CSV.
///
/// Table rendering is row-type specific and handled by the callers.
pub fn write_records<W: Write, T: Serialize>(
    out: &mut W,
    rows: &[T],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {}
    }
    Ok(())
}

/// Cost delta rows as an aligned table.
pub fn write_delta_table<W: Write, R: CostDelta>(
    out: &mut W,
    rows: &[R],
    bubble: BubbleSize,
) -> Result<()> {
    let width = rows
        .iter()
        .map(|r| r.label().len())
        .max()
        .unwrap_or(0)
        .max("Label".len());

    writeln!(
        out,
        "{:<width$}  {:<12}  {:>14}  {:>14}  {:>12}  {:>8}  {:>12}",
        "Label",
        "Country",
        "Baseline",
        "Scenario",
        "Delta",
        "Delta %",
        "Bubble",
        width = width
    )?;
    writeln!(out, "{}", "-".repeat(width + 86))?;
    for row in rows {
        writeln!(
            out,
            "{:<width$}  {:<12}  {:>14.2}  {:>14.2}  {:>+12.2}  {:>+7.1}%  {:>12.2}",
            row.label(),
            row.source_country(),
            row.baseline_total_cost(),
            row.scenario_total_cost(),
            row.delta_amount(),
            row.delta_pct() * 100.0,
            bubble.size_of(row),
            width = width
        )?;
    }
    Ok(())
}

/// Portfolio totals under the table.
pub fn write_summary<W: Write>(out: &mut W, summary: &ScenarioSummary) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Rows: {}  Baseline: {:.2}  Scenario: {:.2}  Delta: {:+.2} ({:+.1}%)  Up: {}  Down: {}",
        summary.row_count,
        summary.baseline_total_cost,
        summary.scenario_total_cost,
        summary.delta_amount,
        summary.delta_pct * 100.0,
        summary.increased,
        summary.decreased
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tariff_core::types::{PartRecord, TariffOverrideMap};
    use tariff_engine::{compute_scenario, summarise, ScenarioResultRecord};

    fn rows() -> Vec<ScenarioResultRecord> {
        let parts = vec![
            PartRecord::new("P1", "Motor housing", "China")
                .with_commodity("Steel")
                .with_unit_cost(12.5)
                .with_tariff_rate(20.0)
                .with_warehouse_cost(0.25)
                .with_indirect_cost(0.5)
                .with_inventory_position(100.0)
                .with_baseline_total_cost(1550.0),
            PartRecord::new("P2", "Fastener", "Mexico")
                .with_unit_cost(0.1)
                .with_inventory_position(10_000.0)
                .with_baseline_total_cost(1000.0),
        ];
        let overrides = TariffOverrideMap::new().with_rate("China", 50.0).unwrap();
        compute_scenario(&parts, &overrides).unwrap()
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_lists_every_row() {
        let rows = rows();
        let text = render(|out| write_delta_table(out, &rows, BubbleSize::InventoryPosition));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Label"));
        assert!(lines[2].starts_with("P1"));
        assert!(lines[2].contains("1950.00"));
        assert!(lines[2].contains("+400.00"));
        assert!(lines[3].contains("+0.0%"));
    }

    #[test]
    fn test_csv_output_has_header_and_rows() {
        let rows = rows();
        let text = render(|out| write_records(out, &rows, OutputFormat::Csv));
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("part_id,description,commodity,source_country"));
        assert!(lines.next().unwrap().starts_with("P1,Motor housing,Steel,China"));
        assert!(lines.next().unwrap().starts_with("P2,Fastener,,Mexico"));
    }

    #[test]
    fn test_json_output_parses_back() {
        let rows = rows();
        let text = render(|out| write_records(out, &rows, OutputFormat::Json));
        let parsed: Vec<ScenarioResultRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_summary_line() {
        let rows = rows();
        let text = render(|out| write_summary(out, &summarise(&rows)));
        assert!(text.contains("Rows: 2"));
        assert!(text.contains("Up: 1"));
    }
}
