use crate::expr::{AggOp, Aggregation};
use crate::store::Row;
use csv_lens_common::{CsvLensError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateResult {
    pub op: AggOp,
    pub value: f64,
}

/// Serializes as a single-entry map, `{"avg": 4.85}`.
impl Serialize for AggregateResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.op.name(), &self.value)?;
        map.end()
    }
}

/// Reduce `agg.column` over `rows`.
///
/// Checks run in order: non-empty input, column present in the first row's
/// header, every cell numeric, supported operation. No partial results.
pub fn aggregate(rows: &[Row], agg: &Aggregation) -> Result<AggregateResult> {
    let first = rows
        .first()
        .ok_or_else(|| CsvLensError::InvalidColumn(format!("cannot aggregate '{}' over an empty row set", agg.column)))?;
    if !first.has_column(&agg.column) {
        return Err(CsvLensError::InvalidColumn(format!(
            "column '{}' not found (available: {})",
            agg.column,
            first.columns().join(", ")
        )));
    }
    let values = numeric_column(rows, &agg.column)?;
    let op = agg.op()?;
    let value = match op {
        AggOp::Avg => values.iter().sum::<f64>() / values.len() as f64,
        AggOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        AggOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    log::debug!("{op}({}) over {} rows = {value}", agg.column, values.len());
    Ok(AggregateResult { op, value })
}

fn numeric_column(rows: &[Row], column: &str) -> Result<Vec<f64>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let raw = row
                .get(column)
                .ok_or_else(|| CsvLensError::InvalidColumn(format!("column '{column}' missing in row {}", i + 1)))?;
            raw.trim().parse::<f64>().map_err(|_| {
                CsvLensError::InvalidColumn(format!("column '{column}' is not numeric: '{raw}' in row {}", i + 1))
            })
        })
        .collect()
}
