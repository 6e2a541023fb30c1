use crate::aggregate::AggregateResult;
use crate::query::QueryOutput;
use crate::store::Row;
use csv_lens_common::{CsvLensError, DisplayConfig, OutputFormat, Result};
use serde_json::{Map, Value};

pub fn format_value(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{value:.p$}"),
        None => format!("{value}"),
    }
}

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line
}

fn cells_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, &w) in cells.zip(widths) {
        line.push_str(&format!(" {cell:<w$} |"));
    }
    line
}

// --- table output ---

/// Bordered table: a dash line above the header, under it, and closing the body.
pub fn format_table(columns: &[String], rows: &[Row]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r.values().get(i).map_or(0, |v| v.chars().count()))
                .fold(h.chars().count(), usize::max)
        })
        .collect();
    let line = border(&widths);
    let mut out = vec![line.clone(), cells_line(columns.iter().map(String::as_str), &widths), line.clone()];
    for row in rows {
        out.push(cells_line(row.values().iter().map(String::as_str), &widths));
    }
    out.push(line);
    out.join("\n")
}

/// Three-row box: operation name over its value.
pub fn format_scalar(result: &AggregateResult, precision: Option<usize>) -> String {
    let name = result.op.name();
    let value = format_value(result.value, precision);
    let w = name.chars().count().max(value.chars().count());
    let line = border(&[w]);
    [line.clone(), cells_line([name].into_iter(), &[w]), line.clone(), cells_line([value.as_str()].into_iter(), &[w]), line]
        .join("\n")
}

// --- JSON output ---

pub fn rows_to_json(rows: &[Row]) -> Value {
    Value::Array(
        rows.iter()
            .map(|r| Value::Object(r.iter().map(|(k, v)| (k.to_string(), Value::from(v))).collect::<Map<_, _>>()))
            .collect(),
    )
}

pub fn scalar_to_json(result: &AggregateResult) -> Result<Value> {
    serde_json::to_value(result).map_err(|e| CsvLensError::Other(e.to_string()))
}

/// Render a query result the way the display config asks for. `columns` is the
/// store's schema, used for the table header.
pub fn render(output: &QueryOutput, columns: &[String], display: &DisplayConfig) -> Result<String> {
    match display.format {
        OutputFormat::Table => Ok(match output {
            QueryOutput::Rows(rows) if rows.is_empty() => display.empty_message.clone(),
            QueryOutput::Rows(rows) => format_table(columns, rows),
            QueryOutput::Scalar(r) => format_scalar(r, display.precision),
        }),
        OutputFormat::Json => {
            let doc = match output {
                QueryOutput::Rows(rows) => rows_to_json(rows),
                QueryOutput::Scalar(r) => scalar_to_json(r)?,
            };
            serde_json::to_string_pretty(&doc).map_err(|e| CsvLensError::Other(e.to_string()))
        }
    }
}
