use crate::expr::{CmpOp, FilterCondition};
use crate::store::Row;
use csv_lens_common::{CsvLensError, Result};

/// A cell after per-row coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Numeric(f64),
    Text(&'a str),
}

/// Numeric when the text parses as f64, otherwise the text itself.
pub fn coerce(raw: &str) -> CellValue<'_> {
    match raw.trim().parse::<f64>() {
        Ok(v) => CellValue::Numeric(v),
        Err(_) => CellValue::Text(raw),
    }
}

fn cmp_f64(v: f64, op: CmpOp, cv: f64) -> bool {
    match op { CmpOp::Eq => v == cv, CmpOp::Lt => v < cv, CmpOp::Le => v <= cv, CmpOp::Gt => v > cv, CmpOp::Ge => v >= cv }
}

fn cmp_str(v: &str, op: CmpOp, cv: &str) -> bool {
    match op { CmpOp::Eq => v == cv, CmpOp::Lt => v < cv, CmpOp::Le => v <= cv, CmpOp::Gt => v > cv, CmpOp::Ge => v >= cv }
}

/// Numeric comparison only when both sides coerce to numbers; any other
/// pairing compares the raw text.
pub fn compare(cell: &str, op: CmpOp, value: &str) -> bool {
    match (coerce(cell), coerce(value)) {
        (CellValue::Numeric(a), CellValue::Numeric(b)) => cmp_f64(a, op, b),
        _ => cmp_str(cell, op, value),
    }
}

/// Rows matching `cond`, in input order.
///
/// The operator and the column are both validated before any row is scanned.
pub fn filter_rows(rows: &[Row], cond: &FilterCondition) -> Result<Vec<Row>> {
    let op = cond.op()?;
    if let Some(first) = rows.first() {
        if !first.has_column(&cond.column) {
            return Err(CsvLensError::InvalidColumn(format!(
                "column '{}' not found (available: {})",
                cond.column,
                first.columns().join(", ")
            )));
        }
    }
    let mut out = Vec::new();
    for row in rows {
        let cell = row
            .get(&cond.column)
            .ok_or_else(|| CsvLensError::InvalidColumn(format!("column '{}' not found", cond.column)))?;
        if compare(cell, op, &cond.value) {
            out.push(row.clone());
        }
    }
    log::debug!("filter {}{}{} kept {}/{} rows", cond.column, op, cond.value, out.len(), rows.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RowStore;
    use csv_lens_common::{CsvConfig, ErrorKind};

    fn phones() -> RowStore {
        let text = "name,brand,price,rating\n\
                    iphone,apple,999,4.9\n\
                    galaxy,samsung,1199,4.8\n\
                    redmi,xiaomi,199,4.6\n\
                    poco,xiaomi,299,4.4\n";
        RowStore::from_reader(text.as_bytes(), &CsvConfig::default()).unwrap()
    }

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter().filter_map(|r| r.get("name")).collect()
    }

    fn run(col: &str, op: CmpOp, val: &str) -> Vec<Row> {
        filter_rows(phones().rows(), &FilterCondition::new(col, op, val)).unwrap()
    }

    #[test]
    fn coerce_tags_numbers_and_text() {
        assert_eq!(coerce("4.5"), CellValue::Numeric(4.5));
        assert_eq!(coerce(" 12 "), CellValue::Numeric(12.0));
        assert_eq!(coerce("1e3"), CellValue::Numeric(1000.0));
        assert_eq!(coerce("apple"), CellValue::Text("apple"));
        assert_eq!(coerce(""), CellValue::Text(""));
    }

    #[test]
    fn numeric_not_lexicographic() {
        // "1199" < "999" as text, but greater as a number
        assert!(compare("1199", CmpOp::Gt, "999"));
        assert!(!compare("1199", CmpOp::Lt, "999"));
        assert!(compare("4.50", CmpOp::Eq, "4.5"));
    }

    #[test]
    fn text_fallback_when_either_side_is_text() {
        assert!(!compare("apple", CmpOp::Eq, "samsung"));
        assert!(compare("apple", CmpOp::Lt, "samsung"));
        assert!(compare("abc", CmpOp::Gt, "100")); // cell text, value numeric
        assert!(compare("100", CmpOp::Lt, "abc")); // cell numeric, value text
    }

    #[test]
    fn eq_on_text() {
        assert_eq!(names(&run("brand", CmpOp::Eq, "samsung")), ["galaxy"]);
    }

    #[test]
    fn gt() {
        assert_eq!(names(&run("price", CmpOp::Gt, "1000")), ["galaxy"]);
    }

    #[test]
    fn lt() {
        assert_eq!(names(&run("rating", CmpOp::Lt, "4.5")), ["poco"]);
    }

    #[test]
    fn ge_keeps_order() {
        assert_eq!(names(&run("price", CmpOp::Ge, "999")), ["iphone", "galaxy"]);
    }

    #[test]
    fn le_keeps_order() {
        assert_eq!(names(&run("rating", CmpOp::Le, "4.6")), ["redmi", "poco"]);
    }

    #[test]
    fn idempotent_for_every_operator() {
        let store = phones();
        for op in CmpOp::BY_PRIORITY {
            let cond = FilterCondition::new("price", op, "299");
            let once = filter_rows(store.rows(), &cond).unwrap();
            let twice = filter_rows(&once, &cond).unwrap();
            assert_eq!(once, twice, "operator {op}");
        }
    }

    #[test]
    fn mixed_column_decided_per_row() {
        let text = "v\n10\nn/a\n2\n";
        let store = RowStore::from_reader(text.as_bytes(), &CsvConfig::default()).unwrap();
        let kept = filter_rows(store.rows(), &FilterCondition::new("v", CmpOp::Gt, "3")).unwrap();
        // 10 > 3 numerically, "n/a" > "3" textually, 2 > 3 is false
        let vals: Vec<&str> = kept.iter().filter_map(|r| r.get("v")).collect();
        assert_eq!(vals, ["10", "n/a"]);
    }

    #[test]
    fn unknown_operator_rejected() {
        let cond = FilterCondition { column: "brand".into(), operator: "sgdfgsdfg".into(), value: "samsung".into() };
        assert_eq!(filter_rows(phones().rows(), &cond).unwrap_err().kind(), ErrorKind::InvalidOperator);
        // checked before rows are looked at
        assert_eq!(filter_rows(&[], &cond).unwrap_err().kind(), ErrorKind::InvalidOperator);
    }

    #[test]
    fn missing_column_rejected() {
        let err = filter_rows(phones().rows(), &FilterCondition::new("color", CmpOp::Eq, "red")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidColumn);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(filter_rows(&[], &FilterCondition::new("x", CmpOp::Eq, "1")).unwrap().is_empty());
    }
}
