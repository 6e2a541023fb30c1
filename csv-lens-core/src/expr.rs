use csv_lens_common::{CsvLensError, Result};
use std::fmt;

// --- AST ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp { Gt, Ge, Lt, Le, Eq }

impl CmpOp {
    /// Match order: longer tokens first so `>=` is never split as `>` + `=value`.
    pub const BY_PRIORITY: [CmpOp; 5] = [CmpOp::Ge, CmpOp::Le, CmpOp::Gt, CmpOp::Lt, CmpOp::Eq];

    pub fn symbol(self) -> &'static str {
        match self { CmpOp::Gt => ">", CmpOp::Ge => ">=", CmpOp::Lt => "<", CmpOp::Le => "<=", CmpOp::Eq => "=" }
    }

    pub fn from_symbol(s: &str) -> Result<Self> {
        Self::BY_PRIORITY
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| CsvLensError::InvalidOperator(s.to_string()))
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.symbol()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggOp { Avg, Min, Max }

impl AggOp {
    pub fn name(self) -> &'static str {
        match self { AggOp::Avg => "avg", AggOp::Min => "min", AggOp::Max => "max" }
    }

    pub fn from_name(s: &str) -> Result<Self> {
        match s {
            "avg" => Ok(AggOp::Avg),
            "min" => Ok(AggOp::Min),
            "max" => Ok(AggOp::Max),
            other => Err(CsvLensError::InvalidAggregate(format!("unsupported operation '{other}' (use avg, min or max)"))),
        }
    }
}

impl fmt::Display for AggOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Keep rows where `row[column] operator value`.
///
/// `operator` stays textual until evaluation so that a hand-built condition
/// with an unknown symbol is rejected by the evaluator, not by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub column: String,
    pub operator: String,
    pub value: String,
}

impl FilterCondition {
    pub fn new(column: impl Into<String>, op: CmpOp, value: impl Into<String>) -> Self {
        Self { column: column.into(), operator: op.symbol().to_string(), value: value.into() }
    }

    pub fn op(&self) -> Result<CmpOp> {
        CmpOp::from_symbol(&self.operator)
    }
}

/// Reduce `row[column]` across a row set with `operator`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub column: String,
    pub operator: String,
}

impl Aggregation {
    pub fn op(&self) -> Result<AggOp> {
        AggOp::from_name(&self.operator)
    }
}

// --- parsers ---

/// Parse `<column><op><value>`, e.g. `price>=999`.
///
/// The first operator (in `CmpOp::BY_PRIORITY` order) present in the input
/// decides the split; it must occur exactly once with text on both sides.
pub fn parse_filter(expr: &str) -> Result<FilterCondition> {
    let op = CmpOp::BY_PRIORITY
        .into_iter()
        .find(|op| expr.contains(op.symbol()))
        .ok_or_else(|| CsvLensError::InvalidOperator(format!("no comparison operator in '{expr}'")))?;
    let parts: Vec<&str> = expr.split(op.symbol()).map(str::trim).collect();
    match parts.as_slice() {
        [col, val] if !col.is_empty() && !val.is_empty() => Ok(FilterCondition::new(*col, op, *val)),
        _ => Err(CsvLensError::InvalidOperator(format!("expected <column>{op}<value>, got '{expr}'"))),
    }
}

/// Parse `<column>=<operation>`, e.g. `rating=avg`. The operation name is not
/// checked here.
pub fn parse_aggregate(expr: &str) -> Result<Aggregation> {
    if !expr.contains('=') {
        return Err(CsvLensError::InvalidAggregate(format!("expected <column>=<operation>, got '{expr}'")));
    }
    let parts: Vec<&str> = expr.split('=').map(str::trim).collect();
    match parts.as_slice() {
        [col, op] if !col.is_empty() && !op.is_empty() => {
            Ok(Aggregation { column: col.to_string(), operator: op.to_string() })
        }
        _ => Err(CsvLensError::InvalidAggregate(format!("expected <column>=<operation>, got '{expr}'"))),
    }
}
