use crate::aggregate::{aggregate, AggregateResult};
use crate::expr::{parse_aggregate, parse_filter, Aggregation, FilterCondition};
use crate::filter::filter_rows;
use crate::store::{Row, RowStore};
use csv_lens_common::{CsvLensError, Result};

/// Exactly one shape per run.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Rows(Vec<Row>),
    Scalar(AggregateResult),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Option<FilterCondition>,
    pub aggregate: Option<Aggregation>,
}

impl Query {
    /// Build from the raw `--where` / `--aggregate` strings.
    pub fn parse(filter: Option<&str>, aggregate: Option<&str>) -> Result<Self> {
        Ok(Self {
            filter: filter.map(parse_filter).transpose()?,
            aggregate: aggregate.map(parse_aggregate).transpose()?,
        })
    }

    /// Filter first, then aggregate what is left.
    pub fn run(&self, store: &RowStore) -> Result<QueryOutput> {
        let rows = match &self.filter {
            Some(cond) => {
                // the header is the schema even when there are no rows to check against
                if !store.columns().iter().any(|c| c == &cond.column) {
                    cond.op()?;
                    return Err(CsvLensError::InvalidColumn(format!(
                        "column '{}' not found (available: {})",
                        cond.column,
                        store.columns().join(", ")
                    )));
                }
                filter_rows(store.rows(), cond)?
            }
            None => store.rows().to_vec(),
        };
        match &self.aggregate {
            Some(agg) => Ok(QueryOutput::Scalar(aggregate(&rows, agg)?)),
            None => Ok(QueryOutput::Rows(rows)),
        }
    }
}
