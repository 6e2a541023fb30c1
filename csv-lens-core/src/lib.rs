pub mod aggregate;
pub mod export;
pub mod expr;
pub mod filter;
pub mod query;
pub mod store;

pub use aggregate::{aggregate, AggregateResult};
pub use csv_lens_common::{CsvLensError, ErrorKind, Result};
pub use export::{format_scalar, format_table, render, rows_to_json, scalar_to_json};
pub use expr::{parse_aggregate, parse_filter, AggOp, Aggregation, CmpOp, FilterCondition};
pub use filter::{coerce, compare, filter_rows, CellValue};
pub use query::{Query, QueryOutput};
pub use store::{Row, RowStore};
