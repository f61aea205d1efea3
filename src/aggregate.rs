//! Field aggregation over row sets: count, min, max, avg.

use crate::error::{Error, Result};
use crate::record::Row;
use std::str::FromStr;

/// The supported aggregation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Avg,
    Min,
    Max,
    Count,
}

impl AggregateOp {
    fn label(self) -> &'static str {
        match self {
            AggregateOp::Avg => "Average",
            AggregateOp::Min => "Minimum",
            AggregateOp::Max => "Maximum",
            AggregateOp::Count => "Count",
        }
    }
}

impl FromStr for AggregateOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "avg" => Ok(AggregateOp::Avg),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            "count" => Ok(AggregateOp::Count),
            other => Err(Error::UnknownOperation(other.to_string())),
        }
    }
}

/// Aggregates `field` across `rows`, returning a formatted description such
/// as `"Average salary: 46000.0"`.
///
/// Every row must carry `field`, whatever the operation. `avg` parses each
/// value as a float and reports the arithmetic mean; `min` and `max`
/// compare the raw strings, so numeric fields order lexicographically
/// ("9000" sorts above "50000"); `count` reports the row count.
pub(crate) fn aggregate(operation: &str, field: &str, rows: &[Row]) -> Result<String> {
    if rows.is_empty() {
        return Err(Error::EmptyTable);
    }

    let mut values = Vec::with_capacity(rows.len());
    for row in rows {
        values.push(
            row.get(field)
                .ok_or_else(|| Error::FieldNotFound(field.to_string()))?,
        );
    }

    let op: AggregateOp = operation.parse()?;
    let result = match op {
        AggregateOp::Avg => {
            let mut sum = 0.0;
            for value in &values {
                sum += value
                    .parse::<f64>()
                    .map_err(|_| Error::NonNumeric((*value).to_string()))?;
            }
            let mean = sum / values.len() as f64;
            // Debug formatting keeps the trailing ".0" on integral means
            format!("{} {}: {:?}", op.label(), field, mean)
        }
        AggregateOp::Min => {
            let min = values.iter().min().copied().unwrap_or_default();
            format!("{} {}: {}", op.label(), field, min)
        }
        AggregateOp::Max => {
            let max = values.iter().max().copied().unwrap_or_default();
            format!("{} {}: {}", op.label(), field, max)
        }
        AggregateOp::Count => format!("{} {}: {}", op.label(), field, values.len()),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salaries() -> Vec<Row> {
        vec![
            [("id", "1"), ("salary", "50000")].into_iter().collect(),
            [("id", "2"), ("salary", "42000")].into_iter().collect(),
        ]
    }

    #[test]
    fn avg_reports_the_mean_with_a_decimal_point() {
        let result = aggregate("avg", "salary", &salaries()).unwrap();
        assert_eq!(result, "Average salary: 46000.0");
    }

    #[test]
    fn avg_keeps_fractional_means() {
        let rows: Vec<Row> = vec![
            [("id", "1"), ("salary", "1")].into_iter().collect(),
            [("id", "2"), ("salary", "2")].into_iter().collect(),
        ];

        assert_eq!(
            aggregate("avg", "salary", &rows).unwrap(),
            "Average salary: 1.5"
        );
    }

    #[test]
    fn count_reports_the_row_count() {
        assert_eq!(aggregate("count", "id", &salaries()).unwrap(), "Count id: 2");
    }

    #[test]
    fn min_and_max_compare_raw_strings() {
        assert_eq!(
            aggregate("min", "salary", &salaries()).unwrap(),
            "Minimum salary: 42000"
        );
        assert_eq!(
            aggregate("max", "salary", &salaries()).unwrap(),
            "Maximum salary: 50000"
        );
    }

    #[test]
    fn lexicographic_ordering_ranks_9000_above_50000() {
        let rows: Vec<Row> = vec![
            [("id", "1"), ("salary", "9000")].into_iter().collect(),
            [("id", "2"), ("salary", "50000")].into_iter().collect(),
        ];

        assert_eq!(
            aggregate("max", "salary", &rows).unwrap(),
            "Maximum salary: 9000"
        );
        assert_eq!(
            aggregate("min", "salary", &rows).unwrap(),
            "Minimum salary: 50000"
        );
    }

    #[test]
    fn empty_rows_fail_before_anything_else() {
        let err = aggregate("avg", "salary", &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyTable));

        // even an unknown operation reports the empty set first
        let err = aggregate("sum", "salary", &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyTable));
    }

    #[test]
    fn missing_field_fails_before_the_operation_is_checked() {
        let err = aggregate("sum", "bonus", &salaries()).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound(field) if field == "bonus"));
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let err = aggregate("sum", "salary", &salaries()).unwrap_err();
        assert!(matches!(err, Error::UnknownOperation(op) if op == "sum"));
    }

    #[test]
    fn avg_rejects_non_numeric_values() {
        let rows: Vec<Row> = vec![
            [("id", "1"), ("age", "30")].into_iter().collect(),
            [("id", "2"), ("age", "fortyfive")].into_iter().collect(),
        ];

        let err = aggregate("avg", "age", &rows).unwrap_err();
        assert!(matches!(err, Error::NonNumeric(value) if value == "fortyfive"));
    }

    #[test]
    fn min_and_max_tolerate_non_numeric_values() {
        let rows: Vec<Row> = vec![
            [("id", "1"), ("name", "John")].into_iter().collect(),
            [("id", "2"), ("name", "Ada")].into_iter().collect(),
        ];

        assert_eq!(
            aggregate("min", "name", &rows).unwrap(),
            "Minimum name: Ada"
        );
    }

    #[test]
    fn operation_names_parse_exactly() {
        assert_eq!("avg".parse::<AggregateOp>().unwrap(), AggregateOp::Avg);
        assert!(matches!(
            "AVG".parse::<AggregateOp>().unwrap_err(),
            Error::UnknownOperation(_)
        ));
    }
}
