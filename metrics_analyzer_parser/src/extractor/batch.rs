use itertools::Itertools;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, warn};

use crate::extractor::{extract_metric_names, MetricNames};
use crate::lexer::LexError;

/// An expression that could not be tokenized, and therefore contributed no metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionFailure {
    pub expression: String,
    pub error: LexError,
}

/// Merged outcome of extracting metric names from many expressions.
#[derive(Debug, Default, Clone)]
pub struct BatchExtraction {
    pub metrics: MetricNames,
    pub failures: Vec<ExpressionFailure>,
}

impl BatchExtraction {
    fn add(mut self, expression: &str) -> Self {
        match extract_metric_names(expression) {
            Ok(metrics) => self.metrics.extend(metrics),
            Err(error) => {
                warn!(%error, expression, "skipping expression");
                self.failures.push(ExpressionFailure {
                    expression: expression.to_string(),
                    error,
                });
            }
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.metrics.extend(other.metrics);
        self.failures.extend(other.failures);
        self
    }

    /// Metric names in lexicographic order.
    pub fn sorted_metrics(&self) -> Vec<&str> {
        sorted_names(&self.metrics)
    }
}

/// Extracts metric names from every expression in parallel. An expression that fails to
/// tokenize is recorded in [`BatchExtraction::failures`] and does not affect the others.
pub fn extract_batch<S>(expressions: &[S]) -> BatchExtraction
where
    S: AsRef<str> + Sync,
{
    let result = expressions
        .par_iter()
        .fold(BatchExtraction::default, |acc, expr| acc.add(expr.as_ref()))
        .reduce(BatchExtraction::default, BatchExtraction::merge);

    debug!(
        expressions = expressions.len(),
        metrics = result.metrics.len(),
        failures = result.failures.len(),
        "batch extraction complete"
    );
    result
}

pub fn sorted_names(metrics: &MetricNames) -> Vec<&str> {
    metrics.iter().map(String::as_str).sorted_unstable().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merges_across_expressions() {
        let exprs = [
            "rate(http_requests_total[5m])",
            "sum(up) by (job)",
            "http_requests_total + errors_total",
        ];
        let result = extract_batch(&exprs);
        assert!(result.failures.is_empty());
        assert_eq!(
            result.sorted_metrics(),
            vec!["errors_total", "http_requests_total", "up"]
        );
    }

    #[test]
    fn malformed_expression_does_not_abort_batch() {
        let exprs = vec![
            "up".to_string(),
            r#"foo{job="bar}"#.to_string(),
            "node_load1 > 4".to_string(),
        ];
        let result = extract_batch(&exprs);
        assert_eq!(result.sorted_metrics(), vec!["node_load1", "up"]);
        assert_eq!(
            result.failures,
            vec![ExpressionFailure {
                expression: r#"foo{job="bar}"#.to_string(),
                error: LexError::UnterminatedString { position: 8 },
            }]
        );
    }

    #[test]
    fn empty_batch() {
        let exprs: [&str; 0] = [];
        let result = extract_batch(&exprs);
        assert!(result.metrics.is_empty());
        assert!(result.failures.is_empty());
    }

    #[test]
    fn matches_sequential_extraction() {
        let exprs: Vec<String> = (0..200)
            .map(|i| {
                format!(
                    "sum(rate(metric_{}[5m])) by (job) / on(job) group_left metric_{}",
                    i % 17,
                    i % 5
                )
            })
            .collect();

        let mut expected = MetricNames::default();
        for expr in &exprs {
            expected.extend(extract_metric_names(expr).expect("valid expression"));
        }

        let result = extract_batch(&exprs);
        assert_eq!(sorted_names(&result.metrics), sorted_names(&expected));
    }
}
