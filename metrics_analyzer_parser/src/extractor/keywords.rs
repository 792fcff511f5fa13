use phf::phf_set;

/// Words that never name a metric. When one of them is directly followed by `(`, the
/// parenthesized region holds grouping labels or operator parameters rather than a metric.
static NON_METRIC_KEYWORDS: phf::Set<&'static str> = phf_set! {
    // aggregation clauses
    "by",
    "without",
    // vector matching
    "group_left",
    "group_right",
    "ignoring",
    "on",
    // set operators
    "and",
    "or",
    "unless",
    // aggregation operators taking a parameter
    "count_values",
    "quantile",
    "topk",
    "bottomk",
};

/// Matching is case-sensitive.
pub fn is_non_metric_keyword(name: &str) -> bool {
    NON_METRIC_KEYWORDS.contains(name)
}
