mod batch;
mod keywords;
mod scanner;

pub use batch::{extract_batch, sorted_names, BatchExtraction, ExpressionFailure};
pub use keywords::is_non_metric_keyword;
pub use scanner::{extract, extract_metric_names, MetricNames};
