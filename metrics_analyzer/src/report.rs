use std::fmt;

use ahash::AHashSet;
use itertools::Itertools;
use metrics_analyzer_parser::MetricNames;

use crate::prometheus::JobMetrics;

/// Joins metric names into a regex alternation, e.g. for a relabel `keep` or `drop` rule.
/// Names are sorted and deduplicated so the output is stable.
pub fn to_regex<I, S>(metrics: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    metrics
        .into_iter()
        .map(|m| m.as_ref().to_string())
        .sorted()
        .dedup()
        .join("|")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Drop,
    Whitelist,
}

impl ReportKind {
    fn verb(&self) -> &'static str {
        match self {
            ReportKind::Drop => "drop",
            ReportKind::Whitelist => "whitelist",
        }
    }
}

/// Metrics of one job selected by a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub job: String,
    pub metrics: Vec<String>,
    pub kind: ReportKind,
}

impl JobReport {
    pub fn regex(&self) -> String {
        to_regex(&self.metrics)
    }
}

impl fmt::Display for JobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "We can {} {} metrics from the job {}",
            self.kind.verb(),
            self.metrics.len(),
            self.job
        )?;
        write!(f, "{}", self.regex())
    }
}

fn job_reports<F>(jobs: &JobMetrics, kind: ReportKind, keep: F) -> Vec<JobReport>
where
    F: Fn(&str) -> bool,
{
    jobs.iter()
        .map(|(job, metrics)| JobReport {
            job: job.clone(),
            metrics: metrics
                .iter()
                .filter(|m| keep(m.as_str()))
                .sorted()
                .dedup()
                .cloned()
                .collect(),
            kind,
        })
        .collect()
}

/// Per job, the metrics no rule or dashboard reads.
pub fn metrics_to_drop(jobs: &JobMetrics, used: &MetricNames) -> Vec<JobReport> {
    job_reports(jobs, ReportKind::Drop, |m| !used.contains(m))
}

/// Per job, the metrics some rule or dashboard reads.
pub fn metrics_to_whitelist(jobs: &JobMetrics, used: &MetricNames) -> Vec<JobReport> {
    job_reports(jobs, ReportKind::Whitelist, |m| used.contains(m))
}

/// Metrics read by rules or dashboards that no job exports.
pub fn missing_metrics(used: &MetricNames, jobs: &JobMetrics) -> Vec<String> {
    let exported: AHashSet<&str> = jobs.values().flatten().map(String::as_str).collect();
    used.iter()
        .filter(|m| !exported.contains(m.as_str()))
        .sorted()
        .cloned()
        .collect()
}

/// `COUNT: n` header, a title line and one metric per line.
pub fn format_metric_list<I, S>(title: &str, metrics: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let metrics: Vec<String> = metrics
        .into_iter()
        .map(|m| m.as_ref().to_string())
        .sorted()
        .dedup()
        .collect();
    let mut out = format!("COUNT: {}\n{}:", metrics.len(), title);
    for metric in metrics {
        out.push('\n');
        out.push_str(&metric);
    }
    out
}
