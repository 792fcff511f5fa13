use itertools::Itertools;
use metrics_analyzer_parser::extractor::{BatchExtraction, MetricNames};
use tracing::{info, warn};

use crate::config::{Command, Settings};
use crate::error::AnalyzerResult;
use crate::grafana::GrafanaClient;
use crate::json::{extract_from_documents, DASHBOARD_EXPRESSION_FIELD, RULE_EXPRESSION_FIELD};
use crate::prometheus::PrometheusClient;
use crate::report::{format_metric_list, metrics_to_drop, metrics_to_whitelist, missing_metrics, JobReport};

pub struct Analyzer {
    prometheus: PrometheusClient,
    grafana: GrafanaClient,
}

impl Analyzer {
    pub fn new(settings: &Settings) -> AnalyzerResult<Self> {
        let timeout = settings.timeout();
        Ok(Self {
            prometheus: PrometheusClient::new(&settings.prometheus_url, timeout)?,
            grafana: GrafanaClient::new(&settings.grafana_url, settings.grafana_key.clone(), timeout)?,
        })
    }

    pub async fn dashboard_metrics(&self) -> AnalyzerResult<MetricNames> {
        let dashboards = self.grafana.dashboards().await?;
        info!(dashboards = dashboards.len(), "extracting metrics from dashboards");
        Ok(log_failures(extract_from_documents(&dashboards, DASHBOARD_EXPRESSION_FIELD)))
    }

    pub async fn rule_metrics(&self) -> AnalyzerResult<MetricNames> {
        let groups = self.prometheus.rules().await?;
        info!(groups = groups.len(), "extracting metrics from rules");
        Ok(log_failures(extract_from_documents(&groups, RULE_EXPRESSION_FIELD)))
    }

    /// Metrics read by any dashboard or rule.
    pub async fn used_metrics(&self) -> AnalyzerResult<MetricNames> {
        let mut used = self.dashboard_metrics().await?;
        used.extend(self.rule_metrics().await?);
        Ok(used)
    }

    /// Runs `command` and returns its report.
    pub async fn run(&self, command: Command) -> AnalyzerResult<String> {
        let output = match command {
            Command::MetricsToDrop => {
                let jobs = self.prometheus.metrics_per_job().await?;
                let used = self.used_metrics().await?;
                info!("get metrics to drop");
                format_job_reports(&metrics_to_drop(&jobs, &used))
            }
            Command::MetricsToWhitelist => {
                let jobs = self.prometheus.metrics_per_job().await?;
                let used = self.used_metrics().await?;
                info!("get metrics to whitelist");
                format_job_reports(&metrics_to_whitelist(&jobs, &used))
            }
            Command::MissingDashboardMetrics => {
                let jobs = self.prometheus.metrics_per_job().await?;
                let used = self.used_metrics().await?;
                format_metric_list("MISSING METRICS", missing_metrics(&used, &jobs))
            }
            Command::DashboardsMetrics => {
                let metrics = self.dashboard_metrics().await?;
                format_metric_list("DASHBOARDS METRICS", &metrics)
            }
            Command::RulesMetrics => {
                let metrics = self.rule_metrics().await?;
                format_metric_list("RULES METRICS", &metrics)
            }
            Command::MetricsPerJob => {
                let jobs = self.prometheus.metrics_per_job().await?;
                format!("METRICS_PER_JOB:\n{}", serde_json::to_string_pretty(&jobs)?)
            }
        };
        Ok(output)
    }
}

fn log_failures(result: BatchExtraction) -> MetricNames {
    if !result.failures.is_empty() {
        warn!(
            skipped = result.failures.len(),
            "some expressions could not be tokenized"
        );
    }
    result.metrics
}

pub fn format_job_reports(reports: &[JobReport]) -> String {
    reports.iter().map(JobReport::to_string).join("\n\n")
}
