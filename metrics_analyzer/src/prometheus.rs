use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::AnalyzerResult;
use crate::http::HttpClient;

/// Job name → metric names exported by that job.
pub type JobMetrics = BTreeMap<String, Vec<String>>;

const RULES_PATH: &str = "/api/v1/rules";
const QUERY_PATH: &str = "/api/v1/query";
const JOBS_QUERY: &str = r#"group by(job) ({job!=""})"#;

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct RulesData {
    #[serde(default)]
    groups: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct VectorData {
    #[serde(default)]
    result: Vec<Sample>,
}

#[derive(Debug, Deserialize)]
struct Sample {
    #[serde(default)]
    metric: HashMap<String, String>,
}

impl VectorData {
    fn label_values(self, label: &str) -> Vec<String> {
        self.result
            .into_iter()
            .filter_map(|mut sample| sample.metric.remove(label))
            .collect()
    }
}

/// Instant query listing the metric names exported by `job`.
pub fn job_metrics_query(job: &str) -> String {
    let job = job.replace('\\', r"\\").replace('"', r#"\""#);
    format!(r#"group by(__name__) ({{__name__!="", job="{job}"}})"#)
}

#[derive(Debug, Clone)]
pub struct PrometheusClient {
    http: HttpClient,
}

impl PrometheusClient {
    pub fn new(url: &str, timeout: Duration) -> AnalyzerResult<Self> {
        Ok(Self {
            http: HttpClient::new(url, None, timeout)?,
        })
    }

    /// Rule groups as returned by the rules API. Expressions live under the `query` field.
    pub async fn rules(&self) -> AnalyzerResult<Vec<Value>> {
        info!(url = self.http.base_url(), "fetching rules from prometheus");
        let response: ApiResponse<RulesData> = self.http.get(RULES_PATH, &[]).await?;
        debug!(groups = response.data.groups.len(), "fetched rule groups");
        Ok(response.data.groups)
    }

    pub async fn jobs(&self) -> AnalyzerResult<Vec<String>> {
        info!(url = self.http.base_url(), "fetching list of jobs from prometheus");
        let data = self.query(JOBS_QUERY).await?;
        Ok(data.label_values("job"))
    }

    pub async fn metrics_per_job(&self) -> AnalyzerResult<JobMetrics> {
        let jobs = self.jobs().await?;
        info!(jobs = jobs.len(), "fetching metrics per job from prometheus");

        let mut per_job = JobMetrics::new();
        for job in jobs {
            let data = self.query(&job_metrics_query(&job)).await?;
            let metrics = data.label_values("__name__").into_iter().sorted().dedup().collect();
            per_job.insert(job, metrics);
        }
        Ok(per_job)
    }

    async fn query(&self, query: &str) -> AnalyzerResult<VectorData> {
        let response: ApiResponse<VectorData> =
            self.http.get(QUERY_PATH, &[("query", query)]).await?;
        Ok(response.data)
    }
}
