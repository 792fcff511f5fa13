use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::AnalyzerResult;
use crate::http::HttpClient;

const SEARCH_PATH: &str = "/api/search";
const DASHBOARD_KIND: &str = "dash-db";

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    uid: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DashboardEnvelope {
    #[serde(default = "empty_object")]
    dashboard: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Uids of the dashboards in a search result. Folders are skipped.
fn dashboard_uids(hits: Vec<SearchHit>) -> Vec<String> {
    hits.into_iter()
        .filter(|hit| hit.kind.as_deref().map_or(true, |kind| kind == DASHBOARD_KIND))
        .filter_map(|hit| hit.uid)
        .collect()
}

#[derive(Debug, Clone)]
pub struct GrafanaClient {
    http: HttpClient,
}

impl GrafanaClient {
    pub fn new(url: &str, key: Option<String>, timeout: Duration) -> AnalyzerResult<Self> {
        Ok(Self {
            http: HttpClient::new(url, key, timeout)?,
        })
    }

    /// Dashboard models of every dashboard visible to the configured key. Panel expressions
    /// live under the `expr` field.
    pub async fn dashboards(&self) -> AnalyzerResult<Vec<Value>> {
        info!(url = self.http.base_url(), "fetching all dashboards from grafana");
        let hits: Vec<SearchHit> = self.http.get(SEARCH_PATH, &[]).await?;
        let uids = dashboard_uids(hits);

        let mut dashboards = Vec::with_capacity(uids.len());
        for uid in uids {
            debug!(uid = uid.as_str(), "fetching dashboard");
            let envelope: DashboardEnvelope =
                self.http.get(&format!("/api/dashboards/uid/{uid}"), &[]).await?;
            dashboards.push(envelope.dashboard);
        }
        Ok(dashboards)
    }
}
