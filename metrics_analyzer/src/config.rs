use std::time::Duration;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_GRAFANA_URL: &str = "http://localhost:3000";
pub const DEFAULT_PROMETHEUS_URL: &str = "http://localhost:9090";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Check metrics between a Grafana and a Prometheus instance and output the metrics that
/// are missing, can be dropped or should be whitelisted.
#[derive(Parser, Debug)]
#[command(name = "metrics-analyzer", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub settings: Settings,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Per job, metrics no rule or dashboard uses, as a regex
    MetricsToDrop,
    /// Per job, metrics some rule or dashboard uses, as a regex
    MetricsToWhitelist,
    /// Metrics used by rules or dashboards that no job exports
    MissingDashboardMetrics,
    /// Metrics referenced by Grafana dashboards
    DashboardsMetrics,
    /// Metrics referenced by Prometheus rules
    RulesMetrics,
    /// Metrics exported by each Prometheus job
    MetricsPerJob,
}

#[derive(Args, Clone)]
pub struct Settings {
    /// Grafana url
    #[arg(long, env = "GRAFANA_URL", default_value = DEFAULT_GRAFANA_URL, global = true)]
    pub grafana_url: String,

    /// Grafana key to have API access
    #[arg(long, env = "GRAFANA_KEY", hide_env_values = true, global = true)]
    pub grafana_key: Option<String>,

    /// Prometheus url
    #[arg(long, env = "PROMETHEUS_URLS", default_value = DEFAULT_PROMETHEUS_URL, global = true)]
    pub prometheus_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

// keeps the key out of debug logs
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("grafana_url", &self.grafana_url)
            .field("grafana_key", &self.grafana_key.as_ref().map(|_| "***"))
            .field("prometheus_url", &self.prometheus_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
