use carebook::config::ActionConfig;
use carebook::flows::SimulatedAccountGateway;
use carebook::forms::FormValues;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn simulated_gateway(config: &ActionConfig) -> SimulatedAccountGateway {
    SimulatedAccountGateway::new(config.latency)
}

/// Parse a `name=value` CLI argument. The value may be empty or contain `=`.
pub(crate) fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

pub(crate) fn collect_fields(fields: Vec<(String, String)>) -> FormValues {
    fields.into_iter().collect()
}
