//! Detailed instance monitoring

use serde::Deserialize;

string_enum!(MonitoringState {
    Disabled => "disabled",
    Disabling => "disabling",
    Enabled => "enabled",
    Pending => "pending",
});

#[derive(Deserialize)]
struct MonitoringHolder {
    state: MonitoringState,
}

/// Monitoring state of one instance after a (un)monitor call
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceMonitoring {
    pub instance_id: String,
    #[serde(rename = "monitoring", deserialize_with = "monitoring_state")]
    pub state: MonitoringState,
}

fn monitoring_state<'de, D>(deserializer: D) -> std::result::Result<MonitoringState, D::Error>
where
    D: serde::Deserializer<'de>,
{
    MonitoringHolder::deserialize(deserializer).map(|holder| holder.state)
}
