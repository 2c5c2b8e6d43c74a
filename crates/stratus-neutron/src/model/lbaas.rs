//! Load-Balancing-as-a-Service (v1) models

use serde::{Deserialize, Serialize};

use super::{Status, option_setters};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Http,
    Https,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LbMethod {
    RoundRobin,
    LeastConnections,
    SourceIp,
    #[serde(other)]
    Unrecognized,
}

/// Health monitor probe type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeType {
    Ping,
    Tcp,
    Http,
    Https,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPersistenceType {
    SourceIp,
    HttpCookie,
    AppCookie,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPersistence {
    #[serde(rename = "type")]
    pub persistence_type: SessionPersistenceType,
    /// Only meaningful for `APP_COOKIE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub vip_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subnet_id: Option<String>,
    #[serde(default)]
    pub protocol: Option<Protocol>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub lb_method: Option<LbMethod>,
    #[serde(default)]
    pub health_monitors: Vec<String>,
    #[serde(default)]
    pub health_monitors_status: Vec<HealthMonitorStatus>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub admin_state_up: Option<bool>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub status_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthMonitorStatus {
    pub monitor_id: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub status_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub pool_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub protocol_port: Option<u16>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub admin_state_up: Option<bool>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub status_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vip {
    pub id: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subnet_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub port_id: Option<String>,
    #[serde(default)]
    pub protocol: Option<Protocol>,
    #[serde(default)]
    pub protocol_port: Option<u16>,
    #[serde(default)]
    pub pool_id: Option<String>,
    #[serde(default)]
    pub session_persistence: Option<SessionPersistence>,
    #[serde(default)]
    pub connection_limit: Option<i32>,
    #[serde(default)]
    pub admin_state_up: Option<bool>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub status_description: Option<String>,
}

/// Associating a monitor with a pool answers with a bare `{"health_monitor": {}}`,
/// so every field is optional here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthMonitor {
    pub id: Option<String>,
    pub tenant_id: Option<String>,
    #[serde(rename = "type")]
    pub probe_type: Option<ProbeType>,
    pub delay: Option<u32>,
    pub timeout: Option<u32>,
    pub max_retries: Option<u32>,
    pub http_method: Option<String>,
    pub url_path: Option<String>,
    pub expected_codes: Option<String>,
    pub pools: Vec<PoolStatus>,
    pub admin_state_up: Option<bool>,
    pub status: Option<Status>,
    pub status_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolStatus {
    pub pool_id: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub status_description: Option<String>,
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreatePool {
    pub subnet_id: String,
    pub protocol: Protocol,
    pub lb_method: LbMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}

impl CreatePool {
    pub fn new(subnet_id: &str, protocol: Protocol, lb_method: LbMethod) -> Self {
        Self {
            subnet_id: subnet_id.to_string(),
            protocol,
            lb_method,
            tenant_id: None,
            name: None,
            description: None,
            provider: None,
            admin_state_up: None,
        }
    }
}

option_setters!(CreatePool {
    tenant_id: String,
    name: String,
    description: String,
    provider: String,
    admin_state_up: bool,
});

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdatePool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lb_method: Option<LbMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}

option_setters!(UpdatePool {
    name: String,
    description: String,
    lb_method: LbMethod,
    admin_state_up: bool,
});

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateMember {
    pub pool_id: String,
    pub address: String,
    pub protocol_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}

impl CreateMember {
    pub fn new(pool_id: &str, address: &str, protocol_port: u16) -> Self {
        Self {
            pool_id: pool_id.to_string(),
            address: address.to_string(),
            protocol_port,
            tenant_id: None,
            weight: None,
            admin_state_up: None,
        }
    }
}

option_setters!(CreateMember {
    tenant_id: String,
    weight: u32,
    admin_state_up: bool,
});

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}

option_setters!(UpdateMember {
    pool_id: String,
    weight: u32,
    admin_state_up: bool,
});

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateVip {
    pub subnet_id: String,
    pub protocol: Protocol,
    pub protocol_port: u16,
    pub pool_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_persistence: Option<SessionPersistence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}

impl CreateVip {
    pub fn new(subnet_id: &str, protocol: Protocol, protocol_port: u16, pool_id: &str) -> Self {
        Self {
            subnet_id: subnet_id.to_string(),
            protocol,
            protocol_port,
            pool_id: pool_id.to_string(),
            tenant_id: None,
            name: None,
            description: None,
            address: None,
            session_persistence: None,
            connection_limit: None,
            admin_state_up: None,
        }
    }
}

option_setters!(CreateVip {
    tenant_id: String,
    name: String,
    description: String,
    address: String,
    session_persistence: SessionPersistence,
    connection_limit: i32,
    admin_state_up: bool,
});

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateVip {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_persistence: Option<SessionPersistence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}

option_setters!(UpdateVip {
    name: String,
    description: String,
    pool_id: String,
    session_persistence: SessionPersistence,
    connection_limit: i32,
    admin_state_up: bool,
});

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateHealthMonitor {
    #[serde(rename = "type")]
    pub probe_type: ProbeType,
    pub delay: u32,
    pub timeout: u32,
    pub max_retries: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_codes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}

impl CreateHealthMonitor {
    pub fn new(probe_type: ProbeType, delay: u32, timeout: u32, max_retries: u32) -> Self {
        Self {
            probe_type,
            delay,
            timeout,
            max_retries,
            tenant_id: None,
            http_method: None,
            url_path: None,
            expected_codes: None,
            admin_state_up: None,
        }
    }
}

option_setters!(CreateHealthMonitor {
    tenant_id: String,
    http_method: String,
    url_path: String,
    expected_codes: String,
    admin_state_up: bool,
});

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateHealthMonitor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_codes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}

option_setters!(UpdateHealthMonitor {
    delay: u32,
    timeout: u32,
    max_retries: u32,
    http_method: String,
    url_path: String,
    expected_codes: String,
    admin_state_up: bool,
});

#[derive(Clone, Debug, Serialize)]
pub(crate) struct MonitorRef<'a> {
    pub id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&Protocol::Https).unwrap(), "\"HTTPS\"");
        assert_eq!(
            serde_json::to_string(&LbMethod::LeastConnections).unwrap(),
            "\"LEAST_CONNECTIONS\""
        );
        assert_eq!(
            serde_json::to_string(&SessionPersistenceType::AppCookie).unwrap(),
            "\"APP_COOKIE\""
        );
        let probe: ProbeType = serde_json::from_str("\"PING\"").unwrap();
        assert_eq!(probe, ProbeType::Ping);
    }

    #[test]
    fn test_vip_deserialization() {
        let json = r#"{
            "status": "ACTIVE",
            "protocol": "HTTP",
            "description": "",
            "address": "10.0.0.10",
            "protocol_port": 80,
            "port_id": "b5a743d6-056b-468b-862d-fb13a9aa694e",
            "id": "4ec89087-d057-4e2c-911f-60a3b47ee304",
            "status_description": null,
            "name": "NewVip",
            "admin_state_up": true,
            "subnet_id": "8032909d-47a1-4715-90af-5153ffe39861",
            "tenant_id": "83657cfcdfe44cd5920adaf26c48ceea",
            "connection_limit": -1,
            "pool_id": "72741b06-df4d-4715-b142-276b6bce75ab",
            "session_persistence": {"type": "APP_COOKIE", "cookie_name": "MyAppCookie"}
        }"#;
        let vip: Vip = serde_json::from_str(json).unwrap();
        assert_eq!(vip.protocol, Some(Protocol::Http));
        assert_eq!(vip.connection_limit, Some(-1));
        let persistence = vip.session_persistence.unwrap();
        assert_eq!(persistence.persistence_type, SessionPersistenceType::AppCookie);
        assert_eq!(persistence.cookie_name.as_deref(), Some("MyAppCookie"));
    }

    #[test]
    fn test_empty_health_monitor() {
        let monitor: HealthMonitor = serde_json::from_str("{}").unwrap();
        assert_eq!(monitor, HealthMonitor::default());
    }

    #[test]
    fn test_create_health_monitor_serialization() {
        let body = CreateHealthMonitor::new(ProbeType::Http, 5, 3, 2)
            .url_path("/health")
            .expected_codes("200-204");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "type": "HTTP",
                "delay": 5,
                "timeout": 3,
                "max_retries": 2,
                "url_path": "/health",
                "expected_codes": "200-204"
            })
        );
    }
}
