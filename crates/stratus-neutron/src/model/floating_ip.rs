use serde::{Deserialize, Serialize};

use super::{Status, option_setters};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatingIp {
    pub id: String,
    #[serde(default)]
    pub router_id: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub floating_network_id: Option<String>,
    #[serde(default)]
    pub fixed_ip_address: Option<String>,
    #[serde(default)]
    pub floating_ip_address: Option<String>,
    #[serde(default)]
    pub port_id: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CreateFloatingIp {
    pub floating_network_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl CreateFloatingIp {
    pub fn new(floating_network_id: &str) -> Self {
        Self {
            floating_network_id: floating_network_id.to_string(),
            ..Default::default()
        }
    }
}

option_setters!(CreateFloatingIp {
    port_id: String,
    fixed_ip_address: String,
    floating_ip_address: String,
    tenant_id: String,
});

/// Associates a floating IP with a port, or disassociates it.
///
/// `port_id: Some(None)` is sent as `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateFloatingIp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_ip_address: Option<String>,
}

impl UpdateFloatingIp {
    pub fn associate(port_id: &str) -> Self {
        Self {
            port_id: Some(Some(port_id.to_string())),
            fixed_ip_address: None,
        }
    }

    pub fn disassociate() -> Self {
        Self {
            port_id: Some(None),
            fixed_ip_address: None,
        }
    }

    pub fn fixed_ip_address(mut self, address: &str) -> Self {
        self.fixed_ip_address = Some(address.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassociate_sends_null_port() {
        let json = serde_json::to_value(UpdateFloatingIp::disassociate()).unwrap();
        assert_eq!(json, serde_json::json!({"port_id": null}));
    }

    #[test]
    fn test_associate_with_fixed_ip() {
        let json =
            serde_json::to_value(UpdateFloatingIp::associate("port-1").fixed_ip_address("10.0.0.3"))
                .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"port_id": "port-1", "fixed_ip_address": "10.0.0.3"})
        );
    }
}
