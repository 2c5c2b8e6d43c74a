//! Neutron API paths and extension aliases

/// Catalog service type for Neutron
pub const SERVICE_TYPE: &str = "network";

/// API path constants
pub mod path {
    pub const EXTENSIONS: &str = "/v2.0/extensions";

    // FWaaS
    pub const FIREWALLS: &str = "/v2.0/fw/firewalls";
    pub const FIREWALL_POLICIES: &str = "/v2.0/fw/firewall_policies";
    pub const FIREWALL_RULES: &str = "/v2.0/fw/firewall_rules";

    // Layer 3
    pub const FLOATING_IPS: &str = "/v2.0/floatingips";
    pub const ROUTERS: &str = "/v2.0/routers";

    // Security groups
    pub const SECURITY_GROUPS: &str = "/v2.0/security-groups";
    pub const SECURITY_GROUP_RULES: &str = "/v2.0/security-group-rules";

    // LBaaS v1
    pub const POOLS: &str = "/v2.0/lb/pools";
    pub const MEMBERS: &str = "/v2.0/lb/members";
    pub const VIPS: &str = "/v2.0/lb/vips";
    pub const HEALTH_MONITORS: &str = "/v2.0/lb/health_monitors";
}

/// Extension aliases advertised by `GET /v2.0/extensions`
pub mod extension_alias {
    pub const FWAAS: &str = "fwaas";
    pub const LBAAS: &str = "lbaas";
    pub const ROUTER: &str = "router";
    pub const SECURITY_GROUP: &str = "security-group";
}
