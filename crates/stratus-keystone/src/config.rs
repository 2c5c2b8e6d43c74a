//! Keystone session configuration

use stratus_core::{Error, ProviderSettings, Result};

/// Login credentials accepted by Identity v2.0
#[derive(Clone)]
pub enum Credentials {
    Password { username: String, password: String },
    ApiAccessKey { access_key: String, secret_key: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .finish_non_exhaustive(),
            Credentials::ApiAccessKey { access_key, .. } => f
                .debug_struct("ApiAccessKey")
                .field("access_key", access_key)
                .finish_non_exhaustive(),
        }
    }
}

/// Which catalog URL to use for a service
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interface {
    #[default]
    Public,
    Internal,
    Admin,
}

impl std::str::FromStr for Interface {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "public" | "publicurl" => Ok(Interface::Public),
            "internal" | "internalurl" => Ok(Interface::Internal),
            "admin" | "adminurl" => Ok(Interface::Admin),
            other => Err(Error::InvalidConfig(format!("unknown interface {other}"))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct KeystoneConfig {
    /// Identity endpoint, e.g. `http://keystone:5000/v2.0`
    pub auth_url: String,
    pub credentials: Credentials,
    pub tenant_name: Option<String>,
    pub tenant_id: Option<String>,
    pub interface: Interface,
}

impl KeystoneConfig {
    pub fn password(auth_url: &str, username: &str, password: &str) -> Self {
        Self {
            auth_url: auth_url.trim_end_matches('/').to_string(),
            credentials: Credentials::Password {
                username: username.to_string(),
                password: password.to_string(),
            },
            tenant_name: None,
            tenant_id: None,
            interface: Interface::default(),
        }
    }

    pub fn access_key(auth_url: &str, access_key: &str, secret_key: &str) -> Self {
        Self {
            auth_url: auth_url.trim_end_matches('/').to_string(),
            credentials: Credentials::ApiAccessKey {
                access_key: access_key.to_string(),
                secret_key: secret_key.to_string(),
            },
            tenant_name: None,
            tenant_id: None,
            interface: Interface::default(),
        }
    }

    pub fn with_tenant_name(mut self, tenant_name: &str) -> Self {
        self.tenant_name = Some(tenant_name.to_string());
        self
    }

    pub fn with_tenant_id(mut self, tenant_id: &str) -> Self {
        self.tenant_id = Some(tenant_id.to_string());
        self
    }

    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.interface = interface;
        self
    }

    /// Build a password login from provider settings.
    ///
    /// The identity may carry the tenant as `tenant:user`; otherwise the
    /// `tenant` setting is used.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self> {
        let endpoint = settings
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::InvalidConfig("endpoint is required".to_string()))?;
        let identity = settings
            .identity
            .as_deref()
            .ok_or_else(|| Error::InvalidConfig("identity is required".to_string()))?;
        let credential = settings
            .credential
            .as_deref()
            .ok_or_else(|| Error::InvalidConfig("credential is required".to_string()))?;

        let (tenant, username) = match identity.split_once(':') {
            Some((tenant, user)) => (Some(tenant), user),
            None => (settings.tenant.as_deref(), identity),
        };

        let mut config = Self::password(endpoint, username, credential);
        if let Some(tenant) = tenant {
            config = config.with_tenant_name(tenant);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_with_tenant_prefix() {
        let settings = ProviderSettings {
            endpoint: Some("http://keystone:5000/v2.0/".to_string()),
            identity: Some("demo:admin".to_string()),
            credential: Some("secret".to_string()),
            ..Default::default()
        };
        let config = KeystoneConfig::from_settings(&settings).unwrap();
        assert_eq!(config.auth_url, "http://keystone:5000/v2.0");
        assert_eq!(config.tenant_name.as_deref(), Some("demo"));
        match config.credentials {
            Credentials::Password { username, password } => {
                assert_eq!(username, "admin");
                assert_eq!(password, "secret");
            }
            other => panic!("unexpected credentials {other:?}"),
        }
    }

    #[test]
    fn test_from_settings_with_tenant_setting() {
        let settings = ProviderSettings {
            endpoint: Some("http://keystone:5000/v2.0".to_string()),
            identity: Some("admin".to_string()),
            credential: Some("secret".to_string()),
            tenant: Some("ops".to_string()),
            ..Default::default()
        };
        let config = KeystoneConfig::from_settings(&settings).unwrap();
        assert_eq!(config.tenant_name.as_deref(), Some("ops"));
    }

    #[test]
    fn test_from_settings_missing_credential() {
        let settings = ProviderSettings {
            endpoint: Some("http://keystone:5000/v2.0".to_string()),
            identity: Some("admin".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            KeystoneConfig::from_settings(&settings),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_interface_from_str() {
        assert_eq!("internalURL".parse::<Interface>().unwrap(), Interface::Internal);
        assert_eq!("public".parse::<Interface>().unwrap(), Interface::Public);
        assert!("private".parse::<Interface>().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = KeystoneConfig::password("http://k", "admin", "hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
