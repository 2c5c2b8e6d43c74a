//! Stratus Keystone - OpenStack Identity v2.0 authentication
//!
//! Provides a [`KeystoneSession`] that logs in with password or access-key
//! credentials, keeps the token fresh and resolves service endpoints from the
//! catalog. The session doubles as the [`stratus_core::Authenticator`] for
//! Neutron and Swift clients.
//!
//! # Example
//!
//! ```ignore
//! use stratus_core::ClientConfig;
//! use stratus_keystone::{KeystoneConfig, KeystoneSession};
//!
//! let config = KeystoneConfig::password("http://keystone:5000/v2.0", "admin", "secret")
//!     .with_tenant_name("demo");
//! let session = KeystoneSession::authenticate(config, ClientConfig::default()).await?;
//! let network = session.endpoint_for("network", Some("RegionOne"))?;
//! ```

pub mod config;
pub mod model;
pub mod session;

pub use config::{Credentials, Interface, KeystoneConfig};
pub use model::{Access, Endpoint, Service, Tenant, Token, User};
pub use session::{AUTH_TOKEN_HEADER, KeystoneSession, StaticToken};
