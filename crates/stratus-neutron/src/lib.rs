//! Stratus Neutron - OpenStack Networking v2.0 extension bindings
//!
//! This crate provides typed access to:
//! - Firewall-as-a-Service (firewalls, policies, rules)
//! - Floating IPs and routers
//! - Security groups and rules
//! - Load-Balancing-as-a-Service v1 (pools, members, VIPs, health monitors)
//!
//! # Example
//!
//! ```ignore
//! use futures::TryStreamExt;
//! use stratus_neutron::NeutronApi;
//!
//! let neutron = NeutronApi::from_session(&session, Some("RegionOne"))?;
//! if let Some(routers) = neutron.routers().await? {
//!     let all: Vec<_> = routers.list_all().try_collect().await?;
//! }
//! ```

mod api;
mod common;
pub mod constants;
pub mod floating_ip;
pub mod fwaas;
pub mod lbaas;
pub mod model;
pub mod router;
pub mod security_group;

pub use api::NeutronApi;
pub use floating_ip::FloatingIpApi;
pub use fwaas::FwaasApi;
pub use lbaas::LbaasApi;
pub use router::RouterApi;
pub use security_group::SecurityGroupApi;
