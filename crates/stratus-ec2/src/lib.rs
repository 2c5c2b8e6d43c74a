//! Stratus EC2 - AWS EC2 query API bindings
//!
//! This crate provides:
//! - Signature V4 request signing and per-region clients
//! - Images and launch permissions, spot instances, placement groups and monitoring
//! - VPCs, subnets, route tables, internet gateways and security groups
//! - Resource tags
//!
//! # Example
//!
//! ```ignore
//! use stratus_ec2::Ec2Api;
//! use stratus_ec2::model::{CreateSubnetOptions, CreateVpcOptions};
//!
//! let ec2 = Ec2Api::from_settings(&settings)?;
//! let vpc = ec2.vpc_api().create_vpc(None, "10.0.0.0/16", &CreateVpcOptions::new()).await?;
//! let subnet = ec2
//!     .subnet_api()
//!     .create_subnet(None, &vpc.vpc_id, "10.0.1.0/24", &CreateSubnetOptions::new())
//!     .await?;
//! ```

mod api;
mod form;
mod xml;
pub mod ami;
pub mod client;
pub mod config;
pub mod error;
pub mod internet_gateway;
pub mod model;
pub mod monitoring;
pub mod placement_group;
pub mod route_table;
pub mod security_group;
pub mod signer;
pub mod spot_instance;
pub mod subnet;
pub mod tags;
pub mod vpc;

pub use ami::AmiApi;
pub use api::Ec2Api;
pub use client::Ec2Client;
pub use config::{AwsCredentials, Ec2Config};
pub use error::{Ec2Error, Ec2Fallback, Result};
pub use internet_gateway::InternetGatewayApi;
pub use monitoring::MonitoringApi;
pub use placement_group::PlacementGroupApi;
pub use route_table::RouteTableApi;
pub use security_group::SecurityGroupApi;
pub use signer::SigV4Signer;
pub use spot_instance::SpotInstanceApi;
pub use subnet::SubnetApi;
pub use tags::TagApi;
pub use vpc::VpcApi;
