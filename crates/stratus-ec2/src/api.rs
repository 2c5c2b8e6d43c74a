//! EC2 entry point

use std::sync::Arc;

use stratus_core::{ClientConfig, ProviderSettings};

use crate::ami::AmiApi;
use crate::client::Ec2Client;
use crate::config::{AwsCredentials, Ec2Config};
use crate::error::Result;
use crate::internet_gateway::InternetGatewayApi;
use crate::monitoring::MonitoringApi;
use crate::placement_group::PlacementGroupApi;
use crate::route_table::RouteTableApi;
use crate::security_group::SecurityGroupApi;
use crate::spot_instance::SpotInstanceApi;
use crate::subnet::SubnetApi;
use crate::tags::TagApi;
use crate::vpc::VpcApi;

/// EC2 client covering every region; APIs take the region per call
#[derive(Clone, Debug)]
pub struct Ec2Api {
    client: Arc<Ec2Client>,
}

impl Ec2Api {
    pub fn new(config: Ec2Config, credentials: AwsCredentials, client_config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Arc::new(Ec2Client::new(config, credentials, client_config)?),
        })
    }

    /// Access key from `identity`, secret from `credential`
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self> {
        Self::new(
            Ec2Config::from_settings(settings),
            AwsCredentials::from_settings(settings)?,
            settings.client_config(),
        )
    }

    pub fn client(&self) -> &Ec2Client {
        &self.client
    }

    pub fn ami_api(&self) -> AmiApi {
        AmiApi::new(self.client.clone())
    }

    pub fn vpc_api(&self) -> VpcApi {
        VpcApi::new(self.client.clone())
    }

    pub fn subnet_api(&self) -> SubnetApi {
        SubnetApi::new(self.client.clone())
    }

    pub fn route_table_api(&self) -> RouteTableApi {
        RouteTableApi::new(self.client.clone())
    }

    pub fn security_group_api(&self) -> SecurityGroupApi {
        SecurityGroupApi::new(self.client.clone())
    }

    pub fn spot_instance_api(&self) -> SpotInstanceApi {
        SpotInstanceApi::new(self.client.clone())
    }

    pub fn internet_gateway_api(&self) -> InternetGatewayApi {
        InternetGatewayApi::new(self.client.clone())
    }

    pub fn placement_group_api(&self) -> PlacementGroupApi {
        PlacementGroupApi::new(self.client.clone())
    }

    pub fn monitoring_api(&self) -> MonitoringApi {
        MonitoringApi::new(self.client.clone())
    }

    pub fn tag_api(&self) -> TagApi {
        TagApi::new(self.client.clone())
    }
}
