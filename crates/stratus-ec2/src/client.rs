//! Regional dispatch
//!
//! Every EC2 action is `POST /` with a form body. Each region gets its own
//! [`RestClient`] signed for that region; all of them share one connection
//! pool.

use std::sync::Arc;

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use stratus_core::http::build_http_client;
use stratus_core::{ClientConfig, RestClient, RestRequest};
use tracing::debug;

use crate::config::{AwsCredentials, Ec2Config};
use crate::error::{Ec2Error, Result};
use crate::form::FormParams;
use crate::signer::{EC2_SERVICE, SigV4Signer};
use crate::xml::{ReturnResponse, from_xml};

pub struct Ec2Client {
    config: Ec2Config,
    credentials: Arc<AwsCredentials>,
    client_config: ClientConfig,
    http: reqwest::Client,
    clients: DashMap<String, Arc<RestClient>>,
}

impl std::fmt::Debug for Ec2Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ec2Client")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("regions", &self.clients.len())
            .finish_non_exhaustive()
    }
}

impl Ec2Client {
    pub fn new(config: Ec2Config, credentials: AwsCredentials, client_config: ClientConfig) -> Result<Self> {
        let http = build_http_client(&client_config)?;
        Ok(Self {
            config,
            credentials: Arc::new(credentials),
            client_config,
            http,
            clients: DashMap::new(),
        })
    }

    pub fn config(&self) -> &Ec2Config {
        &self.config
    }

    /// `region`, or the configured default
    pub fn region<'a>(&'a self, region: Option<&'a str>) -> &'a str {
        region.unwrap_or(&self.config.default_region)
    }

    /// Signed client for `region`, created on first use
    pub fn client_for(&self, region: &str) -> Arc<RestClient> {
        if let Some(client) = self.clients.get(region) {
            return client.clone();
        }

        self.clients
            .entry(region.to_string())
            .or_insert_with(|| {
                let endpoint = self.config.endpoint_for(region);
                debug!("Creating EC2 client for region {} at {}", region, endpoint);
                let signer = SigV4Signer::new(self.credentials.clone(), region, EC2_SERVICE);
                Arc::new(RestClient::with_http_client(
                    self.http.clone(),
                    &endpoint,
                    self.client_config.clone(),
                    Arc::new(signer),
                ))
            })
            .clone()
    }

    /// Run one action and decode its XML response
    pub(crate) async fn call<T: DeserializeOwned>(&self, region: Option<&str>, params: FormParams) -> Result<T> {
        let region = self.region(region);
        let action = params.action().to_string();
        debug!("Calling EC2 {} in {}", action, region);

        let request = RestRequest::post("/").form(&params.into_pairs(&self.config.api_version))?;
        let response = self
            .client_for(region)
            .execute(request)
            .await
            .map_err(Ec2Error::from)?;
        from_xml(&response.body)
    }

    /// Run an action that answers `<return>true</return>`
    pub(crate) async fn call_return(&self, region: Option<&str>, params: FormParams) -> Result<bool> {
        let response: ReturnResponse = self.call(region, params).await?;
        Ok(response.into())
    }
}
