// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0
//! AWS service client handling. The shared [`SdkConfig`] is loaded once at
//! startup; per-call clients are built from it, optionally re-resolved for a
//! caller-supplied region.

use aws_config::SdkConfig;
use aws_sdk_rds::config::Credentials;
use aws_types::region::Region;

/// Explicit static credentials passed on the command line. When absent the
/// SDK default provider chain applies (environment, profile, IAM role).
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    pub access_key: String,
    pub secret_access_key: String,
}

#[derive(Debug, Clone)]
pub struct AwsClientManager {
    config: SdkConfig,
    credentials: Option<StaticCredentials>,
}

impl AwsClientManager {
    pub async fn new(default_region: &str, credentials: Option<StaticCredentials>) -> Self {
        let config = load_config(default_region, credentials.as_ref()).await;
        Self {
            config,
            credentials,
        }
    }

    /// Resolve the config for one call. An empty region means "use the
    /// server default"; anything else re-resolves against that region.
    async fn config_for(&self, region: &str) -> SdkConfig {
        if region.is_empty() {
            self.config.clone()
        } else {
            load_config(region, self.credentials.as_ref()).await
        }
    }

    pub async fn rds(&self, region: &str) -> aws_sdk_rds::Client {
        aws_sdk_rds::Client::new(&self.config_for(region).await)
    }

    pub async fn cloudwatch(&self, region: &str) -> aws_sdk_cloudwatch::Client {
        aws_sdk_cloudwatch::Client::new(&self.config_for(region).await)
    }

    pub async fn pi(&self, region: &str) -> aws_sdk_pi::Client {
        aws_sdk_pi::Client::new(&self.config_for(region).await)
    }
}

async fn load_config(region: &str, credentials: Option<&StaticCredentials>) -> SdkConfig {
    let mut loader = aws_config::from_env().region(Region::new(region.to_string()));
    if let Some(creds) = credentials {
        loader = loader.credentials_provider(Credentials::new(
            creds.access_key.clone(),
            creds.secret_access_key.clone(),
            None,
            None,
            "rds-mcp-cli",
        ));
    }
    loader.load().await
}
