//! AWS wiring from the saved settings: the SDK config, the narrative
//! client built on it, and an STS check that the credentials are accepted.

use std::time::Duration;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use crossing_bedrock::narrate::BedrockNarrator;
use tracing::debug;

use crate::config::{AppConfig, CredentialSource, describe_credentials};

/// Account and principal the configured credentials resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account_id: String,
    pub arn: String,
}

pub async fn sdk_config(config: &AppConfig) -> SdkConfig {
    debug!(
        region = %config.region,
        credentials = %describe_credentials(&config.credentials),
        "loading AWS configuration"
    );
    let loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()));

    let loader = match &config.credentials {
        CredentialSource::Inline {
            access_key_id,
            secret_access_key,
            session_token,
        } => loader.credentials_provider(aws_sdk_sts::config::Credentials::new(
            access_key_id,
            secret_access_key,
            session_token.clone(),
            None,
            "crossing-inline",
        )),
        CredentialSource::Profile { profile_name } => loader.profile_name(profile_name),
        CredentialSource::DefaultChain => loader,
    };

    loader.load().await
}

/// Narrative client for the configured model, bounded by the configured
/// request timeout.
pub async fn narrator(config: &AppConfig) -> BedrockNarrator {
    let sdk = sdk_config(config).await;
    BedrockNarrator::new(&sdk, config.model_id.clone())
        .with_timeout(Duration::from_secs(config.request_timeout_secs))
}

/// Resolve the configured credentials with STS `GetCallerIdentity`.
pub async fn check_credentials(config: &AppConfig) -> eyre::Result<CallerIdentity> {
    let sdk = sdk_config(config).await;
    let identity = aws_sdk_sts::Client::new(&sdk)
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| eyre::eyre!("credential check failed: {}", e.into_service_error()))?;

    Ok(CallerIdentity {
        account_id: identity.account().unwrap_or_default().to_string(),
        arn: identity.arn().unwrap_or_default().to_string(),
    })
}
