//! Shared AWS configuration loading.
//!
//! Credentials come from the default provider chain: environment variables,
//! shared credentials/config files (profiles, SSO), then container or
//! instance roles.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

/// Load the AWS SDK configuration for `region`.
pub async fn load_aws_config(region: &str) -> SdkConfig {
    debug!("Loading AWS configuration for region {}", region);
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}
