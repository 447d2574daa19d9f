//! Canonical configurations for test scenarios.

use warden_model::{AccessRule, ServiceConfig};

/// The baseline service every suite starts from: a production analytics
/// service on AWS with one VPC access rule.
pub fn sample_config() -> ServiceConfig {
    ServiceConfig {
        name: "analytics".to_string(),
        cloud_provider: "aws".to_string(),
        region: "us-east-2".to_string(),
        tier: "production".to_string(),
        idle_scaling: true,
        min_total_memory_gb: 24,
        max_total_memory_gb: 360,
        idle_timeout_minutes: 5,
        access_rules: vec![AccessRule::new("10.0.0.0/8", "vpc")],
    }
}

/// Baseline config with a caller-chosen access list.
pub fn sample_config_with_rules(rules: Vec<AccessRule>) -> ServiceConfig {
    ServiceConfig {
        access_rules: rules,
        ..sample_config()
    }
}

/// warden.toml content matching [`sample_config`].
pub fn sample_manifest_toml() -> String {
    r#"[service]
name = "analytics"
cloud_provider = "aws"
region = "us-east-2"
tier = "production"
idle_scaling = true
min_total_memory_gb = 24
max_total_memory_gb = 360
idle_timeout_minutes = 5

[[service.access_rules]]
source = "10.0.0.0/8"
description = "vpc"
"#
    .to_string()
}
