//! Standalone validation of a service configuration
//!
//! Validation answers "is this configuration internally coherent?" without
//! consulting any remote state. It reports every problem it finds rather
//! than stopping at the first, so a caller can surface the complete list in
//! one pass.

use crate::service::ServiceConfig;
use std::collections::HashSet;
use std::fmt;

/// One problem found in a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field (e.g., `access_rules.source`)
    pub field: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ServiceConfig {
    /// Check the configuration for internal problems
    ///
    /// Returns every issue found; an empty vector means the configuration is
    /// valid. Validation is purely local and never touches the network.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("name", &self.name),
            ("cloud_provider", &self.cloud_provider),
            ("region", &self.region),
            ("tier", &self.tier),
        ] {
            if value.trim().is_empty() {
                issues.push(ValidationIssue::new(field, "must not be empty"));
            }
        }

        if self.min_total_memory_gb <= 0 {
            issues.push(ValidationIssue::new(
                "min_total_memory_gb",
                "must be positive",
            ));
        }
        if self.max_total_memory_gb <= 0 {
            issues.push(ValidationIssue::new(
                "max_total_memory_gb",
                "must be positive",
            ));
        }
        if self.min_total_memory_gb > 0
            && self.max_total_memory_gb > 0
            && self.min_total_memory_gb > self.max_total_memory_gb
        {
            issues.push(ValidationIssue::new(
                "min_total_memory_gb",
                format!(
                    "must not exceed max_total_memory_gb ({} > {})",
                    self.min_total_memory_gb, self.max_total_memory_gb
                ),
            ));
        }
        if self.idle_timeout_minutes <= 0 {
            issues.push(ValidationIssue::new(
                "idle_timeout_minutes",
                "must be positive",
            ));
        }

        let mut seen = HashSet::new();
        for rule in &self.access_rules {
            if rule.source.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    "access_rules.source",
                    "must not be empty",
                ));
            } else if !seen.insert(rule.source.as_str()) {
                issues.push(ValidationIssue::new(
                    "access_rules.source",
                    format!("duplicate source '{}'", rule.source),
                ));
            }
        }

        issues
    }
}
