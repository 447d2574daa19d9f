//! Terminal rendering for plans and configuration diffs.

use std::fmt::Display;

use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use warden_core::ChangePlan;
use warden_model::ServiceConfig;

use crate::error::Result;

/// Render a change plan as one styled line per change.
///
/// Violations come first, then identity changes, then scaling changes,
/// matching the order in which apply would act on them.
pub fn plan_lines(observed: &ServiceConfig, plan: &ChangePlan) -> Vec<String> {
    let mut lines = Vec::new();

    for violation in &plan.violations {
        lines.push(format!("{} {}", "!".red().bold(), violation));
    }

    if let Some(identity) = &plan.identity {
        if let Some(name) = &identity.name {
            lines.push(changed("name", &observed.name, name));
        }
        if let Some(access) = &identity.access {
            for rule in &access.added {
                if rule.description.is_empty() {
                    lines.push(format!("{} access rule {}", "+".green(), rule.source));
                } else {
                    lines.push(format!(
                        "{} access rule {} ({})",
                        "+".green(),
                        rule.source,
                        rule.description
                    ));
                }
            }
            for source in &access.removed {
                lines.push(format!("{} access rule {}", "-".red(), source));
            }
        }
    }

    if let Some(scaling) = &plan.scaling {
        if let Some(idle) = scaling.idle_scaling {
            lines.push(changed("idle_scaling", observed.idle_scaling, idle));
        }
        if let Some(min) = scaling.min_total_memory_gb {
            lines.push(changed(
                "min_total_memory_gb",
                observed.min_total_memory_gb,
                min,
            ));
        }
        if let Some(max) = scaling.max_total_memory_gb {
            lines.push(changed(
                "max_total_memory_gb",
                observed.max_total_memory_gb,
                max,
            ));
        }
        if let Some(timeout) = scaling.idle_timeout_minutes {
            lines.push(changed(
                "idle_timeout_minutes",
                observed.idle_timeout_minutes,
                timeout,
            ));
        }
    }

    lines
}

fn changed<T: Display>(field: &str, old: T, new: T) -> String {
    format!("{} {}: {} -> {}", "~".yellow(), field, old, new)
}

/// Render a line-by-line diff between two configurations, serialized as TOML.
pub fn render_config_diff(observed: &ServiceConfig, desired: &ServiceConfig) -> Result<String> {
    let old = toml::to_string_pretty(observed)?;
    let new = toml::to_string_pretty(desired)?;

    let diff = TextDiff::from_lines(&old, &new);
    let mut out = String::new();

    for change in diff.iter_all_changes() {
        let line = change.value().trim_end_matches('\n');
        match change.tag() {
            ChangeTag::Delete => out.push_str(&format!("{} {}", "-".red(), line.red())),
            ChangeTag::Insert => out.push_str(&format!("{} {}", "+".green(), line.green())),
            ChangeTag::Equal => out.push_str(&format!("  {line}")),
        }
        out.push('\n');
    }

    Ok(out)
}
