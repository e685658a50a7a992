//! CLI output: result formatting and error mapping to a stable CLI surface.

use crate::config::HookConfig;
use crate::error::ApiError;
use crate::types::{ArchiveBytes, ArtifactName, Digest};
use crate::upload::PublishOutcome;
use serde_json::json;
use std::path::Path;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    e.to_string()
}

fn to_json(value: serde_json::Value) -> Result<String, ApiError> {
    serde_json::to_string_pretty(&value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON output: {}", e)))
}

pub fn format_digest(
    source: &Path,
    archive: &ArchiveBytes,
    digest: &Digest,
    format: &str,
) -> Result<String, ApiError> {
    match format {
        "json" => to_json(json!({
            "source": source.display().to_string(),
            "digest": digest,
            "entries": archive.entry_count(),
            "archive_bytes": archive.len(),
        })),
        _ => Ok(digest.to_string()),
    }
}

pub fn format_name(
    name: &ArtifactName,
    digest: &Digest,
    archive: &ArchiveBytes,
    format: &str,
) -> Result<String, ApiError> {
    match format {
        "json" => to_json(json!({
            "name": name,
            "digest": digest,
            "entries": archive.entry_count(),
        })),
        _ => Ok(name.to_string()),
    }
}

pub fn format_package(
    written: &Path,
    name: &ArtifactName,
    digest: &Digest,
    format: &str,
) -> Result<String, ApiError> {
    match format {
        "json" => to_json(json!({
            "path": written.display().to_string(),
            "name": name,
            "digest": digest,
        })),
        _ => Ok(written.display().to_string()),
    }
}

pub fn format_publish(outcome: &PublishOutcome, format: &str) -> Result<String, ApiError> {
    match format {
        "json" => serde_json::to_string_pretty(outcome)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON output: {}", e))),
        _ => {
            let action = if outcome.uploaded() {
                "uploaded"
            } else {
                "already present"
            };
            Ok(format!("{}/{} ({})", outcome.bucket, outcome.key, action))
        }
    }
}

pub fn format_config(config: &HookConfig, format: &str) -> Result<String, ApiError> {
    match format {
        "json" => serde_json::to_string_pretty(config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON output: {}", e))),
        _ => toml::to_string_pretty(config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render TOML output: {}", e))),
    }
}
