use crate::config::types::{CategoryRule, Config, OutputConfig, RendererConfig};
use crate::state::RESERVED_BUCKET_NAMES;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_entrypoint(&config.entrypoint)?;
    validate_scope(config)?;
    validate_extensions(&config.excluded_extensions)?;
    validate_renderer_config(&config.renderer)?;
    validate_output_config(&config.output)?;
    validate_categories(&config.categories)?;
    Ok(())
}

/// Validates the entrypoint URL
fn validate_entrypoint(entrypoint: &str) -> Result<(), ConfigError> {
    let url = Url::parse(entrypoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid entrypoint '{}': {}", entrypoint, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Entrypoint '{}' must use HTTP or HTTPS, got {}",
            entrypoint,
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Entrypoint '{}' has no host",
            entrypoint
        )));
    }

    Ok(())
}

/// Validates the scope substring and that the entrypoint lies inside it
fn validate_scope(config: &Config) -> Result<(), ConfigError> {
    if let Some(scope) = &config.scope {
        if scope.trim().is_empty() {
            return Err(ConfigError::Validation("scope cannot be empty".to_string()));
        }
    }

    // Links are compared in their parsed form, so the entrypoint is too
    let scope = config.scope_substring();
    let entrypoint = config
        .entrypoint_url()
        .map(String::from)
        .unwrap_or_else(|_| config.entrypoint.clone());
    if !entrypoint.contains(&scope) {
        return Err(ConfigError::Validation(format!(
            "Entrypoint '{}' is outside of scope '{}'",
            config.entrypoint, scope
        )));
    }

    Ok(())
}

/// Validates the extension denylist
fn validate_extensions(extensions: &[String]) -> Result<(), ConfigError> {
    for ext in extensions {
        let bare = ext.trim_start_matches('.');
        if bare.is_empty() {
            return Err(ConfigError::Validation(
                "excluded extensions cannot be empty".to_string(),
            ));
        }

        if !bare.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "excluded extension must be alphanumeric, got '{}'",
                ext
            )));
        }
    }

    Ok(())
}

/// Validates renderer configuration
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "timeout-ms must be >= 100ms, got {}ms",
            config.timeout_ms
        )));
    }

    if let Some(agent) = &config.user_agent {
        if agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agent cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    if let Some(path) = &config.titles_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "titles-path cannot be empty".to_string(),
            ));
        }
        if *path == config.report_path {
            return Err(ConfigError::Validation(format!(
                "titles-path and report-path must differ, both are '{}'",
                path
            )));
        }
    }

    Ok(())
}

/// Validates category rules
fn validate_categories(rules: &[CategoryRule]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for rule in rules {
        if rule.id.trim().is_empty() {
            return Err(ConfigError::InvalidCategory(
                "category id cannot be empty".to_string(),
            ));
        }

        if RESERVED_BUCKET_NAMES.contains(&rule.id.as_str()) {
            return Err(ConfigError::InvalidCategory(format!(
                "category id '{}' is reserved",
                rule.id
            )));
        }

        if !seen.insert(rule.id.as_str()) {
            return Err(ConfigError::InvalidCategory(format!(
                "duplicate category id '{}'",
                rule.id
            )));
        }

        if rule.selector.trim().is_empty() {
            return Err(ConfigError::InvalidCategory(format!(
                "category '{}' has an empty selector",
                rule.id
            )));
        }
    }

    Ok(())
}
