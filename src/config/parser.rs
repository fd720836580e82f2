use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_census::config::load_config;
///
/// let config = load_config(Path::new("census.toml")).unwrap();
/// println!("Starting at: {}", config.entrypoint);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
entrypoint = "https://site.example/home"
scope = "https://site.example"
excluded-extensions = ["pdf", "png"]

[renderer]
timeout-ms = 5000
user-agent = "site-census-test"
title-suffix = " - Example Docs"

[output]
report-path = "./report.md"
titles-path = "./titles.csv"

[[category]]
id = "api"
selector = ".api-page"

[[category]]
id = "guide"
selector = ".content"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.entrypoint, "https://site.example/home");
        assert_eq!(config.excluded_extensions, vec!["pdf", "png"]);
        assert_eq!(config.renderer.timeout_ms, 5000);
        assert_eq!(
            config.renderer.title_suffix.as_deref(),
            Some(" - Example Docs")
        );
        assert_eq!(config.output.titles_path.as_deref(), Some("./titles.csv"));
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].id, "api");
        assert_eq!(config.categories[1].selector, ".content");
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config(r#"entrypoint = "https://site.example/home""#).unwrap();

        assert_eq!(config.scope_substring(), "https://site.example");
        assert_eq!(config.excluded_extensions.len(), 13);
        assert_eq!(config.renderer.timeout_ms, 30_000);
        assert_eq!(config.output.report_path, "report.md");
        assert!(config.output.titles_path.is_none());
        assert!(config.categories.is_empty());
    }

    #[test]
    fn test_mixed_case_entrypoint_host() {
        let config = parse_config(r#"entrypoint = "https://Docs.Example/home""#).unwrap();

        assert_eq!(config.scope_substring(), "https://docs.example");
        assert!(config
            .scope_filter()
            .is_in_scope(config.entrypoint_url().unwrap().as_str()));
    }

    #[test]
    fn test_category_order_preserved() {
        let config = parse_config(
            r#"
entrypoint = "https://site.example/"

[[category]]
id = "zeta"
selector = ".z"

[[category]]
id = "alpha"
selector = ".a"
"#,
        )
        .unwrap();

        let ids: Vec<_> = config.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/census.toml"));
        assert!(matches!(result.unwrap_err(), ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_entrypoint() {
        let result = parse_config("[output]\nreport-path = \"r.md\"\n");
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let result = parse_config(
            r#"
entrypoint = "https://site.example/"

[[category]]
id = "unknown"
selector = ".x"
"#,
        );
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidCategory(_)
        ));
    }
}
