//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::Atf2CtsConfig;
use crate::domain::errors::Atf2CtsError;
use crate::domain::result::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "atf2cts.toml";

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid placeholder regex"));

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into Atf2CtsConfig
/// 4. Applies environment variable overrides (ATF2CTS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is not set, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use atf2cts::config::loader::load_config;
///
/// let config = load_config("atf2cts.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<Atf2CtsConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Atf2CtsError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Atf2CtsError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Loads `path`, falling back to defaults when it is the default path and absent
///
/// An explicitly named configuration file must exist; the default
/// `atf2cts.toml` is optional. Environment overrides and validation apply in
/// both cases.
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<Atf2CtsConfig> {
    let path = path.as_ref();
    if path == Path::new(DEFAULT_CONFIG_PATH) && !path.exists() {
        let mut config = Atf2CtsConfig::default();
        apply_env_overrides(&mut config)?;
        config.validate().map_err(|e| {
            Atf2CtsError::Configuration(format!("Configuration validation failed: {}", e))
        })?;
        return Ok(config);
    }
    load_config(path)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// Returns an error if the TOML is invalid, a placeholder names an unset
/// variable, or validation fails.
pub fn parse_config(contents: &str) -> Result<Atf2CtsConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: Atf2CtsConfig = toml::from_str(&contents)
        .map_err(|e| Atf2CtsError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        Atf2CtsError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        // Placeholders in comments are left alone
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in ENV_PLACEHOLDER.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(Atf2CtsError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using ATF2CTS_* prefix
///
/// Environment variables follow the pattern: ATF2CTS_<SECTION>_<KEY>
/// For example: ATF2CTS_OUTPUT_DATA_ROOT, ATF2CTS_APPLICATION_WORKERS
fn apply_env_overrides(config: &mut Atf2CtsConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("ATF2CTS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("ATF2CTS_APPLICATION_WORKERS") {
        config.application.workers = val.parse().map_err(|_| {
            Atf2CtsError::Configuration(format!(
                "ATF2CTS_APPLICATION_WORKERS must be a non-negative integer, got '{}'",
                val
            ))
        })?;
    }

    // Output overrides
    if let Ok(val) = std::env::var("ATF2CTS_OUTPUT_DATA_ROOT") {
        config.output.data_root = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("ATF2CTS_OUTPUT_TEXTGROUP_URN") {
        config.output.textgroup_urn = val;
    }
    if let Ok(val) = std::env::var("ATF2CTS_OUTPUT_TEXTGROUP_NAME") {
        config.output.textgroup_name = val;
    }
    if let Ok(val) = std::env::var("ATF2CTS_OUTPUT_WORK_DESCRIPTION") {
        config.output.work_description = val;
    }
    if let Ok(val) = std::env::var("ATF2CTS_OUTPUT_LABEL_PREFIX") {
        config.output.label_prefix = val;
    }
    if let Ok(val) = std::env::var("ATF2CTS_OUTPUT_DEFAULT_LANGUAGE") {
        config.output.default_language = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ATF2CTS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ATF2CTS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("ATF2CTS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ATF2CTS_TEST_SUBST_VAR", "test_value");
        let input = "name = \"${ATF2CTS_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "name = \"test_value\"\n");
        std::env::remove_var("ATF2CTS_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ATF2CTS_TEST_MISSING_VAR");
        let input = "name = \"${ATF2CTS_TEST_MISSING_VAR}\"";
        assert!(substitute_env_vars(input).is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("ATF2CTS_TEST_COMMENTED_VAR");
        let input = "# name = \"${ATF2CTS_TEST_COMMENTED_VAR}\"";
        assert_eq!(substitute_env_vars(input).unwrap(), format!("{input}\n"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("nonexistent.toml").is_err());
        assert!(load_config_or_default("nonexistent.toml").is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"
workers = 4

[output]
data_root = "out/cts"
textgroup_urn = "urn:cts:cdli:letters"
label_prefix = "CDLI"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.workers, 4);
        assert_eq!(config.output.data_root, PathBuf::from("out/cts"));
        assert_eq!(config.output.textgroup_urn, "urn:cts:cdli:letters");
        assert_eq!(config.output.default_language, "und");
    }

    #[test]
    fn test_parse_config_rejects_invalid_values() {
        assert!(parse_config("[output]\ntextgroup_urn = \"bad\"\n").is_err());
        assert!(parse_config("[application]\nlog_level = \"loud\"\n").is_err());
        assert!(parse_config("not toml at all [").is_err());
    }
}
