use super::{LogConfig, StorageConfig, APPT_PREFIX};
use crate::error::{ConfigError, Error};
use crate::Args;
use config::{Config, Environment};
use regex::Regex;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ClinicConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BookingConfig {
    /// Reject malformed and past slots when booking
    #[serde(default = "BookingConfig::default_true")]
    pub validate_dates: bool,

    /// Seed the default doctors when the doctor store is empty
    #[serde(default = "BookingConfig::default_true")]
    pub seed_default_doctors: bool,
}

impl BookingConfig {
    const fn default_true() -> bool {
        true
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        BookingConfig {
            validate_dates: true,
            seed_default_doctors: true,
        }
    }
}

/// Config is read from an optional file in the current directory.
/// Supports TOML and JSON.
/// Variable names should match the struct field names.
///
/// ENV vars can be used to override file settings.
///
/// ENV vars must be prefixed with `APPT_`, nested values use `__`,
/// e.g. `APPT_STORAGE__DATA_DIR`.
///
impl ClinicConfig {
    pub fn load(args: &Args) -> Result<ClinicConfig, Error> {
        let mut config = ClinicConfig::build(&args.config_file_path)?;

        // If log level is default, it has not been set by the user in config
        if config.log.level == LogConfig::default_log_level() {
            config.log.level = args.log_level;
        }

        // If log format is default, it has not been set by the user in config
        if config.log.format == LogConfig::default_log_format() {
            config.log.format = args.log_format;
        }

        Ok(config)
    }

    pub fn build(path: &str) -> Result<Self, Error> {
        // For nested env values such as APPT_STORAGE__DATA_DIR, APPT_BOOKING__VALIDATE_DATES
        let appt_env_source = Environment::with_prefix(APPT_PREFIX)
            .try_parsing(true)
            .separator("__")
            .prefix_separator("_");

        let config: Self = Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(appt_env_source)
            .build()?
            .try_deserialize()
            .map_err(|err| match err {
                config::ConfigError::Message(ref s) => match s {
                    s if s.contains("missing field") => {
                        let name = extract_field_name(s).unwrap_or_else(|| "unknown".to_string());
                        ConfigError::MissingParameter { name }
                    }
                    s if s.contains("unknown variant")
                        || s.contains("does not have variant constructor") =>
                    {
                        let (name, value) = extract_invalid_field(s);
                        ConfigError::InvalidParameter { name, value }
                    }
                    _ => err.into(),
                },
                _ => err.into(),
            })?;

        Ok(config)
    }

    pub fn config_file_exists(path: &str) -> bool {
        PathBuf::from(path).exists()
    }
}

///
/// Extracts a field name (if present) from a config::ConfigError::Message
/// This is called in `build` if a ConfigError message contains the string `missing field`
///
fn extract_field_name(input: &str) -> Option<String> {
    let re = Regex::new(r"`(\w+)`").ok()?;
    re.captures(input)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
}

///
/// Extracts the offending field and value from a config::ConfigError::Message
/// for an enum value that matches no variant.
///
/// Error strings look like `unknown variant `dEbUG`, expected one of ...` or
/// `enum {name} does not have variant constructor {value}`
///
fn extract_invalid_field(input: &str) -> (String, String) {
    let default_name = "unknown".to_string();

    if input.starts_with("enum") {
        let words = input.split(' ').collect::<Vec<_>>();
        let name = words.get(1).map_or(default_name, |w| w.to_string());
        let value = words.last().map_or(String::new(), |w| w.to_string());
        return (name, value);
    }

    let value = extract_field_name(input).unwrap_or_default();
    (default_name, value)
}
