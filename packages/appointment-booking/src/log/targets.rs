use crate::config::LogLevel;

// Define all log targets in one place
macro_rules! define_log_targets {
    ($(($const_name:ident, $field_name:ident, $target_str:literal)),* $(,)?) => {
        $(
            pub const $const_name: &str = $target_str;
        )*

        pub fn log_targets() -> Vec<&'static str> {
            vec![
                $(
                    $const_name,
                )*
            ]
        }

        pub fn log_level_for(config: &crate::config::LogConfig, target: &str) -> LogLevel {
            match target {
                $(
                    $const_name => config.$field_name.unwrap_or(config.level),
                )*
                _ => config.level,
            }
        }

        // Fails to compile if LogConfig is missing a target level field
        pub const fn validate_log_config_fields() {
            use crate::config::LogConfig;

            let _config = LogConfig {
                ansi_enabled: true,
                format: crate::config::LogFormat::Pretty,
                output: crate::config::LogOutput::Stderr,
                level: LogLevel::Info,
                $(
                    $field_name: None,
                )*
            };
        }

        // NOTE: LogConfig fields in config/log.rs must be kept in sync with the targets below.
        //
        // When adding a new target (NEWTARGET, new_target_level, "new_target"):
        // 1. Add the target to the define_log_targets! invocation below
        // 2. Add the field to LogConfig in config/log.rs:
        //    #[serde(default)]
        //    pub new_target_level: Option<LogLevel>,
        // 3. Set it to None in LogConfig::with_level()
    };
}

define_log_targets!(
    (AUTHENTICATION, authentication_level, "authentication"),
    (BOOKING, booking_level, "booking"),
    (CONFIG, config_level, "config"),
    (REGISTRY, registry_level, "registry"),
    (SHELL, shell_level, "shell"),
    (STORAGE, storage_level, "storage"),
);

const _: () = validate_log_config_fields();
