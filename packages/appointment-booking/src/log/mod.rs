pub mod subscriber;
mod targets;

use crate::config::{LogConfig, LogFormat};
use std::sync::Once;
use tracing_subscriber::{
    fmt::{
        format::{DefaultFields, Format},
        writer::BoxMakeWriter,
        SubscriberBuilder,
    },
    EnvFilter,
};

// Log targets used in logs like `debug!(target: STORAGE, msg = "Saved records");`
// Add new ones to the define_log_targets! invocation in targets.rs.
pub use targets::{
    log_level_for, log_targets, AUTHENTICATION, BOOKING, CONFIG, REGISTRY, SHELL, STORAGE,
};

static INIT: Once = Once::new();

type Subscriber = Box<dyn tracing::Subscriber + Send + Sync>;

pub fn init(config: LogConfig) {
    INIT.call_once(|| {
        let subscriber = subscriber::builder(&config);
        let subscriber = set_format(&config, subscriber);

        tracing::subscriber::set_global_default(subscriber)
            .expect("Could not set the tracing subscriber");
    });
}

pub fn set_format(
    config: &LogConfig,
    builder: SubscriberBuilder<DefaultFields, Format, EnvFilter, BoxMakeWriter>,
) -> Subscriber {
    match &config.format {
        LogFormat::Pretty => Box::new(builder.pretty().finish()),
        LogFormat::Structured => Box::new(builder.json().finish()),
        LogFormat::Text => Box::new(builder.finish()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use crate::test_helpers::MockMakeWriter;
    use tracing::dispatcher::set_default;
    use tracing::{debug, error, info, trace, warn};

    fn capture(config: &LogConfig) -> (MockMakeWriter, tracing::dispatcher::DefaultGuard) {
        let make_writer = MockMakeWriter::default();

        let subscriber =
            subscriber::builder(config).with_writer(BoxMakeWriter::new(make_writer.clone()));
        let subscriber = set_format(config, subscriber);

        let guard = set_default(&subscriber.into());
        (make_writer, guard)
    }

    #[test]
    fn test_simple_log() {
        let (make_writer, _default) = capture(&LogConfig::with_level(LogLevel::Info));

        error!("error message");

        let log_contents = make_writer.get_string();
        assert!(log_contents.contains("error message"));
    }

    #[test]
    fn default_level_only_shows_warnings_and_errors() {
        let (make_writer, _default) = capture(&LogConfig::default());

        info!("info message");
        warn!("warn message");

        let log_contents = make_writer.get_string();
        assert!(!log_contents.contains("info message"));
        assert!(log_contents.contains("warn message"));
    }

    #[test]
    fn test_log_levels() {
        let (make_writer, _default) = capture(&LogConfig::with_level(LogLevel::Warn));

        trace!("trace message");
        debug!("debug message");
        info!("info message");
        warn!("warn message");
        error!("error message");

        let log_contents = make_writer.get_string();
        assert!(!log_contents.contains("trace message"));
        assert!(!log_contents.contains("debug message"));
        assert!(!log_contents.contains("info message"));
        assert!(log_contents.contains("warn message"));
        assert!(log_contents.contains("error message"));
    }

    #[test]
    fn test_log_levels_with_targets() {
        let mut config = LogConfig::with_level(LogLevel::Info);
        config.booking_level = Some(LogLevel::Debug);
        config.storage_level = Some(LogLevel::Error);
        config.authentication_level = Some(LogLevel::Trace);

        let (make_writer, _default) = capture(&config);

        // with booking level 'debug', debug should be logged but not trace
        trace!(target: BOOKING, "trace/booking");
        debug!(target: BOOKING, "debug/booking");
        let log_contents = make_writer.get_string();
        assert!(!log_contents.contains("trace/booking"));
        assert!(log_contents.contains("debug/booking"));

        // with storage level 'error', error should be logged but not warn
        warn!(target: STORAGE, "warn/storage");
        error!(target: STORAGE, "error/storage");
        let log_contents = make_writer.get_string();
        assert!(!log_contents.contains("warn/storage"));
        assert!(log_contents.contains("error/storage"));

        trace!(target: AUTHENTICATION, "trace/authentication");
        let log_contents = make_writer.get_string();
        assert!(log_contents.contains("trace/authentication"));

        // registry falls back to the default 'info'
        debug!(target: REGISTRY, "debug/registry");
        info!(target: REGISTRY, "info/registry");
        let log_contents = make_writer.get_string();
        assert!(!log_contents.contains("debug/registry"));
        assert!(log_contents.contains("info/registry"));
    }

    #[test]
    fn test_log_format_structured() {
        let mut config = LogConfig::with_level(LogLevel::Info);
        config.format = LogFormat::Structured;

        let (make_writer, _default) = capture(&config);

        info!(msg = "message", value = 42);

        let log_contents = make_writer.get_string();

        assert!(log_contents.contains(r#"fields":{"msg":"message","value":42}"#));

        let line: serde_json::Value = serde_json::from_str(log_contents.trim()).unwrap();
        assert_eq!(line["level"], "INFO");
        assert_eq!(line["fields"]["value"], 42);
    }

    #[test]
    fn every_target_has_a_level() {
        let mut config = LogConfig::with_level(LogLevel::Info);
        config.shell_level = Some(LogLevel::Trace);

        assert_eq!(log_targets().len(), 6);
        assert_eq!(log_level_for(&config, SHELL), LogLevel::Trace);
        assert_eq!(log_level_for(&config, CONFIG), LogLevel::Info);
        assert_eq!(log_level_for(&config, "unknown"), LogLevel::Info);
    }
}
