mod clinic;
mod log;
mod storage;

pub use clinic::{BookingConfig, ClinicConfig};
pub use log::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use storage::StorageConfig;

pub const APPT_PREFIX: &str = "APPT";
pub const DEFAULT_CONFIG_FILE_PATH: &str = "appointment-booking.toml";
pub const DEFAULT_DATA_DIR: &str = "data";
