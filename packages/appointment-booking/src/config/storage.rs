use super::DEFAULT_DATA_DIR;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "StorageConfig::default_doctors_file")]
    pub doctors_file: String,

    #[serde(default = "StorageConfig::default_patients_file")]
    pub patients_file: String,

    #[serde(default = "StorageConfig::default_appointments_file")]
    pub appointments_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: StorageConfig::default_data_dir(),
            doctors_file: StorageConfig::default_doctors_file(),
            patients_file: StorageConfig::default_patients_file(),
            appointments_file: StorageConfig::default_appointments_file(),
        }
    }
}

impl StorageConfig {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(DEFAULT_DATA_DIR)
    }

    pub fn default_doctors_file() -> String {
        "doctors.txt".to_string()
    }

    pub fn default_patients_file() -> String {
        "patients.txt".to_string()
    }

    pub fn default_appointments_file() -> String {
        "appointments.txt".to_string()
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn doctors_path(&self) -> PathBuf {
        self.data_dir.join(&self.doctors_file)
    }

    pub fn patients_path(&self) -> PathBuf {
        self.data_dir.join(&self.patients_file)
    }

    pub fn appointments_path(&self) -> PathBuf {
        self.data_dir.join(&self.appointments_file)
    }
}
