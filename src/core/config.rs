use crate::models::analysis::ExerciseType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Exercise assumed when a request carries no exercise tag
    pub default_exercise: String,
    /// Detections scoring below this are treated as "no body" (0.0-1.0)
    pub min_detection_confidence: f32,
    /// Pretty-print verdict JSON
    pub pretty_output: bool,
    /// tracing filter used when RUST_LOG is unset (e.g., "info", "formcheck_lib=debug")
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_exercise: ExerciseType::PushUp.as_str().to_string(),
            min_detection_confidence: 0.5,
            pretty_output: true,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it with defaults if it doesn't exist
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating it with defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.validate()?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.default_exercise.parse::<ExerciseType>().is_err() {
            return Err(format!(
                "Invalid default exercise: {}. Must be one of: push-up, squat, sit-up, pull-up, walk",
                self.default_exercise
            )
            .into());
        }

        if !(0.0..=1.0).contains(&self.min_detection_confidence) {
            return Err(format!(
                "Invalid detection confidence: {}. Must be between 0.0 and 1.0",
                self.min_detection_confidence
            )
            .into());
        }

        if self.log_filter.trim().is_empty() {
            return Err("Log filter cannot be empty".into());
        }

        Ok(())
    }

    /// Reset the default location to default configuration
    pub fn reset() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn get_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| "Could not determine home directory")?;

        let mut path = PathBuf::from(home);
        path.push(".formcheck");
        path.push("settings.json");

        Ok(path)
    }
}
