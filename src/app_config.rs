use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Where the speaker table comes from
    #[serde(default)]
    pub speakers: SpeakerSource,

    /// Appended to the input file stem to name the output file
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Extension of script files picked up in folder mode
    #[serde(default = "default_input_extension")]
    pub input_extension: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Speaker table source
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum SpeakerSource {
    // @source: CSV file with name,color,length columns
    Csv {
        #[serde(default = "default_csv_path")]
        csv_path: String,
    },
    // @source: Table compiled into the binary
    Builtin,
}

impl Default for SpeakerSource {
    fn default() -> Self {
        Self::Csv {
            csv_path: default_csv_path(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_csv_path() -> String {
    "speakers.csv".to_string()
}

fn default_output_suffix() -> String {
    "_output".to_string()
}

fn default_input_extension() -> String {
    "txt".to_string()
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.output_suffix.is_empty() {
            return Err(anyhow!("Output suffix must not be empty, the input file would be overwritten"));
        }

        if self.input_extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("Input extension must not be empty"));
        }

        if let SpeakerSource::Csv { csv_path } = &self.speakers {
            if csv_path.trim().is_empty() {
                return Err(anyhow!("Speaker CSV path is required when the speaker source is 'csv'"));
            }
        }

        Ok(())
    }

    /// Load the configuration file, or write and return the defaults when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            speakers: SpeakerSource::default(),
            output_suffix: default_output_suffix(),
            input_extension: default_input_extension(),
            log_level: LogLevel::default(),
        }
    }
}
