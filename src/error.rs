//! Error taxonomy.
//!
//! Every variant is raised during setup (parameters, roster loading,
//! pattern parsing, date resolution) or while reading/writing files.
//! The assignment engine itself never fails: unmet quotas degrade to
//! short or empty role slots.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Data error: {message}")]
    Data { message: String },

    #[error("Invalid composition pattern '{code}': {reason}")]
    Pattern { code: String, reason: String },

    #[error("Calendar error: {message}")]
    Calendar { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config file parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl RosterError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::Data {
            message: message.into(),
        }
    }

    pub fn pattern(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Pattern {
            code: code.into(),
            reason: reason.into(),
        }
    }

    pub fn calendar(message: impl Into<String>) -> Self {
        Self::Calendar {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
