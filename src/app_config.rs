use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::capability::BackendKind;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// DOCX handling
    #[serde(default)]
    pub docx: DocxConfig,

    /// Editor integration settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// What to do when a DOCX document is saved and no backend can build DOCX
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocxFallback {
    // @fallback: Save as UTF-8 text and rename the document to .txt
    #[default]
    ConvertToPlainText,
    // @fallback: Refuse the save
    Reject,
}

impl std::str::FromStr for DocxFallback {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "convert_to_plain_text" | "plain_text" => Ok(Self::ConvertToPlainText),
            "reject" => Ok(Self::Reject),
            _ => Err(anyhow!("Invalid DOCX fallback policy: {}", s)),
        }
    }
}

/// DOCX backend configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DocxConfig {
    /// Backends in preference order; an empty list disables structured DOCX support
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendKind>,

    /// Policy when no backend can build DOCX documents
    #[serde(default)]
    pub fallback: DocxFallback,
}

impl Default for DocxConfig {
    fn default() -> Self {
        Self {
            backends: default_backends(),
            fallback: DocxFallback::default(),
        }
    }
}

/// Settings for the editor client action
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditorConfig {
    /// Client action tag that opens the editor dialog
    #[serde(default = "default_client_action_tag")]
    pub client_action_tag: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            client_action_tag: default_client_action_tag(),
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
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_backends() -> Vec<BackendKind> {
    vec![BackendKind::Paragraphs, BackendKind::RawText]
}

fn default_client_action_tag() -> String {
    "document_text_editor".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for backend in &self.docx.backends {
            if !seen.insert(backend) {
                return Err(anyhow!("DOCX backend listed more than once: {}", backend));
            }
        }

        if self.editor.client_action_tag.trim().is_empty() {
            return Err(anyhow!("Editor client action tag must not be empty"));
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load a configuration file, writing the defaults there first if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }
}
