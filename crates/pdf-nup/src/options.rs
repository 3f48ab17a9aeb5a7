use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for combining PDFs into an N-up document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombineOptions {
    // Input, in page order
    pub input_files: Vec<PathBuf>,

    // Layout
    pub layout: LayoutMode,

    // Output
    pub output_file: Option<PathBuf>,
    pub compress_output: bool,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            input_files: Vec::new(),
            layout: LayoutMode::TwoUp,
            output_file: None,
            compress_output: true,
        }
    }
}

impl CombineOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Output path, defaulting to `combined-slides-<layout>.pdf`
    pub fn output_path(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.layout.default_output_name()))
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_files.is_empty() {
            return Err(ImposeError::Config("No input files specified".to_string()));
        }

        let output = self.output_path();
        if self.input_files.iter().any(|input| *input == output) {
            return Err(ImposeError::Config(format!(
                "Output file {} would overwrite an input file",
                output.display()
            )));
        }

        Ok(())
    }
}
