use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Layout configuration for one composition run
///
/// A run captures these settings by value when it starts; later edits only
/// affect the next run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutSettings {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margin: MarginMode,
    /// File name the finished document is saved under
    pub output_name: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin: MarginMode::None,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

impl LayoutSettings {
    /// Load settings from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let settings = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::Config(format!("Failed to parse settings: {}", e)))?;
        Ok(settings)
    }

    /// Save settings to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize settings: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Page size in points for this run, constant across all pages
    pub fn page_dimensions(&self) -> PageDimensions {
        self.page_size.dimensions_pt(self.orientation)
    }

    pub fn margin_pt(&self) -> f32 {
        self.margin.inset_pt()
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_name.trim().is_empty() {
            return Err(ComposeError::Config("Output name is empty".to_string()));
        }
        Ok(())
    }
}
