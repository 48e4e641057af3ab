//! Configuration for the creator commission report

use anyhow::{Context, Result, bail};
use report_pipeline::{AggregateSpec, CategorySpec};
use serde::Deserialize;
use shared::ReportPreset;
use std::collections::HashSet;
use std::path::Path;

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    pub report: ReportSection,
    #[serde(default)]
    pub categories: Vec<CategorySection>,
}

/// Record layout of the reporting extract
#[derive(Debug, Deserialize)]
pub struct ReportSection {
    #[serde(default)]
    pub title: Option<String>,
    /// Field holding the creator name
    pub key_field: String,
    /// Column header for the key (defaults to "Creator")
    #[serde(default)]
    pub key_label: Option<String>,
    /// Field summed into the volume column
    pub volume_field: String,
    /// Date field used by --year (optional)
    #[serde(default)]
    pub date_field: Option<String>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

/// One commission category
#[derive(Debug, Deserialize)]
pub struct CategorySection {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    pub estimated_field: String,
    pub actual_field: String,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| {
            "Failed to parse config.toml. Check for:\n\
             - Missing required fields (report.key_field, report.volume_field, etc.)\n\
             - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
             - Incorrect data types (strings vs numbers)\n\n\
             See config.toml.example for the expected format."
        })
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Main configuration struct with validated values
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    /// Header of the key column
    pub key_label: String,
    /// Header of each category column, parallel to `spec.categories`
    pub category_labels: Vec<String>,
    /// Fields read by the rollup
    pub spec: AggregateSpec,
    pub date_field: Option<String>,
    pub page_size: usize,
}

impl Config {
    /// Validate a file config
    pub fn from_file(file_config: &FileConfig) -> Result<Self> {
        let report = &file_config.report;

        if report.key_field.trim().is_empty() {
            bail!("report.key_field must not be empty");
        }
        if report.volume_field.trim().is_empty() {
            bail!("report.volume_field must not be empty");
        }

        let page_size = report.page_size.unwrap_or(shared::CONFIG.page_size);
        if page_size == 0 {
            bail!("report.page_size must be at least 1");
        }

        let mut seen = HashSet::new();
        for category in &file_config.categories {
            if !seen.insert(category.name.as_str()) {
                bail!("Duplicate category name '{}' in config", category.name);
            }
        }

        Ok(Self {
            title: report
                .title
                .clone()
                .unwrap_or_else(|| shared::CONFIG.commission_report.title.to_string()),
            key_label: report
                .key_label
                .clone()
                .unwrap_or_else(|| shared::CONFIG.commission_report.key_label.to_string()),
            category_labels: file_config
                .categories
                .iter()
                .map(|c| c.label.clone().unwrap_or_else(|| c.name.clone()))
                .collect(),
            spec: AggregateSpec {
                key_field: report.key_field.clone(),
                volume_field: report.volume_field.clone(),
                categories: file_config
                    .categories
                    .iter()
                    .map(|c| CategorySpec::new(&c.name, &c.estimated_field, &c.actual_field))
                    .collect(),
            },
            date_field: report.date_field.clone(),
            page_size,
        })
    }

    /// Built-in layout used when there is no config.toml
    pub fn from_preset(preset: &ReportPreset, page_size: usize) -> Self {
        Self {
            title: preset.title.to_string(),
            key_label: preset.key_label.to_string(),
            category_labels: preset.categories.iter().map(|c| c.label.to_string()).collect(),
            spec: AggregateSpec {
                key_field: preset.key_field.to_string(),
                volume_field: preset.volume_field.to_string(),
                categories: preset
                    .categories
                    .iter()
                    .map(|c| CategorySpec::new(c.name, c.estimated_field, c.actual_field))
                    .collect(),
            },
            date_field: preset.date_field.map(str::to_string),
            page_size: page_size.max(1),
        }
    }

    /// Header of the category at `index`
    pub fn category_label(&self, index: usize) -> &str {
        self.category_labels
            .get(index)
            .or_else(|| self.spec.categories.get(index).map(|c| &c.name))
            .map_or("", String::as_str)
    }
}
