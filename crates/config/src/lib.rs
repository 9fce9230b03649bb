// SimStat - Simulator Statistics Analysis
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SCHEMA_VERSION: &str = "1.0";

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "table")]
    Human,
    Json,
    Csv,
    Compare,
    Verbose,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareLabels {
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
}

/// Report defaults loaded from YAML. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub cpu_id: Option<u32>,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub labels: CompareLabels,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            format: None,
            cpu_id: None,
            filter: None,
            labels: CompareLabels::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read report config at {:?}", path.as_ref()))?;
        let config = Self::from_yaml(&contents)
            .with_context(|| format!("Invalid report config {:?}", path.as_ref()))?;
        tracing::debug!("Loaded report config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(contents).context("Failed to parse Report Config YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '{}'",
                self.schema_version,
                SCHEMA_VERSION
            );
        }

        if let Some(filter) = &self.filter {
            if filter.trim().is_empty() {
                anyhow::bail!("'filter' cannot be empty");
            }
        }

        for label in [&self.labels.left, &self.labels.right].into_iter().flatten() {
            if label.trim().is_empty() {
                anyhow::bail!("Comparison labels cannot be empty");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let yaml = r#"
schema_version: "1.0"
format: compare
cpu_id: 1
filter: "dcache"
labels:
  left: "atomic"
  right: "timing"
"#;
        let config = ReportConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.format, Some(OutputFormat::Compare));
        assert_eq!(config.cpu_id, Some(1));
        assert_eq!(config.filter.as_deref(), Some("dcache"));
        assert_eq!(config.labels.left.as_deref(), Some("atomic"));
        assert_eq!(config.labels.right.as_deref(), Some("timing"));
    }

    #[test]
    fn test_schema_version_defaults_when_omitted() {
        let config = ReportConfig::from_yaml("{}").unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_table_alias() {
        let config = ReportConfig::from_yaml("format: table").unwrap();
        assert_eq!(config.format, Some(OutputFormat::Human));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ReportConfig::from_yaml("format: json\nbad_field: 1\n").unwrap_err();
        assert!(format!("{:#}", err).contains("bad_field"));
    }

    #[test]
    fn test_bad_schema_version_rejected() {
        let err = ReportConfig::from_yaml("schema_version: \"2.0\"\n").unwrap_err();
        assert!(err.to_string().contains("Unsupported schema_version"));
    }

    #[test]
    fn test_empty_filter_rejected() {
        assert!(ReportConfig::from_yaml("filter: \"  \"\n").is_err());
    }
}
