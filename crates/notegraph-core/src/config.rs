//! Configuration types for an analysis run.
//!
//! Follows a builder pattern for complex configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Well-known name of the tab-separated index file
pub const DEFAULT_TSV_INDEX: &str = "mydict.txt";

/// Well-known name of the HTML index file
pub const DEFAULT_HTML_INDEX: &str = "Table of Contents.html";

/// Locations of the table of contents inside the working directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Tab-separated `title<TAB>identifier` file, checked first
    pub tsv_file: String,
    /// HTML file of anchors, checked second
    pub html_file: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            tsv_file: DEFAULT_TSV_INDEX.to_string(),
            html_file: DEFAULT_HTML_INDEX.to_string(),
        }
    }
}

/// Importance ranking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub damping: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1.0e-6,
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.damping) {
            return Err(Error::config_error(format!(
                "Damping must be in [0, 1), got {}",
                self.damping
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::config_error("max_iterations must be at least 1"));
        }
        if self.tolerance <= 0.0 || !self.tolerance.is_finite() {
            return Err(Error::config_error(format!(
                "Tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Options for the rendered HTML page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Page title
    pub page_title: String,
    /// Canvas height in pixels
    pub height: u32,
    /// Show the physics toggle and sliders
    pub physics_controls: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_title: "Visualization of Notes".to_string(),
            height: 750,
            physics_controls: true,
        }
    }
}

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Only keep edges between notes listed in the table of contents
    pub restrict: bool,
    /// Abort the build on the first note that cannot be processed
    pub fail_fast: bool,
    /// Title substring selecting the connected subgraph to render
    pub query: Option<String>,
    pub index: IndexConfig,
    pub ranking: RankingConfig,
    pub render: RenderConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            restrict: true,
            fail_fast: false,
            query: None,
            index: IndexConfig::default(),
            ranking: RankingConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Create new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder starting from defaults
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.index.tsv_file.trim().is_empty() || self.index.html_file.trim().is_empty() {
            return Err(Error::config_error("Index file names cannot be empty"));
        }
        if self.index.tsv_file == self.index.html_file {
            return Err(Error::config_error(
                "TSV and HTML index must be different files",
            ));
        }
        if self.render.height == 0 {
            return Err(Error::config_error("Render height must be positive"));
        }
        self.ranking.validate()
    }

    /// Non-empty subgraph query, if any
    pub fn subgraph_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))
    }
}

/// Builder for AnalysisConfig
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the restrict-to-index flag
    pub fn restrict(mut self, restrict: bool) -> Self {
        self.config.restrict = restrict;
        self
    }

    /// Abort on the first per-note failure
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.config.fail_fast = fail_fast;
        self
    }

    /// Set the subgraph query
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.config.query = Some(query.into());
        self
    }

    /// Override the index file names
    pub fn index_files(mut self, tsv: impl Into<String>, html: impl Into<String>) -> Self {
        self.config.index = IndexConfig {
            tsv_file: tsv.into(),
            html_file: html.into(),
        };
        self
    }

    /// Override ranking parameters
    pub fn ranking(mut self, ranking: RankingConfig) -> Self {
        self.config.ranking = ranking;
        self
    }

    /// Override render options
    pub fn render(mut self, render: RenderConfig) -> Self {
        self.config.render = render;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<AnalysisConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
