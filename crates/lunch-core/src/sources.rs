use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::menu::SourceId;
use crate::ConfigError;

fn default_enabled() -> bool {
    true
}

/// One restaurant to scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub id: SourceId,
    pub name: String,
    pub url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Overrides the client-wide request timeout for this source.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl SourceConfig {
    fn new(id: SourceId, name: &str, url: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            url: url.to_string(),
            enabled: true,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

impl SourcesFile {
    pub fn enabled(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter().filter(|s| s.enabled)
    }
}

/// The restaurants scraped when no sources file is present.
#[must_use]
pub fn default_sources() -> SourcesFile {
    SourcesFile {
        sources: vec![
            SourceConfig::new(
                SourceId::Edison,
                "Restaurang Edison",
                "https://restaurangedison.se/lunch/",
            ),
            SourceConfig::new(
                SourceId::Bricks,
                "Bricks Eatery",
                "https://brickseatery.se/lunch/",
            ),
            SourceConfig::new(SourceId::Kantin, "Kantin", "https://www.kantinlund.se/"),
            SourceConfig::new(
                SourceId::Smakapakina,
                "Smaka på Kina",
                "https://www.smakapakina.se/meny/",
            ),
            SourceConfig::new(
                SourceId::Grenden,
                "Grenden",
                "https://www.nordrest.se/restaurang/grenden/",
            ),
            SourceConfig::new(
                SourceId::Eatery,
                "Eatery Lund",
                "https://eatery.se/anlaggningar/lund",
            ),
            SourceConfig::new(
                SourceId::FoodHall,
                "Food Hall",
                "https://www.nordrest.se/restaurang/food-hall/",
            ),
        ],
    }
}

/// Load and validate the sources configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sources_file: SourcesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SourcesFileParse)?;

    validate_sources(&sources_file)?;

    Ok(sources_file)
}

/// Like [`load_sources`], but falls back to [`default_sources`] when the
/// file does not exist. A file that exists but is invalid is still an error.
///
/// # Errors
///
/// Returns `ConfigError` if an existing file cannot be read, parsed, or fails validation.
pub fn load_sources_or_default(path: &Path) -> Result<SourcesFile, ConfigError> {
    if path.exists() {
        load_sources(path)
    } else {
        Ok(default_sources())
    }
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for source in &sources_file.sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' must have a non-empty name",
                source.id
            )));
        }

        if !seen_ids.insert(source.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate source id: '{}'",
                source.id
            )));
        }

        if !is_absolute_http_url(&source.url) {
            return Err(ConfigError::Validation(format!(
                "source '{}' has invalid url '{}'; must be an absolute http(s) url",
                source.id, source.url
            )));
        }

        if source.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(format!(
                "source '{}' has timeout_secs 0; must be positive",
                source.id
            )));
        }
    }

    Ok(())
}

fn is_absolute_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split('/').next().unwrap_or_default();
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
