//! `docs.toml` configuration loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file structure (docs.toml).
///
/// Every field has a default reproducing the stock build, so the file is
/// optional and may be partial.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub headers: HeadersConfig,
    #[serde(default)]
    pub env: EnvConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

/// Project identity, shared by the generator config and the XML mapping key.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_project")]
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_dir")]
    pub dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    /// XML tree location; defaults to `<dir>/doxyxml`.
    #[serde(default)]
    pub xml: Option<String>,
    /// Theme override passed to the renderer.
    #[serde(default)]
    pub theme: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            output: default_output(),
            xml: None,
            theme: None,
        }
    }
}

/// The headers handed to the binary-description generator.
#[derive(Debug, Deserialize)]
pub struct HeadersConfig {
    #[serde(default = "default_include_dir")]
    pub dir: String,
    #[serde(default = "default_headers")]
    pub files: Vec<String>,
    #[serde(default = "default_predefined")]
    pub predefined: Vec<String>,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            dir: default_include_dir(),
            files: default_headers(),
            predefined: default_predefined(),
        }
    }
}

/// The package environment and what to install into it.
#[derive(Debug, Deserialize)]
pub struct EnvConfig {
    #[serde(default = "default_env_dir")]
    pub dir: String,
    /// Packages in `name` or `name@revision` form.
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            dir: default_env_dir(),
            packages: default_packages(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct BuildSettings {
    /// Generator executable; defaults to `./doxygen` (`.exe` on Windows).
    #[serde(default)]
    pub doxygen: Option<String>,
}

fn default_project() -> String {
    "YASL".to_string()
}
fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_output() -> String {
    "_build".to_string()
}
fn default_include_dir() -> String {
    "include".to_string()
}
fn default_env_dir() -> String {
    "_env".to_string()
}
fn default_headers() -> Vec<String> {
    bindery_build::DEFAULT_HEADERS
        .iter()
        .map(|h| h.to_string())
        .collect()
}
fn default_predefined() -> Vec<String> {
    bindery_build::DEFAULT_PREDEFINED
        .iter()
        .map(|p| p.to_string())
        .collect()
}
fn default_packages() -> Vec<String> {
    ["sphinx", "breathe", "sphinx-bulma"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Load configuration from `path` if it exists.
///
/// A missing file yields the defaults; a malformed file is an error.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_stock_build() {
        let config = ConfigFile::default();

        assert_eq!(config.project.name, "YASL");
        assert_eq!(config.docs.dir, "docs");
        assert_eq!(config.docs.output, "_build");
        assert_eq!(config.headers.dir, "include");
        assert_eq!(config.env.dir, "_env");
        assert_eq!(config.env.packages, ["sphinx", "breathe", "sphinx-bulma"]);
        assert!(config
            .headers
            .files
            .contains(&"memory/trampoline.h".to_string()));
        assert!(config.build.doxygen.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: ConfigFile = toml::from_str("[project]\nname = \"Other\"\n").unwrap();

        assert_eq!(config.project.name, "Other");
        assert_eq!(config.docs.output, "_build");
        assert_eq!(config.env.packages.len(), 3);
    }

    #[test]
    fn revisions_survive_the_package_list() {
        let config: ConfigFile =
            toml::from_str("[env]\npackages = [\"breathe@4da6a4e\"]\n").unwrap();

        assert_eq!(config.env.packages, ["breathe@4da6a4e"]);
    }
}
