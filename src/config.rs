//! Deployment settings: which sections exist and where files live.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "grader.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub sections: Vec<String>,
    pub roster_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_create_attempts: u32,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            sections: vec!["1".to_string(), "2".to_string()],
            roster_dir: PathBuf::from("students"),
            output_dir: PathBuf::from("."),
            max_create_attempts: 5,
        }
    }
}

/// Settings with every path resolved to where it actually points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub sections: Vec<String>,
    pub roster_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_create_attempts: u32,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Resolves relative paths against `base` and checks the values.
    pub fn resolve(self, base: &Path) -> Result<Config> {
        if self.sections.is_empty() {
            anyhow::bail!("Configuration error: 'sections' must list at least one section");
        }
        if let Some(bad) = self.sections.iter().find(|s| s.trim().is_empty() || s.as_str() == "q") {
            anyhow::bail!("Configuration error: '{}' cannot be used as a section", bad);
        }
        if self.max_create_attempts == 0 {
            anyhow::bail!("Configuration error: 'max_create_attempts' must be at least 1");
        }
        Ok(Config {
            sections: self.sections,
            roster_dir: base.join(self.roster_dir),
            output_dir: base.join(self.output_dir),
            max_create_attempts: self.max_create_attempts,
        })
    }
}

impl Config {
    /// Explicit path first, then `grader.toml` beside the executable, then
    /// built-in defaults relative to the executable's directory.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let file = ConfigFile::from_file(path)?;
            return file.resolve(&parent_dir(path));
        }

        let home = program_dir()?;
        let candidate = home.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            ConfigFile::from_file(&candidate)?.resolve(&home)
        } else {
            ConfigFile::default().resolve(&home)
        }
    }

    pub fn with_overrides(mut self, roster_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = roster_dir {
            self.roster_dir = dir;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }

    pub fn is_section(&self, input: &str) -> bool {
        self.sections.iter().any(|s| s == input)
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating the grader executable")?;
    Ok(parent_dir(&exe))
}
