use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gymreport_core::parse_since;

/// A4 portrait, in inches.
pub const A4_SIZE: (f64, f64) = (8.27, 11.69);

const CONFIG_DIR_NAME: &str = "gymreport";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    /// `YYYY-MM-DD` or a relative offset like `-6m`.
    pub since: String,
    pub page_width: f64,
    pub page_height: f64,
    /// Optional JSON report definition; the standard report is used otherwise.
    pub plan: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("workouts.csv"),
            output: PathBuf::from("gym_report.svg"),
            since: "2022-09-01".to_string(),
            page_width: A4_SIZE.0,
            page_height: A4_SIZE.1,
            plan: None,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Workout log (CSV export)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Where the report is written
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Only entries strictly after this date (YYYY-MM-DD, or -30d / -12w / -6m / -1y)
    #[arg(short, long)]
    pub since: Option<String>,
    /// JSON report definition
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Page width in inches
    #[arg(long)]
    pub page_width: Option<f64>,
    /// Page height in inches
    #[arg(long)]
    pub page_height: Option<f64>,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if let Some(input) = &overrides.input {
            self.input = input.clone();
        }
        if let Some(output) = &overrides.output {
            self.output = output.clone();
        }
        if let Some(since) = &overrides.since {
            self.since = since.clone();
        }
        if let Some(plan) = &overrides.plan {
            self.plan = Some(plan.clone());
        }
        if let Some(w) = overrides.page_width {
            self.page_width = w;
        }
        if let Some(h) = overrides.page_height {
            self.page_height = h;
        }
        self
    }

    pub fn cutoff(&self) -> Result<NaiveDate> {
        self.cutoff_from(Local::now().date_naive())
    }

    pub fn cutoff_from(&self, today: NaiveDate) -> Result<NaiveDate> {
        parse_since(&self.since, today).with_context(|| format!("Invalid cutoff '{}'", self.since))
    }

    pub fn page_size(&self) -> Result<(f64, f64)> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.page_width) || !valid(self.page_height) {
            return Err(anyhow!(
                "Page size must be positive, got {} x {}",
                self.page_width,
                self.page_height
            ));
        }
        Ok((self.page_width, self.page_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"input": "export.csv", "since": "-6m"}"#).unwrap();
        assert_eq!(config.input, PathBuf::from("export.csv"));
        assert_eq!(config.since, "-6m");
        assert_eq!(config.output, PathBuf::from("gym_report.svg"));
        assert_eq!(config.page_size().unwrap(), A4_SIZE);
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            output: Some(PathBuf::from("out.json")),
            page_width: Some(11.0),
            ..Default::default()
        };
        let config = Config::default().apply(&overrides);
        assert_eq!(config.output, PathBuf::from("out.json"));
        assert_eq!(config.page_width, 11.0);
        assert_eq!(config.input, PathBuf::from("workouts.csv"));
    }

    #[test]
    fn test_cutoff() {
        let mut config = Config::default();
        assert_eq!(config.cutoff_from(d("2023-01-15")).unwrap(), d("2022-09-01"));

        config.since = "-2w".to_string();
        assert_eq!(config.cutoff_from(d("2023-01-15")).unwrap(), d("2023-01-01"));

        config.since = "last summer".to_string();
        assert!(config.cutoff_from(d("2023-01-15")).is_err());
    }

    #[test]
    fn test_rejects_bad_page_size() {
        let config = Config {
            page_height: 0.0,
            ..Default::default()
        };
        assert!(config.page_size().is_err());
    }

    #[test]
    fn test_explicit_config_file() {
        let path = std::env::temp_dir().join(format!("gymreport_config_{}.json", std::process::id()));
        fs::write(&path, r#"{"output": "report.svg", "page_width": 8.5, "page_height": 11.0}"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output, PathBuf::from("report.svg"));
        assert_eq!(config.page_size().unwrap(), (8.5, 11.0));

        fs::remove_file(&path).ok();
        assert!(Config::load(Some(&path)).is_err());
    }
}
