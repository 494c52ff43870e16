use std::{env, path::PathBuf};

use color_eyre::{Result, eyre::Context};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
}

/// String-typed phone settings as they arrive from defaults, environment and
/// CLI. Resolved into checked country ids by
/// [`crate::component::phone_input::PhoneInputConfig::from_settings`].
#[derive(Clone, Debug, Deserialize)]
pub struct PhoneConfig {
    #[serde(default = "default_country")]
    pub default_country: String,
    #[serde(default)]
    pub preferred_countries: Vec<String>,
    #[serde(default)]
    pub smart_caret: bool,
}

fn default_country() -> String {
    "US".to_string()
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            default_country: default_country(),
            preferred_countries: Vec::new(),
            smart_caret: false,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub phone: PhoneConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
}

impl Config {
    pub fn new(cli_source: Option<crate::cli::ClapSource>) -> Result<Self> {
        let data_dir = get_data_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_str().unwrap())?
            .set_default("phone.default_country", "US")?
            .set_default("phone.smart_caret", false)?;

        // Add CLI source last (highest priority)
        if let Some(cli_source) = cli_source {
            builder = builder.add_source(cli_source);
        }

        let cfg: Self = builder
            .build()
            .context("Error building config")?
            .try_deserialize()
            .context("Error deserialize config")?;

        Ok(cfg)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = env::var(format!("{}_DATA", PROJECT_NAME.clone()))
        .ok()
        .map(PathBuf::from)
    {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("net", "marajelen", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::tempdir_in;

    use crate::cli::{ClapSource, Cli};

    use super::*;

    #[test]
    fn data_dir_from_env() {
        let temp_data = tempdir_in(".").unwrap();

        temp_env::with_vars(
            [(
                format!("{}_DATA", PROJECT_NAME.clone()).as_str(),
                Some(temp_data.path().to_str().unwrap()),
            )],
            || {
                let config = Config::new(None).unwrap();
                assert_eq!(config.config.data_dir, temp_data.path());
            },
        );
    }

    #[test]
    fn data_dir_from_cli() {
        let args = Cli::parse_from(["test-config", "--data-dir", ".cli-data"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.config.data_dir, PathBuf::from(".cli-data"));
    }

    #[test]
    fn default_country_defaults_to_us() {
        let args = Cli::parse_from(["test-config"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.phone.default_country, "US");
        assert!(config.phone.preferred_countries.is_empty());
        assert!(!config.phone.smart_caret);
    }

    #[test]
    fn default_country_from_cli() {
        let args = Cli::parse_from(["test-config", "--default-country", "GB"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.phone.default_country, "GB");
    }

    #[test]
    fn preferred_countries_from_cli() {
        let args = Cli::parse_from([
            "test-config",
            "--preferred-country",
            "US",
            "--preferred-country",
            "GB",
        ]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.phone.preferred_countries, vec!["US", "GB"]);
    }

    #[test]
    fn smart_caret_from_cli() {
        let args = Cli::parse_from(["test-config", "--smart-caret"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert!(config.phone.smart_caret);

        let args = Cli::parse_from(["test-config"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert!(!config.phone.smart_caret);
    }
}
