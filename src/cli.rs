use clap::{Parser, Subcommand};
use config::Source;

use crate::config::get_data_dir;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Path to the data directory
    #[arg(short, long, value_name = "PATH")]
    pub data_dir: Option<String>,

    /// Two-letter country the input starts on
    #[arg(short = 'c', long, value_name = "CODE")]
    pub default_country: Option<String>,

    /// Countries pinned to the top of the selector; repeat for more than one
    #[arg(short = 'p', long = "preferred-country", value_name = "CODE")]
    pub preferred_countries: Vec<String>,

    /// Keep the cursor position when the input reformats the number
    #[arg(long)]
    pub smart_caret: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize and validate one number, print the result and exit
    Check {
        number: String,

        /// Country to interpret the number in, defaults to the configured one
        #[arg(short, long, value_name = "CODE")]
        country: Option<String>,
    },
}

const VERSION_MESSAGE: &str = concat!(env!("CARGO_PKG_VERSION"));

pub fn version() -> String {
    let author = clap::crate_authors!();

    let data_dir_path = get_data_dir().display().to_string();

    format!(
        "\
{VERSION_MESSAGE}

Authors: {author}

Data directory: {data_dir_path}"
    )
}

#[derive(Clone, Debug)]
pub(crate) struct ClapSource {
    pub data_dir: Option<String>,
    pub default_country: Option<String>,
    pub preferred_countries: Vec<String>,
    pub smart_caret: bool,
}

impl ClapSource {
    pub fn new(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            default_country: cli.default_country.clone(),
            preferred_countries: cli.preferred_countries.clone(),
            smart_caret: cli.smart_caret,
        }
    }
}

impl Source for ClapSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut map = config::Map::new();
        if self.data_dir.is_some() {
            map.insert(
                "data_dir".to_string(),
                config::Value::new(None, self.data_dir.clone()),
            );
        }

        let mut phone = config::Map::new();
        if self.default_country.is_some() {
            phone.insert(
                "default_country".to_string(),
                config::Value::new(None, self.default_country.clone()),
            );
        }
        if !self.preferred_countries.is_empty() {
            phone.insert(
                "preferred_countries".to_string(),
                config::Value::new(
                    None,
                    self.preferred_countries
                        .iter()
                        .map(|code| config::Value::new(None, code.clone()))
                        .collect::<Vec<config::Value>>(),
                ),
            );
        }
        if self.smart_caret {
            phone.insert(
                "smart_caret".to_string(),
                config::Value::new(None, true),
            );
        }
        if !phone.is_empty() {
            map.insert("phone".to_string(), config::Value::new(None, phone));
        }
        Ok(map)
    }
}
