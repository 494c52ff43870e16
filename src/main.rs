mod actions;
mod app;
mod cli;
mod component;
mod config;
mod libs;
mod page;
#[cfg(not(tarpaulin_include))]
mod tui;
mod utils;

use app::{App, RootState};
use clap::Parser;
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[cfg(not(tarpaulin_include))]
async fn run() -> Result<()> {
    use cli::{ClapSource, Commands};
    use color_eyre::eyre::{Context, bail};
    use component::phone_input::PhoneInputConfig;

    let args = cli::Cli::parse();

    let config = crate::config::Config::new(Some(ClapSource::new(&args)))
        .context("Error when loading config")?;

    utils::logging::init(config.config.data_dir.clone())?;

    match &args.command {
        Some(Commands::Check { number, country }) => {
            let code = country.as_deref().unwrap_or(&config.phone.default_country);
            let Some(id) = libs::countries::by_code(code) else {
                bail!("unknown country {code:?}");
            };
            let value = libs::phone::normalize(id, number);
            if value.is_empty() {
                bail!("no digits in {number:?}");
            }
            println!("{}", libs::phone::format_partial(id, number));
            println!("E.164: {}", value);
            if libs::phone::is_valid(id, number) {
                println!("valid for {}", id.as_ref());
            } else {
                println!("not a valid number for {}", id.as_ref());
            }
            Ok(())
        }
        None => {
            let phone_config = PhoneInputConfig::from_settings(&config.phone)?;
            let state = RootState::new(phone_config);
            let mut app = App::new(
                state,
                tui::Tui::new()?
                    .tick_rate(args.tick_rate)
                    .frame_rate(args.frame_rate)
                    .into(),
            );

            app.run().await?;
            Ok(())
        }
    }
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    dotenv().ok();
    utils::errors::init()?;

    run().await
}
