use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{
    CustomUserError, Password, PasswordDisplayMode, Text, validator::Validation,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use weather_core::{Config, QueryState, SearchSession, provider::provider_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "City weather widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Show the widget for one city and exit.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        /// Print the result as JSON instead of the card.
        #[arg(long)]
        json: bool,
    },

    /// Interactive widget: searches the default city, then one city per stdin line.
    Watch,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(city, json).await,
            Command::Watch => watch().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(non_blank_key)
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;

    config.api_key = Some(api_key.trim().to_string());
    let default_city = default_city.trim();
    config.default_city = (!default_city.is_empty()).then(|| default_city.to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn non_blank_key(input: &str) -> Result<Validation, CustomUserError> {
    if input.trim().is_empty() {
        Ok(Validation::Invalid("The API key must not be empty".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn start_session() -> anyhow::Result<(SearchSession, Config)> {
    let config = Config::load()?;
    tracing::debug!(
        default_city = config.default_city(),
        base_url = config.base_url(),
        "configuration loaded"
    );
    let provider = provider_from_config(&config)?;
    Ok((SearchSession::new(Arc::new(provider)), config))
}

async fn show(city: Option<String>, json: bool) -> anyhow::Result<()> {
    let (mut session, config) = start_session()?;
    let city = city.unwrap_or_else(|| config.default_city().to_string());

    session.search(&city)?;
    session.next_resolution().await;

    if let QueryState::Failed(message) = session.store().state() {
        bail!("{message}");
    }

    if json {
        let snapshot = render::snapshot(session.store(), Utc::now())
            .context("Search succeeded without a result")?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render::card(session.store(), Utc::now()));
    }
    Ok(())
}

async fn watch() -> anyhow::Result<()> {
    let (mut session, config) = start_session()?;

    session.search(config.default_city())?;
    println!("{}", render::status_line(session.store()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    while stdin_open || session.pending() > 0 {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line.context("Failed to read from stdin")? {
                    Some(city) => match session.search(&city) {
                        Ok(_) => println!("{}", render::status_line(session.store())),
                        Err(err) => println!("{err}"),
                    },
                    None => stdin_open = false,
                }
            }
            Some(_) = session.next_resolution() => {
                println!("{}", render::update(session.store(), Utc::now()));
            }
            else => break,
        }
    }

    Ok(())
}
