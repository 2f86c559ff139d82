use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use tracing::info;
use weather_lookup_core::{
    Config, LocationOption, SearchOutcome, Session, match_locations, sources_from_config,
    state::LocationsState,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Current weather for any country or capital")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Defaults to `interactive` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List locations matching a query.
    Search {
        /// Part of a country or capital name.
        query: String,

        /// Maximum number of suggestions; defaults to the configured limit.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show current weather for a location matching a query.
    Show {
        /// Part of a country or capital name.
        query: String,

        /// Take the first suggestion instead of prompting.
        #[arg(long)]
        first: bool,

        /// Print the weather as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },

    /// Search, pick and view weather in a loop.
    Interactive,

    /// Edit endpoints, suggestion limit and timeout.
    Configure,

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
            Command::Search { query, limit } => {
                let (session, config) = start_session().await?;
                let limit = limit.unwrap_or(config.suggestion_limit);
                let outcome = match_locations(&query, session.state().dataset(), limit);
                print!("{}", render::suggestions(&outcome)?);
                Ok(())
            }
            Command::Show { query, first, json } => {
                let (mut session, _) = start_session().await?;
                let options = session.search(&query).into_options();

                let option = if options.len() > 1 && !first {
                    Select::new("Pick a location:", options).prompt()?
                } else {
                    match options.into_iter().next() {
                        Some(option) => option,
                        None => bail!("No location found for '{query}'."),
                    }
                };

                session.select_and_fetch(option).await;
                let state = session.state();

                if let Some(msg) = state.error_message() {
                    bail!("{msg}");
                }
                if json {
                    println!("{}", render::json(state)?);
                } else {
                    print!("{}", render::card(state)?);
                }
                Ok(())
            }
            Command::Interactive => {
                let (session, _) = start_session().await?;
                interactive(session).await
            }
        }
    }
}

async fn start_session() -> Result<(Session, Config)> {
    let config = Config::load()?;
    let (locations, weather) = sources_from_config(&config)?;
    let mut session = Session::new(locations, weather, config.suggestion_limit);

    eprintln!("Loading world map...");
    session.load_locations().await;

    if let LocationsState::Failed = session.state().locations() {
        let msg = session.state().error_message().unwrap_or("Location dataset unavailable.");
        bail!("{msg}");
    }
    info!(count = session.state().dataset().len(), "session ready");

    Ok((session, config))
}

async fn interactive(mut session: Session) -> Result<()> {
    loop {
        let query = Text::new("Search city or country:")
            .with_help_message("Esc or an empty line quits")
            .prompt_skippable()?;
        let Some(query) = query else { break };

        let options: Vec<LocationOption> = match session.search(&query) {
            SearchOutcome::Inactive => break,
            SearchOutcome::Matches(opts) if opts.is_empty() => {
                println!("No location found.");
                continue;
            }
            SearchOutcome::Matches(opts) => opts,
        };

        let Some(option) = Select::new("Pick a location:", options).prompt_skippable()? else {
            continue;
        };

        println!("{}", render::LOADING);
        session.select_and_fetch(option).await;

        let state = session.state();
        if let Some(msg) = state.error_message() {
            println!("{}", render::error_line(msg));
        }
        print!("{}", render::card(state)?);
    }

    Ok(())
}

fn configure() -> Result<()> {
    let path = Config::config_file_path()?;
    let current = Config::load()?;

    let countries_url = Text::new("Country dataset base URL:")
        .with_default(&current.countries_url)
        .prompt()?;
    let weather_url =
        Text::new("Weather API base URL:").with_default(&current.weather_url).prompt()?;
    let suggestion_limit = CustomType::<usize>::new("Suggestion limit:")
        .with_default(current.suggestion_limit)
        .with_error_message("Please type a whole number")
        .prompt()?;
    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(current.timeout_secs)
        .with_error_message("Please type a whole number")
        .prompt()?;

    let updated = Config { countries_url, weather_url, suggestion_limit, timeout_secs };
    updated.save().context("Configuration was not saved")?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}
