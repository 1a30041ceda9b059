use std::{
    io::{self, Stdout},
    process::ExitCode,
};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use cityweather_core::{
    Config, Controller, Display, DisplayState, FileStore, Key, MessagePolicy, OpenWeatherClient,
};
use inquire::{InquireError, Password, Select, Text};

use crate::terminal::TerminalUi;

type TerminalController = Controller<TerminalUi<Stdout>, FileStore>;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and how errors are worded.
    Configure {
        /// API key; prompted for when absent.
        #[arg(long)]
        api_key: Option<String>,

        /// "collapsed" or "detailed"; prompted for when absent.
        #[arg(long)]
        error_messages: Option<String>,
    },

    /// Look up one city and print the result.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },

    /// Prompt for cities until Esc or Ctrl-C, starting with the last city.
    Interactive,

    /// Print the last successfully looked-up city.
    Last,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        match self.command {
            Command::Configure {
                api_key,
                error_messages,
            } => configure(api_key, error_messages)?,
            Command::Show { city } => return show(city).await,
            Command::Interactive => interactive().await?,
            Command::Last => last()?,
        }

        Ok(ExitCode::SUCCESS)
    }
}

fn build_controller(config: &Config, input: String) -> Result<TerminalController> {
    let client = OpenWeatherClient::from_config(config)?;
    let ui = TerminalUi::new(io::stdout()).with_input(input);
    let display = Display::with_icon_template(ui, config.icon_url_template.clone());
    let store = FileStore::default_location()?;

    Ok(Controller::new(Box::new(client), display, store).with_policy(config.error_messages))
}

fn configure(api_key: Option<String>, error_messages: Option<String>) -> Result<()> {
    let path = Config::config_file_path()?;
    // Read the file directly so an API key from the environment isn't persisted.
    let mut config = Config::load_from(&path)?;

    let api_key = match api_key {
        Some(key) => key,
        None => Password::new("OpenWeather API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };
    config.set_api_key(api_key);
    config.api_key()?;

    config.error_messages = match error_messages {
        Some(style) => MessagePolicy::try_from(style.as_str())?,
        None => Select::new("Error messages:", MessagePolicy::all().to_vec())
            .prompt()
            .context("Failed to read error message style")?,
    };

    config.save_to(&path)?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(city: String) -> Result<ExitCode> {
    let config = Config::load()?;
    let mut controller = build_controller(&config, city)?;

    controller.submit().await;

    Ok(match controller.display().state() {
        DisplayState::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn interactive() -> Result<()> {
    let config = Config::load()?;
    let mut controller = build_controller(&config, String::new())?;

    controller.restore().await;

    loop {
        // Input survives failed lookups, so offer it again.
        let current = controller.display().ui().input().to_string();
        let answer = Text::new("City:")
            .with_initial_value(&current)
            .with_help_message("Enter to look up, Esc to quit")
            .prompt();

        match answer {
            Ok(city) => {
                controller.display_mut().ui_mut().set_input(city);
                controller.handle_key(Key::Enter).await;
            }
            Err(InquireError::OperationCanceled) => {
                controller.handle_key(Key::Escape).await;
                break;
            }
            Err(InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        }
    }

    Ok(())
}

fn last() -> Result<()> {
    let store = FileStore::default_location()?;

    match store.record()? {
        Some(record) => {
            let saved = record.saved_at.with_timezone(&Local);
            println!("{} (saved {})", record.last_city, saved.format("%Y-%m-%d %H:%M"));
        }
        None => println!("No city looked up yet."),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_takes_city_argument() {
        let cli = Cli::try_parse_from(["cityweather", "show", "New York"]).unwrap();
        assert!(matches!(cli.command, Command::Show { city } if city == "New York"));
    }

    #[test]
    fn configure_accepts_non_interactive_flags() {
        let cli = Cli::try_parse_from([
            "cityweather",
            "configure",
            "--api-key",
            "KEY",
            "--error-messages",
            "detailed",
        ])
        .unwrap();

        match cli.command {
            Command::Configure {
                api_key,
                error_messages,
            } => {
                assert_eq!(api_key.as_deref(), Some("KEY"));
                assert_eq!(error_messages.as_deref(), Some("detailed"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["cityweather"]).is_err());
    }
}
