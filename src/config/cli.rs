use crate::config::toml_config::TomlConfig;
use crate::config::{Overrides, Settings};
use crate::domain::model::{RoomId, TimeOfDay};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "salon-booking")]
#[command(about = "Reserve one of three rooms and browse reservations by date")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Base URL of the reservation API, e.g. https://localhost:7211
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Accept self-signed certificates from the reservation API
    #[arg(long, global = true)]
    pub accept_invalid_certs: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the bookable rooms
    Rooms,

    /// Show free start times, and end times for a chosen start
    Slots {
        #[arg(long)]
        room: RoomId,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Chosen start time (HH:MM); lists the end times it allows
        #[arg(long)]
        start: Option<TimeOfDay>,
    },

    /// Create a reservation
    Reserve {
        /// First and last name; digits and symbols are dropped
        #[arg(long)]
        client: String,
        #[arg(long)]
        room: RoomId,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        start: TimeOfDay,
        #[arg(long)]
        end: TimeOfDay,
        /// Submit without checking the times against current availability
        #[arg(long)]
        no_check: bool,
    },

    /// List reservations made for a date
    List {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        room: Option<RoomId>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_base_url: self.api_base_url.clone(),
            timeout_seconds: self.timeout_seconds,
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }

    /// Loads the configuration file, if any, and applies the flags on top.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };
        Ok(Settings::resolve(file.as_ref(), &self.overrides()))
    }
}
