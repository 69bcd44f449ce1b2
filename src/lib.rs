pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, OutputFormat};

pub use adapters::http::HttpReservationStore;
pub use config::{toml_config::TomlConfig, Settings};
pub use core::{clock::SystemClock, form::BookingForm, service::BookingService};
pub use domain::model::{Availability, BookingDraft, Reservation, RoomId, TimeOfDay};
pub use utils::error::{BookingError, Result};
