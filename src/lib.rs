pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use app::lunch_service::{LunchOverview, LunchService};
pub use config::{build_storage, TomlConfig};
pub use crate::core::{csv_storage::CsvStorage, memory_storage::MemoryStorage};
pub use domain::{Apprentice, Employee, FridayLunch, Guest, Restaurant, Storage};
pub use utils::error::{LunchError, Result};
