use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lunchman")]
#[command(about = "Organise the weekly Friday team lunch")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./lunchman.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override storage.data_dir from the config file
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Print results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the data directory and empty CSV files
    Init,
    /// Show the schedule, orders and guests
    Show,
    /// Change the apprentice for the lunch at a schedule position
    ChangeApprentice { position: usize, name: String },
    /// Choose the restaurant (by list position) for the current lunch
    AssignMenu { restaurant: usize },
    /// Place an order for the employee at a list position
    Order { employee: usize, order: String },
    /// Remove the order of the employee at a list position
    RemoveOrder { employee: usize },
    /// Add a guest with an order
    AddGuest { name: String, order: String },
    /// Drop past lunches and extend the rotation
    UpdateRota {
        /// Date to roll forward to (yyyy-MM-dd), defaults to today
        #[arg(long)]
        today: Option<String>,
    },
}

impl CliConfig {
    /// 載入 TOML 配置並套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = TomlConfig::load(self.config.as_deref())?;
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        Ok(config)
    }
}
