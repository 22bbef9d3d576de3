//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use uuid::Uuid;

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Business name of the venue
    #[arg(short, long)]
    pub name: String,

    /// Street address of the venue
    #[arg(short, long)]
    pub address: Option<String>,

    /// Latitude in degrees (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Fill address and coordinates from the current location
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub here: bool,

    /// Access code for the male restroom
    #[arg(long)]
    pub male_code: Option<String>,

    /// Access code for the female restroom
    #[arg(long)]
    pub female_code: Option<String>,
}

/// Edit command arguments.
///
/// Editing replaces the entry wholesale: any optional field not given here
/// is cleared on the stored entry.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the entry to edit
    pub id: Uuid,

    /// Business name of the venue
    #[arg(short, long)]
    pub name: String,

    /// Street address of the venue
    #[arg(short, long)]
    pub address: Option<String>,

    /// Latitude in degrees (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Fill address and coordinates from the current location
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub here: bool,

    /// Access code for the male restroom
    #[arg(long)]
    pub male_code: Option<String>,

    /// Access code for the female restroom
    #[arg(long)]
    pub female_code: Option<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the entry to delete
    pub id: Uuid,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter by business name or address substring
    #[arg(short, long)]
    pub search: Option<String>,

    /// Group entries by city
    #[arg(long)]
    pub by_city: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Nearby command arguments.
#[derive(Debug, Args)]
pub struct NearbyCommand {
    /// Filter by business name or address substring
    #[arg(short, long)]
    pub search: Option<String>,

    /// Radius in miles (defaults to the configured radius)
    #[arg(short, long)]
    pub radius: Option<f64>,

    /// Override the current latitude (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Override the current longitude (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Locate command arguments.
#[derive(Debug, Args)]
pub struct LocateCommand {
    /// Override the current latitude (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Override the current longitude (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

/// Display-mode commands.
#[derive(Debug, Subcommand)]
pub enum ModeCommand {
    /// Show the current display mode
    Show,

    /// Switch to light mode
    Light,

    /// Switch to dark mode
    Dark,

    /// Toggle between light and dark mode
    Toggle,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        file: Option<PathBuf>,
    },
}
