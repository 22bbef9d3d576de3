//! `codekeep` - CLI for codekeeper
//!
//! This binary provides the command-line interface for managing venue
//! access-code entries: add, edit, delete, list, search, and a proximity
//! view against the current location.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;

use clap::Parser;

use codekeeper::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ListCommand,
    LocateCommand, ModeCommand, NearbyCommand,
};
use codekeeper::location::{ConfiguredPosition, GeoProvider};
use codekeeper::{
    init_logging, nearby_entries, view, Config, Coordinates, Entry, EntryFields, EntryRepository,
    Error, NearbyEntry, Store, UserLocation,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Add(cmd) => handle_add(&config, cmd).await,
        Command::Edit(cmd) => handle_edit(&config, cmd).await,
        Command::Delete(cmd) => handle_delete(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Nearby(cmd) => handle_nearby(&config, &cmd),
        Command::Locate(cmd) => handle_locate(&config, &cmd).await,
        Command::Mode(cmd) => handle_mode(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_repository(config: &Config) -> anyhow::Result<EntryRepository> {
    let store = Store::open(config.database_path())?;
    Ok(EntryRepository::open(store)?)
}

fn geo_provider(config: &Config, coords_override: Option<Coordinates>) -> GeoProvider {
    let coords = coords_override.or_else(|| config.configured_position());
    GeoProvider::new(
        Box::new(ConfiguredPosition::new(coords)),
        config.geocoding.clone(),
        config.geolocation_timeout(),
    )
}

fn coords_from_flags(lat: Option<f64>, lon: Option<f64>) -> Option<Coordinates> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        _ => None,
    }
}

/// Distinct, actionable message per geolocation failure kind.
fn location_message(err: &Error) -> String {
    match err {
        Error::PermissionDenied { .. } => {
            "Location permission denied. Grant location access in your system settings \
             and try again."
                .to_string()
        }
        Error::Timeout { .. } => {
            "Location request timed out. Try again when you have better signal, or enter \
             the address manually."
                .to_string()
        }
        Error::LocationUnavailable { .. } => format!(
            "Unable to determine your location ({err}). Enter the address manually, or \
             set a position with --lat/--lon or in the config file."
        ),
        other => other.to_string(),
    }
}

/// Build the entry fields for add/edit, resolving `--here` through the
/// geolocation provider.
#[allow(clippy::too_many_arguments)]
async fn resolve_fields(
    config: &Config,
    name: String,
    address: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    here: bool,
    male_code: Option<String>,
    female_code: Option<String>,
) -> anyhow::Result<EntryFields> {
    let mut coordinates = coords_from_flags(lat, lon);
    let mut address = address;

    if here {
        let provider = geo_provider(config, None);
        match provider.current_location().await {
            Ok(location) => {
                coordinates = Some(Coordinates::new(location.latitude, location.longitude));
                // A typed address wins over the resolved one
                if address.is_none() {
                    address = Some(location.address);
                }
            }
            Err(err) => {
                eprintln!("{}", location_message(&err));
                return Err(err.into());
            }
        }
    }

    Ok(EntryFields {
        business_name: name,
        address: address.unwrap_or_default(),
        coordinates,
        male_code,
        female_code,
    })
}

async fn handle_add(config: &Config, cmd: AddCommand) -> anyhow::Result<()> {
    let mut repo = open_repository(config)?;
    let fields = resolve_fields(
        config,
        cmd.name,
        cmd.address,
        cmd.lat,
        cmd.lon,
        cmd.here,
        cmd.male_code,
        cmd.female_code,
    )
    .await?;

    let entry = repo.create(fields)?;
    println!("Added \"{}\"", entry.business_name);
    print_entry(&entry, None);
    Ok(())
}

async fn handle_edit(config: &Config, cmd: EditCommand) -> anyhow::Result<()> {
    let mut repo = open_repository(config)?;
    let fields = resolve_fields(
        config,
        cmd.name,
        cmd.address,
        cmd.lat,
        cmd.lon,
        cmd.here,
        cmd.male_code,
        cmd.female_code,
    )
    .await?;

    let entry = repo.update(cmd.id, fields)?;
    println!("Updated \"{}\"", entry.business_name);
    print_entry(&entry, None);
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut repo = open_repository(config)?;

    if !cmd.yes && !confirm("Delete this entry?")? {
        println!("Canceled.");
        return Ok(());
    }

    if repo.delete(cmd.id)? {
        println!("Deleted {}", cmd.id);
    } else {
        println!("No entry with id {}; nothing to delete.", cmd.id);
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let repo = open_repository(config)?;
    let entries = repo.list();
    let entries = match &cmd.search {
        Some(term) => view::search(&entries, term),
        None => entries,
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries.");
        return Ok(());
    }

    if cmd.by_city {
        for (city, group) in view::group_by_city(&entries) {
            println!("{city}");
            println!("{}", "=".repeat(city.len()));
            for entry in &group {
                print_entry(entry, None);
            }
        }
    } else {
        for entry in &entries {
            print_entry(entry, None);
        }
    }
    Ok(())
}

fn handle_nearby(config: &Config, cmd: &NearbyCommand) -> anyhow::Result<()> {
    let repo = open_repository(config)?;

    let coords = coords_from_flags(cmd.lat, cmd.lon).or_else(|| config.configured_position());
    let Some(coords) = coords else {
        println!(
            "No current position. Pass --lat/--lon or set [location] in the config file."
        );
        return Ok(());
    };
    let user = UserLocation::new(coords.latitude, coords.longitude);
    let radius = cmd.radius.unwrap_or(config.nearby.radius_miles);

    let entries = repo.list();
    let mut nearby = nearby_entries(&entries, Some(&user), radius);
    if let Some(term) = &cmd.search {
        nearby.retain(|n| n.entry.matches(term));
    }

    if cmd.json {
        let rows = nearby
            .iter()
            .map(|n| -> anyhow::Result<serde_json::Value> {
                let mut value = serde_json::to_value(&n.entry)?;
                value["distance"] = serde_json::json!(n.distance);
                Ok(value)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if nearby.is_empty() {
        println!("No entries within {radius} miles.");
        return Ok(());
    }

    for near in &nearby {
        print_nearby(near);
    }
    Ok(())
}

async fn handle_locate(config: &Config, cmd: &LocateCommand) -> anyhow::Result<()> {
    let provider = geo_provider(config, coords_from_flags(cmd.lat, cmd.lon));

    match provider.current_location().await {
        Ok(location) => {
            println!("{}", location.address);
            println!("{:.6}, {:.6}", location.latitude, location.longitude);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", location_message(&err));
            Err(err.into())
        }
    }
}

fn handle_mode(config: &Config, cmd: &ModeCommand) -> anyhow::Result<()> {
    let store = Store::open(config.database_path())?;
    let current = store.load_dark_mode()?;

    let next = match cmd {
        ModeCommand::Show => {
            println!("Display mode: {}", mode_name(current));
            return Ok(());
        }
        ModeCommand::Light => false,
        ModeCommand::Dark => true,
        ModeCommand::Toggle => !current,
    };

    store.save_dark_mode(next)?;
    println!("Display mode: {}", mode_name(next));
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:    {}", config.database_path().display());
                println!();
                println!("[Location]");
                match config.configured_position() {
                    Some(coords) => println!("  Position:         {}", coords.display_string()),
                    None => println!("  Position:         (not set)"),
                }
                println!("  Timeout:          {}s", config.location.timeout_secs);
                println!();
                println!("[Geocoding]");
                println!("  Enabled:          {}", config.geocoding.enabled);
                println!("  Endpoint:         {}", config.geocoding.endpoint);
                println!("  User agent:       {}", config.geocoding.user_agent);
                println!();
                println!("[Nearby]");
                println!("  Radius (miles):   {}", config.nearby.radius_miles);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn mode_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

fn print_entry(entry: &Entry, distance: Option<&str>) {
    match distance {
        Some(distance) => println!("{}  ({distance} miles away)", entry.business_name),
        None => println!("{}", entry.business_name),
    }
    println!("  {}", entry.address);
    println!(
        "  Male code: {}    Female code: {}",
        entry.male_code.as_deref().unwrap_or("N/A"),
        entry.female_code.as_deref().unwrap_or("N/A"),
    );
    println!(
        "  First added: {}    Last updated: {}",
        entry.first_added.format("%b %d, %Y %H:%M"),
        entry.last_updated.format("%b %d, %Y %H:%M"),
    );
    println!("  id: {}", entry.id);
    println!();
}

fn print_nearby(near: &NearbyEntry) {
    print_entry(&near.entry, Some(&near.distance_display()));
}
