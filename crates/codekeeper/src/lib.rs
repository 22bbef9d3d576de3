//! `codekeeper` - a local record keeper for venue access codes
//!
//! This library provides the core functionality behind the `codekeep` binary:
//! a persisted entry collection, a haversine proximity view, search and
//! city-grouped views, and a geolocation provider with best-effort reverse
//! geocoding.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod distance;
pub mod entry;
pub mod error;
pub mod location;
pub mod logging;
pub mod nearby;
pub mod repository;
pub mod store;
pub mod view;

pub use config::Config;
pub use entry::{Coordinates, Entry, EntryFields, UserLocation};
pub use error::{Error, Result};
pub use location::{GeoProvider, ResolvedLocation};
pub use logging::init_logging;
pub use nearby::{nearby_entries, NearbyEntry};
pub use repository::EntryRepository;
pub use store::Store;
