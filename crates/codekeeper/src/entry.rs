//! Core entry types for codekeeper.
//!
//! This module defines the fundamental data structures for representing
//! a venue record and its access codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// City group key for entries whose address has no city segment.
pub const UNKNOWN_CITY: &str = "Unknown";

/// A latitude/longitude pair in degrees.
///
/// Coordinates only ever travel as a pair; a lone latitude or longitude is
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, expected range [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, expected range [-180, 180].
    pub longitude: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as a `"lat, lon"` display string, six decimal places.
    ///
    /// Used as the address fallback when reverse geocoding is unavailable.
    #[must_use]
    pub fn display_string(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// The user's current position. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserLocation {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl UserLocation {
    /// Create a user location from raw coordinates.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The editable fields of an entry, as submitted by the add/edit form.
///
/// Update semantics are wholesale replacement: an omitted optional field
/// clears the stored value rather than keeping the old one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFields {
    /// Display name of the venue.
    pub business_name: String,
    /// Human-readable address, or a `"lat, lon"` fallback string.
    pub address: String,
    /// Captured coordinates, if location was obtained.
    pub coordinates: Option<Coordinates>,
    /// Access code for the male restroom, if known.
    pub male_code: Option<String>,
    /// Access code for the female restroom, if known.
    pub female_code: Option<String>,
}

/// A persisted venue record.
///
/// Serialized field names match the original storage format (camelCase,
/// separate optional latitude/longitude).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier, assigned at creation and never reassigned.
    pub id: Uuid,

    /// Display name of the venue.
    pub business_name: String,

    /// Human-readable address, or a `"lat, lon"` fallback string.
    pub address: String,

    /// Latitude in degrees; present only when location was captured.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub latitude: Option<f64>,

    /// Longitude in degrees; present only when location was captured.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub longitude: Option<f64>,

    /// Access code for the male restroom. Absent is distinct from empty.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub male_code: Option<String>,

    /// Access code for the female restroom. Absent is distinct from empty.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub female_code: Option<String>,

    /// When the entry was first created. Immutable.
    pub first_added: DateTime<Utc>,

    /// When the entry was last created or edited.
    pub last_updated: DateTime<Utc>,
}

impl Entry {
    /// Get the coordinate pair, if both components are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    /// Case-insensitive substring match against business name or address.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.business_name.to_lowercase().contains(&term)
            || self.address.to_lowercase().contains(&term)
    }

    /// Extract the city token from the address.
    ///
    /// The city is the second comma-separated segment of the address,
    /// trimmed; [`UNKNOWN_CITY`] when the address has no second segment.
    #[must_use]
    pub fn city(&self) -> String {
        let mut parts = self.address.split(',');
        let _street = parts.next();
        match parts.next() {
            Some(city) if !city.trim().is_empty() => city.trim().to_string(),
            _ => UNKNOWN_CITY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> Entry {
        let now = Utc::now();
        Entry {
            id: Uuid::new_v4(),
            business_name: "Blue Bottle Coffee".to_string(),
            address: "300 Webster St, Oakland, CA 94607".to_string(),
            latitude: Some(37.795),
            longitude: Some(-122.279),
            male_code: Some("4521".to_string()),
            female_code: None,
            first_added: now,
            last_updated: now,
        }
    }

    #[test]
    fn test_coordinates_require_both_components() {
        let mut entry = sample_entry();
        assert!(entry.coordinates().is_some());

        entry.longitude = None;
        assert!(entry.coordinates().is_none());

        entry.latitude = None;
        assert!(entry.coordinates().is_none());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let entry = sample_entry();
        assert!(entry.matches("blue bottle"));
        assert!(entry.matches("BLUE"));
        assert!(entry.matches("webster"));
        assert!(entry.matches(""));
        assert!(!entry.matches("starbucks"));
    }

    #[test]
    fn test_matches_on_address() {
        let entry = sample_entry();
        assert!(entry.matches("oakland"));
        assert!(entry.matches("94607"));
    }

    #[test]
    fn test_city_extraction() {
        let entry = sample_entry();
        assert_eq!(entry.city(), "Oakland");
    }

    #[test]
    fn test_city_unknown_when_no_second_segment() {
        let mut entry = sample_entry();
        entry.address = "Just a street".to_string();
        assert_eq!(entry.city(), UNKNOWN_CITY);

        entry.address = "Trailing comma,".to_string();
        assert_eq!(entry.city(), UNKNOWN_CITY);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("businessName"));
        assert!(json.contains("firstAdded"));
        assert!(json.contains("lastUpdated"));
        assert!(json.contains("maleCode"));
        // Absent optionals are omitted, not serialized as null
        assert!(!json.contains("femaleCode"));
    }

    #[test]
    fn test_serde_round_trip() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }

    #[test]
    fn test_coordinates_display_string() {
        let coords = Coordinates::new(40.7128, -74.006);
        assert_eq!(coords.display_string(), "40.712800, -74.006000");
    }
}
