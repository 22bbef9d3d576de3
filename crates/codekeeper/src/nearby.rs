//! Proximity view over the entry collection.
//!
//! Derives a "nearby" list from the full entry collection and the user's
//! current position. The view is recomputed from scratch on every call;
//! with tens to low hundreds of entries there is nothing to cache.

use crate::distance::distance_miles;
use crate::entry::{Entry, UserLocation};

/// Default radius for the nearby view, in miles.
pub const DEFAULT_RADIUS_MILES: f64 = 50.0;

/// An entry augmented with its distance from the user, in miles.
///
/// Derived and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyEntry {
    /// The underlying entry.
    pub entry: Entry,
    /// Distance from the user's position, in miles.
    pub distance: f64,
}

impl NearbyEntry {
    /// Format the distance the way the entry card shows it: `<0.1` below a
    /// tenth of a mile, otherwise one decimal place.
    #[must_use]
    pub fn distance_display(&self) -> String {
        if self.distance < 0.1 {
            "<0.1".to_string()
        } else {
            format!("{:.1}", self.distance)
        }
    }
}

/// Compute the nearby view.
///
/// Keeps only entries that carry a coordinate pair and lie within
/// `radius_miles` of the user, sorted ascending by distance. The sort is
/// stable, so equidistant entries keep their input order. Without a user
/// location there is no view: the result is empty.
#[must_use]
pub fn nearby_entries(
    entries: &[Entry],
    location: Option<&UserLocation>,
    radius_miles: f64,
) -> Vec<NearbyEntry> {
    let Some(location) = location else {
        return Vec::new();
    };

    let mut nearby: Vec<NearbyEntry> = entries
        .iter()
        .filter_map(|entry| {
            let coords = entry.coordinates()?;
            let distance = distance_miles(
                location.latitude,
                location.longitude,
                coords.latitude,
                coords.longitude,
            );
            (distance <= radius_miles).then(|| NearbyEntry {
                entry: entry.clone(),
                distance,
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    nearby
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn entry_at(name: &str, coords: Option<(f64, f64)>) -> Entry {
        let now = Utc::now();
        Entry {
            id: Uuid::new_v4(),
            business_name: name.to_string(),
            address: format!("{name} St, Springfield"),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            male_code: None,
            female_code: None,
            first_added: now,
            last_updated: now,
        }
    }

    #[test]
    fn test_no_location_yields_empty_view() {
        let entries = vec![entry_at("Here", Some((40.0, -74.0)))];
        assert!(nearby_entries(&entries, None, DEFAULT_RADIUS_MILES).is_empty());
    }

    #[test]
    fn test_entries_without_coordinates_excluded() {
        let entries = vec![
            entry_at("No coords", None),
            entry_at("At user", Some((40.0, -74.0))),
        ];
        let user = UserLocation::new(40.0, -74.0);

        let nearby = nearby_entries(&entries, Some(&user), DEFAULT_RADIUS_MILES);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].entry.business_name, "At user");
        assert!(nearby[0].distance < 1e-9);
    }

    #[test]
    fn test_radius_boundary() {
        // One degree of latitude is ~69 miles; scale to land just inside
        // and just outside the 50-mile radius.
        let just_inside = 49.9 / 69.05;
        let just_outside = 51.0 / 69.05;
        let entries = vec![
            entry_at("Inside", Some((40.0 + just_inside, -74.0))),
            entry_at("Outside", Some((40.0 + just_outside, -74.0))),
        ];
        let user = UserLocation::new(40.0, -74.0);

        let nearby = nearby_entries(&entries, Some(&user), DEFAULT_RADIUS_MILES);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].entry.business_name, "Inside");
    }

    #[test]
    fn test_sorted_ascending_by_distance() {
        let entries = vec![
            entry_at("Far", Some((40.5, -74.0))),
            entry_at("Near", Some((40.01, -74.0))),
            entry_at("Middle", Some((40.2, -74.0))),
        ];
        let user = UserLocation::new(40.0, -74.0);

        let nearby = nearby_entries(&entries, Some(&user), DEFAULT_RADIUS_MILES);
        let names: Vec<&str> = nearby
            .iter()
            .map(|n| n.entry.business_name.as_str())
            .collect();
        assert_eq!(names, vec!["Near", "Middle", "Far"]);

        for window in nearby.windows(2) {
            assert!(window[0].distance <= window[1].distance);
        }
    }

    #[test]
    fn test_equidistant_entries_keep_input_order() {
        // Same latitude, longitudes mirrored about the user: the haversine
        // terms are bitwise identical, so the distances tie exactly.
        let entries = vec![
            entry_at("First", Some((40.0, -74.1))),
            entry_at("Second", Some((40.0, -73.9))),
        ];
        let user = UserLocation::new(40.0, -74.0);

        let nearby = nearby_entries(&entries, Some(&user), DEFAULT_RADIUS_MILES);
        assert_eq!(nearby.len(), 2);
        assert_eq!(nearby[0].entry.business_name, "First");
        assert_eq!(nearby[1].entry.business_name, "Second");
    }

    #[test]
    fn test_distance_display_formats() {
        let mut near = NearbyEntry {
            entry: entry_at("X", Some((0.0, 0.0))),
            distance: 0.04,
        };
        assert_eq!(near.distance_display(), "<0.1");

        near.distance = 12.345;
        assert_eq!(near.distance_display(), "12.3");
    }
}
