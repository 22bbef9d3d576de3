//! Geolocation provider: position acquisition plus reverse geocoding.
//!
//! Position acquisition is a single-shot call against a [`PositionSource`]
//! with a configurable timeout and no reuse of stale positions. On success
//! the provider makes one best-effort reverse-geocoding request to resolve a
//! human-readable address; if that fails for any reason the address falls
//! back to a formatted `"lat, lon"` string. Geocoding failures never fail
//! the location request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Notify;
use tracing::{debug, info};

use crate::config::GeocodingConfig;
use crate::entry::Coordinates;
use crate::error::{Error, Result};

/// A resolved user location: raw coordinates plus a display address.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Human-readable address, or a `"lat, lon"` string when geocoding was
    /// unavailable.
    pub address: String,
}

/// A source of raw position fixes.
///
/// Implementors wrap whatever the platform offers. Failures must map to
/// [`Error::LocationUnavailable`] or [`Error::PermissionDenied`] so callers
/// can present a distinct, actionable message per cause; the timeout case is
/// handled by the provider.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// The name of this position source (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Acquire a single position fix.
    ///
    /// # Errors
    ///
    /// Returns an error when no position can be produced.
    async fn position(&self) -> Result<Coordinates>;
}

/// Position source backed by configured coordinates.
///
/// The CLI analogue of a platform location service: the fix comes from the
/// config file or command-line flags rather than a GPS.
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredPosition {
    coords: Option<Coordinates>,
}

impl ConfiguredPosition {
    /// Create a source that yields the given coordinates, if any.
    #[must_use]
    pub fn new(coords: Option<Coordinates>) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl PositionSource for ConfiguredPosition {
    fn name(&self) -> &'static str {
        "configured"
    }

    async fn position(&self) -> Result<Coordinates> {
        self.coords.ok_or_else(|| {
            Error::location_unavailable(
                "no position configured; set [location] latitude/longitude \
                 in the config file or pass --lat/--lon",
            )
        })
    }
}

/// Response shape of the reverse-geocoding service.
#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    display_name: Option<String>,
}

/// The geolocation provider.
#[derive(Debug)]
pub struct GeoProvider {
    source: Box<dyn PositionSource>,
    http: Client,
    geocoding: GeocodingConfig,
    timeout: Duration,
}

impl std::fmt::Debug for dyn PositionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PositionSource({})", self.name())
    }
}

impl GeoProvider {
    /// Create a provider over the given position source.
    #[must_use]
    pub fn new(
        source: Box<dyn PositionSource>,
        geocoding: GeocodingConfig,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            http: Client::new(),
            geocoding,
            timeout,
        }
    }

    /// Acquire the current location: one position fix, then a best-effort
    /// address resolution.
    ///
    /// Never retries; a fresh fix is requested on every call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] when the position fix exceeds the
    /// configured timeout, or whatever [`Error::LocationUnavailable`] /
    /// [`Error::PermissionDenied`] the source reported.
    pub async fn current_location(&self) -> Result<ResolvedLocation> {
        debug!("Requesting position from source '{}'", self.source.name());
        let coords = tokio::time::timeout(self.timeout, self.source.position())
            .await
            .map_err(|_| Error::timeout("position acquisition"))??;

        info!(
            "Position obtained: {:.6}, {:.6}",
            coords.latitude, coords.longitude
        );
        Ok(self.resolve(coords).await)
    }

    /// Like [`Self::current_location`], but abandons the request when
    /// `cancel` is notified.
    ///
    /// # Errors
    ///
    /// As [`Self::current_location`]; cancellation reports as
    /// [`Error::LocationUnavailable`].
    pub async fn current_location_with_cancel(&self, cancel: &Notify) -> Result<ResolvedLocation> {
        tokio::select! {
            result = self.current_location() => result,
            () = cancel.notified() => {
                debug!("Location request canceled");
                Err(Error::location_unavailable("location request canceled"))
            }
        }
    }

    /// Resolve coordinates into a display address, falling back to the
    /// coordinate string when geocoding is disabled or fails.
    async fn resolve(&self, coords: Coordinates) -> ResolvedLocation {
        let address = if self.geocoding.enabled {
            match self.reverse_geocode(coords).await {
                Some(name) => name,
                None => {
                    debug!("Reverse geocoding unavailable, using coordinate string");
                    coords.display_string()
                }
            }
        } else {
            coords.display_string()
        };

        ResolvedLocation {
            latitude: coords.latitude,
            longitude: coords.longitude,
            address,
        }
    }

    /// One reverse-geocoding request. Any failure yields `None`.
    async fn reverse_geocode(&self, coords: Coordinates) -> Option<String> {
        let url = format!("{}/reverse", self.geocoding.endpoint.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("format", "json".to_string()),
            ])
            .header(reqwest::header::USER_AGENT, &self.geocoding.user_agent)
            .timeout(self.timeout)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                debug!("Reverse geocoding request failed: {err}");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("Reverse geocoding returned status {}", response.status());
            return None;
        }

        match response.json::<ReverseGeocodeResponse>().await {
            Ok(body) => {
                if let Some(name) = &body.display_name {
                    debug!("Reverse geocoding resolved: {name}");
                }
                body.display_name
            }
            Err(err) => {
                debug!("Reverse geocoding response unreadable: {err}");
                None
            }
        }
    }
}
