//! Metro Transit NexTrip v2 provider
//!
//! Resolves routes, directions and stops against
//! [svc.metrotransit.org/nextripv2](https://svc.metrotransit.org/swagger/index.html)
//! and picks the next departure from a stop.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::TransitConfig;
use crate::error::{LookupKind, TransitError};
use crate::matching::first_match;
use crate::models::{Departure, DepartureBundle, Direction, Route, Stop};
use crate::provider::TransitProvider;
use crate::transport::{HttpRequest, HttpTransport};

/// Transit provider for Metro Transit (Minneapolis–St. Paul)
#[derive(Debug)]
pub struct MetroTransitProvider<T> {
    transport: T,
    base_url: Url,
    use_sandbox: bool,
}

impl<T: HttpTransport> MetroTransitProvider<T> {
    /// Create a provider that sends its requests through `transport`
    pub fn new(transport: T, config: &TransitConfig) -> Result<Self, TransitError> {
        Ok(Self {
            transport,
            base_url: config.parsed_base_url()?,
            use_sandbox: config.use_sandbox,
        })
    }

    /// Whether the sandbox environment was requested
    pub const fn use_sandbox(&self) -> bool {
        self.use_sandbox
    }

    /// Append `segments` to the base URL, keeping its path
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    /// GET `segments` and decode the JSON body
    async fn fetch<D: DeserializeOwned>(&self, segments: &[&str]) -> Result<D, TransitError> {
        let url = self.endpoint(segments);
        debug!(%url, "Requesting");

        let response = self.transport.send(HttpRequest::get(url)).await?;
        if !response.is_success() {
            return Err(TransitError::RequestFailed(format!(
                "HTTP {}",
                response.status
            )));
        }

        serde_json::from_str(&response.body).map_err(|e| TransitError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl<T: HttpTransport> TransitProvider for MetroTransitProvider<T> {
    fn provider_name(&self) -> &'static str {
        crate::registry::METRO_TRANSIT
    }

    #[instrument(skip(self))]
    async fn resolve_route(&self, query: &str) -> Result<Route, TransitError> {
        let routes: Vec<Route> = self.fetch(&["routes"]).await?;
        debug!(count = routes.len(), "Routes fetched");

        first_match(routes, query, |route| route.label.as_str())
            .ok_or_else(|| TransitError::not_found(LookupKind::Route, query))
    }

    #[instrument(skip(self))]
    async fn resolve_direction(
        &self,
        query: &str,
        route_id: &str,
    ) -> Result<Direction, TransitError> {
        let directions: Vec<Direction> = self.fetch(&["directions", route_id]).await?;
        debug!(count = directions.len(), "Directions fetched");

        first_match(directions, query, |direction| direction.name.as_str())
            .ok_or_else(|| TransitError::not_found(LookupKind::Direction, query))
    }

    #[instrument(skip(self))]
    async fn resolve_stop(
        &self,
        query: &str,
        route_id: &str,
        direction_id: &str,
    ) -> Result<Stop, TransitError> {
        let stops: Vec<Stop> = self.fetch(&["stops", route_id, direction_id]).await?;
        debug!(count = stops.len(), "Stops fetched");

        first_match(stops, query, |stop| stop.description.as_str())
            .ok_or_else(|| TransitError::not_found(LookupKind::Stop, query))
    }

    #[instrument(skip(self))]
    async fn select_next_departure(
        &self,
        route_id: &str,
        direction_id: &str,
        place_code: &str,
    ) -> Result<Departure, TransitError> {
        let bundle: DepartureBundle = self.fetch(&[route_id, direction_id, place_code]).await?;

        if let Some(alert) = bundle.closure() {
            warn!(reason = %alert.text, "Stop is closed");
            return Err(TransitError::StopClosed(alert.text.clone()));
        }

        let Some(departure) = bundle.earliest() else {
            warn!("No upcoming departures");
            return Err(TransitError::NoDepartures);
        };

        debug!(
            count = bundle.departures.len(),
            departure_time = departure.scheduled_time,
            "Departure selected"
        );
        Ok(departure.clone())
    }
}
