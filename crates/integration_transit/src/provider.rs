//! Transit provider trait

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::error::TransitError;
use crate::models::{Departure, Direction, Route, Stop};

/// The four lookup stages every transit provider exposes
///
/// Each stage does one remote read. [`TransitProvider::get_next_trip`]
/// chains them and stops at the first failure.
#[async_trait]
pub trait TransitProvider: Send + Sync {
    /// Provider name as registered (e.g. "metrotransit")
    fn provider_name(&self) -> &'static str;

    /// First route whose label contains `query`, ignoring case
    async fn resolve_route(&self, query: &str) -> Result<Route, TransitError>;

    /// First direction of `route_id` whose name contains `query`
    async fn resolve_direction(
        &self,
        query: &str,
        route_id: &str,
    ) -> Result<Direction, TransitError>;

    /// First stop on `route_id`/`direction_id` whose description contains `query`
    async fn resolve_stop(
        &self,
        query: &str,
        route_id: &str,
        direction_id: &str,
    ) -> Result<Stop, TransitError>;

    /// Earliest departure from `place_code`, unless an alert closes the stop
    ///
    /// # Errors
    ///
    /// [`TransitError::StopClosed`] wins over everything else;
    /// [`TransitError::NoDepartures`] when nothing is scheduled.
    async fn select_next_departure(
        &self,
        route_id: &str,
        direction_id: &str,
        place_code: &str,
    ) -> Result<Departure, TransitError>;

    /// Resolve route, direction and stop from free text and return the next
    /// departure time in epoch seconds
    #[instrument(skip(self))]
    async fn get_next_trip(
        &self,
        route: &str,
        stop: &str,
        direction: &str,
    ) -> Result<i64, TransitError> {
        let route = self.resolve_route(route).await?;
        let direction = self.resolve_direction(direction, &route.id).await?;
        let direction_id = direction.id.to_string();
        let stop = self.resolve_stop(stop, &route.id, &direction_id).await?;
        let departure = self
            .select_next_departure(&route.id, &direction_id, &stop.place_code)
            .await?;

        info!(
            route = %route.label,
            direction = %direction.name,
            stop = %stop.description,
            departure_time = departure.scheduled_time,
            "Next departure resolved"
        );
        Ok(departure.scheduled_time)
    }
}
