//! Transit data models
//!
//! Typed representations of the NexTrip v2 routes, directions, stops and
//! departure bundles. Every value is a snapshot decoded from one response;
//! fields missing on the wire (or sent as `null`) fall back to their defaults
//! and unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default instead of failing
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A named transit line
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Route {
    /// Provider route identifier, used in every later request
    #[serde(rename = "route_id", deserialize_with = "null_as_default")]
    pub id: String,
    /// Operating agency
    #[serde(deserialize_with = "null_as_default")]
    pub agency_id: i64,
    /// Human-readable label matched against the route query
    #[serde(rename = "route_label", deserialize_with = "null_as_default")]
    pub label: String,
}

/// One travel direction of a route
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Direction {
    /// Direction identifier, only meaningful for the route it came from
    #[serde(rename = "direction_id", deserialize_with = "null_as_default")]
    pub id: i64,
    /// Name matched against the direction query (e.g. "Southbound")
    #[serde(rename = "direction_name", deserialize_with = "null_as_default")]
    pub name: String,
}

/// A stop served by a route in one direction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Stop {
    #[serde(rename = "stop_id", deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    /// Description matched against the stop query
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Short code keyed by route+direction, used for departure lookups
    #[serde(deserialize_with = "null_as_default")]
    pub place_code: String,
}

/// A service advisory attached to a departure bundle
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Alert {
    /// Whether the alert closes the stop
    #[serde(deserialize_with = "null_as_default")]
    pub stop_closed: bool,
    #[serde(rename = "alert_text", deserialize_with = "null_as_default")]
    pub text: String,
}

/// One upcoming vehicle departure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Departure {
    /// Departure time in epoch seconds
    #[serde(rename = "departure_time", deserialize_with = "null_as_default")]
    pub scheduled_time: i64,
    /// True when the time comes from realtime vehicle tracking
    #[serde(deserialize_with = "null_as_default")]
    pub actual: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub trip_id: String,
    /// Provider-formatted time, e.g. "5:03" or "Due"
    #[serde(deserialize_with = "null_as_default")]
    pub departure_text: String,
    /// Headsign, e.g. "to Mall of America"
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub route_short_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub direction_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
}

/// Everything the provider reports for one route/direction/place triple
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DepartureBundle {
    #[serde(deserialize_with = "null_as_default")]
    pub stops: Vec<Stop>,
    #[serde(deserialize_with = "null_as_default")]
    pub alerts: Vec<Alert>,
    #[serde(deserialize_with = "null_as_default")]
    pub departures: Vec<Departure>,
}

impl DepartureBundle {
    /// The first alert (in response order) that closes the stop
    #[must_use]
    pub fn closure(&self) -> Option<&Alert> {
        self.alerts.iter().find(|alert| alert.stop_closed)
    }

    /// The earliest departure, ties resolved by response order
    #[must_use]
    pub fn earliest(&self) -> Option<&Departure> {
        let mut departures: Vec<&Departure> = self.departures.iter().collect();
        // stable: equal times keep their response order
        departures.sort_by_key(|d| d.scheduled_time);
        departures.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_route() {
        let json = r#"{"route_id": "901", "agency_id": 0, "route_label": "METRO Blue Line"}"#;
        let route: Route = serde_json::from_str(json).unwrap();
        assert_eq!(route.id, "901");
        assert_eq!(route.agency_id, 0);
        assert_eq!(route.label, "METRO Blue Line");
    }

    #[test]
    fn test_decode_stop_with_missing_fields() {
        let json = r#"{"place_code": "TF2", "description": "Target Field Station Platform 2"}"#;
        let stop: Stop = serde_json::from_str(json).unwrap();
        assert_eq!(stop.place_code, "TF2");
        assert_eq!(stop.id, 0);
        assert!(stop.latitude.abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_departure_ignores_unknown_fields() {
        let json = r#"{
            "actual": false,
            "trip_id": "22847851-AUG22-RAIL-Weekday-03",
            "stop_id": 56335,
            "departure_text": "5:03",
            "departure_time": 1664229780,
            "description": "to Mall of America",
            "gate": "1",
            "route_id": "901",
            "route_short_name": "Blue",
            "direction_id": 1,
            "direction_text": "SB",
            "schedule_relationship": "NoData"
        }"#;
        let departure: Departure = serde_json::from_str(json).unwrap();
        assert_eq!(departure.scheduled_time, 1_664_229_780);
        assert_eq!(departure.departure_text, "5:03");
        assert_eq!(departure.route_short_name, "Blue");
        assert_eq!(departure.gate.as_deref(), Some("1"));
        assert!(!departure.actual);
    }

    #[test]
    fn test_bundle_missing_lists_are_empty() {
        let bundle: DepartureBundle = serde_json::from_str("{}").unwrap();
        assert!(bundle.stops.is_empty());
        assert!(bundle.alerts.is_empty());
        assert!(bundle.departures.is_empty());
        assert!(bundle.closure().is_none());
        assert!(bundle.earliest().is_none());
    }

    #[test]
    fn test_closure_returns_first_closed_alert() {
        let bundle = DepartureBundle {
            alerts: vec![
                Alert {
                    stop_closed: false,
                    text: "elevator out".to_string(),
                },
                Alert {
                    stop_closed: true,
                    text: "bad weather".to_string(),
                },
                Alert {
                    stop_closed: true,
                    text: "construction".to_string(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(bundle.closure().unwrap().text, "bad weather");
    }

    #[test]
    fn test_earliest_picks_minimum() {
        let bundle = DepartureBundle {
            departures: vec![
                Departure {
                    scheduled_time: 1_664_230_680,
                    ..Default::default()
                },
                Departure {
                    scheduled_time: 1_664_229_780,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(bundle.earliest().unwrap().scheduled_time, 1_664_229_780);
    }

    #[test]
    fn test_earliest_ties_keep_response_order() {
        let bundle = DepartureBundle {
            departures: vec![
                Departure {
                    scheduled_time: 200,
                    trip_id: "later".to_string(),
                    ..Default::default()
                },
                Departure {
                    scheduled_time: 100,
                    trip_id: "first".to_string(),
                    ..Default::default()
                },
                Departure {
                    scheduled_time: 100,
                    trip_id: "second".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(bundle.earliest().unwrap().trip_id, "first");
        // repeated calls agree
        assert_eq!(bundle.earliest(), bundle.earliest());
    }

    #[test]
    fn test_decode_null_fields_as_defaults() {
        let json = r#"{
            "stops": null,
            "alerts": null,
            "departures": [
                {"departure_time": 1664229780, "route_short_name": null, "description": null, "gate": null}
            ]
        }"#;
        let bundle: DepartureBundle = serde_json::from_str(json).unwrap();
        assert!(bundle.stops.is_empty());
        assert!(bundle.alerts.is_empty());
        assert!(bundle.closure().is_none());

        let departure = bundle.earliest().unwrap();
        assert_eq!(departure.scheduled_time, 1_664_229_780);
        assert_eq!(departure.route_short_name, "");
        assert_eq!(departure.description, "");
        assert_eq!(departure.gate, None);
    }

    #[test]
    fn test_decode_alert_with_null_text() {
        let alert: Alert =
            serde_json::from_str(r#"{"stop_closed": true, "alert_text": null}"#).unwrap();
        assert!(alert.stop_closed);
        assert!(alert.text.is_empty());
    }

    #[test]
    fn test_decode_null_route_label() {
        let route: Route =
            serde_json::from_str(r#"{"route_id": "901", "route_label": null}"#).unwrap();
        assert_eq!(route.id, "901");
        assert!(route.label.is_empty());
    }
}
