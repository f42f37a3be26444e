//! Next-departure lookup for public transit
//!
//! Turns a free-text route, stop and direction into the time of the next
//! departure, using the [Metro Transit NexTrip v2](https://svc.metrotransit.org/swagger/index.html)
//! API.
//!
//! # Architecture
//!
//! [`TransitProvider`] exposes the four lookup stages (route, direction,
//! stop, departure) and chains them in [`TransitProvider::get_next_trip`].
//! [`MetroTransitProvider`] implements it on top of an [`HttpTransport`];
//! [`ReqwestTransport`] is the production transport. [`ProviderRegistry`]
//! builds providers by name.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{ProviderRegistry, TransitConfig};
//!
//! let config = TransitConfig::load()?;
//! let provider = ProviderRegistry::with_defaults().create(&config.provider, &config)?;
//!
//! let departs_at = provider
//!     .get_next_trip("blue line", "target field station platform 2", "south")
//!     .await?;
//! ```

mod config;
mod error;
mod matching;
mod metrotransit;
mod models;
mod provider;
mod registry;
mod transport;

pub use config::TransitConfig;
pub use error::{LookupKind, TransitError};
pub use metrotransit::MetroTransitProvider;
pub use models::{Alert, Departure, DepartureBundle, Direction, Route, Stop};
pub use provider::TransitProvider;
pub use registry::{METRO_TRANSIT, ProviderConstructor, ProviderRegistry};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
