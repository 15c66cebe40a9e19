//! Embassy Checker - audits the embassy regions of a NationStates region.
//!
//! An [`EmbassyChecker`] resolves the established and pending embassies of
//! a region, fetches each embassy region from a [`RegionSource`] and runs
//! the checks selected in a [`QueryConfig`] over them:
//!
//! - regions whose regional message board has been quiet for too long,
//! - regions founded too recently,
//! - regions carrying any of a set of tags.
//!
//! ```no_run
//! use embassy_checker::{ClientConfig, EmbassyChecker, NationStatesClient, QueryConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NationStatesClient::new(ClientConfig::default())?;
//! let mut checker = EmbassyChecker::new(client);
//! let query = QueryConfig::new("the western isles")
//!     .rmb_activity(30)
//!     .minimum_age(90)
//!     .region_tags(["Raider", "Mercenary"]);
//! println!("{}", checker.execute(&query).await?);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod checks;
pub mod error;
pub mod events;
pub mod metrics;
pub mod models;
pub mod query;
pub mod report;

pub use api::{ClientConfig, NationStatesClient, RegionSource};
pub use error::{CheckError, SourceError};
pub use events::{RegionEventsListener, RegionRetrieved, RetrievingStarted};
pub use models::{Region, RegionTag};
pub use query::{EmbassyChecker, QueryConfig};
pub use report::Report;
