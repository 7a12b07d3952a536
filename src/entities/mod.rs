//! Stored and reported records
//!
//! - [`RequestDocument`] - one work item as written in a `*.request.yaml` file
//! - [`Estimate`] - the report produced for a request

pub mod estimate;
pub mod request;

pub use estimate::{CrewLine, Estimate};
pub use request::{GeometryFields, RequestDocument, RequestError};
