//! Restprobe Domain - Core types
//!
//! This crate defines the domain model for the restprobe HTTP assertion
//! toolkit. All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod error;
pub mod expect;
pub mod request;
pub mod response;
pub mod scenario;

pub use config::ProbeConfig;
pub use error::{DomainError, DomainResult};
pub use expect::{
    Expectation, ExpectationOutcome, LengthOperator, StatusExpectation, ValuePredicate,
};
pub use request::{HttpMethod, QueryParam, QueryParams, RequestBody, RequestSpec};
pub use response::ResponseSnapshot;
pub use scenario::{Scenario, ScenarioReport, SuiteReport};
