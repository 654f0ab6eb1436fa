//! Restprobe Engine - transport and assertion evaluation
//!
//! Issues requests described by `restprobe-domain` specs over reqwest and
//! evaluates declarative expectations against the captured responses.

pub mod checker;
pub mod client;
pub mod error;
pub mod jsonpath;
pub mod runner;

pub use checker::Checker;
pub use client::{HttpClient, ReqwestClient};
pub use error::{CheckError, TransportError};
pub use jsonpath::{PathError, lookup};
pub use runner::ScenarioRunner;
