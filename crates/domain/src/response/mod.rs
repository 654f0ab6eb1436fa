//! HTTP response types.

mod snapshot;

pub use snapshot::ResponseSnapshot;
