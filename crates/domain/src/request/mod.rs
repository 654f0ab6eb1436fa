//! HTTP request types.

mod body;
mod method;
mod query;
mod spec;

pub use body::RequestBody;
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
pub use spec::RequestSpec;
