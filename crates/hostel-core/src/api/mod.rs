//! Backend API access: request descriptors, the JSON envelope, the wire
//! transport, and the guarded client that ties them to the session.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod errors;
pub mod request;
pub mod transport;

pub use client::ApiClient;
pub use endpoints::Resource;
pub use envelope::Envelope;
pub use errors::ApiError;
pub use request::{ApiRequest, ApiResponse, Method};
pub use transport::{HttpTransport, Transport};
