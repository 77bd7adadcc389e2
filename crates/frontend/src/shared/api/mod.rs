//! HTTP access to the backend.

pub mod client;
pub mod transport;

pub use client::{ApiClient, Payload};
pub use transport::{FetchTransport, Method, OutgoingRequest, RawResponse, Transport};
