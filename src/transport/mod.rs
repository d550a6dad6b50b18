// src/transport/mod.rs

//! Persistence gateway: fetching and posting the configuration document.
//!
//! The runtime talks to a [`DocumentTransport`] instead of an HTTP client.
//! [`HttpTransport`] is the production implementation; [`mock`] provides an
//! in-memory device for tests.

use std::future::Future;
use std::pin::Pin;

use crate::document::XmlDocument;
use crate::errors::Result;

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Trait abstracting how the document reaches and leaves the device.
///
/// `resource` is the document's name on the device, e.g. `config.xml`.
pub trait DocumentTransport: Send + Sync {
    /// Fetch and parse the current document.
    fn fetch_document<'a>(&'a self, resource: &'a str) -> TransportFuture<'a, XmlDocument>;

    /// Post the full serialised document.
    fn post_document<'a>(&'a self, resource: &'a str, body: String) -> TransportFuture<'a, ()>;
}
