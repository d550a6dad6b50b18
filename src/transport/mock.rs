// src/transport/mock.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::document::XmlDocument;
use crate::errors::{ConfsyncError, Result};

use super::{DocumentTransport, TransportFuture};

#[derive(Debug, Default)]
struct MockDevice {
    documents: HashMap<String, String>,
    posts: Vec<(String, String)>,
    fetches: usize,
    fail_fetches: bool,
    fail_posts: bool,
}

/// In-memory device. A successful post replaces the served document, the
/// way the tuner server applies a posted configuration.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    device: Arc<Mutex<MockDevice>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, resource: &str, xml: &str) -> Self {
        self.set_document(resource, xml);
        self
    }

    fn device(&self) -> MutexGuard<'_, MockDevice> {
        self.device.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_document(&self, resource: &str, xml: &str) {
        self.device()
            .documents
            .insert(resource.to_string(), xml.to_string());
    }

    /// Make every following fetch fail (or succeed again).
    pub fn set_fetch_failure(&self, fail: bool) {
        self.device().fail_fetches = fail;
    }

    pub fn set_post_failure(&self, fail: bool) {
        self.device().fail_posts = fail;
    }

    /// `(resource, body)` of every post received, in order.
    pub fn posts(&self) -> Vec<(String, String)> {
        self.device().posts.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.device().fetches
    }
}

impl DocumentTransport for MockTransport {
    fn fetch_document<'a>(&'a self, resource: &'a str) -> TransportFuture<'a, XmlDocument> {
        Box::pin(async move {
            let xml = {
                let mut device = self.device();
                device.fetches += 1;
                if device.fail_fetches {
                    return Err(ConfsyncError::Transport(format!(
                        "mock fetch of {resource} failed"
                    )));
                }
                device.documents.get(resource).cloned()
            };
            match xml {
                Some(xml) => XmlDocument::parse(&xml),
                None => Err(ConfsyncError::Transport(format!("404 Not Found: {resource}"))),
            }
        })
    }

    fn post_document<'a>(&'a self, resource: &'a str, body: String) -> TransportFuture<'a, ()> {
        Box::pin(async move {
            let mut device = self.device();
            if device.fail_posts {
                return Err(ConfsyncError::Transport(format!(
                    "mock post of {resource} failed"
                )));
            }
            device.posts.push((resource.to_string(), body.clone()));
            device.documents.insert(resource.to_string(), body);
            Ok(())
        })
    }
}
