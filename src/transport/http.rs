// src/transport/http.rs

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use tracing::debug;

use crate::document::XmlDocument;
use crate::errors::{ConfsyncError, Result};

use super::{DocumentTransport, TransportFuture};

/// HTTP transport: `GET`/`POST <base_url>/<resource>`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ConfsyncError::ConfigError(format!("invalid base_url '{base_url}': {e}")))?;
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("confsync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn url_for(&self, resource: &str) -> Result<Url> {
        self.base_url
            .join(resource.trim_start_matches('/'))
            .map_err(|e| ConfsyncError::Transport(format!("invalid resource '{resource}': {e}")))
    }
}

impl DocumentTransport for HttpTransport {
    fn fetch_document<'a>(&'a self, resource: &'a str) -> TransportFuture<'a, XmlDocument> {
        Box::pin(async move {
            let url = self.url_for(resource)?;
            debug!(%url, "fetching document");
            let body = self
                .client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            XmlDocument::parse(&body)
        })
    }

    fn post_document<'a>(&'a self, resource: &'a str, body: String) -> TransportFuture<'a, ()> {
        Box::pin(async move {
            let url = self.url_for(resource)?;
            debug!(%url, bytes = body.len(), "posting document");
            self.client
                .post(url)
                .header(CONTENT_TYPE, "text/xml")
                .body(body)
                .send()
                .await?
                .error_for_status()?;
            Ok(())
        })
    }
}
