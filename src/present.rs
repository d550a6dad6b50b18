// src/present.rs

//! Where rendered pages and alerts go.
//!
//! The runtime talks to a [`Presenter`]. `HtmlFilePresenter` keeps an HTML
//! file up to date for `confsync watch`; `StdoutPresenter` prints a single
//! page for `confsync render`. Tests record pages instead.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::fs::FileSystem;
use crate::render::html::escape_text;
use crate::render::RenderedPage;

pub trait Presenter: Send {
    /// Show a freshly rendered page, replacing the previous one.
    fn present(&mut self, page: &RenderedPage) -> Result<()>;

    /// Show a blocking alert.
    fn alert(&mut self, diagnostic: &Diagnostic);
}

/// Wrap a rendered table into a standalone HTML page.
pub fn html_document(title: &str, page: &RenderedPage) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body></html>\n",
        escape_text(title),
        page.html
    )
}

fn print_alert(diagnostic: &Diagnostic) {
    warn!(path = %diagnostic.path(), "{diagnostic}");
    eprintln!("ALERT: {diagnostic}");
}

/// Writes each presented page to a file.
#[derive(Debug)]
pub struct HtmlFilePresenter {
    fs: Arc<dyn FileSystem>,
    out: PathBuf,
    title: String,
    pages_written: usize,
}

impl HtmlFilePresenter {
    pub fn new(fs: Arc<dyn FileSystem>, out: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            fs,
            out: out.into(),
            title: title.into(),
            pages_written: 0,
        }
    }

    pub fn pages_written(&self) -> usize {
        self.pages_written
    }
}

impl Presenter for HtmlFilePresenter {
    fn present(&mut self, page: &RenderedPage) -> Result<()> {
        let html = html_document(&self.title, page);
        self.fs
            .write(&self.out, html.as_bytes())
            .with_context(|| format!("writing page to {:?}", self.out))?;
        self.pages_written += 1;
        debug!(out = ?self.out, pages = self.pages_written, "page written");
        Ok(())
    }

    fn alert(&mut self, diagnostic: &Diagnostic) {
        print_alert(diagnostic);
    }
}

/// Prints presented pages to stdout.
#[derive(Debug, Default)]
pub struct StdoutPresenter {
    pub title: String,
}

impl Presenter for StdoutPresenter {
    fn present(&mut self, page: &RenderedPage) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(html_document(&self.title, page).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn alert(&mut self, diagnostic: &Diagnostic) {
        print_alert(diagnostic);
    }
}
