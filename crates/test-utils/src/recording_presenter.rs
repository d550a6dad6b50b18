use std::sync::{Arc, Mutex};

use confsync::diagnostic::Diagnostic;
use confsync::present::Presenter;
use confsync::render::RenderedPage;

/// What a `RecordingPresenter` has been shown so far.
#[derive(Debug, Default)]
pub struct Recorded {
    pub pages: Vec<RenderedPage>,
    pub alerts: Vec<Diagnostic>,
}

/// A presenter that:
/// - records every page it is asked to present
/// - records every alert instead of printing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        self.recorded.lock().unwrap().pages.len()
    }

    pub fn last_page(&self) -> Option<RenderedPage> {
        self.recorded.lock().unwrap().pages.last().cloned()
    }

    pub fn alerts(&self) -> Vec<Diagnostic> {
        self.recorded.lock().unwrap().alerts.clone()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, page: &RenderedPage) -> anyhow::Result<()> {
        self.recorded.lock().unwrap().pages.push(page.clone());
        Ok(())
    }

    fn alert(&mut self, diagnostic: &Diagnostic) {
        self.recorded.lock().unwrap().alerts.push(diagnostic.clone());
    }
}
