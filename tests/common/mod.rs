use async_trait::async_trait;
use insiderkit::{Fetch, InsiderError, Result};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

/// Serves fixture files for fixed URLs and answers `NotFound` for everything else.
#[allow(dead_code)]
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    requests: AtomicUsize,
}

#[allow(dead_code)]
impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixture(mut self, url: &str, relative: &str) -> Self {
        self.pages.insert(url.to_string(), read_fixture(relative));
        self
    }

    pub fn with_page(mut self, url: &str, content: &str) -> Self {
        self.pages.insert(url.to_string(), content.to_string());
        self
    }

    /// Number of fetches made so far, successful or not.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned().ok_or(InsiderError::NotFound)
    }
}

#[allow(dead_code)]
pub fn insider() -> insiderkit::Insider {
    insiderkit::Insider::new("test_agent example@example.com").unwrap()
}
