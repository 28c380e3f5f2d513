//! Shared test fixtures: an in-memory catalog source.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Barrier;

use pokedex::adapters::{CatalogSource, UpstreamError};
use pokedex::config::UpstreamSettings;
use pokedex::domain::{CatalogEntry, CatalogRef};

/// Catalog source answering from memory
#[derive(Default)]
pub struct FakeSource {
    refs: Vec<CatalogRef>,
    details: HashMap<String, CatalogEntry>,
    /// Detail URLs that answer with a 500
    failing: Vec<String>,
    /// When set, every detail fetch waits here before answering
    barrier: Option<Arc<Barrier>>,
    pub list_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut source = Self::default();
        for entry in entries {
            let url = detail_url(entry.id);
            source.refs.push(CatalogRef {
                name: entry.name.clone(),
                detail_url: url.clone(),
            });
            source.details.insert(url, entry);
        }
        source
    }

    pub fn failing_detail(mut self, id: u64) -> Self {
        self.failing.push(detail_url(id));
        self
    }

    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }
}

pub fn detail_url(id: u64) -> String {
    format!("fake://pokemon/{}/", id)
}

#[async_trait]
impl CatalogSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_page(&self, limit: u32, offset: u32) -> Result<Vec<CatalogRef>, UpstreamError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .refs
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_detail(&self, url: &str) -> Result<CatalogEntry, UpstreamError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        if self.failing.iter().any(|u| u == url) {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: 500,
            });
        }

        self.details
            .get(url)
            .cloned()
            .ok_or_else(|| UpstreamError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// The two-entry catalog used by the end-to-end scenarios
pub fn starter_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(1, "bulbasaur", "https://img/1.png", ["grass", "poison"]),
        CatalogEntry::new(4, "charmander", "https://img/4.png", ["fire"]),
    ]
}

pub fn settings() -> UpstreamSettings {
    UpstreamSettings::default()
}

pub fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
