//! In-memory terminology service for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use umls_types::{AtomRecord, Cui};

use crate::service::{Page, TerminologyService};
use crate::types::{ClosureError, ClosureResult};

/// Scripted service that counts every call.
#[derive(Debug, Default)]
pub struct MockService {
    atoms: HashMap<String, Vec<AtomRecord>>,
    descendants: HashMap<String, Vec<Vec<Cui>>>,
    names: HashMap<String, String>,
    atom_failures: HashMap<String, u16>,
    stalled_atoms: HashSet<String>,
    stall_started: Arc<Notify>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a concept's atoms as `(term_type, name, descendants)` triples.
    pub fn with_atoms(mut self, cui: &str, atoms: &[(&str, &str, Option<&str>)]) -> Self {
        let atoms = atoms
            .iter()
            .map(|(tty, name, desc)| AtomRecord::new(tty, *name, *desc))
            .collect();
        self.atoms.insert(cui.to_string(), atoms);
        self
    }

    /// Registers a descendant listing; each inner slice is one page.
    pub fn with_descendants(mut self, url: &str, pages: &[&[&str]]) -> Self {
        let pages = pages
            .iter()
            .map(|page| page.iter().map(|c| Cui::new(*c)).collect())
            .collect();
        self.descendants.insert(url.to_string(), pages);
        self
    }

    pub fn with_name(mut self, cui: &str, name: &str) -> Self {
        self.names.insert(cui.to_string(), name.to_string());
        self
    }

    /// Makes every atom request for `cui` fail with `status`.
    pub fn failing_atoms(mut self, cui: &str, status: u16) -> Self {
        self.atom_failures.insert(cui.to_string(), status);
        self
    }

    /// Makes atom requests for `cui` hang until the caller gives up.
    pub fn stalling_atoms(mut self, cui: &str) -> Self {
        self.stalled_atoms.insert(cui.to_string());
        self
    }

    /// Notified each time a stalled atom request starts.
    pub fn stall_started(&self) -> Arc<Notify> {
        Arc::clone(&self.stall_started)
    }

    fn record(&self, key: String) {
        *self.calls.lock().unwrap().entry(key).or_insert(0) += 1;
    }

    fn count(&self, key: &str) -> usize {
        self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    /// Atom page requests made for `cui` (first pages only).
    pub fn atom_calls(&self, cui: &str) -> usize {
        self.count(&format!("atoms:{cui}:1"))
    }

    /// Descendant page requests made for `url` (first pages only).
    pub fn descendant_calls(&self, url: &str) -> usize {
        self.count(&format!("descendants:{url}:1"))
    }

    /// All descendant page requests, any URL, any page.
    pub fn total_descendant_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(key, _)| key.starts_with("descendants:"))
            .map(|(_, n)| n)
            .sum()
    }

    pub fn name_calls(&self, cui: &str) -> usize {
        self.count(&format!("name:{cui}"))
    }
}

fn not_found(url: String) -> ClosureError {
    ClosureError::RemoteService {
        url,
        status: Some(404),
        message: "Not Found".to_string(),
    }
}

#[async_trait]
impl TerminologyService for MockService {
    async fn atoms_page(&self, cui: &Cui, page_number: u32) -> ClosureResult<Page<AtomRecord>> {
        self.record(format!("atoms:{cui}:{page_number}"));
        tokio::task::yield_now().await;

        if self.stalled_atoms.contains(cui.as_str()) {
            self.stall_started.notify_one();
            std::future::pending::<()>().await;
        }

        if let Some(status) = self.atom_failures.get(cui.as_str()) {
            return Err(ClosureError::RemoteService {
                url: format!("mock://atoms/{cui}"),
                status: Some(*status),
                message: "scripted failure".to_string(),
            });
        }

        self.atoms
            .get(cui.as_str())
            .map(|atoms| Page::single(atoms.clone()))
            .ok_or_else(|| not_found(format!("mock://atoms/{cui}")))
    }

    async fn descendants_page(&self, url: &str, page_number: u32) -> ClosureResult<Page<Cui>> {
        self.record(format!("descendants:{url}:{page_number}"));
        tokio::task::yield_now().await;

        let pages = self
            .descendants
            .get(url)
            .ok_or_else(|| not_found(url.to_string()))?;
        let items = pages
            .get(page_number as usize - 1)
            .cloned()
            .unwrap_or_default();
        Ok(Page::new(items, page_number, pages.len() as u32))
    }

    async fn concept_name(&self, cui: &Cui) -> ClosureResult<String> {
        self.record(format!("name:{cui}"));
        tokio::task::yield_now().await;

        self.names
            .get(cui.as_str())
            .cloned()
            .ok_or_else(|| not_found(format!("mock://concept/{cui}")))
    }
}
