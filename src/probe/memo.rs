use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::request::ProbeResult;

/// In-memory results keyed by cache filename
#[derive(Clone, Default)]
pub struct ProbeMemo {
    entries: Arc<RwLock<HashMap<String, ProbeResult>>>,
}

impl ProbeMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cache_file_name: &str) -> Option<ProbeResult> {
        self.entries.read().ok()?.get(cache_file_name).cloned()
    }

    pub fn insert(&self, cache_file_name: &str, result: ProbeResult) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(cache_file_name.to_string(), result);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
