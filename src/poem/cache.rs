use std::sync::{Arc, RwLock};

/// Most recent successfully generated poem, shared across requests.
///
/// Last write wins: concurrent generations race and whichever finishes
/// last is what readers see.
#[derive(Debug, Default)]
pub struct LatestResultCache {
    slot: RwLock<Option<Arc<str>>>,
}

impl LatestResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, text: &str) {
        let value: Arc<str> = Arc::from(text);
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(value);
    }

    pub fn get(&self) -> Option<String> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_deref().map(str::to_string)
    }
}
