//! ==============================================================================
//! store.rs - deduplicated reading storage
//! ==============================================================================
//!
//! purpose:
//!     keeps, per device id, the set of distinct readings ever posted.
//!     entries are created on first post and never removed.
//!
//! relationships:
//!     - used by: api.rs (post and get handlers, behind a RwLock)
//!     - uses: domain.rs (Reading, with offset-aware equality)
//!
//! ==============================================================================

use crate::domain::Reading;
use crate::error::StoreError;

use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct ReadingStore {
    devices: HashMap<String, HashSet<Reading>>,
}

impl ReadingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// insert readings for `id`, skipping ones already stored
    ///
    /// a new id gets an entry even when `readings` is empty. returns every
    /// reading now held for the device, in no particular order.
    pub fn add_readings<I>(&mut self, id: &str, readings: I) -> Vec<Reading>
    where
        I: IntoIterator<Item = Reading>,
    {
        let set = self.devices.entry(id.to_string()).or_default();
        set.extend(readings);
        set.iter().cloned().collect()
    }

    /// all readings held for `id`
    pub fn get_readings(&self, id: &str) -> Result<Vec<Reading>, StoreError> {
        self.devices
            .get(id)
            .map(|set| set.iter().cloned().collect())
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    pub fn contains_device(&self, id: &str) -> bool {
        self.devices.contains_key(id)
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}
