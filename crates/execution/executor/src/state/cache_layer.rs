// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::checkpoints::{CheckpointEntry, CheckpointLayer};
use std::{
    collections::{hash_map::Entry::Occupied, HashMap},
    hash::Hash,
};
use tvm_statedb::Result as DbResult;

/// A cached value. `None` records that the entry is absent.
#[derive(Debug, Clone)]
pub(super) struct CacheEntry<V> {
    pub value: Option<V>,
    /// The value differs from the one in the database.
    pub dirty: bool,
}

pub(super) struct CacheLayer<K, V> {
    cache: HashMap<K, CacheEntry<V>>,
    pub(super) checkpoints: Vec<CheckpointLayer<K, V>>,
}

impl<K, V> Default for CacheLayer<K, V> {
    fn default() -> Self {
        CacheLayer {
            cache: HashMap::new(),
            checkpoints: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> CacheLayer<K, V> {
    /// Reads through the cache, loading the entry from the database on a
    /// miss. A loaded entry is clean, so no checkpoint needs to record it.
    pub fn get_or_load<F>(&mut self, key: &K, load: F) -> DbResult<Option<V>>
    where F: FnOnce() -> DbResult<Option<V>> {
        if let Some(entry) = self.cache.get(key) {
            return Ok(entry.value.clone());
        }
        let value = load()?;
        self.cache.insert(
            key.clone(),
            CacheEntry {
                value: value.clone(),
                dirty: false,
            },
        );
        Ok(value)
    }

    /// Writes an entry and incorporates its old version into the last
    /// checkpoint if needed.
    pub fn set(&mut self, key: K, value: Option<V>) {
        let old = self
            .cache
            .insert(key.clone(), CacheEntry { value, dirty: true });
        if let Some(layer) = self.checkpoints.last_mut() {
            layer
                .entries
                .entry(key)
                .or_insert_with(|| CheckpointEntry::from_cache(old));
        }
    }

    /// Drops the cached entries rejected by `keep`. Only used when no
    /// checkpoint is alive.
    pub fn retain<F>(&mut self, mut keep: F)
    where F: FnMut(&K) -> bool {
        debug_assert!(self.checkpoints.is_empty());
        self.cache.retain(|key, _| keep(key));
    }

    /// Takes the dirty entries for commit, leaving them clean in the cache.
    pub fn drain_dirty(&mut self) -> Vec<(K, Option<V>)> {
        self.cache
            .iter_mut()
            .filter(|(_, entry)| entry.dirty)
            .map(|(key, entry)| {
                entry.dirty = false;
                (key.clone(), entry.value.clone())
            })
            .collect()
    }

    pub(super) fn restore(&mut self, key: K, entry: CheckpointEntry<V>) {
        match entry {
            CheckpointEntry::Recorded(old) => {
                self.cache.insert(key, old);
            }
            CheckpointEntry::Unchanged => {
                if let Occupied(e) = self.cache.entry(key) {
                    if e.get().dirty {
                        e.remove();
                    }
                }
            }
        }
    }
}
