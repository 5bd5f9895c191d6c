// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{
    cache_layer::{CacheEntry, CacheLayer},
    State,
};
use std::{collections::HashMap, hash::Hash};

/// An entry in the checkpoint
#[derive(Debug, Clone)]
pub(super) enum CheckpointEntry<V> {
    /// The entry has not been read or modified from the database.
    Unchanged,
    /// The cached version of the entry when it was first modified after the
    /// checkpoint.
    Recorded(CacheEntry<V>),
}

impl<V> CheckpointEntry<V> {
    pub fn from_cache(value: Option<CacheEntry<V>>) -> Self {
        match value {
            Some(v) => CheckpointEntry::Recorded(v),
            None => CheckpointEntry::Unchanged,
        }
    }
}

/// Entries are added lazily, only when the cached version is modified. An
/// entry missing from the layer is the same as in the cache.
pub(super) struct CheckpointLayer<K, V> {
    pub entries: HashMap<K, CheckpointEntry<V>>,
}

impl<K: Hash + Eq + Clone, V: Clone> CacheLayer<K, V> {
    fn checkpoint(&mut self) {
        self.checkpoints.push(CheckpointLayer {
            entries: HashMap::new(),
        });
    }

    /// Merges the last checkpoint into the previous one. The older record
    /// of an entry wins.
    fn discard_checkpoint(&mut self) {
        let layer = unwrap_or_return!(self.checkpoints.pop());
        if let Some(previous) = self.checkpoints.last_mut() {
            for (key, entry) in layer.entries {
                previous.entries.entry(key).or_insert(entry);
            }
        }
    }

    fn revert_to_checkpoint(&mut self) {
        let layer = unwrap_or_return!(self.checkpoints.pop());
        for (key, entry) in layer.entries {
            self.restore(key, entry);
        }
    }
}

impl State {
    /// Create a recoverable checkpoint of this state. Return the checkpoint
    /// index.
    pub fn checkpoint(&mut self) -> usize {
        self.accounts.get_mut().checkpoint();
        self.contracts.get_mut().checkpoint();
        self.codes.get_mut().checkpoint();
        self.storage.get_mut().checkpoint();
        self.checkpoints.push(self.global_stat);
        self.checkpoints.len() - 1
    }

    /// Merge last checkpoint with previous.
    pub fn discard_checkpoint(&mut self) {
        unwrap_or_return!(self.checkpoints.pop());
        self.accounts.get_mut().discard_checkpoint();
        self.contracts.get_mut().discard_checkpoint();
        self.codes.get_mut().discard_checkpoint();
        self.storage.get_mut().discard_checkpoint();
    }

    /// Revert to the last checkpoint and discard it.
    pub fn revert_to_checkpoint(&mut self) {
        self.global_stat = unwrap_or_return!(self.checkpoints.pop());
        self.accounts.get_mut().revert_to_checkpoint();
        self.contracts.get_mut().revert_to_checkpoint();
        self.codes.get_mut().revert_to_checkpoint();
        self.storage.get_mut().revert_to_checkpoint();
    }

    /// Reverts checkpoint `index` and every checkpoint created after it.
    pub fn revert_to(&mut self, index: usize) {
        while self.checkpoints.len() > index {
            self.revert_to_checkpoint();
        }
    }

    pub fn no_checkpoint(&self) -> bool { self.checkpoints.is_empty() }
}
