// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{statedb::StorageTrait, Result};
use parking_lot::RwLock;
use std::{collections::BTreeMap, sync::Arc};

/// A durable store backed by an ordered map. Clones share the same map, so
/// read-only overlays of concurrent constant calls observe one snapshot
/// while a commit holds the write lock.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    contents: Arc<RwLock<BTreeMap<Vec<u8>, Box<[u8]>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self { Default::default() }

    pub fn len(&self) -> usize { self.contents.read().len() }

    pub fn is_empty(&self) -> bool { self.contents.read().is_empty() }
}

impl StorageTrait for InMemoryStorage {
    fn get(&self, key: &[u8]) -> Result<Option<Box<[u8]>>> {
        Ok(self.contents.read().get(key).cloned())
    }

    fn set(&self, key: &[u8], value: Box<[u8]>) -> Result<()> {
        self.contents.write().insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.contents.write().remove(key);
        Ok(())
    }

    fn delete_all(&self, prefix: &[u8]) -> Result<usize> {
        let mut contents = self.contents.write();
        let keys: Vec<Vec<u8>> = contents
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &keys {
            contents.remove(key);
        }
        Ok(keys.len())
    }
}
